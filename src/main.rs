//! CLI entry point for lsh.

mod cli;

use clap::Parser;
use crossterm::style::Stylize;
use lsh::config::{load_config, Config};
use lsh::error::EditorError;
use lsh::shell::{self, Builtins, ShellContext, Status};
use lsh::tui::{read_plain_line, settings, LineEditor, LineResult};
use std::io::{self, IsTerminal};

fn main() {
    let args = cli::Args::parse();
    lsh::logging::init();
    if let Err(e) = lsh::tui::signals::install_termination_handler() {
        tracing::warn!(error = %e, "termination signals will not restore the terminal");
    }

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            report_error(&e.to_string(), !args.no_color);
            std::process::exit(1);
        }
    };
    apply_cli_overrides(&mut config, &args);

    // The raw-mode guard inside `read_line` has already restored the terminal
    // by the time an error reaches this point.
    if let Err(e) = run(&config) {
        report_error(&e.to_string(), config.display.color);
        std::process::exit(1);
    }
}

fn apply_cli_overrides(config: &mut Config, args: &cli::Args) {
    if let Some(symbol) = &args.prompt {
        config.prompt.symbol = symbol.clone();
    }
    if args.no_color {
        config.display.color = false;
    }
}

/// Prompt loop: read a line, split it, run it, until EOF or `exit`.
fn run(config: &Config) -> Result<(), EditorError> {
    let builtins = Builtins::standard();
    let env_lookup = |name: &str| std::env::var(name).ok();
    let interactive = io::stdin().is_terminal();
    let mut editor = LineEditor::from_config(config);
    tracing::info!(interactive, "starting prompt loop");

    loop {
        let result = if interactive {
            editor.read_line()?
        } else {
            read_plain_line(
                &mut io::stdin().lock(),
                &mut io::stdout().lock(),
                editor.prompt(),
            )?
        };
        let line = match result {
            LineResult::Line(line) => line,
            LineResult::EndOfInput => return Ok(()),
        };

        let words = shell::split_line(&line);
        let mut stdout = io::stdout();
        let mut stderr = io::stderr();
        let mut ctx = ShellContext {
            out: &mut stdout,
            err: &mut stderr,
            env_lookup: &env_lookup,
            builtins: &builtins,
        };
        if shell::execute(&words, &mut ctx)? == Status::Exit {
            return Ok(());
        }
    }
}

fn report_error(message: &str, color: bool) {
    if color {
        eprintln!("{} {message}", "error:".with(settings::COLOR_ERROR).bold());
    } else {
        eprintln!("error: {message}");
    }
}
