//! Minimal command execution around the line editor.
//!
//! Lines are split on whitespace only. The first word is looked up in the
//! builtin table; anything else is launched as an external program and
//! waited on.

mod builtins;

pub use builtins::{resolve_cd_target, BuiltinFn, Builtins};

use std::io::{self, Write};
use std::process::Command;

/// Whether the prompt loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Continue,
    Exit,
}

/// Output streams and environment available to a command.
pub struct ShellContext<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
    pub env_lookup: &'a dyn Fn(&str) -> Option<String>,
    pub builtins: &'a Builtins,
}

/// Split a line into words on runs of whitespace.
pub fn split_line(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Run one already-split command line.
pub fn execute(args: &[String], ctx: &mut ShellContext<'_>) -> io::Result<Status> {
    let Some(program) = args.first() else {
        return Ok(Status::Continue);
    };
    if let Some(builtin) = ctx.builtins.get(program) {
        tracing::debug!(builtin = %program, "running builtin");
        return builtin(args, ctx);
    }
    launch(program, &args[1..], ctx)
}

/// Spawn an external program in the foreground and wait for it.
fn launch(program: &str, rest: &[String], ctx: &mut ShellContext<'_>) -> io::Result<Status> {
    match Command::new(program).args(rest).status() {
        Ok(status) => {
            tracing::debug!(program, code = ?status.code(), "program exited");
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            writeln!(ctx.err, "lsh: {program}: command not found")?;
        }
        Err(err) => {
            writeln!(ctx.err, "lsh: {program}: {err}")?;
        }
    }
    Ok(Status::Continue)
}
