//! CLI argument parsing via clap.

use clap::Parser;

/// A small interactive shell with a raw-mode line editor and tab completion.
#[derive(Debug, Parser)]
#[command(
    name = "lsh",
    version = lsh::build_info::VERSION,
    long_version = lsh::build_info::LONG_VERSION
)]
pub struct Args {
    /// Path to config file (default: ./lsh.toml or ~/.config/lsh/lsh.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Override the prompt symbol.
    #[arg(short = 'p', long = "prompt")]
    pub prompt: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}
