//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`LSH_PROMPT`, `NO_COLOR`, `LSH_MAX_CANDIDATES`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./lsh.toml in the current directory
//! 4. $XDG_CONFIG_HOME/lsh/lsh.toml (or ~/.config/lsh/lsh.toml)
//! 5. Built-in defaults

mod defaults;
mod env;
mod loader;
mod sources;
mod types;

pub use loader::load_config;
pub use sources::config_root_dir;
pub use types::{CompletionConfig, Config, DisplayConfig, EditorConfig, PromptConfig};
