//! Unified error types for the editor and its configuration.

use std::fmt;
use std::io;

// ---------------------------------------------------------------------------
// TerminalError
// ---------------------------------------------------------------------------

/// Errors raised while switching the terminal line discipline.
#[derive(Debug)]
pub enum TerminalError {
    /// stdin is not attached to a terminal device.
    NotATerminal,
    /// The device query/set call failed.
    Io(io::Error),
}

impl fmt::Display for TerminalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotATerminal => write!(f, "stdin is not a terminal"),
            Self::Io(e) => write!(f, "terminal mode: {e}"),
        }
    }
}

impl std::error::Error for TerminalError {}

impl From<io::Error> for TerminalError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// EditorError
// ---------------------------------------------------------------------------

/// Fatal errors from one `read_line` call.
#[derive(Debug)]
pub enum EditorError {
    Terminal(TerminalError),
    /// The line buffer could not grow to hold `requested` characters.
    Allocation { requested: usize },
    /// Reading keystrokes or writing redraws failed.
    Io(io::Error),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(e) => write!(f, "terminal: {e}"),
            Self::Allocation { requested } => {
                write!(f, "allocation error: cannot grow line to {requested} chars")
            }
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for EditorError {}

impl From<TerminalError> for EditorError {
    fn from(e: TerminalError) -> Self {
        Self::Terminal(e)
    }
}

impl From<io::Error> for EditorError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}
