//! Terminal user-interface building blocks.
//!
//! This module hosts the line editor and its primitives. Raw-mode control,
//! key decoding, buffer editing, and screen output live in separate files so
//! the event loop in `input` only wires them together.

pub mod input;
pub mod keys;
pub mod line_buffer;
pub mod prompt;
pub mod render;
pub mod settings;
pub mod signals;
pub mod terminal;

pub use input::{read_plain_line, LineEditor, LineResult, SystemLineEditor};
pub use keys::{KeyDecoder, KeyEvent};
pub use line_buffer::LineBuffer;
pub use prompt::Prompt;
pub use render::Renderer;
pub use terminal::{CrosstermTerminal, RawModeGuard, TerminalMode, TerminalState};
