//! lsh — a small interactive shell built around a raw-mode line editor.
//!
//! The editor reads keystrokes one at a time, keeps an editable buffer with a
//! movable cursor, and offers tab completion over PATH executables and
//! filesystem entries. Callers get one finished line per call.
//!
//! # Quick start
//!
//! ```no_run
//! use lsh::config::load_config;
//! use lsh::tui::{LineEditor, LineResult};
//!
//! let config = load_config(None).unwrap();
//! let mut editor = LineEditor::from_config(&config);
//! match editor.read_line().unwrap() {
//!     LineResult::Line(line) => println!("got {line:?}"),
//!     LineResult::EndOfInput => println!("bye"),
//! }
//! ```

pub mod build_info;
pub mod completion;
pub mod config;
pub mod error;
pub mod logging;
pub mod shell;
#[cfg(test)]
pub mod testsupport;
pub mod tui;
