//! Interactive line editing with cursor movement and tab completion.
//!
//! The editor exposes one blocking call, `LineEditor::read_line`, so the
//! caller owns what happens to a line while this module owns the terminal
//! mechanics of producing it.

use crate::completion::{Completer, DirectoryLister, FsLister};
use crate::config::{Config, EditorConfig};
use crate::error::EditorError;
use crate::tui::keys::{KeyDecoder, KeyEvent};
use crate::tui::line_buffer::LineBuffer;
use crate::tui::prompt::Prompt;
use crate::tui::render::Renderer;
use crate::tui::terminal::{CrosstermTerminal, RawModeGuard, TerminalMode};
use std::io::{self, BufRead, Read, Write};

/// Result of reading one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineResult {
    /// User submitted a line (possibly empty).
    Line(String),
    /// Input stream closed before anything was typed.
    EndOfInput,
}

/// Environment lookup backed by the process environment.
pub type EnvLookup = fn(&str) -> Option<String>;

/// Editor wired to the real terminal, filesystem, and environment.
pub type SystemLineEditor = LineEditor<CrosstermTerminal, FsLister, EnvLookup>;

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Line editor over a terminal controller and a completion engine.
pub struct LineEditor<T, L, E> {
    terminal: T,
    completer: Completer<L, E>,
    renderer: Renderer,
    initial_capacity: usize,
    max_line_length: usize,
}

impl SystemLineEditor {
    /// Build an editor for the controlling terminal from runtime config.
    pub fn from_config(config: &Config) -> Self {
        LineEditor::new(
            CrosstermTerminal,
            Completer::new(
                FsLister,
                process_env as EnvLookup,
                config.completion.max_candidates,
            ),
            Renderer::new(Prompt::new(
                config.prompt.symbol.clone(),
                config.display.color,
            )),
            &config.editor,
        )
    }
}

impl<T, L, E> LineEditor<T, L, E>
where
    T: TerminalMode,
    L: DirectoryLister,
    E: Fn(&str) -> Option<String>,
{
    pub fn new(
        terminal: T,
        completer: Completer<L, E>,
        renderer: Renderer,
        limits: &EditorConfig,
    ) -> Self {
        Self {
            terminal,
            completer,
            renderer,
            initial_capacity: limits.initial_capacity,
            max_line_length: limits.max_line_length,
        }
    }

    pub fn prompt(&self) -> &Prompt {
        self.renderer.prompt()
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Read one line from stdin, echoing to stdout.
    pub fn read_line(&mut self) -> Result<LineResult, EditorError> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout().lock();
        self.read_line_from(&mut input, &mut output)
    }

    /// Read one line from `input`, drawing to `output`.
    ///
    /// Raw mode is held for exactly the duration of the call and restored on
    /// every return path, errors included.
    pub fn read_line_from<R: Read, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<LineResult, EditorError> {
        let _guard = RawModeGuard::acquire(&mut self.terminal)?;
        let buffer = LineBuffer::with_limits(self.initial_capacity, self.max_line_length);
        edit_line(input, output, buffer, &self.renderer, &self.completer)
    }
}

/// Event loop for one line; runs with the terminal already in raw mode.
fn edit_line<R, W, L, E>(
    input: &mut R,
    output: &mut W,
    mut buffer: LineBuffer,
    renderer: &Renderer,
    completer: &Completer<L, E>,
) -> Result<LineResult, EditorError>
where
    R: Read,
    W: Write,
    L: DirectoryLister,
    E: Fn(&str) -> Option<String>,
{
    let mut decoder = KeyDecoder::new();
    let mut edited = false;
    renderer.begin(output)?;

    loop {
        let key = match read_byte(input)? {
            Some(byte) => match decoder.feed(byte) {
                Some(key) => key,
                None => continue,
            },
            None => decoder.finish(),
        };
        tracing::trace!(?key, cursor = buffer.cursor(), "key event");

        match key {
            KeyEvent::Enter => {
                renderer.finish(output)?;
                return Ok(LineResult::Line(buffer.as_string()));
            }
            KeyEvent::Eof => {
                renderer.finish(output)?;
                if !edited {
                    return Ok(LineResult::EndOfInput);
                }
                return Ok(LineResult::Line(buffer.as_string()));
            }
            KeyEvent::EndOfTransmission => {
                // Ctrl-D only closes input on an empty line.
                if buffer.is_empty() {
                    renderer.finish(output)?;
                    return Ok(LineResult::EndOfInput);
                }
            }
            KeyEvent::Interrupt => {
                renderer.interrupted(output)?;
                return Ok(LineResult::Line(String::new()));
            }
            KeyEvent::Printable(ch) => {
                buffer.insert(ch)?;
                edited = true;
                renderer.inserted(output, &buffer)?;
            }
            KeyEvent::Backspace => {
                if let Some(removed) = buffer.delete_before_cursor() {
                    edited = true;
                    renderer.deleted(output, &buffer, removed)?;
                }
            }
            KeyEvent::ArrowLeft => {
                if buffer.move_cursor(-1) {
                    renderer.moved_left(output, &buffer)?;
                }
            }
            KeyEvent::ArrowRight => {
                if buffer.move_cursor(1) {
                    renderer.moved_right(output, &buffer)?;
                }
            }
            KeyEvent::Tab => {
                let candidates = completer.complete(&buffer.completion_request());
                if let Some(only) = candidates.single() {
                    buffer.replace_token(&only.text)?;
                    edited = true;
                    renderer.redraw_line(output, &buffer)?;
                } else if !candidates.is_empty() {
                    renderer.show_candidates(output, &candidates, &buffer)?;
                }
            }
            KeyEvent::OtherEscape | KeyEvent::Ignored => {}
        }
    }
}

/// Blocking one-byte read; `None` at end of stream.
fn read_byte<R: Read>(input: &mut R) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match input.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}

/// Cooked-mode fallback for non-terminal input: prompt, then read a whole line.
pub fn read_plain_line<R, W>(input: &mut R, output: &mut W, prompt: &Prompt) -> io::Result<LineResult>
where
    R: BufRead,
    W: Write,
{
    output.write_all(prompt.text().as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(LineResult::EndOfInput);
    }
    Ok(LineResult::Line(
        line.trim_end_matches(['\n', '\r']).to_string(),
    ))
}
