//! Incremental screen updates for the line editor.
//!
//! Every method is called after the `LineBuffer` has already changed and
//! leaves the terminal cursor on the column matching `LineBuffer::cursor`.
//! Cursor moves are measured in display columns, so wide chars take two.
//! Redraws are kept to the part of the line that actually moved.

use crate::completion::CompletionSet;
use crate::tui::line_buffer::{char_columns, LineBuffer};
use crate::tui::prompt::Prompt;
use crate::tui::settings;
use crossterm::cursor::{MoveLeft, MoveRight};
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Write};

/// Screen renderer bound to one prompt.
#[derive(Debug, Clone)]
pub struct Renderer {
    prompt: Prompt,
}

impl Renderer {
    pub fn new(prompt: Prompt) -> Self {
        Self { prompt }
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// Draw the prompt for a fresh line.
    pub fn begin<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.prompt.write(out)?;
        out.flush()
    }

    /// Reflect a char inserted just before the cursor.
    pub fn inserted<W: Write>(&self, out: &mut W, buffer: &LineBuffer) -> io::Result<()> {
        let edit_point = buffer.cursor().saturating_sub(1);
        // Appending at the end: the echoed char moves the cursor by itself.
        out.queue(Print(buffer.tail_from(edit_point)))?;
        queue_move_left(out, tail_columns(buffer))?;
        out.flush()
    }

    /// Reflect `removed` taken out just before the (old) cursor.
    pub fn deleted<W: Write>(
        &self,
        out: &mut W,
        buffer: &LineBuffer,
        removed: char,
    ) -> io::Result<()> {
        let gap = char_columns(removed);
        queue_move_left(out, gap)?;
        out.queue(Print(buffer.tail_from(buffer.cursor())))?;
        // Blanks erase the cells the old line end occupied.
        out.queue(Print(" ".repeat(gap)))?;
        queue_move_left(out, tail_columns(buffer) + gap)?;
        out.flush()
    }

    /// Cursor stepped left over the char now under it.
    pub fn moved_left<W: Write>(&self, out: &mut W, buffer: &LineBuffer) -> io::Result<()> {
        let cursor = buffer.cursor();
        queue_move_left(out, buffer.columns(cursor..cursor + 1))?;
        out.flush()
    }

    /// Cursor stepped right over the char just before it.
    pub fn moved_right<W: Write>(&self, out: &mut W, buffer: &LineBuffer) -> io::Result<()> {
        let cursor = buffer.cursor();
        let columns = buffer.columns(cursor.saturating_sub(1)..cursor);
        if columns > 0 {
            out.queue(MoveRight(u16::try_from(columns).unwrap_or(u16::MAX)))?;
        }
        out.flush()
    }

    /// Repaint the whole line from the prompt, e.g. after accepting a completion.
    pub fn redraw_line<W: Write>(&self, out: &mut W, buffer: &LineBuffer) -> io::Result<()> {
        out.queue(Print("\r"))?;
        self.prompt.write(out)?;
        out.queue(Print(buffer.as_string()))?;
        out.queue(Clear(ClearType::UntilNewLine))?;
        queue_move_left(out, tail_columns(buffer))?;
        out.flush()
    }

    /// List candidates below the line, then reprint prompt and buffer.
    pub fn show_candidates<W: Write>(
        &self,
        out: &mut W,
        candidates: &CompletionSet,
        buffer: &LineBuffer,
    ) -> io::Result<()> {
        out.queue(Print(settings::NEWLINE))?;
        for candidate in candidates.iter() {
            if candidate.is_dir && self.prompt.color() {
                out.queue(PrintStyledContent(
                    candidate
                        .text
                        .as_str()
                        .with(settings::COLOR_CANDIDATE_DIRECTORY),
                ))?;
            } else {
                out.queue(Print(candidate.text.as_str()))?;
            }
            out.queue(Print(settings::CANDIDATE_SEPARATOR))?;
        }
        out.queue(Print(settings::NEWLINE))?;
        self.prompt.write(out)?;
        out.queue(Print(buffer.as_string()))?;
        queue_move_left(out, tail_columns(buffer))?;
        out.flush()
    }

    /// Move past the finished line.
    pub fn finish<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.queue(Print(settings::NEWLINE))?;
        out.flush()
    }

    /// Echo an abandoned line.
    pub fn interrupted<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.queue(Print(settings::INTERRUPT_ECHO))?;
        out.queue(Print(settings::NEWLINE))?;
        out.flush()
    }
}

/// Columns between the cursor and the end of the line.
fn tail_columns(buffer: &LineBuffer) -> usize {
    buffer.columns(buffer.cursor()..buffer.len())
}

fn queue_move_left<W: Write>(out: &mut W, columns: usize) -> io::Result<()> {
    if columns > 0 {
        out.queue(MoveLeft(u16::try_from(columns).unwrap_or(u16::MAX)))?;
    }
    Ok(())
}
