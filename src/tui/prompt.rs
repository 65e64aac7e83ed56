//! Prompt rendering helpers for the line editor.

use crate::tui::settings;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::QueueableCommand;
use std::io::{self, Write};

/// Prompt glyph plus styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    symbol: String,
    color: bool,
}

impl Prompt {
    pub fn new(symbol: impl Into<String>, color: bool) -> Self {
        Self {
            symbol: symbol.into(),
            color,
        }
    }

    /// Plain prompt text as it appears on screen.
    pub fn text(&self) -> String {
        format!("{}{}", self.symbol, settings::PROMPT_SPACER)
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Queue the prompt with color/styling.
    pub fn write<W>(&self, out: &mut W) -> io::Result<()>
    where
        W: Write + QueueableCommand,
    {
        if self.color {
            out.queue(PrintStyledContent(
                self.symbol.as_str().with(settings::COLOR_PROMPT_SYMBOL),
            ))?;
            out.queue(Print(settings::PROMPT_SPACER))?;
        } else {
            out.queue(Print(self.text()))?;
        }
        Ok(())
    }
}
