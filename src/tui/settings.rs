//! Centralized, hardcoded UI settings for the line editor.
//!
//! This is the single place to tweak prompt glyph spacing, candidate list
//! layout, and colors.

use crossterm::style::Color;

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

pub const PROMPT_SPACER: &str = " ";

// ---------------------------------------------------------------------------
// Raw-mode output
// ---------------------------------------------------------------------------

/// Output post-processing is off in raw mode, so line feeds need an explicit CR.
pub const NEWLINE: &str = "\r\n";
pub const INTERRUPT_ECHO: &str = "^C";

// ---------------------------------------------------------------------------
// Completion list
// ---------------------------------------------------------------------------

pub const CANDIDATE_SEPARATOR: &str = "  ";

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub const COLOR_PROMPT_SYMBOL: Color = Color::Blue;
pub const COLOR_CANDIDATE_DIRECTORY: Color = Color::Blue;
pub const COLOR_ERROR: Color = Color::Red;
