//! Configuration data model.
//!
//! Struct/enum definitions plus default values. Source discovery and env
//! overrides live in sibling modules so precedence rules stay in one place.

use serde::Deserialize;

use super::defaults::{
    DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_CANDIDATES, DEFAULT_MAX_LINE_LENGTH,
    DEFAULT_PROMPT_SYMBOL,
};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub prompt: PromptConfig,
    pub display: DisplayConfig,
    pub completion: CompletionConfig,
    pub editor: EditorConfig,
}

/// Prompt appearance.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PromptConfig {
    /// Glyph printed before the input area; a single space follows it.
    pub symbol: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_PROMPT_SYMBOL.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Tab-completion limits.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CompletionConfig {
    /// Upper bound on candidates gathered per completion request.
    pub max_candidates: usize,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

/// Line buffer sizing, in characters.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EditorConfig {
    pub initial_capacity: usize,
    /// Growth past this length fails the read with an allocation error.
    pub max_line_length: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}
