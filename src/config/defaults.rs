//! Default configuration constants.

/// Prompt glyph shown before the input area.
pub(super) const DEFAULT_PROMPT_SYMBOL: &str = "❯";
/// Candidate cap per completion request.
pub(super) const DEFAULT_MAX_CANDIDATES: usize = 100;
/// Starting line buffer capacity in chars.
pub(super) const DEFAULT_INITIAL_CAPACITY: usize = 1024;
/// Hard ceiling on line length in chars.
pub(super) const DEFAULT_MAX_LINE_LENGTH: usize = 1 << 20;
/// Config file name used for both local and global lookups.
pub(super) const CONFIG_FILE_NAME: &str = "lsh.toml";
/// Directory under the config root holding the global file.
pub(super) const CONFIG_DIR_NAME: &str = "lsh";
