//! Shared test fixtures for editor, completion, and shell test modules.
//!
//! Keeping the fakes here stops each test module from rebuilding its own
//! temp-dir, lister, and terminal doubles.

use crate::completion::{DirEntryInfo, DirectoryLister};
use crate::error::TerminalError;
use crate::tui::line_buffer::char_columns;
use crate::tui::terminal::{TerminalMode, TerminalState};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!(
            "lsh-{prefix}-{}-{millis}-{suffix}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    /// Root directory path for this fixture.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// In-memory directory listings with a fixed, test-chosen order.
///
/// Directories that were never registered report `NotFound`.
#[derive(Debug, Default, Clone)]
pub struct MemoryLister {
    dirs: Vec<(PathBuf, Vec<DirEntryInfo>)>,
}

impl MemoryLister {
    pub fn with_dir(mut self, dir: &str, entries: Vec<DirEntryInfo>) -> Self {
        self.dirs.push((PathBuf::from(dir), entries));
        self
    }
}

impl DirectoryLister for MemoryLister {
    fn list(&self, dir: &Path, prefix: &str) -> io::Result<Vec<DirEntryInfo>> {
        self.dirs
            .iter()
            .find(|(path, _)| path == dir)
            .map(|(_, entries)| {
                entries
                    .iter()
                    .filter(|entry| entry.name.starts_with(prefix))
                    .cloned()
                    .collect()
            })
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such fixture directory"))
    }
}

/// Terminal controller that records enter/restore calls.
#[derive(Debug, Default)]
pub struct FakeTerminal {
    pub enters: usize,
    pub restores: usize,
    pub fail_enter: bool,
}

impl FakeTerminal {
    /// A controller whose `enter_raw` always fails, as on a non-TTY.
    pub fn failing() -> Self {
        Self {
            fail_enter: true,
            ..Self::default()
        }
    }
}

impl TerminalMode for FakeTerminal {
    fn enter_raw(&mut self) -> Result<TerminalState, TerminalError> {
        self.enters += 1;
        if self.fail_enter {
            return Err(TerminalError::NotATerminal);
        }
        Ok(TerminalState { was_raw: false })
    }

    fn restore(&mut self, _state: TerminalState) {
        self.restores += 1;
    }
}

/// Cell holding the right half of a wide char.
const WIDE_FILLER: char = '\0';

/// Minimal terminal model that replays editor output.
///
/// Understands printable text, `\r`, `\n`, and the CSI sequences the renderer
/// emits (`C`, `D`, `G`, `K`; SGR `m` is skipped). Wide chars take two cells
/// and combining marks none. Enough to check where the visible cursor ends up.
#[derive(Debug, Default)]
pub struct VirtualScreen {
    rows: Vec<Vec<char>>,
    row: usize,
    col: usize,
}

impl VirtualScreen {
    pub fn replay(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        let mut screen = Self {
            rows: vec![Vec::new()],
            ..Self::default()
        };
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\r' => screen.col = 0,
                '\n' => {
                    screen.row += 1;
                    if screen.rows.len() <= screen.row {
                        screen.rows.push(Vec::new());
                    }
                }
                '\x1b' if chars.peek() == Some(&'[') => {
                    chars.next();
                    let mut param = String::new();
                    let mut final_byte = None;
                    for c in chars.by_ref() {
                        if c.is_ascii_digit() || c == ';' {
                            param.push(c);
                        } else {
                            final_byte = Some(c);
                            break;
                        }
                    }
                    let n = param.parse::<usize>().unwrap_or(1);
                    match final_byte {
                        Some('C') => screen.col += n,
                        Some('D') => screen.col = screen.col.saturating_sub(n),
                        Some('G') => screen.col = n.saturating_sub(1),
                        Some('K') => screen.rows[screen.row].truncate(screen.col),
                        _ => {}
                    }
                }
                _ => screen.put(ch),
            }
        }
        screen
    }

    fn put(&mut self, ch: char) {
        let width = char_columns(ch);
        if width == 0 {
            return;
        }
        let line = &mut self.rows[self.row];
        while line.len() < self.col + width {
            line.push(' ');
        }
        line[self.col] = ch;
        for cell in &mut line[self.col + 1..self.col + width] {
            *cell = WIDE_FILLER;
        }
        self.col += width;
    }

    fn row_text(row: &[char]) -> String {
        row.iter().filter(|&&ch| ch != WIDE_FILLER).collect()
    }

    /// Text of the row holding the cursor.
    pub fn line(&self) -> String {
        Self::row_text(&self.rows[self.row])
    }

    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| Self::row_text(row)).collect()
    }

    /// Cursor column, zero-based.
    pub fn column(&self) -> usize {
        self.col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_screen_tracks_cursor_moves() {
        let screen = VirtualScreen::replay(b"abcd\x1b[2D\x1b[K\r\nxy\x1b[1C");
        assert_eq!(screen.lines(), vec!["ab", "xy"]);
        assert_eq!(screen.column(), 3);
    }

    #[test]
    fn virtual_screen_gives_wide_chars_two_cells() {
        let screen = VirtualScreen::replay("中b\x1b[3D".as_bytes());
        assert_eq!(screen.line(), "中b");
        assert_eq!(screen.column(), 0);
    }

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
    }

    #[test]
    fn memory_lister_preserves_seeded_order() {
        let lister = MemoryLister::default().with_dir(
            "/bin",
            vec![DirEntryInfo::file("zz", true), DirEntryInfo::file("aa", true)],
        );
        let names: Vec<String> = lister
            .list(Path::new("/bin"), "")
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["zz", "aa"]);
        assert!(lister.list(Path::new("/usr/bin"), "").is_err());
    }
}
