//! Editable line buffer with an independent cursor.
//!
//! Storage is a `Vec<char>` so the cursor is a plain char index and every
//! edit is a shift within one contiguous sequence. Growth goes through
//! `try_reserve_exact` so an exhausted allocator surfaces as an error instead
//! of aborting while the terminal is still in raw mode.

use crate::completion::{CompletionRequest, Role};
use crate::error::EditorError;
use std::ops::Range;
use unicode_width::UnicodeWidthChar;

/// Terminal cells a char occupies (2 for wide CJK, 0 for combining marks).
pub fn char_columns(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// In-progress input line.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    content: Vec<char>,
    cursor: usize,
    max_len: usize,
}

impl LineBuffer {
    /// Create an empty buffer with `initial_capacity` chars reserved.
    ///
    /// The buffer refuses to grow past `max_len` chars.
    pub fn with_limits(initial_capacity: usize, max_len: usize) -> Self {
        Self {
            content: Vec::with_capacity(initial_capacity.min(max_len)),
            cursor: 0,
            max_len,
        }
    }

    /// Live character count.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Cursor position as a char index in `0..=len`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Reserved storage in chars.
    pub fn capacity(&self) -> usize {
        self.content.capacity()
    }

    /// Display columns taken by the chars in `range`, clamped to the line.
    pub fn columns(&self, range: Range<usize>) -> usize {
        let end = range.end.min(self.content.len());
        let start = range.start.min(end);
        self.content[start..end].iter().map(|&ch| char_columns(ch)).sum()
    }

    /// Chars from `start` to the end of the line.
    pub fn tail_from(&self, start: usize) -> String {
        self.content[start.min(self.content.len())..].iter().collect()
    }

    /// Full buffer contents.
    pub fn as_string(&self) -> String {
        self.content.iter().collect()
    }

    /// Insert one char at the cursor and advance past it.
    ///
    /// NUL is never stored; inserting it is a no-op.
    pub fn insert(&mut self, ch: char) -> Result<(), EditorError> {
        if ch == '\0' {
            return Ok(());
        }
        self.reserve_for(self.content.len() + 1)?;
        self.content.insert(self.cursor, ch);
        self.cursor += 1;
        Ok(())
    }

    /// Delete one char immediately before the cursor.
    ///
    /// Returns the removed char, or `None` when the cursor is at the start.
    pub fn delete_before_cursor(&mut self) -> Option<char> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.content.remove(self.cursor))
    }

    /// Move the cursor by `delta`, clamped to `0..=len`.
    ///
    /// Returns whether the cursor actually moved.
    pub fn move_cursor(&mut self, delta: isize) -> bool {
        let target = self
            .cursor
            .saturating_add_signed(delta)
            .min(self.content.len());
        let moved = target != self.cursor;
        self.cursor = target;
        moved
    }

    /// Char index where the token under completion begins.
    ///
    /// The token runs from just after the last whitespace char to the end of
    /// the line; without whitespace it is the whole buffer.
    pub fn token_start(&self) -> usize {
        self.content
            .iter()
            .rposition(|ch| ch.is_whitespace())
            .map(|idx| idx + 1)
            .unwrap_or(0)
    }

    /// Replace the trailing token with `new_text` and park the cursor at the end.
    pub fn replace_token(&mut self, new_text: &str) -> Result<(), EditorError> {
        let start = self.token_start();
        let new_len = start + new_text.chars().count();
        self.reserve_for(new_len)?;
        self.content.truncate(start);
        self.content.extend(new_text.chars().filter(|ch| *ch != '\0'));
        self.cursor = self.content.len();
        Ok(())
    }

    /// Derive the completion request for the current line.
    pub fn completion_request(&self) -> CompletionRequest {
        let start = self.token_start();
        let first_word = self.content[..start].iter().all(|ch| ch.is_whitespace());
        CompletionRequest {
            token: self.tail_from(start),
            role: if first_word {
                Role::Command
            } else {
                Role::Argument
            },
        }
    }

    /// Ensure room for `needed` chars, doubling capacity when short.
    fn reserve_for(&mut self, needed: usize) -> Result<(), EditorError> {
        if needed > self.max_len {
            return Err(EditorError::Allocation { requested: needed });
        }
        if needed <= self.content.capacity() {
            return Ok(());
        }
        let target = self
            .content
            .capacity()
            .saturating_mul(2)
            .max(needed)
            .min(self.max_len);
        self.content
            .try_reserve_exact(target - self.content.len())
            .map_err(|_| EditorError::Allocation { requested: target })?;
        tracing::trace!(capacity = self.content.capacity(), "line buffer grew");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with(text: &str) -> LineBuffer {
        let mut buffer = LineBuffer::with_limits(4, 1024);
        for ch in text.chars() {
            buffer.insert(ch).expect("insert");
        }
        buffer
    }

    fn assert_invariant(buffer: &LineBuffer) {
        assert!(buffer.cursor() <= buffer.len(), "cursor past end");
        assert!(buffer.len() <= buffer.capacity(), "length past capacity");
    }

    #[test]
    fn insert_appends_and_advances_cursor() {
        let buffer = buffer_with("ls");
        assert_eq!(buffer.as_string(), "ls");
        assert_eq!(buffer.cursor(), 2);
        assert_eq!(buffer.cursor(), buffer.len());
    }

    #[test]
    fn insert_mid_line_shifts_tail_right() {
        let mut buffer = buffer_with("lx");
        buffer.move_cursor(-1);
        buffer.insert('s').unwrap();
        assert_eq!(buffer.as_string(), "lsx");
        assert_eq!(buffer.cursor(), 2);
        assert_eq!(buffer.tail_from(1), "sx");
    }

    #[test]
    fn delete_before_cursor_at_start_is_noop() {
        let mut buffer = buffer_with("ab");
        buffer.move_cursor(-2);
        assert_eq!(buffer.delete_before_cursor(), None);
        assert_eq!(buffer.as_string(), "ab");
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn delete_mid_line_shifts_tail_left() {
        let mut buffer = buffer_with("abc");
        buffer.move_cursor(-1);
        assert_eq!(buffer.delete_before_cursor(), Some('b'));
        assert_eq!(buffer.as_string(), "ac");
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn insert_then_delete_restores_prior_state() {
        let mut buffer = buffer_with("echo hi");
        buffer.move_cursor(-3);
        let before = (buffer.as_string(), buffer.cursor());
        buffer.insert('X').unwrap();
        buffer.delete_before_cursor();
        assert_eq!((buffer.as_string(), buffer.cursor()), before);
    }

    #[test]
    fn cursor_moves_clamp_at_boundaries() {
        let mut buffer = buffer_with("ab");
        assert!(!buffer.move_cursor(1), "right at end is a no-op");
        assert_eq!(buffer.cursor(), 2);
        assert!(buffer.move_cursor(-5));
        assert_eq!(buffer.cursor(), 0);
        assert!(!buffer.move_cursor(-1), "left at start is a no-op");
        assert!(buffer.move_cursor(99));
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn growth_doubles_capacity() {
        let mut buffer = LineBuffer::with_limits(2, 1024);
        for ch in "abc".chars() {
            buffer.insert(ch).unwrap();
        }
        assert!(buffer.capacity() >= 4, "capacity {}", buffer.capacity());
        assert_invariant(&buffer);
    }

    #[test]
    fn growth_past_limit_is_an_allocation_error() {
        let mut buffer = LineBuffer::with_limits(2, 3);
        for ch in "abc".chars() {
            buffer.insert(ch).unwrap();
        }
        let err = buffer.insert('d').unwrap_err();
        assert!(
            matches!(err, EditorError::Allocation { requested: 4 }),
            "got: {err}"
        );
        assert_eq!(buffer.as_string(), "abc", "failed insert leaves buffer intact");
    }

    #[test]
    fn nul_is_never_stored() {
        let mut buffer = buffer_with("a");
        buffer.insert('\0').unwrap();
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn replace_token_without_whitespace_replaces_whole_line() {
        let mut buffer = buffer_with("fooba");
        buffer.move_cursor(-3);
        buffer.replace_token("foobar").unwrap();
        assert_eq!(buffer.as_string(), "foobar");
        assert_eq!(buffer.cursor(), 6);
    }

    #[test]
    fn replace_token_keeps_text_before_last_whitespace() {
        let mut buffer = buffer_with("cat sr");
        buffer.replace_token("src/").unwrap();
        assert_eq!(buffer.as_string(), "cat src/");
        assert_eq!(buffer.cursor(), buffer.len());
    }

    #[test]
    fn completion_request_roles() {
        let req = buffer_with("gi").completion_request();
        assert_eq!(req.token, "gi");
        assert_eq!(req.role, Role::Command);

        let req = buffer_with("  gi").completion_request();
        assert_eq!(req.token, "gi");
        assert_eq!(req.role, Role::Command, "leading blanks still mean first word");

        let req = buffer_with("git st").completion_request();
        assert_eq!(req.token, "st");
        assert_eq!(req.role, Role::Argument);

        let req = buffer_with("git ").completion_request();
        assert_eq!(req.token, "");
        assert_eq!(req.role, Role::Argument);
    }

    #[test]
    fn multibyte_chars_occupy_one_cursor_step() {
        let mut buffer = buffer_with("aéz");
        assert_eq!(buffer.len(), 3);
        buffer.move_cursor(-1);
        buffer.delete_before_cursor();
        assert_eq!(buffer.as_string(), "az");
    }

    #[test]
    fn columns_count_display_width() {
        let buffer = buffer_with("a中e\u{301}");
        assert_eq!(buffer.columns(0..buffer.len()), 4, "wide is 2, combining is 0");
        assert_eq!(buffer.columns(1..2), 2);
        assert_eq!(buffer.columns(3..99), 0, "range is clamped to the line");
        assert_eq!(char_columns('x'), 1);
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Insert(char),
            Delete,
            Move(isize),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                proptest::char::range('a', 'z').prop_map(Op::Insert),
                Just(Op::Delete),
                (-5isize..5).prop_map(Op::Move),
            ]
        }

        proptest! {
            #[test]
            fn cursor_length_capacity_invariant_holds(
                ops in proptest::collection::vec(op(), 0..200)
            ) {
                let mut buffer = LineBuffer::with_limits(1, 10_000);
                for op in ops {
                    match op {
                        Op::Insert(ch) => buffer.insert(ch).expect("insert"),
                        Op::Delete => {
                            buffer.delete_before_cursor();
                        }
                        Op::Move(delta) => {
                            buffer.move_cursor(delta);
                        }
                    }
                    prop_assert!(buffer.cursor() <= buffer.len());
                    prop_assert!(buffer.len() <= buffer.capacity());
                }
            }
        }
    }
}
