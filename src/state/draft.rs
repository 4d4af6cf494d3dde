//! Draft input editing (pure state transitions).
//!
//! The uncommitted text the user is composing, with a cursor. All methods
//! are pure mutations on owned state - no side effects, testable without a
//! terminal. Cursor positions are byte offsets kept on `char` boundaries.

/// Current uncommitted input text plus cursor position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftInput {
    text: String,
    /// Byte offset into `text`, always on a char boundary.
    cursor: usize,
}

impl DraftInput {
    /// Empty draft with the cursor at the start.
    pub fn new() -> Self {
        Self::default()
    }

    /// The draft text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position as a byte offset into the text.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True when the draft is empty or whitespace-only.
    ///
    /// A blank draft must never be sent (silent no-op, not an error).
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Insert a character at the cursor and advance past it.
    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Delete the character before the cursor, if any.
    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.text.remove(prev);
            self.cursor = prev;
        }
    }

    /// Move the cursor one character left, saturating at the start.
    pub fn cursor_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    /// Move the cursor one character right, saturating at the end.
    pub fn cursor_right(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    /// Discard the draft and reset the cursor.
    ///
    /// Called synchronously at send time, before the request resolves; the
    /// cleared text is never restored, even on failure.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Byte offset of the char boundary before the cursor, if not at start.
    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor].char_indices().last().map(|(i, _)| i)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "draft_tests.rs"]
mod tests;
