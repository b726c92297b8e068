//! Status line — cursor coordinates shown under the text area.

use std::fmt::Write;

use crate::cursor::Cursor;

/// Text of the status line, rebuilt after every key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusLine {
    text: String,
}

impl StatusLine {
    /// An empty status line.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Recompute from the cursor: `line:col`, both 1-indexed.
    pub fn update(&mut self, cursor: &Cursor) {
        self.text.clear();
        // Writing into a String can't fail.
        let _ = write!(self.text, "{}:{}", cursor.y() + 1, cursor.x() + 1);
    }

    /// The full status text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The status bytes clipped to `cols` terminal columns.
    #[must_use]
    pub fn truncated(&self, cols: usize) -> &[u8] {
        let bytes = self.text.as_bytes();
        &bytes[..bytes.len().min(cols)]
    }
}
