//! Viewport — which slice of the document is on screen.
//!
//! The terminal is split into a text area and two status rows at the
//! bottom. `row_offset` is the first document row shown in the text area.
//! [`Viewport::scroll_to`] moves the offset just far enough to keep a
//! given row visible.

use std::ops::Range;

use k_term::terminal::Size;

/// Rows reserved at the bottom of the screen for status output.
pub const STATUS_ROWS: usize = 2;

/// The visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    row_offset: usize,
    screen_rows: usize,
    screen_cols: usize,
}

impl Viewport {
    /// A viewport for a `rows × cols` terminal, scrolled to the top.
    #[must_use]
    pub const fn new(screen_rows: usize, screen_cols: usize) -> Self {
        Self {
            row_offset: 0,
            screen_rows,
            screen_cols,
        }
    }

    /// A viewport matching a queried terminal size.
    ///
    /// A terminal with no room for text below the status rows is accepted;
    /// every frame then shows only the status area.
    #[must_use]
    pub fn from_size(size: Size) -> Self {
        let viewport = Self::new(usize::from(size.rows), usize::from(size.cols));
        if viewport.text_rows() == 0 {
            log::warn!(
                "terminal has {} rows, no text rows left after {STATUS_ROWS} status rows",
                size.rows
            );
        }
        viewport
    }

    /// First document row on screen.
    #[inline]
    #[must_use]
    pub const fn row_offset(&self) -> usize {
        self.row_offset
    }

    /// Terminal height.
    #[inline]
    #[must_use]
    pub const fn screen_rows(&self) -> usize {
        self.screen_rows
    }

    /// Terminal width.
    #[inline]
    #[must_use]
    pub const fn screen_cols(&self) -> usize {
        self.screen_cols
    }

    /// Height of the text area.
    #[inline]
    #[must_use]
    pub const fn text_rows(&self) -> usize {
        self.screen_rows.saturating_sub(STATUS_ROWS)
    }

    /// Document rows to draw, never reaching past `num_rows`.
    #[must_use]
    pub fn visible_rows(&self, num_rows: usize) -> Range<usize> {
        let end = (self.row_offset + self.text_rows()).min(num_rows);
        self.row_offset.min(end)..end
    }

    /// Scroll so document row `y` is inside the text area.
    pub fn scroll_to(&mut self, y: usize) {
        let height = self.text_rows().max(1);
        if y < self.row_offset {
            self.row_offset = y;
        } else if y >= self.row_offset + height {
            self.row_offset = y + 1 - height;
        }
    }

    /// Terminal row (0-indexed) that document row `y` is drawn on.
    #[inline]
    #[must_use]
    pub const fn screen_row(&self, y: usize) -> usize {
        y.saturating_sub(self.row_offset)
    }
}
