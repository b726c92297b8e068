//! Cursor — position tracking with a remembered column.
//!
//! The `Cursor` holds a row index `y`, a byte offset `x` into that row, and
//! a desired column used by vertical movement. It does not own or reference
//! the document; the document is passed to [`Cursor::step`].
//!
//! # Limits
//!
//! `x` may sit one past the last byte of its row (`0 ..= row.len()`), and
//! `y` always names an existing row. On an empty document the cursor stays
//! at the origin and every move is a no-op.
//!
//! # Wrapping
//!
//! Left at column 0 goes to the end of the previous row; Right at the end
//! of a row goes to the start of the next one.
//!
//! # Desired column
//!
//! Moving down through a short row and back up to a long row returns to
//! the original column rather than to the short row's end. Horizontal
//! moves set the desired column to `x`. Vertical moves first raise it to
//! `x` if the cursor has drifted further right, then clamp `x` to the new
//! row's length without touching the remembered value.

use k_term::input::Key;

use crate::document::Document;

/// One of the four cursor movement commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The direction an arrow key stands for; `None` for other keys.
    #[must_use]
    pub const fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Up => Some(Self::Up),
            Key::Down => Some(Self::Down),
            Key::Left => Some(Self::Left),
            Key::Right => Some(Self::Right),
            Key::Char(_) | Key::Escape => None,
        }
    }
}

/// A cursor in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Byte offset into the current row.
    x: usize,

    /// Current row index.
    y: usize,

    /// Column vertical moves try to return to.
    desired_col: usize,
}

impl Cursor {
    /// A cursor at the origin.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            x: 0,
            y: 0,
            desired_col: 0,
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// Byte column (0-indexed).
    #[inline]
    #[must_use]
    pub const fn x(&self) -> usize {
        self.x
    }

    /// Row (0-indexed).
    #[inline]
    #[must_use]
    pub const fn y(&self) -> usize {
        self.y
    }

    /// The desired column for vertical movement.
    #[inline]
    #[must_use]
    pub const fn desired_col(&self) -> usize {
        self.desired_col
    }

    /// Whether the cursor satisfies `y < num_rows` and `x <= row[y].len()`.
    ///
    /// On an empty document only the origin is acceptable.
    #[must_use]
    pub fn is_within(&self, doc: &Document) -> bool {
        if doc.is_empty() {
            return self.x == 0 && self.y == 0;
        }
        doc.row_len(self.y).is_some_and(|len| self.x <= len)
    }

    // -- Movement -----------------------------------------------------------

    /// Apply one movement command.
    pub fn step(&mut self, direction: Direction, doc: &Document) {
        if doc.is_empty() {
            return;
        }

        match direction {
            Direction::Left => self.move_left(doc),
            Direction::Right => self.move_right(doc),
            Direction::Up => self.move_up(doc),
            Direction::Down => self.move_down(doc),
        }

        debug_assert!(self.is_within(doc), "cursor escaped the document: {self:?}");
    }

    fn move_left(&mut self, doc: &Document) {
        if self.x > 0 {
            self.x -= 1;
        } else if self.y > 0 {
            self.y -= 1;
            self.x = row_len(doc, self.y);
        }
        self.desired_col = self.x;
    }

    fn move_right(&mut self, doc: &Document) {
        if self.x < row_len(doc, self.y) {
            self.x += 1;
        } else if self.y + 1 < doc.num_rows() {
            self.y += 1;
            self.x = 0;
        }
        self.desired_col = self.x;
    }

    fn move_up(&mut self, doc: &Document) {
        if self.y == 0 {
            return;
        }
        self.desired_col = self.desired_col.max(self.x);
        self.y -= 1;
        self.x = self.desired_col.min(row_len(doc, self.y));
    }

    fn move_down(&mut self, doc: &Document) {
        if self.y + 1 >= doc.num_rows() {
            return;
        }
        self.desired_col = self.desired_col.max(self.x);
        self.y += 1;
        self.x = self.desired_col.min(row_len(doc, self.y));
    }
}

/// Length of row `y`; 0 if it doesn't exist.
fn row_len(doc: &Document, y: usize) -> usize {
    doc.row_len(y).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
