//! Editor — the viewer's state and its key handling.
//!
//! `Editor` bundles the document, cursor, viewport and status line into one
//! explicit value and plugs into k-term's event loop through [`App`]:
//!
//! ```text
//! paint → render(document, cursor, viewport, status)
//! key   → Ctrl-Q: quit | arrow: step cursor, scroll, refresh status | else: ignore
//! ```

use std::io;

use k_term::event_loop::{Action, App};
use k_term::input::Key;
use k_term::output::OutputBuffer;

use crate::cursor::{Cursor, Direction};
use crate::document::Document;
use crate::render;
use crate::status::StatusLine;
use crate::viewport::Viewport;

/// Everything the viewer knows.
#[derive(Debug, Clone)]
pub struct Editor {
    document: Document,
    cursor: Cursor,
    viewport: Viewport,
    status: StatusLine,
}

impl Editor {
    /// A viewer over `document` with the cursor at the origin.
    #[must_use]
    pub fn new(document: Document, viewport: Viewport) -> Self {
        let cursor = Cursor::new();
        let mut status = StatusLine::new();
        status.update(&cursor);
        Self {
            document,
            cursor,
            viewport,
            status,
        }
    }

    #[inline]
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[inline]
    #[must_use]
    pub const fn status(&self) -> &StatusLine {
        &self.status
    }

    /// React to one key.
    pub fn handle_key(&mut self, key: Key) -> Action {
        if key.is_quit() {
            return Action::Quit;
        }

        if let Some(direction) = Direction::from_key(key) {
            self.move_cursor(direction);
        }

        Action::Continue
    }

    fn move_cursor(&mut self, direction: Direction) {
        self.cursor.step(direction, &self.document);
        self.viewport.scroll_to(self.cursor.y());
        self.status.update(&self.cursor);
        log::debug!(
            "{direction:?} -> ({}, {}) desired {}",
            self.cursor.x(),
            self.cursor.y(),
            self.cursor.desired_col()
        );
    }
}

impl App for Editor {
    fn on_key(&mut self, key: Key) -> Action {
        self.handle_key(key)
    }

    fn paint(&mut self, out: &mut OutputBuffer) -> io::Result<()> {
        render::render(
            &self.document,
            &self.cursor,
            &self.viewport,
            &self.status,
            out,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
