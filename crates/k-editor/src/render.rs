//! Renderer — one complete frame per call.
//!
//! The frame is composed in an [`OutputBuffer`]; the caller sends it to the
//! terminal with a single write. The cursor is hidden for the whole repaint
//! and shown again at its final position as the last thing in the frame.
//!
//! Frame layout, top to bottom:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ document rows                │  ← text_rows(), blank past the last row
//! ├──────────────────────────────┤
//! │ status line (line:col)       │
//! ├──────────────────────────────┤
//! │ (blank)                      │
//! └──────────────────────────────┘
//! ```
//!
//! Every line is cleared before it is drawn, so nothing from an earlier
//! frame survives. Rows wider than the terminal are clipped; there is no
//! horizontal scrolling.

use std::io;

use k_term::ansi;
use k_term::output::OutputBuffer;

use crate::cursor::Cursor;
use crate::document::Document;
use crate::status::StatusLine;
use crate::viewport::Viewport;

const LINE_BREAK: &[u8] = b"\r\n";

/// Paint `doc` as seen through `viewport` into `out`.
///
/// # Errors
///
/// Propagates write failures on `out` (which never happen for an
/// in-memory buffer).
pub fn render(
    doc: &Document,
    cursor: &Cursor,
    viewport: &Viewport,
    status: &StatusLine,
    out: &mut OutputBuffer,
) -> io::Result<()> {
    let cols = viewport.screen_cols();

    ansi::cursor_hide(out)?;
    ansi::cursor_home(out)?;

    draw_rows(doc, viewport, out)?;
    draw_status(viewport, status, out)?;

    ansi::cursor_to(out, cursor.x(), viewport.screen_row(cursor.y()))?;
    ansi::cursor_show(out)?;

    log::trace!("frame: {} bytes, {cols} cols", out.len());
    Ok(())
}

/// The text area: visible document rows, then blank lines to fill it.
fn draw_rows(doc: &Document, viewport: &Viewport, out: &mut OutputBuffer) -> io::Result<()> {
    let visible = viewport.visible_rows(doc.num_rows());
    let drawn = visible.len();

    for row in doc.rows().skip(visible.start).take(drawn) {
        ansi::clear_line(out)?;
        let bytes = row.as_bytes();
        out.push_bytes(&bytes[..bytes.len().min(viewport.screen_cols())]);
        out.push_bytes(LINE_BREAK);
    }

    for _ in drawn..viewport.text_rows() {
        ansi::clear_line(out)?;
        out.push_bytes(LINE_BREAK);
    }

    Ok(())
}

/// The two bottom rows: the status text, then an empty message row.
///
/// The last screen row gets no line break so the terminal doesn't scroll.
fn draw_status(viewport: &Viewport, status: &StatusLine, out: &mut OutputBuffer) -> io::Result<()> {
    let reserved = viewport.screen_rows() - viewport.text_rows();

    if reserved >= 1 {
        ansi::clear_line(out)?;
        out.push_bytes(status.truncated(viewport.screen_cols()));
    }
    if reserved >= 2 {
        out.push_bytes(LINE_BREAK);
        ansi::clear_line(out)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Direction;
    use pretty_assertions::assert_eq;

    fn frame(doc: &Document, cursor: &Cursor, viewport: &Viewport) -> Vec<u8> {
        let mut status = StatusLine::new();
        status.update(cursor);
        let mut out = OutputBuffer::new();
        render(doc, cursor, viewport, &status, &mut out).unwrap();
        out.as_bytes().to_vec()
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn exact_frame_for_small_terminal() {
        let doc = Document::from_lines(["abc", "de", "fghij"]);
        let vp = Viewport::new(5, 80);
        let got = frame(&doc, &Cursor::new(), &vp);

        let want: &[u8] = b"\x1b[?25l\x1b[H\
            \x1b[Kabc\r\n\
            \x1b[Kde\r\n\
            \x1b[Kfghij\r\n\
            \x1b[K1:1\r\n\
            \x1b[K\
            \x1b[1;1H\x1b[?25h";
        assert_eq!(String::from_utf8_lossy(&got), String::from_utf8_lossy(want));
    }

    #[test]
    fn frame_starts_hidden_and_ends_shown() {
        let doc = Document::from_lines(["x"]);
        let got = frame(&doc, &Cursor::new(), &Viewport::new(24, 80));
        assert!(got.starts_with(b"\x1b[?25l\x1b[H"));
        assert!(got.ends_with(b"\x1b[?25h"));
        assert_eq!(count(&got, b"\x1b[?25l"), 1);
        assert_eq!(count(&got, b"\x1b[?25h"), 1);
    }

    #[test]
    fn short_document_on_tall_terminal_never_reads_past_end() {
        let doc = Document::from_lines(["only"]);
        let vp = Viewport::new(40, 80);
        let got = frame(&doc, &Cursor::new(), &vp);

        assert_eq!(count(&got, b"only"), 1);
        // 38 text lines + status line, each cleared; plus the message row.
        assert_eq!(count(&got, b"\x1b[K"), 40);
        assert_eq!(count(&got, b"\r\n"), 39);
    }

    #[test]
    fn empty_document_draws_blank_text_area() {
        let got = frame(&Document::new(), &Cursor::new(), &Viewport::new(4, 10));
        let want: &[u8] = b"\x1b[?25l\x1b[H\
            \x1b[K\r\n\x1b[K\r\n\
            \x1b[K1:1\r\n\x1b[K\
            \x1b[1;1H\x1b[?25h";
        assert_eq!(got, want);
    }

    #[test]
    fn rows_are_clipped_to_width() {
        let doc = Document::from_lines(["0123456789"]);
        let got = frame(&doc, &Cursor::new(), &Viewport::new(3, 4));
        assert_eq!(count(&got, b"0123\r\n"), 1);
        assert_eq!(count(&got, b"4"), 0);
    }

    #[test]
    fn cursor_position_is_one_indexed() {
        let doc = Document::from_lines(["abc", "de"]);
        let mut c = Cursor::new();
        c.step(Direction::Down, &doc);
        c.step(Direction::Right, &doc);
        let got = frame(&doc, &c, &Viewport::new(10, 80));
        assert!(got.ends_with(b"\x1b[2;2H\x1b[?25h"));
        assert_eq!(count(&got, b"2:2"), 1);
    }

    #[test]
    fn scrolled_viewport_starts_at_offset() {
        let lines: Vec<String> = (0..10).map(|i| format!("row{i}")).collect();
        let doc = Document::from_lines(&lines);
        let mut vp = Viewport::new(5, 80);
        vp.scroll_to(6);

        let mut c = Cursor::new();
        for _ in 0..6 {
            c.step(Direction::Down, &doc);
        }
        let got = frame(&doc, &c, &vp);

        assert_eq!(count(&got, b"row3"), 0);
        assert_eq!(count(&got, b"row4"), 1);
        assert_eq!(count(&got, b"row6"), 1);
        assert_eq!(count(&got, b"row7"), 0);
        assert!(got.ends_with(b"\x1b[3;1H\x1b[?25h"));
    }

    #[test]
    fn raw_bytes_pass_through() {
        let doc = Document::from_lines([&b"\xff\x01z"[..]]);
        let got = frame(&doc, &Cursor::new(), &Viewport::new(3, 80));
        assert_eq!(count(&got, b"\x1b[K\xff\x01z\r\n"), 1);
    }
}
