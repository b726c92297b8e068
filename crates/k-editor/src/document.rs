//! Document — the rows of the file being viewed.
//!
//! A `Document` is an ordered list of [`Row`]s, built once from a byte
//! stream and never modified afterwards. Rows are raw bytes: no UTF-8
//! validation, no decoding, one column per byte.
//!
//! # Line terminators
//!
//! Each input line is split on `\n`, then every trailing `\r` or `\n` is
//! stripped, so both Unix and DOS files load to the same rows. A final
//! line without a terminator is still a row. A file ending in a newline
//! does **not** get an extra empty row.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Row
// ---------------------------------------------------------------------------

/// One line of the document, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    chars: Vec<u8>,
}

impl Row {
    /// Build a row from one input line, stripping trailing CR/LF bytes.
    #[must_use]
    pub fn new(mut line: Vec<u8>) -> Self {
        while matches!(line.last(), Some(b'\r' | b'\n')) {
            line.pop();
        }
        Self { chars: line }
    }

    /// Length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True for a blank line.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The row's bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.chars
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// The loaded file: rows in file order, 0-indexed.
///
/// An empty document (zero rows) is legal. It is what the viewer shows
/// when started without a file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    rows: Vec<Row>,
}

impl Document {
    /// An empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Read every line from `reader`.
    ///
    /// # Errors
    ///
    /// Propagates read errors.
    pub fn from_reader(mut reader: impl BufRead) -> io::Result<Self> {
        let mut rows = Vec::new();
        loop {
            let mut line = Vec::new();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            rows.push(Row::new(line));
        }
        Ok(Self { rows })
    }

    /// Build a document from in-memory lines (terminators are stripped).
    #[must_use]
    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        Self {
            rows: lines
                .into_iter()
                .map(|l| Row::new(l.as_ref().to_vec()))
                .collect(),
        }
    }

    /// Load a file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`] naming `path` if the file can't be opened
    /// or read.
    pub fn load(path: &Path) -> Result<Self> {
        let load_err = |source| Error::Load {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(load_err)?;
        let doc = Self::from_reader(BufReader::new(file)).map_err(load_err)?;
        log::info!("loaded {} rows from {}", doc.num_rows(), path.display());
        Ok(doc)
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row `index`, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Byte length of row `index`, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn row_len(&self, index: usize) -> Option<usize> {
        self.row(index).map(Row::len)
    }

    /// All rows, in order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn doc(text: &[u8]) -> Document {
        Document::from_reader(text).unwrap()
    }

    fn bytes(d: &Document) -> Vec<&[u8]> {
        d.rows().map(Row::as_bytes).collect()
    }

    // -- Row ----------------------------------------------------------------

    #[test]
    fn row_strips_lf() {
        assert_eq!(Row::new(b"abc\n".to_vec()).as_bytes(), b"abc");
    }

    #[test]
    fn row_strips_crlf() {
        assert_eq!(Row::new(b"abc\r\n".to_vec()).as_bytes(), b"abc");
    }

    #[test]
    fn row_strips_every_trailing_terminator() {
        assert_eq!(Row::new(b"abc\r\r\n".to_vec()).as_bytes(), b"abc");
    }

    #[test]
    fn row_keeps_inner_cr() {
        assert_eq!(Row::new(b"a\rb\n".to_vec()).as_bytes(), b"a\rb");
    }

    #[test]
    fn row_len_matches_bytes() {
        let row = Row::new(b"hello\n".to_vec());
        assert_eq!(row.len(), 5);
        assert!(!row.is_empty());
        assert!(Row::new(b"\r\n".to_vec()).is_empty());
    }

    // -- Loading ------------------------------------------------------------

    #[test]
    fn empty_input_has_no_rows() {
        let d = doc(b"");
        assert!(d.is_empty());
        assert_eq!(d.num_rows(), 0);
        assert_eq!(d.row(0), None);
    }

    #[test]
    fn lf_file() {
        let d = doc(b"abc\nde\nfghij\n");
        assert_eq!(bytes(&d), vec![&b"abc"[..], b"de", b"fghij"]);
    }

    #[test]
    fn crlf_file_has_no_terminators() {
        let d = doc(b"abc\r\nde\r\nfghij\r\n");
        assert_eq!(d.num_rows(), 3);
        for row in d.rows() {
            assert!(!row.as_bytes().contains(&b'\r'));
            assert!(!row.as_bytes().contains(&b'\n'));
        }
    }

    #[test]
    fn last_line_without_newline() {
        let d = doc(b"one\ntwo");
        assert_eq!(bytes(&d), vec![&b"one"[..], b"two"]);
    }

    #[test]
    fn blank_lines_are_rows() {
        let d = doc(b"\n\nx\n");
        assert_eq!(d.num_rows(), 3);
        assert_eq!(d.row_len(0), Some(0));
        assert_eq!(d.row_len(2), Some(1));
    }

    #[test]
    fn non_utf8_bytes_are_kept() {
        let d = doc(b"\xff\xfe\n");
        assert_eq!(d.row(0).unwrap().as_bytes(), b"\xff\xfe");
    }

    #[test]
    fn from_lines_strips() {
        let d = Document::from_lines(["abc\n", "de"]);
        assert_eq!(bytes(&d), vec![&b"abc"[..], b"de"]);
    }

    #[test]
    fn row_len_out_of_range() {
        assert_eq!(doc(b"a\n").row_len(1), None);
    }

    // -- Files --------------------------------------------------------------

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"first\r\nsecond\n").unwrap();

        let d = Document::load(file.path()).unwrap();
        assert_eq!(bytes(&d), vec![&b"first"[..], b"second"]);
    }

    #[test]
    fn load_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        match Document::load(&path) {
            Err(Error::Load { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected load error, got {other:?}"),
        }
    }
}
