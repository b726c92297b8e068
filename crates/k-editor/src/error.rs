//! Error type for the editor core and the binary.
//!
//! Every variant is fatal: the viewer restores the terminal, prints the
//! error and exits. Nothing here is retried.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Anything that can stop the viewer.
#[derive(Debug, Error)]
pub enum Error {
    /// The file named on the command line couldn't be opened or read.
    #[error("cannot load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The terminal's dimensions couldn't be determined.
    #[error("cannot query terminal size: {0}")]
    TerminalSize(#[source] io::Error),

    /// Raw mode couldn't be entered.
    #[error("cannot enter raw mode: {0}")]
    RawMode(#[source] io::Error),

    /// Reading keys or writing frames failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result alias for fallible editor operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_names_the_path() {
        let err = Error::Load {
            path: PathBuf::from("notes.txt"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("cannot load notes.txt: "), "{msg}");
    }

    #[test]
    fn io_error_converts_with_question_mark() {
        fn fails() -> Result<()> {
            Err(io::Error::other("boom"))?;
            Ok(())
        }
        assert_eq!(fails().unwrap_err().to_string(), "boom");
    }

    #[test]
    fn terminal_size_error_message() {
        let err = Error::TerminalSize(io::Error::other("not a tty"));
        assert_eq!(err.to_string(), "cannot query terminal size: not a tty");
    }
}
