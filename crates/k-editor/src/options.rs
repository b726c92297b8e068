//! Viewer options.
//!
//! Values come from the command line; the binary fills an [`Options`] and
//! the rest of the crate reads from it.

use std::time::Duration;

use k_term::input::{DEFAULT_ESCAPE_TIMEOUT, KeyDecoder};

/// Runtime options for the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// How long the key decoder waits for each byte after ESC.
    pub escape_timeout: Duration,
}

impl Options {
    /// Options with the escape wait given in milliseconds.
    #[must_use]
    pub const fn with_escape_timeout_ms(ms: u64) -> Self {
        Self {
            escape_timeout: Duration::from_millis(ms),
        }
    }

    /// A key decoder configured from these options.
    #[must_use]
    pub const fn decoder(&self) -> KeyDecoder {
        KeyDecoder::with_escape_timeout(self.escape_timeout)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            escape_timeout: DEFAULT_ESCAPE_TIMEOUT,
        }
    }
}
