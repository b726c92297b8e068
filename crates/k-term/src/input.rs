// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Terminal input — byte sources and the key decoder.
//
// Turns raw stdin bytes into logical keys: a literal byte, an unresolved
// Escape, or one of the four arrow keys. The arrows arrive as the three
// byte CSI sequences `ESC [ A` .. `ESC [ D`.
//
// # The Escape ambiguity
//
// A lone ESC byte is either the Escape key or the start of a sequence.
// After reading ESC the decoder asks the source for each follow-up byte
// with a bounded wait. If a byte doesn't show up in time the key is a
// plain Escape. Bytes of a sequence we don't recognise are dropped, never
// re-queued.
//
// # Sources
//
// The decoder reads through the [`ByteSource`] trait. [`Stdin`] is the
// real terminal, waiting with `poll(2)`. A `VecDeque<u8>` is a scripted
// source for tests and replays: an empty queue means "nothing arrived".

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

/// The escape byte (0x1B).
pub const ESC: u8 = 0x1B;

/// How long to wait for each byte following an ESC.
///
/// 100ms matches a terminal driver configured with `VTIME=1`.
pub const DEFAULT_ESCAPE_TIMEOUT: Duration = Duration::from_millis(100);

/// The byte a terminal sends for Ctrl + `key`.
///
/// Ctrl strips bits 5 and 6, so `ctrl(b'q')` is `0x11`.
#[inline]
#[must_use]
pub const fn ctrl(key: u8) -> u8 {
    key & 0x1F
}

// ─── Byte Sources ───────────────────────────────────────────────────────────

/// Somewhere raw input bytes come from.
pub trait ByteSource {
    /// Block until one byte is available and return it.
    ///
    /// # Errors
    ///
    /// Any read failure other than "no data yet". End of input is an
    /// [`io::ErrorKind::UnexpectedEof`] error.
    fn read_byte(&mut self) -> io::Result<u8>;

    /// Wait at most `timeout` for one byte.
    ///
    /// `Ok(None)` means nothing arrived in time. That is the normal poll
    /// result, not an error.
    ///
    /// # Errors
    ///
    /// Any read failure other than "no data yet".
    fn read_byte_within(&mut self, timeout: Duration) -> io::Result<Option<u8>>;
}

impl ByteSource for VecDeque<u8> {
    fn read_byte(&mut self) -> io::Result<u8> {
        self.pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input exhausted"))
    }

    fn read_byte_within(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
        Ok(self.pop_front())
    }
}

/// The process's standard input, read one byte at a time.
///
/// Meant to be used while a [`RawMode`](crate::terminal::RawMode) session
/// is active, so each keypress is delivered immediately.
#[derive(Debug, Default)]
pub struct Stdin;

impl Stdin {
    /// Create a handle on fd 0.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Wait up to `timeout_ms` (negative = forever) and read one byte.
    ///
    /// Interrupted and would-block outcomes collapse into `Ok(None)`.
    #[cfg(unix)]
    #[allow(clippy::unused_self)]
    fn poll_byte(&self, timeout_ms: libc::c_int) -> io::Result<Option<u8>> {
        let fd = libc::STDIN_FILENO;

        let ready = unsafe {
            let mut pfd = libc::pollfd {
                fd,
                events: libc::POLLIN,
                revents: 0,
            };
            libc::poll(&raw mut pfd, 1, timeout_ms)
        };

        if ready == 0 {
            return Ok(None);
        }
        if ready < 0 {
            return no_data_or(io::Error::last_os_error());
        }

        let mut byte = 0u8;
        let n = unsafe { libc::read(fd, (&raw mut byte).cast(), 1) };

        match n {
            1 => Ok(Some(byte)),
            0 => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed")),
            _ => no_data_or(io::Error::last_os_error()),
        }
    }
}

/// `Ok(None)` for the "try again" error kinds, `Err` for everything else.
fn no_data_or(err: io::Error) -> io::Result<Option<u8>> {
    match err.kind() {
        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock => Ok(None),
        _ => Err(err),
    }
}

#[cfg(unix)]
impl ByteSource for Stdin {
    fn read_byte(&mut self) -> io::Result<u8> {
        loop {
            if let Some(byte) = self.poll_byte(-1)? {
                return Ok(byte);
            }
        }
    }

    fn read_byte_within(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        let ms = libc::c_int::try_from(timeout.as_millis()).unwrap_or(libc::c_int::MAX);
        self.poll_byte(ms)
    }
}

#[cfg(not(unix))]
impl ByteSource for Stdin {
    fn read_byte(&mut self) -> io::Result<u8> {
        use std::io::Read;

        let mut byte = [0u8; 1];
        io::stdin().read_exact(&mut byte)?;
        Ok(byte[0])
    }

    fn read_byte_within(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
        self.read_byte().map(Some)
    }
}

// ─── Keys ───────────────────────────────────────────────────────────────────

/// A logical key produced by the [`KeyDecoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Any byte that isn't the start of an escape sequence.
    Char(u8),
    /// A lone ESC, or an escape sequence we don't recognise.
    Escape,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Ctrl+Q, the quit command.
    #[inline]
    #[must_use]
    pub const fn is_quit(self) -> bool {
        matches!(self, Self::Char(b) if b == ctrl(b'q'))
    }
}

// ─── Decoder ────────────────────────────────────────────────────────────────

/// Reads exactly one [`Key`] per call from a [`ByteSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDecoder {
    escape_timeout: Duration,
}

impl KeyDecoder {
    /// A decoder waiting [`DEFAULT_ESCAPE_TIMEOUT`] for each byte after ESC.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_escape_timeout(DEFAULT_ESCAPE_TIMEOUT)
    }

    /// A decoder with a custom wait for escape-sequence follow-up bytes.
    #[must_use]
    pub const fn with_escape_timeout(escape_timeout: Duration) -> Self {
        Self { escape_timeout }
    }

    /// The per-byte wait used after ESC.
    #[inline]
    #[must_use]
    pub const fn escape_timeout(&self) -> Duration {
        self.escape_timeout
    }

    /// Block for the next key.
    ///
    /// Consumes one byte for a literal key, one byte for an Escape whose
    /// follow-up never arrived, and three bytes for a complete sequence
    /// (recognised or not).
    ///
    /// # Errors
    ///
    /// Propagates read failures from the source.
    pub fn next_key(&self, src: &mut impl ByteSource) -> io::Result<Key> {
        let byte = src.read_byte()?;
        if byte != ESC {
            return Ok(Key::Char(byte));
        }

        let Some(first) = src.read_byte_within(self.escape_timeout)? else {
            return Ok(Key::Escape);
        };
        let Some(second) = src.read_byte_within(self.escape_timeout)? else {
            return Ok(Key::Escape);
        };

        if first != b'[' {
            return Ok(Key::Escape);
        }

        Ok(match second {
            b'A' => Key::Up,
            b'B' => Key::Down,
            b'C' => Key::Right,
            b'D' => Key::Left,
            _ => Key::Escape,
        })
    }
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
