// SPDX-License-Identifier: MIT
//
// Event loop — render, wait for a key, react, repeat.
//
// The loop is fully synchronous. The only place it ever waits is inside
// the key decoder's blocking read, so an idle viewer costs no CPU. Each
// cycle:
//
//   1. Render: the app paints a complete frame into a fresh OutputBuffer,
//      which goes to the terminal in a single write.
//   2. AwaitInput: decode exactly one key.
//   3. The app handles the key and answers Continue or Quit.
//
// Quit is the only way out that isn't an error. On quit the loop writes
// the app's goodbye frame (by default: clear screen, cursor home) and
// returns. Restoring the terminal mode is the caller's job, because the
// caller owns the `RawMode` session.

use std::io::{self, Write};

use crate::ansi;
use crate::input::{ByteSource, Key, KeyDecoder};
use crate::output::OutputBuffer;

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the application tells the event loop to do after handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep running.
    Continue,
    /// Leave the loop cleanly.
    Quit,
}

/// Application interface for the event loop.
///
/// The loop calls [`paint`](App::paint) before every key, then
/// [`on_key`](App::on_key) with the decoded key. When `on_key` returns
/// [`Action::Quit`] it calls [`on_quit`](App::on_quit) once and stops.
pub trait App {
    /// Handle one decoded key.
    fn on_key(&mut self, key: Key) -> Action;

    /// Paint the full frame. The buffer is empty on entry and is written
    /// to the terminal as a whole after this returns.
    ///
    /// # Errors
    ///
    /// Propagates failures writing into `out`.
    fn paint(&mut self, out: &mut OutputBuffer) -> io::Result<()>;

    /// Paint the frame left on screen after quitting.
    ///
    /// # Errors
    ///
    /// Propagates failures writing into `out`.
    fn on_quit(&mut self, out: &mut OutputBuffer) -> io::Result<()> {
        ansi::clear_screen(out)?;
        ansi::cursor_home(out)
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// The render → read-key → react loop.
///
/// # Example
///
/// ```no_run
/// use k_term::event_loop::{Action, App, EventLoop};
/// use k_term::input::{Key, KeyDecoder, Stdin};
/// use k_term::output::OutputBuffer;
///
/// struct Counter(u32);
///
/// impl App for Counter {
///     fn on_key(&mut self, key: Key) -> Action {
///         if key.is_quit() {
///             return Action::Quit;
///         }
///         self.0 += 1;
///         Action::Continue
///     }
///
///     fn paint(&mut self, out: &mut OutputBuffer) -> std::io::Result<()> {
///         use std::io::Write;
///         write!(out, "\x1b[H{} keys", self.0)
///     }
/// }
///
/// let mut event_loop = EventLoop::new(KeyDecoder::new());
/// event_loop.run(&mut Counter(0), &mut Stdin::new(), &mut std::io::stdout())?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct EventLoop {
    decoder: KeyDecoder,
    frames: u64,
}

impl EventLoop {
    /// Create a loop decoding keys with `decoder`.
    #[must_use]
    pub const fn new(decoder: KeyDecoder) -> Self {
        Self { decoder, frames: 0 }
    }

    /// Frames written so far.
    #[inline]
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Run until the app returns [`Action::Quit`].
    ///
    /// # Errors
    ///
    /// Returns the first read error from `src` (other than "no data yet")
    /// or write error on `sink`. Nothing is retried.
    pub fn run(
        &mut self,
        app: &mut impl App,
        src: &mut impl ByteSource,
        sink: &mut impl Write,
    ) -> io::Result<()> {
        loop {
            // ── Render ──────────────────────────────────────────
            let mut frame = OutputBuffer::new();
            app.paint(&mut frame)?;
            frame.flush_to(sink)?;
            self.frames += 1;

            // ── AwaitInput ──────────────────────────────────────
            let key = self.decoder.next_key(src)?;
            log::debug!("key {key:?}");

            if app.on_key(key) == Action::Quit {
                let mut frame = OutputBuffer::new();
                app.on_quit(&mut frame)?;
                frame.flush_to(sink)?;
                log::info!("quit after {} frames", self.frames);
                return Ok(());
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ctrl;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;

    /// Records every key and paints a frame counter.
    struct Recorder {
        keys: Vec<Key>,
        paints: usize,
    }

    impl Recorder {
        const fn new() -> Self {
            Self {
                keys: Vec::new(),
                paints: 0,
            }
        }
    }

    impl App for Recorder {
        fn on_key(&mut self, key: Key) -> Action {
            self.keys.push(key);
            if key.is_quit() {
                Action::Quit
            } else {
                Action::Continue
            }
        }

        fn paint(&mut self, out: &mut OutputBuffer) -> io::Result<()> {
            self.paints += 1;
            write!(out, "[{}]", self.paints)
        }
    }

    /// Records how many separate writes reached it.
    #[derive(Default)]
    struct Sink {
        writes: Vec<Vec<u8>>,
    }

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes.push(buf.to_vec());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn script(bytes: &[u8]) -> VecDeque<u8> {
        bytes.iter().copied().collect()
    }

    #[test]
    fn action_equality() {
        assert_eq!(Action::Continue, Action::Continue);
        assert_ne!(Action::Continue, Action::Quit);
    }

    #[test]
    fn quit_immediately_paints_once() {
        let mut app = Recorder::new();
        let mut src = script(&[ctrl(b'q')]);
        let mut sink = Sink::default();
        let mut el = EventLoop::new(KeyDecoder::new());

        el.run(&mut app, &mut src, &mut sink).unwrap();

        assert_eq!(app.paints, 1);
        assert_eq!(el.frames(), 1);
        assert_eq!(sink.writes, vec![b"[1]".to_vec(), b"\x1b[2J\x1b[H".to_vec()]);
    }

    #[test]
    fn every_key_is_followed_by_a_repaint() {
        let mut app = Recorder::new();
        let mut src = script(b"a\x1b[Bb\x11");
        let mut sink = Sink::default();

        EventLoop::new(KeyDecoder::new())
            .run(&mut app, &mut src, &mut sink)
            .unwrap();

        assert_eq!(
            app.keys,
            vec![Key::Char(b'a'), Key::Down, Key::Char(b'b'), Key::Char(0x11)]
        );
        assert_eq!(app.paints, 4);
        // Four frames plus the quit frame, each a single write.
        assert_eq!(sink.writes.len(), 5);
    }

    #[test]
    fn read_error_ends_the_loop() {
        let mut app = Recorder::new();
        let mut src = script(b"x");
        let mut sink = Sink::default();

        let err = EventLoop::new(KeyDecoder::new())
            .run(&mut app, &mut src, &mut sink)
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert_eq!(app.keys, vec![Key::Char(b'x')]);
    }

    #[test]
    fn bytes_after_quit_are_left_unread() {
        let mut app = Recorder::new();
        let mut src = script(b"\x11abc");
        let mut sink = Sink::default();

        EventLoop::new(KeyDecoder::new())
            .run(&mut app, &mut src, &mut sink)
            .unwrap();

        assert_eq!(src.len(), 3);
    }
}
