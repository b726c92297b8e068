// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode, geometry, and RAII cleanup.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr), ioctl (TIOCGWINSZ), isatty, and raw fd writes. These are
// the standard POSIX interfaces for terminal control — there is no safe
// alternative. Each unsafe block is minimal.
#![allow(unsafe_code)]
//
// `RawMode` owns the saved terminal settings for the lifetime of the
// session. Entering switches stdin to byte-at-a-time input with no echo,
// no line editing, no signal keys and no output post-processing. The
// saved settings go back on `restore()`, on drop, and from the panic hook,
// so the user's shell never inherits a raw terminal.
//
// The panic hook writes directly to fd 1 rather than through `io::stdout()`:
// a panic mid-frame may happen while the stdout lock is held.

use std::io::{self, Write};
use std::sync::{Mutex, Once};

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Query the current terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Queried once at startup; there is no resize handling.
///
/// # Errors
///
/// Returns the OS error if the ioctl fails (e.g. stdout is not a
/// terminal), or an `Other` error if the terminal reports zero columns.
#[cfg(unix)]
pub fn get_size() -> io::Result<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == -1 {
        return Err(io::Error::last_os_error());
    }
    if ws.ws_col == 0 {
        return Err(io::Error::other("terminal reported zero columns"));
    }

    Ok(Size {
        cols: ws.ws_col,
        rows: ws.ws_row,
    })
}

#[cfg(not(unix))]
pub fn get_size() -> io::Result<Size> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "terminal size query requires a unix terminal",
    ))
}

/// Check whether stdin is connected to a terminal (TTY).
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Panic-Safe Terminal Restore ────────────────────────────────────────────

/// Global backup of original termios for panic recovery.
///
/// [`RawMode`] owns its own copy, but the panic hook can't reach it.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Restore termios from the global backup. Best-effort, ignores errors.
#[cfg(unix)]
fn restore_termios_from_backup() {
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some(ref original) = *guard {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, original);
            }
        }
    }
}

/// Restore sequence for emergency use: show the cursor, then move to a
/// fresh line so the panic message doesn't land mid-frame.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[?25h\r\n";

/// Panic hook guard — ensures the hook is installed at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the terminal before printing the error.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();

            #[cfg(unix)]
            restore_termios_from_backup();

            original(info);
        }));
    });
}

/// Write [`EMERGENCY_RESTORE`] directly to stdout's file descriptor.
fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        let _ = io::stdout().write_all(EMERGENCY_RESTORE);
        let _ = io::stdout().flush();
    }
}

// ─── RawMode ────────────────────────────────────────────────────────────────

/// An active raw-mode session on stdin.
///
/// Created by [`enter`](Self::enter), which saves the current settings
/// before switching. The saved settings are restored by
/// [`restore`](Self::restore), or on drop if `restore` was never called.
///
/// # Example
///
/// ```no_run
/// use k_term::terminal::RawMode;
///
/// let raw = RawMode::enter()?;
/// // ... read keys, paint frames ...
/// raw.restore()?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct RawMode {
    /// Settings in effect before we switched.
    #[cfg(unix)]
    original: libc::termios,

    /// Set once the original settings are back in place.
    restored: bool,
}

impl RawMode {
    /// Save the current terminal settings and switch stdin to raw mode.
    ///
    /// Reads block until at least one byte is available (`VMIN=1`,
    /// `VTIME=0`). Escape-sequence lookahead doesn't rely on the driver's
    /// inter-byte timer; the input layer waits explicitly with `poll`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the settings can't be read or applied
    /// (e.g. stdin is not a terminal).
    #[cfg(unix)]
    pub fn enter() -> io::Result<Self> {
        let fd = libc::STDIN_FILENO;

        let mut termios: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(fd, &raw mut termios) } != 0 {
            return Err(io::Error::last_os_error());
        }
        let original = termios;

        install_panic_hook();
        if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
            *guard = Some(original);
        }

        // Software flow control off (Ctrl-S / Ctrl-Q reach us as bytes),
        // CR stays CR, no parity check, no 8th-bit strip.
        termios.c_iflag &=
            !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
        // No output post-processing: "\n" no longer implies "\r".
        termios.c_oflag &= !libc::OPOST;
        termios.c_cflag |= libc::CS8;
        // No echo, no canonical mode, no Ctrl-V, no Ctrl-C / Ctrl-Z signals.
        termios.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);

        termios.c_cc[libc::VMIN] = 1;
        termios.c_cc[libc::VTIME] = 0;

        if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const termios) } != 0 {
            return Err(io::Error::last_os_error());
        }

        log::debug!("raw mode entered");

        Ok(Self {
            original,
            restored: false,
        })
    }

    #[cfg(not(unix))]
    pub fn enter() -> io::Result<Self> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "raw mode requires a unix terminal",
        ))
    }

    /// Put the saved settings back.
    ///
    /// # Errors
    ///
    /// Returns the OS error if `tcsetattr` fails. The session is still
    /// considered finished; drop won't retry.
    pub fn restore(mut self) -> io::Result<()> {
        self.restore_inner()
    }

    #[cfg(unix)]
    fn restore_inner(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        let result =
            unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const self.original) };

        if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
            *guard = None;
        }

        if result != 0 {
            return Err(io::Error::last_os_error());
        }

        log::debug!("raw mode restored");
        Ok(())
    }

    #[cfg(not(unix))]
    fn restore_inner(&mut self) -> io::Result<()> {
        self.restored = true;
        Ok(())
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if !self.restored {
            let _ = self.restore_inner();
            let _ = io::stdout().flush();
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
