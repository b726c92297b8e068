// SPDX-License-Identifier: MIT
//
// k-view — a raw-mode terminal text viewer.
//
// This is the binary that wires the crates together:
//
//   k-term   → raw mode, terminal size, key decoding, frame output, event loop
//   k-editor → document, cursor, viewport, status line, renderer
//
// Each keypress flows through:
//
//   stdin → KeyDecoder → Editor::on_key → cursor step / viewport scroll
//   Editor::paint → render → OutputBuffer → one write to stdout
//
// Startup order: parse arguments, set up logging, load the file, enter raw
// mode, query the terminal size. Any failure is fatal. Raw mode is always
// restored before the error is printed, so the message lands on a sane
// terminal.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::LevelFilter;

use k_editor::document::Document;
use k_editor::editor::Editor;
use k_editor::options::Options;
use k_editor::viewport::Viewport;
use k_editor::{Error, Result};

use k_term::ansi;
use k_term::event_loop::EventLoop;
use k_term::input::Stdin;
use k_term::terminal::{self, RawMode};

// ─── Command line ───────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "k-view", version, about = "A raw-mode terminal text viewer")]
struct Cli {
    /// File to view. Without one the viewer starts on an empty document.
    file: Option<PathBuf>,

    /// How long to wait for the rest of an escape sequence after ESC.
    #[arg(long, value_name = "MS", default_value_t = 100)]
    escape_timeout_ms: u64,

    /// Write logs to this file (stdout belongs to the screen).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log level when --log-file is given.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    const fn options(&self) -> Options {
        Options::with_escape_timeout_ms(self.escape_timeout_ms)
    }
}

// ─── Logging ────────────────────────────────────────────────────────────────

/// Send `log` records to `path`, one `[LEVEL target] message` per line.
fn init_logging(path: &Path, level: LevelFilter) -> std::result::Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ));
        })
        .level(level)
        .chain(fern::log_file(path)?)
        .apply()?;
    Ok(())
}

// ─── Session ────────────────────────────────────────────────────────────────

fn run(cli: &Cli) -> Result<()> {
    let document = match &cli.file {
        Some(path) => Document::load(path)?,
        None => Document::new(),
    };

    if !terminal::is_tty() {
        return Err(Error::RawMode(io::Error::other("stdin is not a terminal")));
    }
    let raw = RawMode::enter().map_err(Error::RawMode)?;

    let result = {
        let stdout = io::stdout();
        let mut screen = stdout.lock();
        view(document, cli.options(), &mut screen)
    };
    settle(result, raw.restore())
}

/// Combine the session outcome with the restore outcome. The session's
/// own error wins; a restore failure behind it is only logged.
fn settle(result: Result<()>, restored: io::Result<()>) -> Result<()> {
    if let Err(e) = &restored {
        log::warn!("cannot restore terminal mode: {e}");
    }
    result?;
    restored?;
    Ok(())
}

/// Everything that happens while raw mode is on. On failure the screen is
/// cleared (best effort) so the error message lands on a blank terminal.
fn view(document: Document, options: Options, screen: &mut impl Write) -> Result<()> {
    let result = session(document, options, screen);
    if result.is_err() {
        let _ = ansi::clear_screen(screen);
        let _ = ansi::cursor_home(screen);
        let _ = screen.flush();
    }
    result
}

fn session(document: Document, options: Options, screen: &mut impl Write) -> Result<()> {
    let size = terminal::get_size().map_err(Error::TerminalSize)?;
    log::info!("terminal {}x{}", size.cols, size.rows);

    let mut editor = Editor::new(document, Viewport::from_size(size));
    let mut event_loop = EventLoop::new(options.decoder());
    event_loop.run(&mut editor, &mut Stdin::new(), screen)?;

    log::info!("quit after {} frames", event_loop.frames());
    Ok(())
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        if let Err(e) = init_logging(path, cli.log_level) {
            eprintln!("k-view: cannot open log file {}: {e}", path.display());
            process::exit(1);
        }
    }

    if let Err(e) = run(&cli) {
        log::error!("{e}");
        eprintln!("k-view: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
