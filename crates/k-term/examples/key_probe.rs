// SPDX-License-Identifier: MIT
//
// k-term key probe — shows the raw bytes each keypress produces.
//
// Enters raw mode and prints every input byte as its decimal value, with
// the character itself for printable bytes. Handy for checking what a
// terminal sends for arrows, Ctrl combinations and friends. `q` quits.
//
// Usage:
//   cargo run -p k-term --example key_probe

use std::io::{self, Write};
use std::process;

use k_term::input::{ByteSource, Stdin};
use k_term::terminal::RawMode;

fn describe(byte: u8) -> String {
    if byte.is_ascii_control() {
        format!("{byte}\r\n")
    } else {
        format!("{byte} ('{}')\r\n", char::from(byte))
    }
}

fn probe() -> io::Result<()> {
    let raw = RawMode::enter()?;
    let mut stdin = Stdin::new();
    let mut stdout = io::stdout().lock();

    loop {
        let byte = stdin.read_byte()?;
        if byte == b'q' {
            break;
        }
        stdout.write_all(describe(byte).as_bytes())?;
        stdout.flush()?;
    }

    drop(stdout);
    raw.restore()
}

fn main() {
    if let Err(e) = probe() {
        eprintln!("key_probe: {e}");
        process::exit(1);
    }
}
