// SPDX-License-Identifier: MIT
//
// k-term — Terminal layer for k-view.
//
// Direct terminal control via raw termios and ANSI escape sequences:
// a raw-mode session with guaranteed restore, a key decoder that resolves
// arrow-key escape sequences with an explicit bounded wait, and an output
// buffer that puts each frame on screen with exactly one write.
//
// The pieces fit together in `event_loop`: paint → write → read one key →
// react, until the application asks to quit.

pub mod ansi;
pub mod event_loop;
pub mod input;
pub mod output;
pub mod terminal;
