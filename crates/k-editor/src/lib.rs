//! # k-editor — Editor core for k-view
//!
//! The read-only viewer's state and how it is drawn:
//!
//! - **[`document`]** — `Row` and `Document`, loaded once from a byte stream
//! - **[`cursor`]** — `Cursor` with line wrapping and a remembered column
//! - **[`viewport`]** — the visible slice of rows and vertical scrolling
//! - **[`status`]** — the `line:col` status text
//! - **[`render`]** — one full frame per call, written in a single write
//! - **[`editor`]** — `Editor`, the state struct driven by k-term's event loop
//! - **[`options`]** — runtime options from the command line
//! - **[`error`]** — the fatal error type

pub mod cursor;
pub mod document;
pub mod editor;
pub mod error;
pub mod options;
pub mod render;
pub mod status;
pub mod viewport;

pub use error::{Error, Result};
