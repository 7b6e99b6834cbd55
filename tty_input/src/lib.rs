// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # tty_input
//!
//! Turns the raw bytes a terminal writes to stdin into keypress and mouse events.
//!
//! ```text
//!  byte source (stdin, pty, test buffer)
//!     │ chunks, split anywhere
//! ┌───▼─────────────────────────────────────────┐
//! │ TtyInput                                    │
//! │  ├─ StatefulInputDecoder                    │
//! │  │   ├─ ByteAccumulator   unconsumed bytes  │
//! │  │   ├─ EscDisambiguator  lone ESC timeout  │
//! │  │   └─ decoder::try_decode_event()         │
//! │  │        ├─ X10 mouse reports              │
//! │  │        ├─ SequenceTable (byte trie)      │
//! │  │        └─ UTF-8 codepoint assembly       │
//! │  └─ EventDispatcher  keypress, mousedown,   │
//! │                      mouseup, mousemove     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Quick start
//!
//! ```
//! use tty_input::{EventKind, TtyInput, TtyInputConfig, TtyInputEvent};
//! use std::sync::{Arc, Mutex};
//!
//! let mut input = TtyInput::new(TtyInputConfig::default());
//! let names = Arc::new(Mutex::new(Vec::new()));
//! let names_clone = Arc::clone(&names);
//! input.on(EventKind::Keypress, move |event: &TtyInputEvent| {
//!     if let Some(key) = event.as_keyboard() {
//!         names_clone.lock().unwrap().push(key.name.to_string());
//!     }
//! });
//!
//! // F1 arrives in two reads. Nothing is emitted until the sequence completes.
//! input.feed(b"\x1b[1");
//! input.feed(b"1~q");
//! assert_eq!(*names.lock().unwrap(), vec!["f1", "q"]);
//! ```
//!
//! ## Lone escape
//!
//! A single `ESC` byte is either the Escape key or the start of a longer sequence. The
//! decoder holds it for [`TtyInputConfig::esc_key_timeout`] (100 ms by default). If more
//! bytes arrive first, they are decoded together; otherwise Escape is emitted when the
//! deadline fires. [`TtyInput::run`] services that deadline automatically. Push-mode
//! callers poll [`TtyInput::next_deadline`] and call [`TtyInput::poll_timer`].
//!
//! ## Unrecognized input
//!
//! Decoding never fails. Escape sequences that match nothing in the table are
//! discarded up to their final byte, and malformed UTF-8 is dropped.
//! [`StatefulInputDecoder::discarded_byte_count`] reports how much was thrown away.
//!
//! ## Logging
//!
//! The crate logs with [`tracing`]. Flip the `DEBUG_TTY_INPUT_*` constants to see
//! decoder internals, and use [`try_initialize_logging_global`] to install a simple
//! subscriber.

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules.
pub mod config;
pub mod constants;
pub mod decoder;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod log;
pub mod tty_input;

#[cfg(test)]
mod test_fixtures;

// Re-export.
pub use config::*;
pub use constants::*;
pub use decoder::*;
pub use dispatch::*;
pub use error::*;
pub use input::*;
pub use log::*;
pub use tty_input::*;
