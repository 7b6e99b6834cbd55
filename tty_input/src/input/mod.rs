// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Stateful input layer: byte accumulation, escape timing, and the event queue.
//!
//! ```text
//! feed(chunk)
//!    │
//! ┌──▼──────────────────────────────────────┐
//! │  StatefulInputDecoder                   │
//! │  • ByteAccumulator    pending bytes     │
//! │  • EscDisambiguator   one deadline      │
//! │  • Clock              now()             │
//! └─────────────────────────────────────────┘
//!    │ (one DecodeStep at a time)
//!    ▼
//! decoder::try_decode_event()
//! ```

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

/// Log discards, armed deadlines, and shutdown from the stateful decoder.
pub const DEBUG_TTY_INPUT_SHOW_DECODER: bool = false;

// Attach.
pub mod buffer;
pub mod clock;
pub mod esc_disambiguator;
pub mod stateful_decoder;

// Re-export.
pub use buffer::*;
pub use clock::*;
pub use esc_disambiguator::*;
pub use stateful_decoder::*;
