// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Pure decoding layer: bytes in, at most one event out per step.
//!
//! Nothing in here holds state across calls, reads from a device, or knows about time.
//! Those concerns live in [`crate::input`], which feeds this layer one buffer at a time.
//!
//! ```text
//! accumulated bytes
//!    │
//! ┌──▼──────────────────────────────────────┐
//! │  router::try_decode_event()             │
//! │  • mouse.rs           ESC [ M b1 b2 b3  │
//! │  • sequence_table.rs  known key forms   │
//! │  • utf8.rs            one char          │
//! └─────────────────────────────────────────┘
//!    │
//!    ▼
//! DecodeStep { Event | Incomplete | PendingIntroducer | Discard }
//! ```

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

// Attach.
pub mod mouse;
pub mod router;
pub mod sequence_table;
pub mod types;
pub mod utf8;

// Re-export.
pub use mouse::*;
pub use router::*;
pub use sequence_table::*;
pub use types::*;
pub use utf8::*;
