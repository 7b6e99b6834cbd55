// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Delivery of decoded events to consumers.

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

// Attach.
pub mod event_dispatcher;

// Re-export.
pub use event_dispatcher::*;
