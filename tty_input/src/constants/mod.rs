// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Byte level constants shared by the decoder and the stateful input layer.

// Attach sources.
pub mod input_sequences;
pub mod utf8_encoding;

// Re-export.
pub use input_sequences::*;
pub use utf8_encoding::*;
