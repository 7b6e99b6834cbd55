// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! UTF-8 encoding constants for byte-level codepoint assembly.
//!
//! | Bytes | First byte | Continuation bytes | Bit pattern                          |
//! | ----- | ---------- | ------------------ | ------------------------------------ |
//! | 1     | 00-7F      | -                  | 0xxxxxxx                             |
//! | 2     | C0-DF      | 80-BF              | 110xxxxx 10xxxxxx                    |
//! | 3     | E0-EF      | 80-BF (x2)         | 1110xxxx 10xxxxxx 10xxxxxx           |
//! | 4     | F0-F7      | 80-BF (x3)         | 11110xxx 10xxxxxx 10xxxxxx 10xxxxxx  |

/// ASCII range maximum: single-byte UTF-8 (7F hex). Pattern: `0xxxxxxx`
pub const UTF8_1BYTE_MAX: u8 = 0b0111_1111;

/// Two byte sequence start minimum (C0 hex). Pattern: `110xxxxx`
pub const UTF8_2BYTE_MIN: u8 = 0b1100_0000;

/// Two byte sequence start maximum (DF hex).
pub const UTF8_2BYTE_MAX: u8 = 0b1101_1111;

/// Three byte sequence start minimum (E0 hex). Pattern: `1110xxxx`
pub const UTF8_3BYTE_MIN: u8 = 0b1110_0000;

/// Three byte sequence start maximum (EF hex).
pub const UTF8_3BYTE_MAX: u8 = 0b1110_1111;

/// Four byte sequence start minimum (F0 hex). Pattern: `11110xxx`
pub const UTF8_4BYTE_MIN: u8 = 0b1111_0000;

/// Four byte sequence start maximum (F7 hex).
pub const UTF8_4BYTE_MAX: u8 = 0b1111_0111;

/// Mask that isolates the two marker bits of a continuation byte.
pub const UTF8_CONTINUATION_MASK: u8 = 0b1100_0000;

/// Marker bits every continuation byte carries: `10xxxxxx`.
pub const UTF8_CONTINUATION_PATTERN: u8 = 0b1000_0000;

/// Longest UTF-8 encoding of one scalar value.
pub const UTF8_MAX_LEN: usize = 4;
