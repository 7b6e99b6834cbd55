// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Codepoint assembler: turns the bytes at the front of the buffer into one `char`.
//!
//! The total length of a UTF-8 sequence is known from its leading byte alone:
//!
//! ```text
//! Byte Pattern   Meaning              Length
//! ──────────────────────────────────────────
//! 0xxxxxxx       ASCII                1
//! 110xxxxx       2-byte start         2
//! 1110xxxx       3-byte start         3
//! 11110xxx       4-byte start         4
//! 10xxxxxx       Continuation         (never a start)
//! ```
//!
//! So the assembler can tell "need more bytes" apart from "these bytes can never become
//! a character" as soon as each byte arrives. Structurally valid sequences are then run
//! through [`std::str::from_utf8`], which rejects overlong encodings, surrogates, and
//! values above `U+10FFFF`.

use crate::{UTF8_1BYTE_MAX, UTF8_2BYTE_MAX, UTF8_2BYTE_MIN, UTF8_3BYTE_MAX,
            UTF8_3BYTE_MIN, UTF8_4BYTE_MAX, UTF8_4BYTE_MIN, UTF8_CONTINUATION_MASK,
            UTF8_CONTINUATION_PATTERN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Assembly {
    /// The first `len` bytes encode `ch`.
    Complete { ch: char, len: usize },
    /// A valid prefix of a longer encoding. Wait for more bytes.
    Incomplete,
    /// The first `discard` bytes can never become a character.
    Malformed { discard: usize },
}

/// Assemble the character at the front of `buffer`.
#[must_use]
pub fn assemble_codepoint(buffer: &[u8]) -> Utf8Assembly {
    let Some(&first_byte) = buffer.first() else {
        return Utf8Assembly::Incomplete;
    };

    let Some(required_len) = utf8_sequence_len(first_byte) else {
        return Utf8Assembly::Malformed { discard: 1 };
    };

    // Check continuation bytes as far as they have arrived.
    for (index, byte) in buffer.iter().enumerate().take(required_len).skip(1) {
        if byte & UTF8_CONTINUATION_MASK != UTF8_CONTINUATION_PATTERN {
            return Utf8Assembly::Malformed { discard: index };
        }
    }

    if buffer.len() < required_len {
        return Utf8Assembly::Incomplete;
    }

    match std::str::from_utf8(&buffer[..required_len])
        .ok()
        .and_then(|it| it.chars().next())
    {
        Some(ch) => Utf8Assembly::Complete {
            ch,
            len: required_len,
        },
        None => Utf8Assembly::Malformed {
            discard: required_len,
        },
    }
}

/// Total encoded length announced by a leading byte, or `None` for a byte that cannot
/// start a sequence (a continuation byte, or `0xF8..=0xFF`).
#[must_use]
pub fn utf8_sequence_len(first_byte: u8) -> Option<usize> {
    match first_byte {
        0..=UTF8_1BYTE_MAX => Some(1),
        UTF8_2BYTE_MIN..=UTF8_2BYTE_MAX => Some(2),
        UTF8_3BYTE_MIN..=UTF8_3BYTE_MAX => Some(3),
        UTF8_4BYTE_MIN..=UTF8_4BYTE_MAX => Some(4),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UTF8_MAX_LEN;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("a" ; "ascii")]
    #[test_case("ç" ; "two byte")]
    #[test_case("➀" ; "three byte")]
    #[test_case("😁" ; "four byte")]
    fn complete_characters(text: &str) {
        let ch = text.chars().next().unwrap();
        assert_eq!(
            assemble_codepoint(text.as_bytes()),
            Utf8Assembly::Complete {
                ch,
                len: text.len()
            }
        );
    }

    #[test]
    fn every_strict_prefix_is_incomplete() {
        let bytes = "😁".as_bytes();
        assert_eq!(bytes.len(), UTF8_MAX_LEN);
        for end in 0..bytes.len() {
            assert_eq!(assemble_codepoint(&bytes[..end]), Utf8Assembly::Incomplete);
        }
    }

    #[test]
    fn only_the_first_character_is_assembled() {
        assert_eq!(
            assemble_codepoint("çx".as_bytes()),
            Utf8Assembly::Complete { ch: 'ç', len: 2 }
        );
    }

    #[test_case(&[0x80], 1 ; "lone continuation byte")]
    #[test_case(&[0xFF], 1 ; "never valid leading byte")]
    #[test_case(&[0xE2, 0x41], 1 ; "ascii interrupts after leading byte")]
    #[test_case(&[0xF0, 0x9F, 0x1B], 2 ; "introducer interrupts four byte sequence")]
    #[test_case(&[0xC0, 0x80], 2 ; "overlong encoding")]
    #[test_case(&[0xED, 0xA0, 0x80], 3 ; "surrogate half")]
    #[test_case(&[0xF4, 0x90, 0x80, 0x80], 4 ; "above max scalar value")]
    fn malformed_input_is_discarded(bytes: &[u8], discard: usize) {
        assert_eq!(assemble_codepoint(bytes), Utf8Assembly::Malformed { discard });
    }

    #[test]
    fn control_bytes_are_one_byte_characters() {
        assert_eq!(
            assemble_codepoint(&[0x1C]),
            Utf8Assembly::Complete {
                ch: '\u{1c}',
                len: 1
            }
        );
    }
}
