// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! One decode step over the accumulated bytes.
//!
//! [`try_decode_event`] looks at the front of the buffer and decides exactly one thing:
//! an event and how many bytes it consumed, that more bytes are needed, that the buffer
//! is a bare introducer waiting on the escape deadline, or how many bytes to drop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │ [ESC] or [ESC ESC] exactly?                        │
//! │  └─ PendingIntroducer (escape deadline decides)    │
//! ├────────────────────────────────────────────────────┤
//! │ Starts with ESC [ M?                               │
//! │  └─ mouse report (6 bytes) or Incomplete           │
//! ├────────────────────────────────────────────────────┤
//! │ Sequence table                                     │
//! │  ├─ Matched → keypress                             │
//! │  ├─ Pending → Incomplete                           │
//! │  └─ NoMatch ↓                                      │
//! ├────────────────────────────────────────────────────┤
//! │ Fallbacks                                          │
//! │  ├─ ESC [ ...      unknown CSI → Discard           │
//! │  ├─ ESC O x        unknown SS3 → Discard           │
//! │  ├─ ESC ESC [ M    Escape, report left in buffer   │
//! │  ├─ ESC ESC x      Alt+Escape, x left in buffer    │
//! │  ├─ ESC char       Alt chord                       │
//! │  ├─ ESC junk       standalone Escape               │
//! │  └─ anything else  codepoint assembler             │
//! └────────────────────────────────────────────────────┘
//! ```
//!
//! This function is pure: it never consumes bytes itself and holds no state between
//! calls. The [`StatefulInputDecoder`] applies each step to its buffer.
//!
//! [`StatefulInputDecoder`]: crate::StatefulInputDecoder

use super::{mouse::{MouseDecode, try_decode_mouse_report},
            sequence_table::{SequenceTable, TableLookup},
            utf8::{Utf8Assembly, assemble_codepoint}};
use crate::{ANSI_CSI_BRACKET, ANSI_ESC, ANSI_SS3_O, CSI_FINAL_BYTE_MAX, CSI_FINAL_BYTE_MIN,
            CSI_PARAM_OR_INTERMEDIATE_MAX, CSI_PARAM_OR_INTERMEDIATE_MIN, KeyModifiers,
            KeyboardEvent, SequenceBytes, TtyInputEvent, X10_MOUSE_FINAL};

/// Most bytes an unrecognized CSI sequence may occupy before it is dropped without
/// waiting for its final byte.
pub const MAX_UNRECOGNIZED_LOOKAHEAD: usize = 32;

/// Canonical name of the standalone introducer key.
pub const ESCAPE_KEY_NAME: &str = "escape";

/// Which introducer-only buffer is waiting on the escape deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingIntroducer {
    /// `[ESC]`
    Single,
    /// `[ESC, ESC]`, a prefix of every doubled-introducer form.
    Doubled,
}

impl PendingIntroducer {
    #[must_use]
    pub fn bytes(self) -> &'static [u8] {
        match self {
            PendingIntroducer::Single => &[ANSI_ESC],
            PendingIntroducer::Doubled => &[ANSI_ESC, ANSI_ESC],
        }
    }

    #[must_use]
    pub fn byte_len(self) -> usize { self.bytes().len() }

    /// The keypress emitted when the deadline elapses with nothing after the
    /// introducer(s).
    #[must_use]
    pub fn resolve_to_escape(self) -> KeyboardEvent {
        let modifiers = match self {
            PendingIntroducer::Single => KeyModifiers::NONE,
            PendingIntroducer::Doubled => KeyModifiers::ALT,
        };
        KeyboardEvent::special(ESCAPE_KEY_NAME, self.bytes(), modifiers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeStep {
    /// One event built from the first `consumed` bytes.
    Event {
        event: TtyInputEvent,
        consumed: usize,
    },
    /// The buffer is a valid prefix of something longer. Consume nothing.
    Incomplete,
    /// The buffer is only introducer bytes. Arm the escape deadline.
    PendingIntroducer(PendingIntroducer),
    /// The first `n` bytes can never become an event.
    Discard(usize),
}

/// Decode at most one event from the front of `buffer`.
#[must_use]
pub fn try_decode_event(buffer: &[u8], table: &SequenceTable) -> DecodeStep {
    match buffer {
        [] => return DecodeStep::Incomplete,
        [ANSI_ESC] => return DecodeStep::PendingIntroducer(PendingIntroducer::Single),
        [ANSI_ESC, ANSI_ESC] => {
            return DecodeStep::PendingIntroducer(PendingIntroducer::Doubled);
        }
        _ => {}
    }

    // Mouse reports come before the table since `ESC [ M` is also a CSI prefix.
    match try_decode_mouse_report(buffer) {
        Some(MouseDecode::Report { event, consumed }) => {
            return DecodeStep::Event {
                event: TtyInputEvent::Mouse(event),
                consumed,
            };
        }
        Some(MouseDecode::Incomplete) => return DecodeStep::Incomplete,
        None => {}
    }

    match table.lookup(buffer) {
        TableLookup::Matched { entry, len } => {
            let event = KeyboardEvent {
                name: entry.name.into(),
                sequence: buffer[..len].into(),
                is_special: entry.is_special,
                modifiers: entry.modifiers(),
            };
            return DecodeStep::Event {
                event: TtyInputEvent::Keyboard(event),
                consumed: len,
            };
        }
        TableLookup::Pending => return DecodeStep::Incomplete,
        TableLookup::NoMatch => {}
    }

    match buffer {
        // Escape pressed just before a click. The report decodes on the next step.
        [ANSI_ESC, ANSI_ESC, ANSI_CSI_BRACKET, X10_MOUSE_FINAL, ..] => keyboard_step(
            PendingIntroducer::Single.resolve_to_escape(),
            PendingIntroducer::Single.byte_len(),
        ),
        [ANSI_ESC, ANSI_CSI_BRACKET, ANSI_CSI_BRACKET, ..] => discard_console_form(buffer, 3),
        [ANSI_ESC, ANSI_CSI_BRACKET, ..] => discard_unrecognized_csi(buffer, 2),
        [ANSI_ESC, ANSI_ESC, ANSI_CSI_BRACKET, ANSI_CSI_BRACKET, ..] => {
            discard_console_form(buffer, 4)
        }
        [ANSI_ESC, ANSI_ESC, ANSI_CSI_BRACKET, ..] => discard_unrecognized_csi(buffer, 3),
        [ANSI_ESC, ANSI_SS3_O, final_byte, ..] => discard_ss3_form(2, *final_byte),
        [ANSI_ESC, ANSI_ESC, ANSI_SS3_O, final_byte, ..] => discard_ss3_form(3, *final_byte),
        [ANSI_ESC, ANSI_ESC, ..] => keyboard_step(
            PendingIntroducer::Doubled.resolve_to_escape(),
            PendingIntroducer::Doubled.byte_len(),
        ),
        [ANSI_ESC, rest @ ..] => decode_alt_chord(rest),
        _ => decode_character(buffer),
    }
}

fn keyboard_step(event: KeyboardEvent, consumed: usize) -> DecodeStep {
    DecodeStep::Event {
        event: TtyInputEvent::Keyboard(event),
        consumed,
    }
}

/// `ESC` followed by the start of a character.
fn decode_alt_chord(rest: &[u8]) -> DecodeStep {
    match assemble_codepoint(rest) {
        Utf8Assembly::Complete { ch, len } => {
            let consumed = 1 + len;
            let mut sequence = SequenceBytes::from_slice(&[ANSI_ESC]);
            sequence.extend_from_slice(&rest[..len]);
            keyboard_step(
                KeyboardEvent::character(ch, &sequence, KeyModifiers::ALT),
                consumed,
            )
        }
        Utf8Assembly::Incomplete => DecodeStep::Incomplete,
        // The introducer stands alone and the bad byte is dealt with next cycle.
        Utf8Assembly::Malformed { .. } => keyboard_step(
            PendingIntroducer::Single.resolve_to_escape(),
            PendingIntroducer::Single.byte_len(),
        ),
    }
}

fn decode_character(buffer: &[u8]) -> DecodeStep {
    match assemble_codepoint(buffer) {
        Utf8Assembly::Complete { ch, len } => keyboard_step(
            KeyboardEvent::character(ch, &buffer[..len], KeyModifiers::NONE),
            len,
        ),
        Utf8Assembly::Incomplete => DecodeStep::Incomplete,
        Utf8Assembly::Malformed { discard } => DecodeStep::Discard(discard),
    }
}

/// Scan an unknown CSI sequence whose parameters start at `params_start`.
///
/// Parameter and intermediate bytes (`0x20..=0x3F`) continue the sequence, a final byte
/// (`0x40..=0x7E`) ends it, and anything else interrupts it. An interrupting byte is
/// left in the buffer.
fn discard_unrecognized_csi(buffer: &[u8], params_start: usize) -> DecodeStep {
    for (index, &byte) in buffer.iter().enumerate().skip(params_start) {
        if (CSI_FINAL_BYTE_MIN..=CSI_FINAL_BYTE_MAX).contains(&byte) {
            return DecodeStep::Discard(index + 1);
        }
        if !(CSI_PARAM_OR_INTERMEDIATE_MIN..=CSI_PARAM_OR_INTERMEDIATE_MAX).contains(&byte) {
            return DecodeStep::Discard(index);
        }
        if index + 1 >= MAX_UNRECOGNIZED_LOOKAHEAD {
            return DecodeStep::Discard(index + 1);
        }
    }
    DecodeStep::Incomplete
}

/// `ESC [ [ x` is always four bytes (five when doubled). `final_index` is where `x` is.
fn discard_console_form(buffer: &[u8], final_index: usize) -> DecodeStep {
    match buffer.get(final_index) {
        Some(&ANSI_ESC) => DecodeStep::Discard(final_index),
        Some(_) => DecodeStep::Discard(final_index + 1),
        None => DecodeStep::Incomplete,
    }
}

/// Unknown `ESC O x`. A final byte is dropped with its prefix, anything else is left in
/// the buffer for the next cycle.
fn discard_ss3_form(final_index: usize, final_byte: u8) -> DecodeStep {
    if (CSI_FINAL_BYTE_MIN..=CSI_FINAL_BYTE_MAX).contains(&final_byte) {
        DecodeStep::Discard(final_index + 1)
    } else {
        DecodeStep::Discard(final_index)
    }
}
