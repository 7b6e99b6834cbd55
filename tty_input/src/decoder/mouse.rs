// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! X10 mouse reports: `ESC [ M b1 b2 b3`.
//!
//! Every payload byte is offset by 32 so it stays printable.
//!
//! ```text
//! b1 - 32:  bit 0-1  button code (0=left 1=middle 2=right 3=release)
//!           bit 2    shift
//!           bit 3    meta (alt)
//!           bit 4    ctrl
//!           bit 5    motion
//! b2 - 32:  column, 1-based
//! b3 - 32:  row, 1-based
//! ```
//!
//! A coordinate byte can only carry 223 distinct positions above the offset. Terminals
//! wider than that wrap the byte, so bytes below 33 are read modulo 256 (0 is treated as
//! column 256). Every decoded coordinate is therefore in `1..=256`.

use crate::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind, X10_MOUSE_BUTTON_MASK,
            X10_MOUSE_BYTE_OFFSET, X10_MOUSE_CTRL_FLAG, X10_MOUSE_META_FLAG,
            X10_MOUSE_MOTION_FLAG, X10_MOUSE_PREFIX, X10_MOUSE_RELEASE_CODE,
            X10_MOUSE_REPORT_LEN, X10_MOUSE_SHIFT_FLAG};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseDecode {
    /// A complete report occupying the first `consumed` bytes.
    Report { event: MouseEvent, consumed: usize },
    /// The mouse prefix is present but the payload has not fully arrived.
    Incomplete,
}

/// Decode a mouse report at the front of `buffer`, or `None` if the buffer does not
/// start with the `ESC [ M` prefix.
#[must_use]
pub fn try_decode_mouse_report(buffer: &[u8]) -> Option<MouseDecode> {
    if !buffer.starts_with(&X10_MOUSE_PREFIX) {
        return None;
    }
    match buffer.get(X10_MOUSE_PREFIX.len()..X10_MOUSE_REPORT_LEN) {
        Some(&[b1, b2, b3]) => Some(MouseDecode::Report {
            event: decode_x10_payload(b1, b2, b3),
            consumed: X10_MOUSE_REPORT_LEN,
        }),
        _ => Some(MouseDecode::Incomplete),
    }
}

#[must_use]
pub fn decode_x10_payload(b1: u8, b2: u8, b3: u8) -> MouseEvent {
    let cb = b1.wrapping_sub(X10_MOUSE_BYTE_OFFSET);
    let code = cb & X10_MOUSE_BUTTON_MASK;

    let modifiers = KeyModifiers {
        shift: cb & X10_MOUSE_SHIFT_FLAG != 0,
        alt: cb & X10_MOUSE_META_FLAG != 0,
        ctrl: cb & X10_MOUSE_CTRL_FLAG != 0,
    };

    let (kind, button) = if cb & X10_MOUSE_MOTION_FLAG != 0 {
        (MouseEventKind::Mousemove, button_from_code(code))
    } else if code == X10_MOUSE_RELEASE_CODE {
        (MouseEventKind::Mouseup, None)
    } else {
        (MouseEventKind::Mousedown, button_from_code(code))
    };

    MouseEvent {
        x: decode_coordinate(b2),
        y: decode_coordinate(b3),
        button,
        modifiers,
        kind,
    }
}

/// `(byte - 32) mod 256`, with 0 read as 256.
#[must_use]
pub fn decode_coordinate(byte: u8) -> u16 {
    match byte.wrapping_sub(X10_MOUSE_BYTE_OFFSET) {
        0 => 256,
        value => u16::from(value),
    }
}

fn button_from_code(code: u8) -> Option<MouseButton> {
    match code {
        0 => Some(MouseButton::Left),
        1 => Some(MouseButton::Middle),
        2 => Some(MouseButton::Right),
        _ => None,
    }
}
