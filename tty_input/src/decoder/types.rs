// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Event types produced by the decoder.
//!
//! These are transient values: built when a match completes, handed to the
//! [`EventDispatcher`], and not retained afterward.
//!
//! [`EventDispatcher`]: crate::EventDispatcher

use crate::{MODIFIER_ALT, MODIFIER_CTRL, MODIFIER_SHIFT};
use smallstr::SmallString;
use smallvec::SmallVec;
use std::ops::BitOr;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Canonical key name (`"f1"`, `"home"`, `"escape"`, or the literal character). Stored
/// inline since every catalogued name and every `char` fits in 16 bytes.
pub type KeyName = SmallString<[u8; 16]>;

/// Exact raw bytes consumed to produce one event.
pub type SequenceBytes = SmallVec<[u8; 16]>;

/// Keyboard modifiers for input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyModifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// Decode a `Shift(1) | Alt(2) | Ctrl(4)` bitfield.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            shift: bits & MODIFIER_SHIFT != 0,
            alt: bits & MODIFIER_ALT != 0,
            ctrl: bits & MODIFIER_CTRL != 0,
        }
    }

    /// Same modifiers with Alt held as well.
    #[must_use]
    pub const fn with_alt(self) -> Self {
        Self { alt: true, ..self }
    }

    #[must_use]
    pub const fn is_none(self) -> bool { !self.shift && !self.ctrl && !self.alt }
}

impl BitOr for KeyModifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            shift: self.shift | rhs.shift,
            ctrl: self.ctrl | rhs.ctrl,
            alt: self.alt | rhs.alt,
        }
    }
}

/// A decoded keystroke.
///
/// `sequence` reconstructs the consumed input byte for byte. `name` comes either from a
/// sequence table entry (`is_special == true` for named keys) or from the assembled
/// character itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub name: KeyName,
    pub sequence: SequenceBytes,
    pub is_special: bool,
    pub modifiers: KeyModifiers,
}

impl KeyboardEvent {
    /// Event for a literal character. `sequence` holds the character bytes, plus the
    /// leading introducer for an Alt chord.
    #[must_use]
    pub fn character(ch: char, sequence: &[u8], modifiers: KeyModifiers) -> Self {
        let mut name = KeyName::new();
        name.push(ch);
        Self {
            name,
            sequence: SequenceBytes::from_slice(sequence),
            is_special: false,
            modifiers,
        }
    }

    /// Event for a named key such as `"f1"` or `"escape"`.
    #[must_use]
    pub fn special(name: &str, sequence: &[u8], modifiers: KeyModifiers) -> Self {
        Self {
            name: KeyName::from(name),
            sequence: SequenceBytes::from_slice(sequence),
            is_special: true,
            modifiers,
        }
    }

    /// The consumed bytes as text. Every byte form the decoder emits as a keypress is
    /// valid UTF-8, so this is only `None` for hand built events.
    #[must_use]
    pub fn sequence_str(&self) -> Option<&str> { std::str::from_utf8(&self.sequence).ok() }

    #[must_use]
    pub fn alt(&self) -> bool { self.modifiers.alt }

    #[must_use]
    pub fn ctrl(&self) -> bool { self.modifiers.ctrl }

    #[must_use]
    pub fn shift(&self) -> bool { self.modifiers.shift }
}

/// Mouse buttons, numbered the way consumers see them (1=left, 2=middle, 3=right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Middle => 2,
            MouseButton::Right => 3,
        }
    }
}

/// What a mouse report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Button pressed. Always carries a button.
    Mousedown,
    /// Button released. X10 reports never say which one, so no button.
    Mouseup,
    /// Motion report. Carries the held button, if any.
    Mousemove,
}

/// A decoded mouse report. Coordinates are 1-based with (1, 1) at the top left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub x: u16,
    pub y: u16,
    pub button: Option<MouseButton>,
    pub modifiers: KeyModifiers,
    pub kind: MouseEventKind,
}

/// Anything the decoder can emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TtyInputEvent {
    Keyboard(KeyboardEvent),
    Mouse(MouseEvent),
}

impl TtyInputEvent {
    /// The dispatcher channel this event is delivered on.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            TtyInputEvent::Keyboard(_) => EventKind::Keypress,
            TtyInputEvent::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::Mousedown => EventKind::Mousedown,
                MouseEventKind::Mouseup => EventKind::Mouseup,
                MouseEventKind::Mousemove => EventKind::Mousemove,
            },
        }
    }

    #[must_use]
    pub fn as_keyboard(&self) -> Option<&KeyboardEvent> {
        match self {
            TtyInputEvent::Keyboard(it) => Some(it),
            TtyInputEvent::Mouse(_) => None,
        }
    }

    #[must_use]
    pub fn as_mouse(&self) -> Option<&MouseEvent> {
        match self {
            TtyInputEvent::Mouse(it) => Some(it),
            TtyInputEvent::Keyboard(_) => None,
        }
    }
}

/// Event kind that consumers subscribe to. Displays and parses as the lowercase strings
/// `"keypress"`, `"mousedown"`, `"mouseup"`, `"mousemove"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
    Keypress,
    Mousedown,
    Mouseup,
    Mousemove,
}
