// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminal input sequence constants.
//!
//! # Sequence families
//!
//! Every family below starts with the introducer byte [`ANSI_ESC`]:
//!
//! | Family                 | Shape                 | Example            |
//! |:-----------------------|:----------------------|:-------------------|
//! | CSI letter             | `ESC [ letter`        | `ESC [ A` (up)     |
//! | Linux console          | `ESC [ [ letter`      | `ESC [ [ A` (F1)   |
//! | SS3 letter             | `ESC O letter`        | `ESC O Q` (F2)     |
//! | CSI tilde              | `ESC [ N ~`           | `ESC [ 1 4 ~` (F4) |
//! | CSI parameter modifier | `ESC [ N ; M final`   | `ESC [ 1 ; 2 P`    |
//! | rxvt trailing modifier | `ESC [ N t`           | `ESC [ 1 5 ^`      |
//! | Doubled introducer     | `ESC ESC <any above>` | `ESC ESC [ 1 8 $`  |
//! | X10 mouse report       | `ESC [ M b1 b2 b3`    | `ESC [ M # * !`    |
//!
//! # Modifier parameter
//!
//! `M = 1 + bitfield` where the bitfield is `Shift(1) | Alt(2) | Ctrl(4)`:
//! - '1' = no modifiers
//! - '2' = Shift
//! - '3' = Alt
//! - '4' = Alt+Shift
//! - '5' = Ctrl
//! - '6' = Ctrl+Shift
//! - '7' = Ctrl+Alt
//! - '8' = Ctrl+Alt+Shift

// ==================== ANSI Sequence Components ====================

/// ESC byte (27 in decimal, 0x1B in hex). The introducer byte.
pub const ANSI_ESC: u8 = 0x1B;

/// CSI bracket byte: `[` (91 in decimal, 0x5B in hex)
pub const ANSI_CSI_BRACKET: u8 = b'[';

/// SS3 'O' byte: Second byte of SS3 sequences (0x4F)
pub const ANSI_SS3_O: u8 = b'O';

/// Parameter separator byte: `;` (59 in decimal, 0x3B in hex)
pub const ANSI_PARAM_SEPARATOR: u8 = b';';

/// Function key terminator: `~` (126 in decimal, 0x7E in hex)
pub const ANSI_FUNCTION_KEY_TERMINATOR: u8 = b'~';

// ==================== rxvt Trailing Modifier Terminators ====================

/// `ESC [ N ^`: Ctrl variant of a tilde key.
pub const RXVT_CTRL_TERMINATOR: u8 = b'^';

/// `ESC [ N $`: Shift variant of a tilde key.
pub const RXVT_SHIFT_TERMINATOR: u8 = b'$';

/// `ESC [ N @`: Ctrl+Shift variant of a tilde key.
pub const RXVT_CTRL_SHIFT_TERMINATOR: u8 = b'@';

// ==================== CSI Grammar ====================

/// Lowest parameter or intermediate byte inside a CSI sequence (space).
pub const CSI_PARAM_OR_INTERMEDIATE_MIN: u8 = 0x20;

/// Highest parameter byte inside a CSI sequence (`?`).
pub const CSI_PARAM_OR_INTERMEDIATE_MAX: u8 = 0x3F;

/// Lowest CSI final byte (`@`).
pub const CSI_FINAL_BYTE_MIN: u8 = 0x40;

/// Highest CSI final byte (`~`).
pub const CSI_FINAL_BYTE_MAX: u8 = 0x7E;

// ==================== Modifier Masks ====================

/// Modifier mask for Shift key (bit 0)
pub const MODIFIER_SHIFT: u8 = 1;

/// Modifier mask for Alt key (bit 1)
pub const MODIFIER_ALT: u8 = 2;

/// Modifier mask for Ctrl key (bit 2)
pub const MODIFIER_CTRL: u8 = 4;

/// Largest modifier parameter value: `1 + (Shift | Alt | Ctrl)`.
pub const MODIFIER_PARAMETER_MAX: u8 = 8;

/// Modifier parameter base character: `'1'` (ASCII 49). `'1' + mask` gives `'1'..='8'`.
pub const MODIFIER_PARAMETER_BASE_CHAR: u8 = b'1';

/// Parameter that CSI letter keys carry in front of the modifier: `ESC [ 1 ; M A`.
pub const LETTER_KEY_MODIFIER_BASE: u16 = 1;

// ==================== Control Characters ====================
//
// Control characters (0x00-0x1F) are generated when Ctrl is held while typing.
// The transformation is: letter & 0x1F = control_byte
// Reverse: control_byte | 0x60 = lowercase letter

/// ASCII Tab character (0x09). Ctrl+I or the Tab key.
pub const CONTROL_TAB: u8 = b'\t';

/// ASCII Line Feed (0x0A). Ctrl+J, or Enter when the terminal maps CR to LF.
pub const CONTROL_LF: u8 = b'\n';

/// ASCII Carriage Return (0x0D). Enter in raw mode.
pub const CONTROL_ENTER: u8 = b'\r';

/// ASCII Backspace character (0x08). Ctrl+H, or Backspace on some terminals.
pub const CONTROL_BACKSPACE: u8 = 0x08;

/// ASCII DEL character (0x7F), which is what the Backspace key usually sends.
pub const ASCII_DEL: u8 = 0x7F;

/// First Ctrl+letter byte (Ctrl+A).
pub const CTRL_LETTER_MIN: u8 = 0x01;

/// Last Ctrl+letter byte (Ctrl+Z).
pub const CTRL_LETTER_MAX: u8 = 0x1A;

/// `control_byte | 0x60` turns a Ctrl+letter byte back into its lowercase letter.
pub const CTRL_TO_LOWERCASE_MASK: u8 = 0x60;

// ==================== X10 Mouse Reports ====================

/// Third byte of an X10 mouse report: `ESC [ M`.
pub const X10_MOUSE_FINAL: u8 = b'M';

/// Prefix shared by every X10 mouse report.
pub const X10_MOUSE_PREFIX: [u8; 3] = [ANSI_ESC, ANSI_CSI_BRACKET, X10_MOUSE_FINAL];

/// Total length of an X10 mouse report (prefix plus three payload bytes).
pub const X10_MOUSE_REPORT_LEN: usize = 6;

/// Offset added by the terminal to every payload byte so it stays printable.
pub const X10_MOUSE_BYTE_OFFSET: u8 = 32;

/// Low two bits of the button byte: 0/1/2 = left/middle/right pressed, 3 = released.
pub const X10_MOUSE_BUTTON_MASK: u8 = 0b0000_0011;

/// Button code meaning "released" (X10 reports do not say which button).
pub const X10_MOUSE_RELEASE_CODE: u8 = 3;

/// Shift held while the report was generated.
pub const X10_MOUSE_SHIFT_FLAG: u8 = 4;

/// Meta (Alt) held while the report was generated.
pub const X10_MOUSE_META_FLAG: u8 = 8;

/// Ctrl held while the report was generated.
pub const X10_MOUSE_CTRL_FLAG: u8 = 16;

/// Motion report (mouse moved, with or without a held button).
pub const X10_MOUSE_MOTION_FLAG: u8 = 32;
