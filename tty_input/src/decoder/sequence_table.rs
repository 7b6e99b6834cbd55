// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Sequence table: every known escape and control byte form, stored in a byte trie.
//!
//! The table is generated once from [`key_catalog`], an ordered list of logical keys and
//! the conventions they are sent in. Each catalog entry expands into all of its byte forms
//! (plain, numeric modifier parameter, rxvt trailing character, doubled introducer), and
//! each form becomes one path in the trie.
//!
//! # Matching
//!
//! [`SequenceTable::lookup`] walks the trie with the accumulated bytes:
//!
//! | Walk outcome                                 | Result                     |
//! |:---------------------------------------------|:---------------------------|
//! | buffer ended on a node that has children     | [`TableLookup::Pending`]   |
//! | buffer ended on a leaf                       | [`TableLookup::Matched`]   |
//! | walk fell off the trie after a terminal node | `Matched` (deepest one)    |
//! | walk fell off the trie before any terminal   | [`TableLookup::NoMatch`]   |
//!
//! So a form is only committed once enough bytes rule out every longer form that shares
//! its prefix.
//!
//! `ESC [ M` never appears in the trie. It is the X10 mouse prefix and the router hands
//! it to the mouse decoder before consulting this table.

use crate::{ANSI_CSI_BRACKET, ANSI_ESC, ANSI_FUNCTION_KEY_TERMINATOR, ANSI_PARAM_SEPARATOR,
            ANSI_SS3_O, ASCII_DEL, CONTROL_BACKSPACE, CONTROL_ENTER, CONTROL_LF,
            CONTROL_TAB, CTRL_LETTER_MAX, CTRL_LETTER_MIN, CTRL_TO_LOWERCASE_MASK,
            KeyModifiers, LETTER_KEY_MODIFIER_BASE, MODIFIER_PARAMETER_BASE_CHAR,
            MODIFIER_PARAMETER_MAX, RXVT_CTRL_SHIFT_TERMINATOR, RXVT_CTRL_TERMINATOR,
            RXVT_SHIFT_TERMINATOR, SequenceBytes};
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

const DEBUG_TTY_INPUT_SEQUENCE_TABLE: bool = false;

// ╭──────────────────────────────────────────────────────────────────────────────────╮
// │ Entries                                                                          │
// ╰──────────────────────────────────────────────────────────────────────────────────╯

/// How the modifiers of a matched form are read from its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierRule {
    /// The bytes carry no modifier information.
    None,
    /// xterm numeric parameter `M` (`ESC [ N ; M final`), `M - 1` is the bitfield.
    Parameter(u8),
    /// rxvt trailing character: `~` none, `^` ctrl, `$` shift, `@` ctrl+shift.
    TrailingChar(u8),
}

impl ModifierRule {
    #[must_use]
    pub const fn decode(self) -> KeyModifiers {
        match self {
            ModifierRule::None => KeyModifiers::NONE,
            ModifierRule::Parameter(param) => {
                KeyModifiers::from_bits(param.saturating_sub(1))
            }
            ModifierRule::TrailingChar(RXVT_CTRL_TERMINATOR) => KeyModifiers::CTRL,
            ModifierRule::TrailingChar(RXVT_SHIFT_TERMINATOR) => KeyModifiers::SHIFT,
            ModifierRule::TrailingChar(RXVT_CTRL_SHIFT_TERMINATOR) => KeyModifiers {
                ctrl: true,
                shift: true,
                alt: false,
            },
            ModifierRule::TrailingChar(_) => KeyModifiers::NONE,
        }
    }
}

/// What one byte form in the trie decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceEntry {
    pub name: &'static str,
    pub is_special: bool,
    /// Modifiers implied by the convention itself (rxvt shift arrows, Ctrl+letter bytes).
    pub base_modifiers: KeyModifiers,
    pub rule: ModifierRule,
    /// The form is preceded by an extra introducer, which means Alt.
    pub alt_prefix: bool,
}

impl SequenceEntry {
    #[must_use]
    pub fn modifiers(&self) -> KeyModifiers {
        let modifiers = self.base_modifiers | self.rule.decode();
        if self.alt_prefix {
            modifiers.with_alt()
        } else {
            modifiers
        }
    }
}

// ╭──────────────────────────────────────────────────────────────────────────────────╮
// │ Catalog                                                                          │
// ╰──────────────────────────────────────────────────────────────────────────────────╯

/// The byte convention a catalog entry is sent in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyForm {
    /// A single control byte, plus `ESC <byte>` for Alt.
    ControlByte(u8),
    /// `ESC [ letter`, plus `ESC [ 1 ; M letter`.
    CsiLetter(u8),
    /// `ESC [ letter` only.
    CsiLetterOnly(u8),
    /// `ESC O letter`.
    Ss3Letter(u8),
    /// Linux console `ESC [ [ letter`.
    ConsoleLetter(u8),
    /// `ESC [ N ~`, plus `ESC [ N ; M ~` and `ESC [ N ^ $ @`.
    Tilde(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub form: KeyForm,
    pub name: &'static str,
    pub is_special: bool,
    pub modifiers: KeyModifiers,
}

const fn key(form: KeyForm, name: &'static str) -> CatalogEntry {
    CatalogEntry {
        form,
        name,
        is_special: true,
        modifiers: KeyModifiers::NONE,
    }
}

const fn key_with(form: KeyForm, name: &'static str, modifiers: KeyModifiers) -> CatalogEntry {
    CatalogEntry {
        form,
        name,
        is_special: true,
        modifiers,
    }
}

/// Named keys. Order matters: when two entries produce the same bytes the earlier wins.
pub const NAMED_KEYS: &[CatalogEntry] = {
    use KeyForm::{ConsoleLetter, ControlByte, CsiLetter, CsiLetterOnly, Ss3Letter, Tilde};
    &[
        // Control bytes.
        key(ControlByte(CONTROL_ENTER), "enter"),
        key(ControlByte(CONTROL_LF), "enter"),
        key(ControlByte(CONTROL_TAB), "tab"),
        key(ControlByte(ASCII_DEL), "backspace"),
        key(ControlByte(CONTROL_BACKSPACE), "backspace"),
        key_with(CsiLetterOnly(b'Z'), "tab", KeyModifiers::SHIFT),
        // Arrows.
        key(CsiLetter(b'A'), "up"),
        key(CsiLetter(b'B'), "down"),
        key(CsiLetter(b'C'), "right"),
        key(CsiLetter(b'D'), "left"),
        key(Ss3Letter(b'A'), "up"),
        key(Ss3Letter(b'B'), "down"),
        key(Ss3Letter(b'C'), "right"),
        key(Ss3Letter(b'D'), "left"),
        key_with(CsiLetterOnly(b'a'), "up", KeyModifiers::SHIFT),
        key_with(CsiLetterOnly(b'b'), "down", KeyModifiers::SHIFT),
        key_with(CsiLetterOnly(b'c'), "right", KeyModifiers::SHIFT),
        key_with(CsiLetterOnly(b'd'), "left", KeyModifiers::SHIFT),
        key_with(Ss3Letter(b'a'), "up", KeyModifiers::CTRL),
        key_with(Ss3Letter(b'b'), "down", KeyModifiers::CTRL),
        key_with(Ss3Letter(b'c'), "right", KeyModifiers::CTRL),
        key_with(Ss3Letter(b'd'), "left", KeyModifiers::CTRL),
        // Navigation.
        key(CsiLetter(b'H'), "home"),
        key(Ss3Letter(b'H'), "home"),
        key(Tilde(1), "home"),
        key(Tilde(7), "home"),
        key(CsiLetter(b'F'), "end"),
        key(Ss3Letter(b'F'), "end"),
        key(Tilde(4), "end"),
        key(Tilde(8), "end"),
        key(CsiLetter(b'E'), "clear"),
        key(Ss3Letter(b'E'), "clear"),
        key(Tilde(2), "insert"),
        key(Tilde(3), "delete"),
        key(Tilde(5), "pageup"),
        key(Tilde(6), "pagedown"),
        // Function keys.
        key(Ss3Letter(b'P'), "f1"),
        key(Ss3Letter(b'Q'), "f2"),
        key(Ss3Letter(b'R'), "f3"),
        key(Ss3Letter(b'S'), "f4"),
        key(CsiLetter(b'P'), "f1"),
        key(CsiLetter(b'Q'), "f2"),
        key(CsiLetter(b'R'), "f3"),
        key(CsiLetter(b'S'), "f4"),
        key(ConsoleLetter(b'A'), "f1"),
        key(ConsoleLetter(b'B'), "f2"),
        key(ConsoleLetter(b'C'), "f3"),
        key(ConsoleLetter(b'D'), "f4"),
        key(ConsoleLetter(b'E'), "f5"),
        key(Tilde(11), "f1"),
        key(Tilde(12), "f2"),
        key(Tilde(13), "f3"),
        key(Tilde(14), "f4"),
        key(Tilde(15), "f5"),
        key(Tilde(17), "f6"),
        key(Tilde(18), "f7"),
        key(Tilde(19), "f8"),
        key(Tilde(20), "f9"),
        key(Tilde(21), "f10"),
        key(Tilde(23), "f11"),
        key(Tilde(24), "f12"),
    ]
};

const CTRL_LETTER_NAMES: [&str; 26] = [
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q",
    "r", "s", "t", "u", "v", "w", "x", "y", "z",
];

/// The full ordered catalog: [`NAMED_KEYS`] followed by Ctrl+letter for every control
/// byte in `0x01..=0x1A`. Bytes already claimed by a named key (tab, enter, backspace)
/// stay with the named key.
#[must_use]
pub fn key_catalog() -> Vec<CatalogEntry> {
    let ctrl_letters = (CTRL_LETTER_MIN..=CTRL_LETTER_MAX).filter_map(|byte| {
        let letter = byte | CTRL_TO_LOWERCASE_MASK;
        let name = *CTRL_LETTER_NAMES.get(usize::from(letter.checked_sub(b'a')?))?;
        Some(CatalogEntry {
            form: KeyForm::ControlByte(byte),
            name,
            is_special: false,
            modifiers: KeyModifiers::CTRL,
        })
    });
    NAMED_KEYS.iter().copied().chain(ctrl_letters).collect()
}

/// Every byte form of one catalog entry, introducer-doubled variants included.
fn expand_catalog_entry(catalog_entry: &CatalogEntry) -> Vec<(SequenceBytes, SequenceEntry)> {
    let entry_for = |rule: ModifierRule| SequenceEntry {
        name: catalog_entry.name,
        is_special: catalog_entry.is_special,
        base_modifiers: catalog_entry.modifiers,
        rule,
        alt_prefix: false,
    };

    let mut forms: Vec<(SequenceBytes, SequenceEntry)> = vec![];
    match catalog_entry.form {
        KeyForm::ControlByte(byte) => {
            forms.push((SequenceBytes::from_slice(&[byte]), entry_for(ModifierRule::None)));
        }
        KeyForm::CsiLetter(letter) => {
            forms.push((csi(&[letter]), entry_for(ModifierRule::None)));
            for param in 1..=MODIFIER_PARAMETER_MAX {
                let mut bytes = csi(&[]);
                push_decimal(&mut bytes, LETTER_KEY_MODIFIER_BASE);
                bytes.push(ANSI_PARAM_SEPARATOR);
                bytes.push(MODIFIER_PARAMETER_BASE_CHAR + param - 1);
                bytes.push(letter);
                forms.push((bytes, entry_for(ModifierRule::Parameter(param))));
            }
        }
        KeyForm::CsiLetterOnly(letter) => {
            forms.push((csi(&[letter]), entry_for(ModifierRule::None)));
        }
        KeyForm::Ss3Letter(letter) => {
            let bytes = SequenceBytes::from_slice(&[ANSI_ESC, ANSI_SS3_O, letter]);
            forms.push((bytes, entry_for(ModifierRule::None)));
        }
        KeyForm::ConsoleLetter(letter) => {
            forms.push((csi(&[ANSI_CSI_BRACKET, letter]), entry_for(ModifierRule::None)));
        }
        KeyForm::Tilde(code) => {
            for terminator in [
                ANSI_FUNCTION_KEY_TERMINATOR,
                RXVT_CTRL_TERMINATOR,
                RXVT_SHIFT_TERMINATOR,
                RXVT_CTRL_SHIFT_TERMINATOR,
            ] {
                let mut bytes = csi(&[]);
                push_decimal(&mut bytes, u16::from(code));
                bytes.push(terminator);
                forms.push((bytes, entry_for(ModifierRule::TrailingChar(terminator))));
            }
            for param in 1..=MODIFIER_PARAMETER_MAX {
                let mut bytes = csi(&[]);
                push_decimal(&mut bytes, u16::from(code));
                bytes.push(ANSI_PARAM_SEPARATOR);
                bytes.push(MODIFIER_PARAMETER_BASE_CHAR + param - 1);
                bytes.push(ANSI_FUNCTION_KEY_TERMINATOR);
                forms.push((bytes, entry_for(ModifierRule::Parameter(param))));
            }
        }
    }

    // One more introducer in front of any form means Alt.
    let doubled: Vec<_> = forms
        .iter()
        .map(|(bytes, entry)| {
            let mut doubled_bytes = SequenceBytes::from_slice(&[ANSI_ESC]);
            doubled_bytes.extend_from_slice(bytes);
            let doubled_entry = SequenceEntry {
                alt_prefix: true,
                ..*entry
            };
            (doubled_bytes, doubled_entry)
        })
        .collect();
    forms.extend(doubled);
    forms
}

fn csi(tail: &[u8]) -> SequenceBytes {
    let mut bytes = SequenceBytes::from_slice(&[ANSI_ESC, ANSI_CSI_BRACKET]);
    bytes.extend_from_slice(tail);
    bytes
}

fn push_decimal(bytes: &mut SequenceBytes, value: u16) {
    bytes.extend_from_slice(value.to_string().as_bytes());
}

// ╭──────────────────────────────────────────────────────────────────────────────────╮
// │ Trie                                                                             │
// ╰──────────────────────────────────────────────────────────────────────────────────╯

#[derive(Debug, Default)]
struct TrieNode {
    children: FxHashMap<u8, TrieNode>,
    entry: Option<SequenceEntry>,
}

/// Result of [`SequenceTable::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLookup<'a> {
    /// The first `len` bytes of the buffer are a complete form.
    Matched { entry: &'a SequenceEntry, len: usize },
    /// The buffer is a strict prefix of at least one form. Wait for more bytes.
    Pending,
    /// No form starts with these bytes.
    NoMatch,
}

#[derive(Debug, Default)]
pub struct SequenceTable {
    root: TrieNode,
    form_count: usize,
    longest_form_len: usize,
}

static SEQUENCE_TABLE: LazyLock<SequenceTable> =
    LazyLock::new(|| SequenceTable::from_catalog(&key_catalog()));

impl SequenceTable {
    /// The table built from [`key_catalog`], shared by every decoder in the process.
    #[must_use]
    pub fn global() -> &'static SequenceTable { &SEQUENCE_TABLE }

    #[must_use]
    pub fn from_catalog(catalog: &[CatalogEntry]) -> Self {
        let mut table = Self::default();
        for catalog_entry in catalog {
            for (bytes, entry) in expand_catalog_entry(catalog_entry) {
                table.insert(&bytes, entry);
            }
        }
        table
    }

    /// Add one byte form. Returns `false` (and keeps the existing entry) if the form is
    /// already present.
    pub fn insert(&mut self, bytes: &[u8], entry: SequenceEntry) -> bool {
        let mut node = &mut self.root;
        for byte in bytes {
            node = node.children.entry(*byte).or_default();
        }

        if let Some(existing) = &node.entry {
            DEBUG_TTY_INPUT_SEQUENCE_TABLE.then(|| {
                tracing::debug!(
                    message = "SequenceTable: duplicate form, keeping earlier entry",
                    bytes = ?bytes,
                    kept = existing.name,
                    dropped = entry.name,
                );
            });
            return false;
        }

        node.entry = Some(entry);
        self.form_count += 1;
        self.longest_form_len = self.longest_form_len.max(bytes.len());
        true
    }

    #[must_use]
    pub fn lookup(&self, buffer: &[u8]) -> TableLookup<'_> {
        let mut node = &self.root;
        let mut deepest_terminal: Option<(&SequenceEntry, usize)> = None;

        for (index, byte) in buffer.iter().enumerate() {
            let Some(child) = node.children.get(byte) else {
                return match deepest_terminal {
                    Some((entry, len)) => TableLookup::Matched { entry, len },
                    None => TableLookup::NoMatch,
                };
            };
            node = child;
            if let Some(entry) = &node.entry {
                deepest_terminal = Some((entry, index + 1));
            }
        }

        // Buffer exhausted inside the trie.
        if !node.children.is_empty() {
            return TableLookup::Pending;
        }
        match deepest_terminal {
            Some((entry, len)) => TableLookup::Matched { entry, len },
            None => TableLookup::NoMatch,
        }
    }

    /// Number of distinct byte forms stored.
    #[must_use]
    pub fn len(&self) -> usize { self.form_count }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.form_count == 0 }

    #[must_use]
    pub fn longest_form_len(&self) -> usize { self.longest_form_len }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(bytes: &[u8]) -> (SequenceEntry, usize) {
        match SequenceTable::global().lookup(bytes) {
            TableLookup::Matched { entry, len } => (*entry, len),
            other => panic!("expected a match for {bytes:?}, got {other:?}"),
        }
    }

    const NONE: KeyModifiers = KeyModifiers::NONE;
    const SHIFT: KeyModifiers = KeyModifiers::SHIFT;
    const CTRL: KeyModifiers = KeyModifiers::CTRL;
    const ALT: KeyModifiers = KeyModifiers::ALT;
    const CTRL_ALT: KeyModifiers = KeyModifiers {
        shift: false,
        ctrl: true,
        alt: true,
    };
    const ALT_SHIFT: KeyModifiers = KeyModifiers {
        shift: true,
        ctrl: false,
        alt: true,
    };
    const CTRL_SHIFT: KeyModifiers = KeyModifiers {
        shift: true,
        ctrl: true,
        alt: false,
    };

    mod tests_catalog_forms {
        use super::*;
        use pretty_assertions::assert_eq;
        use test_case::test_case;

        #[test_case(b"\x1b[A", "up", NONE)]
        #[test_case(b"\x1bOB", "down", NONE)]
        #[test_case(b"\x1b[1;5C", "right", CTRL)]
        #[test_case(b"\x1b[1;3D", "left", ALT)]
        #[test_case(b"\x1b[a", "up", SHIFT)]
        #[test_case(b"\x1bOd", "left", CTRL)]
        #[test_case(b"\x1b[H", "home", NONE)]
        #[test_case(b"\x1bOH", "home", NONE)]
        #[test_case(b"\x1b[1~", "home", NONE)]
        #[test_case(b"\x1b[7~", "home", NONE)]
        #[test_case(b"\x1b[1;2H", "home", SHIFT)]
        #[test_case(b"\x1b[F", "end", NONE)]
        #[test_case(b"\x1b[4~", "end", NONE)]
        #[test_case(b"\x1b[8$", "end", SHIFT)]
        #[test_case(b"\x1b[E", "clear", NONE)]
        #[test_case(b"\x1bOE", "clear", NONE)]
        #[test_case(b"\x1b[2;2~", "insert", SHIFT)]
        #[test_case(b"\x1b[3^", "delete", CTRL)]
        #[test_case(b"\x1b[5~", "pageup", NONE)]
        #[test_case(b"\x1b[6@", "pagedown", CTRL_SHIFT)]
        #[test_case(b"\x1bOP", "f1", NONE)]
        #[test_case(b"\x1b[[A", "f1", NONE)]
        #[test_case(b"\x1b[1;2P", "f1", SHIFT)]
        #[test_case(b"\x1bOQ", "f2", NONE)]
        #[test_case(b"\x1b[R", "f3", NONE)]
        #[test_case(b"\x1b[14~", "f4", NONE)]
        #[test_case(b"\x1b[[E", "f5", NONE)]
        #[test_case(b"\x1b[15^", "f5", CTRL)]
        #[test_case(b"\x1b[17;7~", "f6", CTRL_ALT)]
        #[test_case(b"\x1b\x1b[18$", "f7", ALT_SHIFT)]
        #[test_case(b"\x1b[21~", "f10", NONE)]
        #[test_case(b"\x1b[23~", "f11", NONE)]
        #[test_case(b"\x1b[24;8~", "f12", KeyModifiers { shift: true, ctrl: true, alt: true })]
        #[test_case(b"\x1b[Z", "tab", SHIFT)]
        fn special_forms(bytes: &[u8], name: &str, modifiers: KeyModifiers) {
            let (entry, len) = matched(bytes);
            assert_eq!(len, bytes.len());
            assert_eq!(entry.name, name);
            assert_eq!(entry.modifiers(), modifiers);
            assert!(entry.is_special);
        }

        #[test_case(b"\r", "enter", NONE, true)]
        #[test_case(b"\n", "enter", NONE, true)]
        #[test_case(b"\t", "tab", NONE, true)]
        #[test_case(b"\x7f", "backspace", NONE, true)]
        #[test_case(b"\x08", "backspace", NONE, true)]
        #[test_case(b"\x01", "a", CTRL, false)]
        #[test_case(b"\x1a", "z", CTRL, false)]
        #[test_case(b"\x1b\r", "enter", ALT, true)]
        #[test_case(b"\x1b\x03", "c", CTRL_ALT, false)]
        fn control_bytes(bytes: &[u8], name: &str, modifiers: KeyModifiers, is_special: bool) {
            let (entry, len) = matched(bytes);
            assert_eq!(len, bytes.len());
            assert_eq!(entry.name, name);
            assert_eq!(entry.modifiers(), modifiers);
            assert_eq!(entry.is_special, is_special);
        }
    }

    mod tests_matching {
        use super::*;
        use pretty_assertions::assert_eq;
        use test_case::test_case;

        #[test_case(b"\x1b")]
        #[test_case(b"\x1b\x1b")]
        #[test_case(b"\x1b[")]
        #[test_case(b"\x1b[1")]
        #[test_case(b"\x1b[1;")]
        #[test_case(b"\x1b[1;2")]
        #[test_case(b"\x1b[[")]
        #[test_case(b"\x1bO")]
        #[test_case(b"\x1b\x1b[2")]
        fn strict_prefixes_are_pending(bytes: &[u8]) {
            assert_eq!(SequenceTable::global().lookup(bytes), TableLookup::Pending);
        }

        #[test]
        fn empty_buffer_is_pending() {
            assert_eq!(SequenceTable::global().lookup(b""), TableLookup::Pending);
        }

        #[test]
        fn mouse_prefix_is_not_in_the_table() {
            assert_eq!(SequenceTable::global().lookup(b"\x1b[M"), TableLookup::NoMatch);
        }

        #[test]
        fn unknown_forms_do_not_match() {
            assert_eq!(SequenceTable::global().lookup(b"a"), TableLookup::NoMatch);
            assert_eq!(SequenceTable::global().lookup(b"\x1bx"), TableLookup::NoMatch);
            assert_eq!(SequenceTable::global().lookup(b"\x1b[I"), TableLookup::NoMatch);
        }

        #[test]
        fn trailing_bytes_are_left_alone() {
            let (entry, len) = matched(b"\x1b[Axyz");
            assert_eq!(entry.name, "up");
            assert_eq!(len, 3);
        }

        #[test]
        fn shared_prefix_waits_for_the_distinguishing_byte() {
            // `ESC [ 1` leads to home (`~`), f1..f5 (`1..5 ~`), and the `; M` forms.
            assert_eq!(SequenceTable::global().lookup(b"\x1b[1"), TableLookup::Pending);
            assert_eq!(matched(b"\x1b[1~").0.name, "home");
            assert_eq!(matched(b"\x1b[11~").0.name, "f1");
            assert_eq!(matched(b"\x1b[1;5A").0.name, "up");
        }

        #[test]
        fn longest_form_covers_doubled_parameter_forms() {
            // ESC ESC [ 2 4 ; 8 ~
            assert_eq!(SequenceTable::global().longest_form_len(), 8);
        }
    }

    mod tests_construction {
        use super::*;
        use pretty_assertions::assert_eq;
        use test_case::test_case;

        #[test]
        fn earlier_catalog_entry_wins_on_duplicate_form() {
            let table = SequenceTable::from_catalog(&[
                key(KeyForm::CsiLetterOnly(b'Q'), "first"),
                key(KeyForm::CsiLetterOnly(b'Q'), "second"),
            ]);
            let TableLookup::Matched { entry, .. } = table.lookup(b"\x1b[Q") else {
                panic!("expected a match");
            };
            assert_eq!(entry.name, "first");
            // Plain form plus its doubled variant.
            assert_eq!(table.len(), 2);
        }

        #[test]
        fn terminal_node_with_children_matches_only_when_walk_falls_off() {
            let mut table = SequenceTable::default();
            let entry = |name| SequenceEntry {
                name,
                is_special: true,
                base_modifiers: KeyModifiers::NONE,
                rule: ModifierRule::None,
                alt_prefix: false,
            };
            assert!(table.insert(b"ab", entry("short")));
            assert!(table.insert(b"abc", entry("long")));
            assert!(!table.insert(b"ab", entry("dupe")));

            assert_eq!(table.lookup(b"ab"), TableLookup::Pending);
            assert_eq!(
                table.lookup(b"abx"),
                TableLookup::Matched {
                    entry: &entry("short"),
                    len: 2
                }
            );
            assert_eq!(
                table.lookup(b"abc"),
                TableLookup::Matched {
                    entry: &entry("long"),
                    len: 3
                }
            );
        }

        #[test]
        fn ctrl_letters_skip_bytes_claimed_by_named_keys() {
            let catalog = key_catalog();
            let tab_entries: Vec<_> = catalog
                .iter()
                .filter(|it| it.form == KeyForm::ControlByte(CONTROL_TAB))
                .collect();
            assert_eq!(tab_entries.len(), 2);
            assert_eq!(tab_entries[0].name, "tab");
            // The generated Ctrl+I entry is shadowed in the table.
            assert_eq!(matched(b"\t").0.name, "tab");
        }

        #[test_case(ModifierRule::None, NONE)]
        #[test_case(ModifierRule::Parameter(1), NONE)]
        #[test_case(ModifierRule::Parameter(4), ALT_SHIFT)]
        #[test_case(ModifierRule::TrailingChar(b'~'), NONE)]
        #[test_case(ModifierRule::TrailingChar(b'@'), CTRL_SHIFT)]
        fn modifier_rules(rule: ModifierRule, expected: KeyModifiers) {
            assert_eq!(rule.decode(), expected);
        }
    }
}
