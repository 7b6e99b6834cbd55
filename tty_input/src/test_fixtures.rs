// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Shared helpers for the unit tests in this crate.

use crate::{KeyModifiers, KeyName, KeyboardEvent, SequenceBytes, TtyInputEvent};

/// Keypress with every field spelled out, for comparing against decoder output.
pub fn keypress(
    name: &str,
    sequence: &str,
    is_special: bool,
    modifiers: KeyModifiers,
) -> TtyInputEvent {
    TtyInputEvent::Keyboard(KeyboardEvent {
        name: KeyName::from(name),
        sequence: SequenceBytes::from_slice(sequence.as_bytes()),
        is_special,
        modifiers,
    })
}

/// Key names in order. Mouse events show up as `"<kind>@x,y"`.
pub fn key_names(events: impl Iterator<Item = TtyInputEvent>) -> Vec<String> {
    events
        .map(|event| match &event {
            TtyInputEvent::Keyboard(key) => key.name.to_string(),
            TtyInputEvent::Mouse(mouse) => {
                format!("{}@{},{}", event.kind(), mouse.x, mouse.y)
            }
        })
        .collect()
}
