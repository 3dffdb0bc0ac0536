//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use blockfield::field::{
    BusinessValidator, ChangeEvent, FieldEvent, GroupId, TextField, ValidationOutcome,
};
use blockfield::keys::{decode_key_event, DecodedKey, KeyPlatform, RawKeyEvent};

/// Validator accepting any non-empty string
pub fn reject_empty() -> BusinessValidator {
    Box::new(|text| {
        if text.is_empty() {
            ValidationOutcome::Rejected
        } else {
            ValidationOutcome::Accepted(text.to_owned())
        }
    })
}

/// Validator accepting only unsigned digit strings
pub fn digits_only() -> BusinessValidator {
    Box::new(|text| {
        if !text.is_empty() && text.chars().all(|ch| ch.is_ascii_digit()) {
            ValidationOutcome::Accepted(text.to_owned())
        } else {
            ValidationOutcome::Rejected
        }
    })
}

/// Validator accepting integers divisible by ten
pub fn divisible_by_ten() -> BusinessValidator {
    Box::new(|text| match text.parse::<i64>() {
        Ok(n) if n % 10 == 0 => ValidationOutcome::Accepted(text.to_owned()),
        _ => ValidationOutcome::Rejected,
    })
}

/// Validator that uppercases everything
pub fn uppercased() -> BusinessValidator {
    Box::new(|text| ValidationOutcome::Transformed(text.to_uppercase()))
}

/// Committed-change events, in order
pub fn changes(events: &[FieldEvent]) -> Vec<ChangeEvent> {
    events
        .iter()
        .filter_map(|e| e.as_change().cloned())
        .collect()
}

/// Group ids of all committed changes, in order
pub fn change_groups(events: &[FieldEvent]) -> Vec<GroupId> {
    changes(events).into_iter().map(|c| c.group).collect()
}

/// True if `events` contains a validity flip to `valid`
pub fn has_validity(events: &[FieldEvent], valid: bool) -> bool {
    events.contains(&FieldEvent::ValidityChanged(valid))
}

/// Insert each character in order, returning every event produced
pub fn type_text(field: &mut TextField, text: &str) -> Vec<FieldEvent> {
    let mut events = Vec::new();
    for ch in text.chars() {
        events.extend(field.insert_character(ch));
    }
    events
}

/// Decode one raw key event and apply it the way a host would
pub fn apply_key(field: &mut TextField, raw: RawKeyEvent, platform: KeyPlatform) -> Vec<FieldEvent> {
    match decode_key_event(raw, platform) {
        DecodedKey::Insert(ch) => field.insert_character(ch),
        DecodedKey::Command(command) => field.key_command(command),
        DecodedKey::ControlCombo | DecodedKey::Ignored => Vec::new(),
    }
}
