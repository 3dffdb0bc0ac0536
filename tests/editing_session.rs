//! Editing session tests - lifecycle, typing, commit, cancel, grouping

mod common;

use common::{
    change_groups, changes, digits_only, divisible_by_ten, has_validity, reject_empty, type_text,
    uppercased,
};
use blockfield::field::{FieldEvent, FocusDirection, Restrictor, TextField};
use blockfield::keys::KeyCommand;

// ========================================================================
// Open / close lifecycle
// ========================================================================

#[test]
fn test_open_shows_overlay_with_committed_text() {
    let mut field = TextField::new("hello");
    let events = field.open();

    assert!(field.is_editing());
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        FieldEvent::OverlayShowRequested(ref request)
            if request.text == "hello" && request.spellcheck && request.auto_capitalize
    ));
}

#[test]
fn test_open_initializes_display_to_committed_projection() {
    let mut field = TextField::new("abc");
    field.open();
    assert_eq!(field.display_text(), "abc");
}

#[test]
fn test_close_without_edits_commits_nothing() {
    let mut field = TextField::new("x");
    field.open();
    let events = field.close();

    assert!(!field.is_editing());
    assert_eq!(field.value(), Some("x"));
    assert!(changes(&events).is_empty());
}

#[test]
fn test_close_event_order() {
    let mut field = TextField::new("x");
    field.open();
    let events = field.close();

    let position = |needle: &FieldEvent| events.iter().position(|e| e == needle);
    let display = position(&FieldEvent::DisplayTextChanged("x".to_string()));
    let hide = position(&FieldEvent::OverlayHideRequested);
    let ended = position(&FieldEvent::EditingEnded("x".to_string()));

    assert!(display.is_some());
    assert!(hide.is_some());
    assert!(ended.is_some());
    assert!(display < hide);
    assert!(hide < ended);
}

#[test]
fn test_reentrant_open_is_refused() {
    let mut field = TextField::new("a");
    field.open();
    field.insert_character('b');

    let events = field.open();
    assert!(events.is_empty());
    assert!(field.is_editing());
    // The first session's text is untouched
    assert_eq!(field.display_text(), "ab");
}

#[test]
fn test_operations_on_closed_field_are_noops() {
    let mut field = TextField::new("x");

    assert!(field.insert_character('y').is_empty());
    assert!(field.set_editor_text("zz").is_empty());
    assert!(field.key_command(KeyCommand::Commit).is_empty());
    assert!(field.key_command(KeyCommand::Cancel).is_empty());
    assert!(field.close().is_empty());

    assert_eq!(field.value(), Some("x"));
    assert_eq!(field.display_text(), "x");
}

#[test]
fn test_sequential_sessions_do_not_leak_state() {
    let mut field = TextField::new("first");
    field.open();
    type_text(&mut field, "-edit");
    field.key_command(KeyCommand::Cancel);
    assert_eq!(field.value(), Some("first"));

    // The second session starts from the committed value, not the abandoned
    // raw text of the first
    let events = field.open();
    assert_eq!(field.display_text(), "first");
    assert!(matches!(
        events[0],
        FieldEvent::OverlayShowRequested(ref request) if request.text == "first"
    ));
}

#[test]
fn test_sequential_sessions_after_commit() {
    let mut field = TextField::new("a");
    field.open();
    type_text(&mut field, "b");
    field.close();
    assert_eq!(field.value(), Some("ab"));

    field.open();
    assert_eq!(field.display_text(), "ab");
    field.close();
    assert_eq!(field.value(), Some("ab"));
}

// ========================================================================
// Typing and restriction
// ========================================================================

#[test]
fn test_typing_updates_display_and_overlay() {
    let mut field = TextField::new("");
    field.open();

    let events = field.insert_character('q');
    assert!(events.contains(&FieldEvent::DisplayTextChanged("q".to_string())));
    assert!(events.contains(&FieldEvent::OverlayResizeRequested));
    assert_eq!(field.display_text(), "q");
    assert_eq!(field.value(), Some("q"));
}

#[test]
fn test_restrictor_swallows_rejected_character() {
    // Digits-only field holding "5": a letter never reaches the raw text
    let mut field = TextField::new("5");
    field.set_restrictor(Some(Restrictor::digits()));
    field.open();

    let events = field.insert_character('a');
    assert!(events.is_empty());
    assert_eq!(field.display_text(), "5");
    assert_eq!(field.value(), Some("5"));
}

#[test]
fn test_restrictor_applies_per_character() {
    let mut field = TextField::new("");
    field.set_restrictor(Some(Restrictor::digits()));
    field.open();

    type_text(&mut field, "1a2b3");
    assert_eq!(field.display_text(), "123");
}

#[test]
fn test_whole_text_replacement_bypasses_restrictor() {
    // Pasted text is the host editor's business; the restrictor only sees
    // individual keystrokes
    let mut field = TextField::new("");
    field.set_restrictor(Some(Restrictor::digits()));
    field.open();

    field.set_editor_text("abc");
    assert_eq!(field.display_text(), "abc");
}

#[test]
fn test_unchanged_text_pass_skips_revalidation() {
    use std::cell::Cell;
    use std::rc::Rc;

    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);

    let mut field = TextField::new("");
    field.set_validator(Some(Box::new(move |text: &str| {
        counter.set(counter.get() + 1);
        blockfield::field::ValidationOutcome::Accepted(text.to_owned())
    })));
    field.open();

    field.set_editor_text("ab");
    let after_first = calls.get();

    // Same text again: the overlay re-reports but nothing changed
    let events = field.set_editor_text("ab");
    assert_eq!(calls.get(), after_first);
    assert!(changes(&events).is_empty());
    // The display refresh still happens
    assert!(events.contains(&FieldEvent::DisplayTextChanged("ab".to_string())));
}

// ========================================================================
// Commit and close semantics
// ========================================================================

#[test]
fn test_close_commits_transformed_result_not_raw_text() {
    let mut field = TextField::new("");
    field.set_validator(Some(uppercased()));
    field.open();
    field.set_editor_text("shout");

    let events = field.close();
    assert_eq!(field.value(), Some("SHOUT"));
    assert!(events.contains(&FieldEvent::EditingEnded("SHOUT".to_string())));
}

#[test]
fn test_reject_on_close_reverts_to_presession_text() {
    // Empty committed value, validator rejects empty, user commits without
    // typing: the close discards and the committed value survives
    let mut field = TextField::new("");
    field.set_validator(Some(reject_empty()));
    field.open();

    let events = field.key_command(KeyCommand::Commit);
    assert!(!field.is_editing());
    assert_eq!(field.value(), Some(""));
    assert_eq!(field.display_text(), "");
    assert!(events.contains(&FieldEvent::EditingEnded("".to_string())));
    assert!(changes(&events).is_empty());
}

#[test]
fn test_intermediate_rejection_does_not_poison_final_commit() {
    // "10" -> "-1" (rejected) -> "-10" (accepted): the final commit wins
    let mut field = TextField::new("10");
    field.set_validator(Some(divisible_by_ten()));
    field.open();

    let rejected = field.set_editor_text("-1");
    assert!(has_validity(&rejected, false));
    assert_eq!(field.value(), Some("10"));
    assert_eq!(field.display_text(), "-1");

    let accepted = field.insert_character('0');
    assert!(has_validity(&accepted, true));
    assert_eq!(field.value(), Some("-10"));

    field.close();
    assert_eq!(field.value(), Some("-10"));
}

#[test]
fn test_mid_edit_revert_then_close_rejection() {
    let mut field = TextField::new("10");
    field.set_validator(Some(divisible_by_ten()));
    field.open();

    // "20" commits, "20x" reverts the commit target back to "10"
    field.set_editor_text("20");
    assert_eq!(field.value(), Some("20"));
    field.set_editor_text("20x");
    assert_eq!(field.value(), Some("10"));
    assert!(!field.is_valid());

    // Final validation still rejects; display restores the pre-session text
    let events = field.close();
    assert_eq!(field.value(), Some("10"));
    assert_eq!(field.display_text(), "10");
    assert!(events.contains(&FieldEvent::EditingEnded("10".to_string())));
    // Validity reads true again once the session is gone
    assert!(has_validity(&events, true));
    assert!(field.is_valid());
}

#[test]
fn test_closed_field_reports_valid() {
    let mut field = TextField::new("1");
    field.set_validator(Some(digits_only()));
    field.open();
    field.insert_character('x');
    assert!(!field.is_valid());

    field.close();
    assert!(field.is_valid());
}

// ========================================================================
// Cancel
// ========================================================================

#[test]
fn test_cancel_restores_exact_open_text() {
    let mut field = TextField::new("hello");
    field.open();
    type_text(&mut field, "xyz");
    assert_eq!(field.display_text(), "helloxyz");

    let events = field.key_command(KeyCommand::Cancel);
    assert!(!field.is_editing());
    assert_eq!(field.display_text(), "hello");
    assert_eq!(field.value(), Some("hello"));
    assert!(events.contains(&FieldEvent::EditingEnded("hello".to_string())));
}

#[test]
fn test_cancel_reverts_intermediate_commits() {
    let mut field = TextField::new("a");
    field.open();
    type_text(&mut field, "b");
    assert_eq!(field.value(), Some("ab"));

    // Cancel restores the original text, and the commit target follows
    let events = field.key_command(KeyCommand::Cancel);
    assert_eq!(field.value(), Some("a"));

    let reverts = changes(&events);
    assert_eq!(reverts.len(), 1);
    assert_eq!(reverts[0].previous.as_deref(), Some("ab"));
    assert_eq!(reverts[0].next.as_deref(), Some("a"));
}

#[test]
fn test_cancel_after_invalid_edit() {
    let mut field = TextField::new("7");
    field.set_validator(Some(digits_only()));
    field.open();
    field.insert_character('!');
    assert!(!field.is_valid());

    field.key_command(KeyCommand::Cancel);
    assert_eq!(field.value(), Some("7"));
    assert_eq!(field.display_text(), "7");
    assert!(field.is_valid());
}

// ========================================================================
// Grouping
// ========================================================================

#[test]
fn test_each_keystroke_is_its_own_group() {
    let mut field = TextField::new("");
    field.open();

    let events = type_text(&mut field, "123");
    let groups = change_groups(&events);
    assert_eq!(groups.len(), 3);
    assert_ne!(groups[0], groups[1]);
    assert_ne!(groups[1], groups[2]);
    assert_ne!(groups[0], groups[2]);
}

#[test]
fn test_normalization_produces_one_change_per_cascade() {
    // The validator rewrites the candidate; listeners still see exactly one
    // grouped change for the keystroke, not one per internal step
    let mut field = TextField::new("");
    field.set_validator(Some(uppercased()));
    field.open();

    let events = field.insert_character('a');
    let committed = changes(&events);
    assert_eq!(committed.len(), 1);
    assert_eq!(committed[0].next.as_deref(), Some("A"));
}

#[test]
fn test_revert_uses_its_own_cascade_group() {
    let mut field = TextField::new("5");
    field.set_validator(Some(digits_only()));
    field.open();

    let commit_events = field.insert_character('2');
    let revert_events = field.insert_character('x');

    let commit_groups = change_groups(&commit_events);
    let revert_groups = change_groups(&revert_events);
    assert_eq!(commit_groups.len(), 1);
    assert_eq!(revert_groups.len(), 1);
    assert_ne!(commit_groups[0], revert_groups[0]);
}

#[test]
fn test_swallowed_keystroke_starts_no_group() {
    let mut field = TextField::new("");
    field.set_restrictor(Some(Restrictor::digits()));
    field.open();

    let events = field.insert_character('a');
    assert!(change_groups(&events).is_empty());
    assert!(events.is_empty());
}

// ========================================================================
// Focus navigation
// ========================================================================

#[test]
fn test_navigate_next_closes_then_requests_focus() {
    let mut field = TextField::new("x");
    field.open();

    let events = field.key_command(KeyCommand::NavigateNext);
    assert!(!field.is_editing());

    let ended = events
        .iter()
        .position(|e| matches!(e, FieldEvent::EditingEnded(_)));
    let focus = events
        .iter()
        .position(|e| *e == FieldEvent::FocusNavigationRequested(FocusDirection::Next));
    assert!(ended.is_some());
    assert!(focus.is_some());
    assert!(ended < focus);
}

#[test]
fn test_navigate_prev_requests_previous_focus() {
    let mut field = TextField::new("x");
    field.open();

    let events = field.key_command(KeyCommand::NavigatePrev);
    assert!(events.contains(&FieldEvent::FocusNavigationRequested(
        FocusDirection::Previous
    )));
}

#[test]
fn test_navigation_commits_like_a_normal_close() {
    let mut field = TextField::new("a");
    field.open();
    type_text(&mut field, "b");

    field.key_command(KeyCommand::NavigateNext);
    assert_eq!(field.value(), Some("ab"));
}
