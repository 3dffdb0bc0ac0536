//! Grouped change notification for field mutations.
//!
//! Every mutation cascade triggered by one input event (a keystroke, a
//! programmatic set, a session close) is stamped with a single [`GroupId`] so
//! undo history and other listeners see one coherent change per gesture, never
//! one entry per internal normalization step. The group id is allocated once
//! at the start of the cascade and threaded through every store update it
//! performs; nested updates share it by construction and there is no
//! begin/end flag that could be left open on an early exit.

use std::fmt;

/// Unique identifier for one change-notification group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub u64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// A committed-value change, stamped with its group.
///
/// `previous` and `next` are committed values, which are `None` only before
/// the field's first value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub group: GroupId,
    pub previous: Option<String>,
    pub next: Option<String>,
}

/// Direction for host-side focus navigation out of a closing field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    Next,
    Previous,
}

/// What the overlay host needs to show the edit surface.
///
/// Positions and pixel sizes are the host's problem; the core only hands over
/// the initial editor text and the presentation hints it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayRequest {
    pub text: String,
    pub spellcheck: bool,
    pub auto_capitalize: bool,
}

/// Outbound notifications produced by field operations.
///
/// Each inbound operation returns the events it generated, in order; the host
/// dispatches them to its render surface, overlay host, and change bus. Within
/// one operation the order is: validity flips, then committed changes, then
/// display/overlay refreshes, then lifecycle notifications
/// ([`FieldEvent::EditingEnded`], [`FieldEvent::FocusNavigationRequested`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The rendered text changed; the render surface should redraw.
    DisplayTextChanged(String),

    /// The open session's validity flipped.
    ValidityChanged(bool),

    /// The committed value changed.
    ChangeCommitted(ChangeEvent),

    /// An editing session ended, with the final display text.
    EditingEnded(String),

    /// The host should move activation to an adjacent field.
    FocusNavigationRequested(FocusDirection),

    /// The overlay host should show the edit surface.
    OverlayShowRequested(OverlayRequest),

    /// The overlay host should hide the edit surface.
    OverlayHideRequested,

    /// The overlay host should re-fit the edit surface to the field's
    /// current bounds.
    OverlayResizeRequested,
}

impl FieldEvent {
    /// Borrow the change payload if this is a committed change
    pub fn as_change(&self) -> Option<&ChangeEvent> {
        match self {
            FieldEvent::ChangeCommitted(change) => Some(change),
            _ => None,
        }
    }

    /// Check if this event is a committed change
    pub fn is_change(&self) -> bool {
        matches!(self, FieldEvent::ChangeCommitted(_))
    }
}

/// Allocates group ids and emits grouped committed-change notifications.
#[derive(Debug)]
pub struct ChangeNotifier {
    next_group_id: u64,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self { next_group_id: 1 }
    }

    /// Allocate the group id for one mutation cascade
    pub fn begin_group(&mut self) -> GroupId {
        let id = GroupId(self.next_group_id);
        self.next_group_id += 1;
        id
    }

    /// Emit a committed change into `out`, unless it is a zero-delta update.
    ///
    /// Listeners observe at most one grouped notification per cascade, and
    /// never an entry whose previous and next values are equal.
    pub fn emit_committed(
        &self,
        out: &mut Vec<FieldEvent>,
        group: GroupId,
        previous: Option<&str>,
        next: Option<&str>,
    ) {
        if previous == next {
            return;
        }
        tracing::trace!("committed change in {}: {:?} -> {:?}", group, previous, next);
        out.push(FieldEvent::ChangeCommitted(ChangeEvent {
            group,
            previous: previous.map(str::to_owned),
            next: next.map(str::to_owned),
        }));
    }
}
