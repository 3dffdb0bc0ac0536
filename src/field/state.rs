//! The field state machine.
//!
//! `TextField` ties the pieces together: it owns the committed value, the
//! validation pipeline, the optional restrictor, and (while editing) the
//! session. Inbound operations mutate the field and return the outbound
//! notifications they generated; the host dispatches those to its render
//! surface, overlay host, and change bus.
//!
//! Two rules shape every mutation path:
//! - The committed value only ever changes through a pipeline run, stamped
//!   with the group id of the cascade that caused it.
//! - While a session is open, the session's raw text is the single source of
//!   truth for what the user sees; the rendered surface is a projection of it.

use crate::field::events::{ChangeNotifier, FieldEvent, FocusDirection, GroupId, OverlayRequest};
use crate::field::options::{FieldOptions, FieldSpec};
use crate::field::pipeline::{
    BusinessValidator, ClassValidator, ValidationOutcome, ValidationPipeline,
};
use crate::field::restrictor::Restrictor;
use crate::field::session::EditingSession;
use crate::field::value::FieldValue;
use crate::keys::KeyCommand;

/// Transform between stored values and overlay editor text.
///
/// Fields whose editor representation differs from their stored value install
/// a coupled pair of these (value to editor text, editor text to value).
pub type EditorTransform = fn(&str) -> String;

fn identity_transform(text: &str) -> String {
    text.to_owned()
}

/// Capability interface for fields editable in place through an overlay.
///
/// Variants plug different stage-1 validators into the shared pipeline
/// instead of subclassing; anything that implements this trait can be driven
/// by the same host loop.
pub trait Editable {
    /// Start an editing session
    fn open(&mut self) -> Vec<FieldEvent>;
    /// End the session, committing or discarding per final validation
    fn close(&mut self) -> Vec<FieldEvent>;
    /// Insert one printable character, subject to the restrictor
    fn insert_character(&mut self, ch: char) -> Vec<FieldEvent>;
    /// Replace the whole editor text (paste, IME, host-side deletion)
    fn set_editor_text(&mut self, text: &str) -> Vec<FieldEvent>;
    /// Apply a decoded key command
    fn key_command(&mut self, command: KeyCommand) -> Vec<FieldEvent>;
    fn is_editing(&self) -> bool;
}

/// A text-input field: committed value plus editing-session state machine.
#[derive(Debug)]
pub struct TextField {
    value: FieldValue,
    pipeline: ValidationPipeline,
    restrictor: Option<Restrictor>,
    session: Option<EditingSession>,
    notifier: ChangeNotifier,
    to_editor: EditorTransform,
    from_editor: EditorTransform,
    spellcheck: bool,
    auto_capitalize: bool,
}

impl TextField {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Plain text field with an initial value
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_class(initial, Box::new(crate::field::pipeline::TextClass))
    }

    /// Field with a custom stage-1 validator (numeric and other variants).
    ///
    /// The initial value is run through stage 1; if it is rejected the field
    /// starts with no committed value.
    pub fn with_class(initial: impl Into<String>, class: Box<dyn ClassValidator>) -> Self {
        let mut pipeline = ValidationPipeline::with_class(class);
        let committed = pipeline.run(&initial.into()).into_value();
        Self {
            value: FieldValue::new(committed),
            pipeline,
            restrictor: None,
            session: None,
            notifier: ChangeNotifier::new(),
            to_editor: identity_transform,
            from_editor: identity_transform,
            spellcheck: true,
            auto_capitalize: true,
        }
    }

    /// Field from a parsed definition
    pub fn from_spec(spec: &FieldSpec) -> Self {
        let mut field = Self::new(spec.text.clone());
        field.spellcheck = spec.spellcheck;
        field.auto_capitalize = spec.auto_capitalize;
        field
    }

    /// Field from a JSON definition with `text` and presentation flags
    pub fn from_json(json: &str) -> Result<Self, String> {
        Ok(Self::from_spec(&FieldSpec::from_json(json)?))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The committed value; `None` only before the first value
    pub fn value(&self) -> Option<&str> {
        self.value.committed()
    }

    /// The session's raw text while editing, otherwise the projection of the
    /// committed value
    pub fn display_text(&self) -> &str {
        match &self.session {
            Some(session) => session.raw_text(),
            None => self.value.projection(),
        }
    }

    /// The open session's validity; a closed field reads as valid
    pub fn is_valid(&self) -> bool {
        self.session.as_ref().map_or(true, |s| s.is_valid())
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    pub fn spellcheck(&self) -> bool {
        self.spellcheck
    }

    pub fn auto_capitalize(&self) -> bool {
        self.auto_capitalize
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Apply a configuration bag.
    ///
    /// Present slots replace the current restrictor/validator/flags; an
    /// `initial_value` is committed through the normal store path and its
    /// events returned.
    pub fn configure(&mut self, options: FieldOptions) -> Vec<FieldEvent> {
        let FieldOptions {
            restrictor,
            validator,
            initial_value,
            spellcheck,
            auto_capitalize,
        } = options;

        if let Some(restrictor) = restrictor {
            self.restrictor = Some(restrictor);
        }
        if let Some(validator) = validator {
            self.pipeline.set_business(Some(validator));
        }
        if let Some(flag) = spellcheck {
            self.spellcheck = flag;
        }
        if let Some(flag) = auto_capitalize {
            self.auto_capitalize = flag;
        }
        match initial_value {
            Some(value) => self.set_value(&value),
            None => Vec::new(),
        }
    }

    /// Replace the restrictor (`None` removes it)
    pub fn set_restrictor(&mut self, restrictor: Option<Restrictor>) {
        self.restrictor = restrictor;
    }

    /// Replace the business validator (`None` removes it)
    pub fn set_validator(&mut self, validator: Option<BusinessValidator>) {
        self.pipeline.set_business(validator);
    }

    pub fn set_spellcheck(&mut self, on: bool) {
        self.spellcheck = on;
    }

    pub fn set_auto_capitalize(&mut self, on: bool) {
        self.auto_capitalize = on;
    }

    /// Install a coupled pair of editor text transforms
    pub fn set_editor_transforms(&mut self, to_editor: EditorTransform, from_editor: EditorTransform) {
        self.to_editor = to_editor;
        self.from_editor = from_editor;
    }

    // ========================================================================
    // Value store
    // ========================================================================

    /// Run a candidate through the pipeline and commit or revert.
    ///
    /// Programmatic path: called outside a session, a committed change also
    /// asks the render surface to redraw. During a session the rendered text
    /// follows the session's raw text instead, so no redraw is forced here.
    pub fn set_value(&mut self, candidate: &str) -> Vec<FieldEvent> {
        let mut events = Vec::new();
        let group = self.notifier.begin_group();
        self.store_value(candidate, group, &mut events);
        if self.session.is_none() && events.iter().any(FieldEvent::is_change) {
            events.push(FieldEvent::DisplayTextChanged(
                self.value.projection().to_owned(),
            ));
        }
        events
    }

    /// Set the field's value and, while editing, the editor text with it.
    ///
    /// The session's raw text is replaced by the to-editor projection of the
    /// candidate even when the candidate is invalid, so the editor never
    /// shows state the field does not hold.
    pub fn set_editor_value(&mut self, candidate: &str) -> Vec<FieldEvent> {
        let mut events = Vec::new();
        if let Some(session) = &mut self.session {
            let text = (self.to_editor)(candidate);
            session.set_raw_text(text);
        }
        let group = self.notifier.begin_group();
        self.store_value(candidate, group, &mut events);
        events.push(FieldEvent::DisplayTextChanged(self.display_text().to_owned()));
        events
    }

    /// The store update shared by every mutation cascade: pipeline run, then
    /// commit or mid-edit revert, stamped with the cascade's group id.
    fn store_value(&mut self, candidate: &str, group: GroupId, events: &mut Vec<FieldEvent>) {
        match self.pipeline.run(candidate) {
            ValidationOutcome::Accepted(next) | ValidationOutcome::Transformed(next) => {
                if let Some(session) = &mut self.session {
                    if session.set_valid(true) {
                        events.push(FieldEvent::ValidityChanged(true));
                    }
                }
                self.value.record_valid_text(&next);
                if self.value.committed() != Some(next.as_str()) {
                    let previous = self.value.replace(Some(next));
                    self.notifier.emit_committed(
                        events,
                        group,
                        previous.as_deref(),
                        self.value.committed(),
                    );
                }
            }
            ValidationOutcome::Rejected => match &mut self.session {
                Some(session) => {
                    // The commit target reverts to the pre-edit value; the
                    // typed characters stay visible in the editor.
                    if session.set_valid(false) {
                        events.push(FieldEvent::ValidityChanged(false));
                    }
                    let reverted = session.original_value().map(str::to_owned);
                    if self.value.committed() != reverted.as_deref() {
                        let previous = self.value.revert(reverted);
                        self.notifier.emit_committed(
                            events,
                            group,
                            previous.as_deref(),
                            self.value.committed(),
                        );
                    }
                }
                None => {
                    tracing::debug!("rejected programmatic value {:?}; committed unchanged", candidate);
                }
            },
        }
    }

    // ========================================================================
    // Editing session lifecycle
    // ========================================================================

    /// Open an editing session over the committed value.
    ///
    /// Refused (no-op, warn) if a session is already open; the host must
    /// close the previous session first.
    pub fn open(&mut self) -> Vec<FieldEvent> {
        let mut events = Vec::new();
        if self.session.is_some() {
            tracing::warn!("open requested while a session is already open; refusing");
            return events;
        }

        let original = self.value.committed().map(str::to_owned);
        let default_text = (self.to_editor)(self.value.projection());
        tracing::debug!("editing session opened over {:?}", original);
        self.session = Some(EditingSession::begin(original, default_text.clone()));

        events.push(FieldEvent::OverlayShowRequested(OverlayRequest {
            text: default_text,
            spellcheck: self.spellcheck,
            auto_capitalize: self.auto_capitalize,
        }));
        events
    }

    /// Close the session: final validation, then commit or discard.
    ///
    /// The rejection branch restores the pre-session default text, not the
    /// raw text and not the last valid intermediate text. The accept branch
    /// commits the (possibly transformed) result, which may differ from the
    /// last incrementally committed value.
    pub fn close(&mut self) -> Vec<FieldEvent> {
        let mut events = Vec::new();
        let Some(session) = self.session.take() else {
            tracing::warn!("close requested with no open session; ignoring");
            return events;
        };

        // Validity always reads true once the session is gone
        if !session.is_valid() {
            events.push(FieldEvent::ValidityChanged(true));
        }

        let candidate = (self.from_editor)(session.raw_text());
        let group = self.notifier.begin_group();
        let final_text = match self.pipeline.run(&candidate) {
            ValidationOutcome::Rejected => {
                tracing::debug!(
                    "final validation rejected {:?}; restoring pre-session text",
                    session.raw_text()
                );
                session.default_text().to_owned()
            }
            ValidationOutcome::Accepted(next) | ValidationOutcome::Transformed(next) => {
                self.value.record_valid_text(&next);
                if self.value.committed() != Some(next.as_str()) {
                    let previous = self.value.replace(Some(next));
                    self.notifier.emit_committed(
                        &mut events,
                        group,
                        previous.as_deref(),
                        self.value.committed(),
                    );
                }
                (self.to_editor)(self.value.projection())
            }
        };

        tracing::debug!("editing session closed; committed {:?}", self.value.committed());
        events.push(FieldEvent::DisplayTextChanged(final_text.clone()));
        events.push(FieldEvent::OverlayHideRequested);
        events.push(FieldEvent::EditingEnded(final_text));
        events
    }

    // ========================================================================
    // Input while editing
    // ========================================================================

    /// Insert one printable character at the end of the editor text.
    ///
    /// A character the restrictor rejects is swallowed whole: it never enters
    /// the raw text and no events are produced.
    pub fn insert_character(&mut self, ch: char) -> Vec<FieldEvent> {
        let mut events = Vec::new();
        let Some(session) = &mut self.session else {
            tracing::warn!("insert_character with no open session; ignoring");
            return events;
        };

        if let Some(restrictor) = &self.restrictor {
            if !restrictor.allows(ch) {
                tracing::trace!("restrictor swallowed {:?}", ch);
                return events;
            }
        }

        session.push_char(ch);
        self.process_editor_text(&mut events);
        events
    }

    /// Replace the whole editor text, as reported by the overlay (paste,
    /// IME composition, deletions). The restrictor does not apply here.
    pub fn set_editor_text(&mut self, text: &str) -> Vec<FieldEvent> {
        let mut events = Vec::new();
        match &mut self.session {
            Some(session) => {
                session.set_raw_text(text);
                self.process_editor_text(&mut events);
            }
            None => tracing::warn!("set_editor_text with no open session; ignoring"),
        }
        events
    }

    /// Apply a decoded key command to the open session
    pub fn key_command(&mut self, command: KeyCommand) -> Vec<FieldEvent> {
        if self.session.is_none() {
            tracing::warn!("key command {:?} with no open session; ignoring", command);
            return Vec::new();
        }
        match command {
            KeyCommand::Commit => self.close(),
            KeyCommand::Cancel => {
                if let Some(session) = &mut self.session {
                    session.reset_to_default();
                }
                self.close()
            }
            KeyCommand::NavigateNext => {
                let mut events = self.close();
                events.push(FieldEvent::FocusNavigationRequested(FocusDirection::Next));
                events
            }
            KeyCommand::NavigatePrev => {
                let mut events = self.close();
                events.push(FieldEvent::FocusNavigationRequested(FocusDirection::Previous));
                events
            }
        }
    }

    /// One text-changed pass: run the store over the live text if it differs
    /// from the last processed text, then always refresh the rendered text to
    /// exactly the live text and re-fit the overlay.
    fn process_editor_text(&mut self, events: &mut Vec<FieldEvent>) {
        let (raw, needs_processing) = match &self.session {
            Some(session) => (session.raw_text().to_owned(), session.needs_processing()),
            None => return,
        };

        if needs_processing {
            if let Some(session) = &mut self.session {
                session.mark_processed();
            }
            let group = self.notifier.begin_group();
            let candidate = (self.from_editor)(&raw);
            self.store_value(&candidate, group, events);
        }

        events.push(FieldEvent::DisplayTextChanged(raw));
        events.push(FieldEvent::OverlayResizeRequested);
    }
}

impl Editable for TextField {
    fn open(&mut self) -> Vec<FieldEvent> {
        TextField::open(self)
    }

    fn close(&mut self) -> Vec<FieldEvent> {
        TextField::close(self)
    }

    fn insert_character(&mut self, ch: char) -> Vec<FieldEvent> {
        TextField::insert_character(self, ch)
    }

    fn set_editor_text(&mut self, text: &str) -> Vec<FieldEvent> {
        TextField::set_editor_text(self, text)
    }

    fn key_command(&mut self, command: KeyCommand) -> Vec<FieldEvent> {
        TextField::key_command(self, command)
    }

    fn is_editing(&self) -> bool {
        TextField::is_editing(self)
    }
}
