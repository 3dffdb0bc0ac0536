//! Transient state of one open edit.
//!
//! A session exists only between open and close. It owns the live editor text
//! (the single source of truth for "current text" while editing) and the
//! bookkeeping needed to revert: the committed value captured at open and the
//! editor text that was shown at open.

/// State of one open edit gesture, created on open and destroyed on close.
#[derive(Debug, Clone)]
pub struct EditingSession {
    /// Committed value captured at open; the revert target for mid-edit
    /// rejections.
    original_value: Option<String>,
    /// Editor text shown at open; what the close-time rejection branch and
    /// the cancel command restore.
    default_text: String,
    /// Live editor text, unfiltered result of the latest keystroke.
    raw_text: String,
    /// Last text run through the value store. `None` until the first
    /// text-changed pass, so the first pass always runs.
    last_processed: Option<String>,
    is_valid: bool,
    /// Sticky: set once raw text diverges from `default_text`.
    is_dirty: bool,
}

impl EditingSession {
    /// Start a session over the given committed value and its editor
    /// projection.
    pub fn begin(original_value: Option<String>, default_text: impl Into<String>) -> Self {
        let default_text = default_text.into();
        Self {
            original_value,
            raw_text: default_text.clone(),
            default_text,
            last_processed: None,
            is_valid: true,
            is_dirty: false,
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn default_text(&self) -> &str {
        &self.default_text
    }

    pub fn original_value(&self) -> Option<&str> {
        self.original_value.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Replace the live editor text (host text sync, programmatic editor
    /// updates, cancel).
    pub fn set_raw_text(&mut self, text: impl Into<String>) {
        self.raw_text = text.into();
        if self.raw_text != self.default_text {
            self.is_dirty = true;
        }
    }

    /// Append one accepted character to the live editor text
    pub fn push_char(&mut self, ch: char) {
        self.raw_text.push(ch);
        if self.raw_text != self.default_text {
            self.is_dirty = true;
        }
    }

    /// Restore the editor text shown at open (cancel path)
    pub fn reset_to_default(&mut self) {
        self.raw_text = self.default_text.clone();
    }

    /// Check whether the live text differs from the last processed text
    pub fn needs_processing(&self) -> bool {
        self.last_processed.as_deref() != Some(self.raw_text.as_str())
    }

    /// Record that the current live text has been run through the store
    pub fn mark_processed(&mut self) {
        self.last_processed = Some(self.raw_text.clone());
    }

    /// Update validity, returning true when it actually flipped
    pub fn set_valid(&mut self, valid: bool) -> bool {
        let changed = self.is_valid != valid;
        self.is_valid = valid;
        changed
    }
}
