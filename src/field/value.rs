//! The field's committed value.

/// Authoritative value storage for a field.
///
/// `committed` is always the output of a successful pipeline run, and `None`
/// only before the first value. `last_valid_text` mirrors the last candidate
/// text that passed validation, so the closed field still has something to
/// display when `committed` is `None`.
#[derive(Debug, Clone, Default)]
pub struct FieldValue {
    committed: Option<String>,
    last_valid_text: String,
}

impl FieldValue {
    pub fn new(initial: Option<String>) -> Self {
        let last_valid_text = initial.clone().unwrap_or_default();
        Self {
            committed: initial,
            last_valid_text,
        }
    }

    pub fn committed(&self) -> Option<&str> {
        self.committed.as_deref()
    }

    pub fn last_valid_text(&self) -> &str {
        &self.last_valid_text
    }

    /// Swap in a new committed value, returning the previous one
    pub fn replace(&mut self, next: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.committed, next)
    }

    /// Roll back to a prior committed value, discarding valid text recorded
    /// since, so the projection never outlives the value it mirrored
    pub fn revert(&mut self, target: Option<String>) -> Option<String> {
        self.last_valid_text = target.clone().unwrap_or_default();
        std::mem::replace(&mut self.committed, target)
    }

    /// Record the latest candidate text that passed validation
    pub fn record_valid_text(&mut self, text: &str) {
        if self.last_valid_text != text {
            self.last_valid_text = text.to_owned();
        }
    }

    /// Display projection of the committed value for a closed field
    pub fn projection(&self) -> &str {
        self.committed.as_deref().unwrap_or(&self.last_valid_text)
    }
}
