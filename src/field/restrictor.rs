//! Per-character input restriction.
//!
//! A restrictor filters single characters before they reach the in-progress
//! text of an open session: a rejected character is swallowed entirely and
//! never shows up in the editor. It applies only to printable character
//! insertion; control characters and clipboard combos bypass it at the
//! key-decoding layer (see `keys`).

/// Character filter function type
pub type CharFilter = fn(char) -> bool;

/// Stateless per-character allow/deny filter owned by a field.
#[derive(Debug, Clone, Copy)]
pub struct Restrictor {
    filter: CharFilter,
}

impl Restrictor {
    /// Restrictor from a custom character filter
    pub fn new(filter: CharFilter) -> Self {
        Self { filter }
    }

    /// Digits only (0-9)
    pub fn digits() -> Self {
        Self::new(|c| c.is_ascii_digit())
    }

    /// Number typing: digits, minus sign, decimal point
    pub fn numeric() -> Self {
        Self::new(|c| c.is_ascii_digit() || c == '-' || c == '.')
    }

    /// ASCII letters and digits
    pub fn alphanumeric() -> Self {
        Self::new(|c| c.is_ascii_alphanumeric())
    }

    /// Test a single candidate character
    pub fn allows(&self, ch: char) -> bool {
        (self.filter)(ch)
    }
}
