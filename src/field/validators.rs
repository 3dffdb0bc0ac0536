//! Stock business validators.
//!
//! These are the classic numeric validators carried over from the original
//! field API. They predate [`NumberClass`](crate::field::number::NumberClass)
//! and operate purely as stage-2 validators; prefer the class validator for
//! new numeric fields and reach for these when an existing definition expects
//! the old behavior.

use crate::field::number::sanitize_number_text;
use crate::field::pipeline::ValidationOutcome;

fn outcome_for(rendered: String, original: &str) -> ValidationOutcome {
    if rendered == original {
        ValidationOutcome::Accepted(rendered)
    } else {
        ValidationOutcome::Transformed(rendered)
    }
}

/// Accept any finite number, canonicalizing its spelling.
///
/// Letter O reads as zero, thousands separators are stripped, empty text
/// reads as zero. Anything that still fails to parse is rejected.
pub fn number_validator(text: &str) -> ValidationOutcome {
    let sanitized = sanitize_number_text(text);
    match sanitized.parse::<f64>() {
        Ok(value) if value.is_finite() => outcome_for(format!("{}", value), text),
        _ => ValidationOutcome::Rejected,
    }
}

/// Number validation, then floor and clamp at zero
pub fn nonnegative_integer_validator(text: &str) -> ValidationOutcome {
    let sanitized = sanitize_number_text(text);
    match sanitized.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            let clamped = value.floor().max(0.0);
            outcome_for(format!("{}", clamped), text)
        }
        _ => ValidationOutcome::Rejected,
    }
}
