//! Numeric stage-1 validation.
//!
//! `NumberClass` is the swap-in class validator for numeric fields: it
//! sanitizes common typos, parses, applies the configured constraints, and
//! re-serializes canonically. It plugs into the same [`ValidationPipeline`]
//! as the plain text class, so numeric fields are composed, not subclassed.
//!
//! [`ValidationPipeline`]: crate::field::pipeline::ValidationPipeline

use crate::field::pipeline::{ClassValidator, ValidationOutcome};

/// Normalize raw numeric text before parsing.
///
/// Letter O in either case reads as zero, thousands separators are stripped,
/// surrounding whitespace is ignored, and empty text reads as zero.
pub(crate) fn sanitize_number_text(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|&ch| ch != ',')
        .map(|ch| if ch == 'O' || ch == 'o' { '0' } else { ch })
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Class validator for numeric fields.
///
/// All constraints are optional: an unconstrained `NumberClass` accepts any
/// finite number and only canonicalizes its spelling.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberClass {
    min: Option<f64>,
    max: Option<f64>,
    precision: Option<f64>,
}

impl NumberClass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole numbers only (precision step of 1)
    pub fn integer() -> Self {
        Self::new().with_precision(1.0)
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Round accepted values to the nearest multiple of `precision`
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = Some(precision);
        self
    }

    fn constrain(&self, value: f64) -> f64 {
        let mut value = value;
        if let Some(precision) = self.precision {
            if precision > 0.0 {
                value = (value / precision).round() * precision;
            }
        }
        if let Some(min) = self.min {
            value = value.max(min);
        }
        if let Some(max) = self.max {
            value = value.min(max);
        }
        value
    }

    /// Fractional digits implied by the precision step, if it has any.
    ///
    /// A precision of 0.01 pins rendering to two decimal places so rounding
    /// artifacts never leak into the canonical text.
    fn decimal_places(&self) -> Option<usize> {
        let precision = self.precision?;
        let rendered = format!("{}", precision);
        rendered.split_once('.').map(|(_, frac)| frac.len())
    }
}

impl ClassValidator for NumberClass {
    fn validate(&self, candidate: &str) -> ValidationOutcome {
        let text = sanitize_number_text(candidate);
        let parsed: f64 = match text.parse() {
            Ok(value) => value,
            Err(_) => return ValidationOutcome::Rejected,
        };
        if !parsed.is_finite() {
            return ValidationOutcome::Rejected;
        }

        let value = self.constrain(parsed);
        let rendered = match self.decimal_places() {
            Some(places) => format!("{:.1$}", value, places),
            None => format!("{}", value),
        };
        if rendered == candidate {
            ValidationOutcome::Accepted(rendered)
        } else {
            ValidationOutcome::Transformed(rendered)
        }
    }
}
