//! Two-stage validation pipeline.
//!
//! Stage 1 (class validation) guards and coerces the candidate's shape and
//! carries no business semantics; stage 2 (the caller-supplied business
//! validator) applies domain rules and may rewrite the candidate. The stages
//! short-circuit on rejection. Field variants (text, numeric) share this
//! pipeline and differ only in the stage-1 strategy they plug in.

use std::fmt;

/// Result of running a candidate through a validator or the whole pipeline.
///
/// Rejection is data, not a fault: it is the expected answer for input the
/// field should not commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The candidate is valid as-is
    Accepted(String),
    /// The candidate is not a valid value
    Rejected,
    /// The candidate was rewritten into a valid value
    Transformed(String),
}

impl ValidationOutcome {
    /// Check if this outcome is a rejection
    pub fn is_rejected(&self) -> bool {
        matches!(self, ValidationOutcome::Rejected)
    }

    /// Borrow the resulting value, if any
    pub fn value(&self) -> Option<&str> {
        match self {
            ValidationOutcome::Accepted(v) | ValidationOutcome::Transformed(v) => Some(v),
            ValidationOutcome::Rejected => None,
        }
    }

    /// Take the resulting value, if any
    pub fn into_value(self) -> Option<String> {
        match self {
            ValidationOutcome::Accepted(v) | ValidationOutcome::Transformed(v) => Some(v),
            ValidationOutcome::Rejected => None,
        }
    }
}

/// Stage-1 strategy: structural validation and coercion of a candidate.
///
/// Implementations must not consult business state; domain rules belong in
/// the business validator.
pub trait ClassValidator {
    fn validate(&self, candidate: &str) -> ValidationOutcome;
}

/// Stage 1 for plain text fields: any string is already a valid value.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextClass;

impl ClassValidator for TextClass {
    fn validate(&self, candidate: &str) -> ValidationOutcome {
        ValidationOutcome::Accepted(candidate.to_owned())
    }
}

/// Caller-supplied stage-2 rule.
///
/// Receives the class-validated candidate; answers with the same value
/// (accept), a rewritten value (transform), or a rejection.
pub type BusinessValidator = Box<dyn FnMut(&str) -> ValidationOutcome>;

/// The two-stage chain a field runs every candidate value through.
pub struct ValidationPipeline {
    class: Box<dyn ClassValidator>,
    business: Option<BusinessValidator>,
}

impl fmt::Debug for ValidationPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationPipeline")
            .field("has_business", &self.business.is_some())
            .finish_non_exhaustive()
    }
}

impl ValidationPipeline {
    /// Pipeline for a plain text field, with no business validator
    pub fn text() -> Self {
        Self::with_class(Box::new(TextClass))
    }

    /// Pipeline with a custom stage-1 strategy
    pub fn with_class(class: Box<dyn ClassValidator>) -> Self {
        Self {
            class,
            business: None,
        }
    }

    /// Replace the business validator (`None` removes it)
    pub fn set_business(&mut self, validator: Option<BusinessValidator>) {
        self.business = validator;
    }

    /// Run both stages over a candidate.
    ///
    /// The returned tag describes the pipeline's overall effect: `Accepted`
    /// when the final value equals the original candidate, `Transformed` when
    /// either stage rewrote it, `Rejected` when either stage rejected.
    pub fn run(&mut self, candidate: &str) -> ValidationOutcome {
        let class_validated = match self.class.validate(candidate).into_value() {
            Some(v) => v,
            None => {
                tracing::trace!("class validation rejected {:?}", candidate);
                return ValidationOutcome::Rejected;
            }
        };

        let final_value = match &mut self.business {
            Some(validator) => match validator(&class_validated).into_value() {
                Some(v) => v,
                None => {
                    tracing::trace!("business validator rejected {:?}", candidate);
                    return ValidationOutcome::Rejected;
                }
            },
            None => class_validated,
        };

        if final_value == candidate {
            ValidationOutcome::Accepted(final_value)
        } else {
            ValidationOutcome::Transformed(final_value)
        }
    }
}
