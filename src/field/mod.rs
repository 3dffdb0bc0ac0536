//! The editable-field core.
//!
//! This module implements the value and editing-session state machine of an
//! in-place editable text field:
//!
//! - [`TextField`]: the field itself, driven through the [`Editable`] trait
//! - [`FieldValue`]: committed value plus last-known-valid text
//! - [`ValidationPipeline`]: two-stage validation (class, then business rule)
//! - [`Restrictor`]: per-character input filter
//! - [`EditingSession`]: state of one open edit
//! - [`ChangeNotifier`] / [`FieldEvent`]: grouped outbound notifications
//!
//! # Architecture
//!
//! ```text
//! insert_character → Restrictor → EditingSession.raw_text
//!                                       ↓ (text changed)
//!                        ValidationPipeline → FieldValue commit/revert
//!                                       ↓
//!                        ChangeNotifier → Vec<FieldEvent> → host
//! ```
//!
//! # Example
//!
//! ```ignore
//! use blockfield::field::{Editable, TextField};
//!
//! let mut field = TextField::new("10");
//! field.open();
//! field.insert_character('0');
//! let events = field.close();
//!
//! assert_eq!(field.value(), Some("100"));
//! ```

mod events;
mod number;
mod options;
mod pipeline;
mod restrictor;
mod session;
mod state;
mod validators;
mod value;

pub use events::{
    ChangeEvent, ChangeNotifier, FieldEvent, FocusDirection, GroupId, OverlayRequest,
};
pub use number::NumberClass;
pub use options::{FieldOptions, FieldSpec};
pub use pipeline::{
    BusinessValidator, ClassValidator, TextClass, ValidationOutcome, ValidationPipeline,
};
pub use restrictor::{CharFilter, Restrictor};
pub use session::EditingSession;
pub use state::{Editable, EditorTransform, TextField};
pub use validators::{nonnegative_integer_validator, number_validator};
pub use value::FieldValue;
