//! blockfield - editable-field core for a block-programming editor
//!
//! This crate provides the value and editing-session state machine for an
//! in-place editable text field inside a visual block editor: validation,
//! character restriction, and grouped change notification.

pub mod cli;
pub mod config_paths;
pub mod field;
pub mod keys;
pub mod trace;

// Re-export commonly used types
pub use field::{Editable, FieldEvent, TextField};
pub use keys::{decode_key_event, DecodedKey, KeyCommand, KeyPlatform, RawKeyEvent};
