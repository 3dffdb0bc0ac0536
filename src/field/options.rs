//! Field definitions and runtime configuration.
//!
//! Two shapes live here: [`FieldSpec`], the declarative definition stored in
//! block definitions (JSON or YAML), and [`FieldOptions`], the runtime
//! configuration bag handed to [`TextField::configure`].
//!
//! [`TextField::configure`]: crate::field::state::TextField::configure

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::field::pipeline::BusinessValidator;
use crate::field::restrictor::Restrictor;

fn default_true() -> bool {
    true
}

/// A declarative field definition.
///
/// Mirrors the original JSON options bag: `text` is the initial value, the
/// flags are presentation hints carried to the overlay host unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_true")]
    pub spellcheck: bool,
    #[serde(default = "default_true")]
    pub auto_capitalize: bool,
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self {
            text: String::new(),
            spellcheck: true,
            auto_capitalize: true,
        }
    }
}

impl FieldSpec {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse field definition: {}", e))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse field definition: {}", e))
    }

    /// Load a definition from a file, format chosen by extension
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            format!(
                "Failed to read field definition at {}: {}",
                path.display(),
                e
            )
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }
}

/// Runtime configuration bag.
///
/// Every slot is optional. Present slots replace the field's current setting;
/// absent slots leave it untouched, so callers can adjust one knob without
/// restating the rest.
#[derive(Default)]
pub struct FieldOptions {
    pub restrictor: Option<Restrictor>,
    pub validator: Option<BusinessValidator>,
    pub initial_value: Option<String>,
    pub spellcheck: Option<bool>,
    pub auto_capitalize: Option<bool>,
}

impl FieldOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_restrictor(mut self, restrictor: Restrictor) -> Self {
        self.restrictor = Some(restrictor);
        self
    }

    pub fn with_validator(mut self, validator: BusinessValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    pub fn with_spellcheck(mut self, on: bool) -> Self {
        self.spellcheck = Some(on);
        self
    }

    pub fn with_auto_capitalize(mut self, on: bool) -> Self {
        self.auto_capitalize = Some(on);
        self
    }
}

impl fmt::Debug for FieldOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldOptions")
            .field("restrictor", &self.restrictor)
            .field("validator", &self.validator.as_ref().map(|_| "<validator>"))
            .field("initial_value", &self.initial_value)
            .field("spellcheck", &self.spellcheck)
            .field("auto_capitalize", &self.auto_capitalize)
            .finish()
    }
}
