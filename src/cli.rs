//! Command-line argument parsing for the demo driver
//!
//! Supports:
//! - Loading a field definition file (.json or .yaml)
//! - Overriding the initial value
//! - Selecting a stock restrictor and validator
//! - Switching key decoding to the legacy platform

use clap::Parser;
use std::path::PathBuf;

use crate::field::{
    nonnegative_integer_validator, number_validator, FieldOptions, FieldSpec, NumberClass,
    Restrictor, TextField,
};
use crate::keys::KeyPlatform;

/// An interactive driver for one editable field
#[derive(Parser, Debug)]
#[command(name = "blockfield", version, about = "Editable-field state machine demo")]
pub struct CliArgs {
    /// Field definition file (.json or .yaml)
    #[arg(value_name = "DEFINITION")]
    pub definition: Option<PathBuf>,

    /// Initial committed value (overrides the definition's text)
    #[arg(short = 'v', long, value_name = "TEXT")]
    pub value: Option<String>,

    /// Restrict typed characters: digits, numeric, or alphanumeric
    #[arg(short = 'r', long, value_name = "KIND")]
    pub restrictor: Option<String>,

    /// Validate with the legacy number validator
    #[arg(long)]
    pub number: bool,

    /// Validate with the nonnegative-integer validator
    #[arg(long)]
    pub nonnegative: bool,

    /// Use numeric stage-1 validation instead of plain text
    #[arg(long)]
    pub numeric: bool,

    /// Decode key events like the legacy platform (combos arrive as letter codes)
    #[arg(long)]
    pub legacy_keys: bool,
}

impl CliArgs {
    /// Build the field and key platform these arguments describe
    pub fn into_field(self) -> Result<(TextField, KeyPlatform), String> {
        if self.number && self.nonnegative {
            return Err("Choose one of --number or --nonnegative".to_string());
        }

        let spec = match &self.definition {
            Some(path) => Some(FieldSpec::load(path)?),
            None => None,
        };

        let initial = self
            .value
            .or_else(|| spec.as_ref().map(|s| s.text.clone()))
            .unwrap_or_default();

        let mut field = if self.numeric {
            TextField::with_class(initial, Box::new(NumberClass::new()))
        } else {
            TextField::new(initial)
        };

        if let Some(spec) = &spec {
            field.set_spellcheck(spec.spellcheck);
            field.set_auto_capitalize(spec.auto_capitalize);
        }

        let mut options = FieldOptions::new();
        if let Some(kind) = &self.restrictor {
            options = options.with_restrictor(parse_restrictor(kind)?);
        }
        if self.number {
            options = options.with_validator(Box::new(number_validator));
        }
        if self.nonnegative {
            options = options.with_validator(Box::new(nonnegative_integer_validator));
        }
        field.configure(options);

        let platform = if self.legacy_keys {
            KeyPlatform::LegacyLetterCodes
        } else {
            KeyPlatform::Standard
        };

        Ok((field, platform))
    }
}

fn parse_restrictor(kind: &str) -> Result<Restrictor, String> {
    match kind {
        "digits" => Ok(Restrictor::digits()),
        "numeric" => Ok(Restrictor::numeric()),
        "alphanumeric" => Ok(Restrictor::alphanumeric()),
        other => Err(format!(
            "Unknown restrictor {:?} (expected digits, numeric, or alphanumeric)",
            other
        )),
    }
}
