//! Form input, validation and the form views handed to the templates.
//!
//! Validation is a pure function of the submitted input (and the records it
//! has to be checked against) returning either the cleaned fields or
//! [FormErrors]. Rendering never validates, it only consumes a form view built
//! from a record or from rejected input.

pub mod blog;
pub mod category;
pub mod login;

use std::collections::BTreeMap;

use serde::Serialize;

pub const REQUIRED: &str = "This field is required.";

/// Validation failures of one submission.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    /// Messages per input field.
    pub fields: BTreeMap<String, Vec<String>>,
    /// Form-level messages, not attributable to a single field.
    pub non_field: Vec<String>,
}

impl FormErrors {
    pub fn add_field(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    /// Form-level messages, falling back to `field: message` pairs when the
    /// submission only failed on individual fields.
    pub fn summary(&self) -> String {
        if !self.non_field.is_empty() {
            return self.non_field.join(" ");
        }

        self.fields
            .iter()
            .flat_map(|(field, messages)| {
                messages
                    .iter()
                    .map(move |message| format!("{}: {}", field, message))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Trims `value` and records a required-field error when nothing is left.
fn required(errors: &mut FormErrors, field: &str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add_field(field, REQUIRED);
    }
    value.to_string()
}

fn max_length(errors: &mut FormErrors, field: &str, value: &str, limit: usize) {
    let length = value.chars().count();
    if length > limit {
        errors.add_field(
            field,
            format!(
                "Ensure this value has at most {} characters (it has {}).",
                limit, length
            ),
        );
    }
}
