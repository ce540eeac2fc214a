//! Field level validation errors.
//!
//! Validation failures are collected per field so that a single response can report
//! every problem found in a payload at once.
use std::collections::BTreeMap;

use serde::Serialize;

/// Message reported when a required field is missing from the payload.
pub const REQUIRED: &str = "This field is required.";
/// Message reported when a text field is empty or only contains whitespace.
pub const BLANK: &str = "This field may not be blank.";
/// Message reported when a numeric query parameter is not an integer.
pub const NOT_AN_INTEGER: &str = "Enter a whole number.";

/// A set of validation messages keyed by field name.
///
/// It serializes as a map of field names to the list of messages, e.g.
/// `{"name": ["This field may not be blank."]}`.
#[derive(thiserror::Error, Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[error("{}", summary(.0))]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Creates an error set holding a single message.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    /// Appends a message to the given field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Returns `true` if at least one message was reported for the field.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns the messages reported for the field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `Ok(value)` when no error was collected, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

fn summary(errors: &BTreeMap<String, Vec<String>>) -> String {
    errors
        .iter()
        .flat_map(|(field, messages)| {
            messages
                .iter()
                .map(move |message| format!("{field}: {message}"))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
