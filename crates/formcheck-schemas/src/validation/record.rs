//! Validated output records and the form-redisplay bundle

use crate::validation::error::{FieldErrors, ValidationFailure};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A schema-shaped, fully validated set of form fields.
///
/// Contains exactly the fields the schema declares, each value unchanged
/// from the submission and guaranteed to satisfy every constraint. Only
/// produced by a successful validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatedRecord(BTreeMap<String, String>);

impl ValidatedRecord {
    pub(crate) fn new(fields: BTreeMap<String, String>) -> Self {
        Self(fields)
    }

    /// The validated value of a declared field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields (only for an empty schema).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(field, value)` pairs, sorted by field name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The record as a JSON object, the shape the persistence layer takes.
    pub fn to_value(&self) -> Value {
        // String-to-string maps always serialize
        serde_json::to_value(&self.0).expect("record serialization is infallible")
    }

    /// Extract the record into a typed struct via serde.
    ///
    /// ```
    /// use formcheck_schemas::{validate_form, SchemaId};
    /// use serde::Deserialize;
    /// use serde_json::json;
    ///
    /// #[derive(Deserialize)]
    /// struct NewJoke {
    ///     name: String,
    ///     content: String,
    /// }
    ///
    /// let record = validate_form(SchemaId::Joke, &json!({
    ///     "name": "Chicken",
    ///     "content": "Why did the chicken cross the road"
    /// })).unwrap();
    /// let joke: NewJoke = record.into_typed().unwrap();
    /// assert_eq!(joke.name, "Chicken");
    /// ```
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_value())
    }
}

impl<'a> IntoIterator for &'a ValidatedRecord {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The bundle a route handler sends back with a 400 response so the form can
/// be re-rendered: inline errors plus the submitted values to repopulate the
/// inputs, and optionally a whole-form message.
///
/// The form-level message is owned by the caller (wrong credentials, user
/// already exists, and so on); validation itself only ever fills
/// `field_errors` and `field_values`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFeedback {
    /// Whole-form error message, if the caller has one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub form_error: Option<String>,
    /// Inline errors keyed by field name.
    #[serde(skip_serializing_if = "FieldErrors::is_empty", default)]
    pub field_errors: FieldErrors,
    /// Submitted string values, echoed for input repopulation. Non-string
    /// values are not echoed.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub field_values: BTreeMap<String, String>,
}

impl FormFeedback {
    /// Feedback for a failed validation, echoing the submitted bag.
    pub fn from_failure(failure: &ValidationFailure, input: &Value) -> Self {
        Self {
            form_error: None,
            field_errors: failure.field_errors(),
            field_values: echo_string_fields(input),
        }
    }

    /// Feedback carrying only a whole-form message.
    pub fn form_error<S: Into<String>>(message: S) -> Self {
        Self {
            form_error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Attach the submitted bag's string values.
    pub fn with_values(mut self, input: &Value) -> Self {
        self.field_values = echo_string_fields(input);
        self
    }
}

/// Echo the string-valued entries of a raw bag. Non-object bags and
/// non-string values produce nothing.
fn echo_string_fields(input: &Value) -> BTreeMap<String, String> {
    input
        .as_object()
        .map(|bag| {
            bag.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}
