//! Validation outcome and error types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationFailure>;

/// A single field's failure of one declared constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The violating field name. Schemas are flat, so this is always a
    /// single segment, never a nested path.
    pub field: String,
    /// Machine-readable name of the violated constraint.
    pub rule: String,
    /// The fixed human-readable message the schema associates with the
    /// constraint. Never generated dynamically.
    pub message: String,
}

impl Violation {
    /// Create a new violation.
    pub fn new<F, R, M>(field: F, rule: R, message: M) -> Self
    where
        F: Into<String>,
        R: Into<String>,
        M: Into<String>,
    {
        Self {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A failed validation: the ordered per-field violations for one submission.
///
/// Violations appear in schema-declaration field order, one per failing
/// field. Field-name uniqueness is not an invariant of this sequence; the
/// conversion to [`FieldErrors`] resolves duplicates with last-write-wins.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Name of the schema the submission was validated against.
    pub schema: String,
    /// Per-field violations, in schema-declaration field order.
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed for '{}' form:", self.schema)?;
        for violation in &self.violations {
            write!(f, "\n  - {}", violation)?;
        }
        Ok(())
    }
}

impl ValidationFailure {
    /// Create a new failure.
    pub fn new<S: Into<String>>(schema: S, violations: Vec<Violation>) -> Self {
        Self {
            schema: schema.into(),
            violations,
        }
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// A failure with no violations never leaves `validate`, but the type
    /// does not forbid constructing one.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// The flat field-error mapping for form redisplay.
    pub fn field_errors(&self) -> FieldErrors {
        FieldErrors::from_failure(self)
    }
}

/// Flat mapping from field name to inline error message.
///
/// This is the shape form-rendering code consumes to decide which inputs get
/// an inline error and `aria-invalid` marker: a key is present exactly when
/// the field failed validation. Iteration and serialization order is sorted
/// by field name and therefore deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a failure's ordered violations into the field-error mapping.
    ///
    /// Violations are visited in order and each writes its message under its
    /// field name; a later violation for the same field overwrites an
    /// earlier one (last-write-wins). Fields with no violation are absent
    /// from the mapping, never present with an empty message.
    pub fn from_failure(failure: &ValidationFailure) -> Self {
        let mut map = BTreeMap::new();
        for violation in &failure.violations {
            map.insert(violation.field.clone(), violation.message.clone());
        }
        Self(map)
    }

    /// The message for a failing field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether the field has an error.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(field, message)` pairs, sorted by field name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<&ValidationFailure> for FieldErrors {
    fn from(failure: &ValidationFailure) -> Self {
        Self::from_failure(failure)
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Failures from a batch validation run, tagged with the index of the
/// offending bag.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct BatchFailures {
    /// Collected failures, in bag order.
    pub failures: Vec<BatchFailure>,
}

/// One failed bag in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// Position of the bag in the validated slice.
    pub index: usize,
    /// The failure for that bag.
    pub failure: ValidationFailure,
}

impl fmt::Display for BatchFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} submission(s) failed validation:", self.failures.len())?;
        for (i, entry) in self.failures.iter().enumerate() {
            write!(f, "\n{}. [bag {}] {}", i + 1, entry.index, entry.failure)?;
        }
        Ok(())
    }
}

impl BatchFailures {
    /// Empty collection.
    pub fn new() -> Self {
        Self { failures: Vec::new() }
    }

    /// Record a failure for the bag at `index`.
    pub fn add(&mut self, index: usize, failure: ValidationFailure) {
        self.failures.push(BatchFailure { index, failure });
    }

    /// Whether any bag failed.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of failed bags.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Convert to result: `Ok` if no bag failed, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Default for BatchFailures {
    fn default() -> Self {
        Self::new()
    }
}

/// A schema name that is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown schema '{0}', expected one of: joke, user")]
pub struct UnknownSchema(String);

impl UnknownSchema {
    pub(crate) fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    /// The unrecognized name as given.
    pub fn name(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> ValidationFailure {
        ValidationFailure::new(
            "joke",
            vec![
                Violation::new("name", "min_length", "Joke name is too short"),
                Violation::new("content", "min_length", "Joke content is too short"),
            ],
        )
    }

    #[test]
    fn test_field_errors_keys_match_violations() {
        let errors = failure().field_errors();
        assert_eq!(errors.get("name"), Some("Joke name is too short"));
        assert_eq!(errors.get("content"), Some("Joke content is too short"));
        assert_eq!(errors.len(), 2);
        assert!(!errors.contains("author"));
    }

    #[test]
    fn test_field_errors_last_write_wins() {
        let failure = ValidationFailure::new(
            "joke",
            vec![
                Violation::new("name", "min_length", "first message"),
                Violation::new("name", "pattern", "second message"),
            ],
        );
        let errors = failure.field_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name"), Some("second message"));
    }

    #[test]
    fn test_failure_display_lists_every_violation() {
        let rendered = failure().to_string();
        assert!(rendered.contains("validation failed for 'joke' form"));
        assert!(rendered.contains("name: Joke name is too short"));
        assert!(rendered.contains("content: Joke content is too short"));
    }

    #[test]
    fn test_field_errors_serialize_as_flat_object() {
        let json = serde_json::to_value(failure().field_errors()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Joke name is too short",
                "content": "Joke content is too short"
            })
        );
    }

    #[test]
    fn test_batch_failures_into_result() {
        assert!(BatchFailures::new().into_result().is_ok());

        let mut failures = BatchFailures::new();
        failures.add(1, failure());
        let err = failures.into_result().unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.failures[0].index, 1);
    }

    #[test]
    fn test_failure_round_trips_through_serde() {
        let original = failure();
        let json = serde_json::to_string(&original).unwrap();
        let parsed: ValidationFailure = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
