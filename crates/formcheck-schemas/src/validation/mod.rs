//! Validation module for the jokes-board form schemas
//!
//! Validates raw form submissions against the registered schemas and maps
//! failures to the field-keyed error messages the form layer re-renders
//! with. The registered schemas:
//!
//! - **joke**: `name` (min length 5), `content` (min length 10)
//! - **user**: `username` (min length 3), `password` (min length 6)
//!
//! Validation is pure and total: every input, however malformed, resolves to
//! either a [`ValidatedRecord`] or a [`ValidationFailure`]. There is no
//! hidden panic or untyped error path.

pub mod error;
pub mod joke;
pub mod record;
pub mod schema;
pub mod user;

// Re-export commonly used types
pub use error::{
    BatchFailure, BatchFailures, FieldErrors, UnknownSchema, ValidationFailure, ValidationResult,
    Violation,
};
pub use joke::JOKE;
pub use record::{FormFeedback, ValidatedRecord};
pub use schema::{Constraint, FieldRule, Schema, SchemaId};
pub use user::USER;

use serde_json::Value;

/// Validate a raw field bag against a registered schema.
///
/// # Examples
///
/// ```rust
/// use formcheck_schemas::validation::{validate_form, SchemaId};
/// use serde_json::json;
///
/// let outcome = validate_form(SchemaId::Joke, &json!({
///     "name": "Chicken",
///     "content": "Why did the chicken cross the road"
/// }));
/// assert!(outcome.is_ok());
///
/// let failure = validate_form(SchemaId::Joke, &json!({"name": "Hi"})).unwrap_err();
/// let errors = failure.field_errors();
/// assert_eq!(errors.get("name"), Some("Joke name is too short"));
/// assert_eq!(errors.get("content"), Some("Joke content is too short"));
/// ```
pub fn validate_form(schema: SchemaId, input: &Value) -> ValidationResult<ValidatedRecord> {
    schema.schema().validate(input)
}

/// Validation configuration for batch operations
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Whether to stop on the first failed bag or collect all failures
    pub fail_fast: bool,
    /// Maximum number of failures to collect (0 = unlimited)
    pub max_errors: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            max_errors: 0,
        }
    }
}

impl ValidationConfig {
    /// Enable fail-fast mode
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Set maximum number of failures to collect
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

/// Validate a batch of field bags against one schema.
///
/// Returns the validated records when every bag passes, or the collected
/// per-bag failures otherwise. `fail_fast` stops at the first failed bag;
/// `max_errors` caps how many failures are collected.
pub fn validate_batch(
    schema: SchemaId,
    bags: &[Value],
    config: &ValidationConfig,
) -> Result<Vec<ValidatedRecord>, BatchFailures> {
    let mut records = Vec::with_capacity(bags.len());
    let mut failures = BatchFailures::new();

    for (i, bag) in bags.iter().enumerate() {
        match validate_form(schema, bag) {
            Ok(record) => records.push(record),
            Err(failure) => {
                failures.add(i, failure);

                if config.fail_fast {
                    break;
                }

                if config.max_errors > 0 && failures.len() >= config.max_errors {
                    break;
                }
            }
        }
    }

    failures.into_result().map(|_| records)
}
