//! Formcheck Schemas - form schema definitions and validators
//!
//! This crate is the validation core of the jokes board: given a named
//! schema and a raw field bag (as received from an untyped form
//! submission), it produces either a validated, typed record or a
//! deterministic mapping from field name to a human-readable error message.
//!
//! ## Features
//!
//! - **Named schemas**: `joke` and `user`, declared as static constants
//! - **Structured outcomes**: `Result<ValidatedRecord, ValidationFailure>`,
//!   never a panic or untyped error, whatever the input shape
//! - **Field-error mapping**: the flat `field → message` shape that
//!   form-rendering code consumes for inline errors
//! - **Form feedback**: the redisplay bundle (form error, field errors,
//!   echoed values) a handler returns with a 400 response
//! - **Batch processing**: validate many bags with fail-fast and error caps
//!
//! ## Quick Start
//!
//! ```rust
//! use formcheck_schemas::{validate_form, FormFeedback, SchemaId};
//! use serde_json::json;
//!
//! let bag = json!({"name": "Hi", "content": "short"});
//!
//! match validate_form(SchemaId::Joke, &bag) {
//!     Ok(record) => {
//!         // hand the record to the persistence layer, then redirect
//!         assert_eq!(record.get("name"), Some("Hi"));
//!     }
//!     Err(failure) => {
//!         // re-render the form with inline errors and the submitted values
//!         let feedback = FormFeedback::from_failure(&failure, &bag);
//!         assert_eq!(
//!             feedback.field_errors.get("name"),
//!             Some("Joke name is too short"),
//!         );
//!     }
//! }
//! ```
//!
//! Validation is pure, synchronous, and stateless: schemas are read-only
//! process-wide constants, calls share nothing, and the same input always
//! yields the same outcome.

pub mod validation;

// Re-export commonly used types for convenience
pub use validation::{
    validate_batch, validate_form, BatchFailure, BatchFailures, Constraint, FieldErrors,
    FieldRule, FormFeedback, Schema, SchemaId, UnknownSchema, ValidatedRecord, ValidationConfig,
    ValidationFailure, ValidationResult, Violation, JOKE, USER,
};
