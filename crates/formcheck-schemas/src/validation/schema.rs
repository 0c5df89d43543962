//! Schema model, registry, and the validation engine

use crate::validation::error::{UnknownSchema, ValidationFailure, ValidationResult, Violation};
use crate::validation::joke::JOKE;
use crate::validation::record::ValidatedRecord;
use crate::validation::user::USER;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A single declarative constraint on a form field.
///
/// The shipped schemas only use minimum-length constraints, but constraints
/// apply in declaration order per field, so richer schemas can layer several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// The value must be a string of at least this many characters
    /// (Unicode scalar values, inclusive boundary).
    MinLength(usize),
}

impl Constraint {
    /// Machine-readable rule name, mirrored into [`Violation::rule`].
    pub fn rule(&self) -> &'static str {
        match self {
            Constraint::MinLength(_) => "min_length",
        }
    }

    /// Check a raw field value against this constraint.
    ///
    /// `None` means the field was absent from the bag or was not a string;
    /// both are checked as an empty value, so they fail any positive
    /// minimum-length constraint with the same message as a too-short value.
    pub fn check(&self, value: Option<&str>) -> bool {
        match *self {
            Constraint::MinLength(min) => value.map_or(0, |s| s.chars().count()) >= min,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::MinLength(min) => write!(f, "min length {}", min),
        }
    }
}

/// One declared field: its name, its constraint, and the fixed
/// human-readable message reported when the constraint is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldRule {
    /// Form field name, as submitted by the form body.
    pub field: &'static str,
    /// The constraint the submitted value must satisfy.
    pub constraint: Constraint,
    /// The message shown inline next to the field when the constraint fails.
    pub message: &'static str,
}

/// A named, immutable set of field constraints.
///
/// Schemas are process-wide `static` constants with no teardown; they are
/// never built at runtime and validation against them cannot fail for
/// infrastructure reasons.
#[derive(Debug, Serialize)]
pub struct Schema {
    /// Schema name, used in failure reporting and CLI selection.
    pub name: &'static str,
    /// Declared fields, in declaration order.
    pub fields: &'static [FieldRule],
}

impl Schema {
    /// Validate a raw field bag against this schema.
    ///
    /// Every declared field is checked; a violation is collected for each
    /// failing field (first failing constraint per field) in declaration
    /// order, so the caller sees all inline errors at once rather than the
    /// first one. A non-object bag is treated as a bag with every field
    /// missing. Fields in the bag that the schema does not declare are
    /// ignored.
    ///
    /// Pure and deterministic: no I/O, no shared state, same input always
    /// yields the same outcome.
    pub fn validate(&self, input: &Value) -> ValidationResult<ValidatedRecord> {
        let bag = input.as_object();
        let mut fields = BTreeMap::new();
        let mut violations = Vec::new();

        for rule in self.fields {
            let value = bag.and_then(|m| m.get(rule.field)).and_then(Value::as_str);
            if rule.constraint.check(value) {
                // A zero-minimum rule accepts an absent field as empty.
                fields.insert(rule.field.to_string(), value.unwrap_or("").to_string());
            } else {
                violations.push(Violation::new(rule.field, rule.constraint.rule(), rule.message));
            }
        }

        if violations.is_empty() {
            Ok(ValidatedRecord::new(fields))
        } else {
            Err(ValidationFailure::new(self.name, violations))
        }
    }

    /// Look up a declared field rule by name.
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.field == name)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Identifier of a registered schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaId {
    /// The new-joke submission form.
    Joke,
    /// The login/registration form.
    User,
}

impl SchemaId {
    /// All registered schemas, in a fixed order.
    pub const ALL: [SchemaId; 2] = [SchemaId::Joke, SchemaId::User];

    /// The schema definition this id refers to.
    pub fn schema(self) -> &'static Schema {
        match self {
            SchemaId::Joke => &JOKE,
            SchemaId::User => &USER,
        }
    }

    /// The schema's registered name.
    pub fn name(self) -> &'static str {
        self.schema().name
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchemaId {
    type Err = UnknownSchema;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "joke" => Ok(SchemaId::Joke),
            "user" => Ok(SchemaId::User),
            _ => Err(UnknownSchema::new(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_min_length_boundary_is_inclusive() {
        let rule = Constraint::MinLength(3);
        assert!(rule.check(Some("abc")));
        assert!(!rule.check(Some("ab")));
        assert!(rule.check(Some("abcd")));
    }

    #[test]
    fn test_min_length_counts_characters_not_bytes() {
        // "héllo" is 5 characters but 6 bytes in UTF-8
        assert!(Constraint::MinLength(5).check(Some("héllo")));
        assert!(!Constraint::MinLength(6).check(Some("héllo")));
    }

    #[test]
    fn test_missing_value_checked_as_empty() {
        assert!(!Constraint::MinLength(1).check(None));
        assert!(Constraint::MinLength(0).check(None));
    }

    #[test]
    fn test_schema_id_round_trips_through_name() {
        for id in SchemaId::ALL {
            assert_eq!(id.name().parse::<SchemaId>().unwrap(), id);
        }
    }

    #[test]
    fn test_schema_id_parse_is_case_insensitive() {
        assert_eq!("Joke".parse::<SchemaId>().unwrap(), SchemaId::Joke);
        assert_eq!("USER".parse::<SchemaId>().unwrap(), SchemaId::User);
        assert!("jokes".parse::<SchemaId>().is_err());
        assert!("".parse::<SchemaId>().is_err());
    }

    #[test]
    fn test_field_lookup() {
        let schema = SchemaId::Joke.schema();
        assert_eq!(schema.field("name").unwrap().message, "Joke name is too short");
        assert!(schema.field("username").is_none());
    }

    #[test]
    fn test_violations_follow_declaration_order() {
        let failure = SchemaId::Joke
            .schema()
            .validate(&json!({"name": "Hi", "content": "short"}))
            .unwrap_err();
        let fields: Vec<_> = failure.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, ["name", "content"]);
    }

    #[test]
    fn test_non_object_bag_fails_every_field() {
        for bag in [json!(null), json!("name=Chicken"), json!([1, 2, 3]), json!(42)] {
            let failure = SchemaId::User.schema().validate(&bag).unwrap_err();
            assert_eq!(failure.violations.len(), 2);
        }
    }

    #[test]
    fn test_undeclared_fields_are_ignored() {
        let record = SchemaId::User
            .schema()
            .validate(&json!({
                "username": "alice",
                "password": "hunter22",
                "loginType": "login"
            }))
            .unwrap();
        assert_eq!(record.len(), 2);
        assert!(record.get("loginType").is_none());
    }
}
