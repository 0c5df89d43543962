//! The new-joke submission schema

use crate::validation::schema::{Constraint, FieldRule, Schema};

/// Schema for the new-joke form: a short name and the joke body.
pub static JOKE: Schema = Schema {
    name: "joke",
    fields: &[
        FieldRule {
            field: "name",
            constraint: Constraint::MinLength(5),
            message: "Joke name is too short",
        },
        FieldRule {
            field: "content",
            constraint: Constraint::MinLength(10),
            message: "Joke content is too short",
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_joke_passes() {
        let record = JOKE
            .validate(&json!({
                "name": "Chicken",
                "content": "Why did the chicken cross the road"
            }))
            .unwrap();
        assert_eq!(record.get("name"), Some("Chicken"));
        assert_eq!(record.get("content"), Some("Why did the chicken cross the road"));
    }

    #[test]
    fn test_short_fields_each_get_a_violation() {
        let failure = JOKE
            .validate(&json!({"name": "Hi", "content": "short"}))
            .unwrap_err();
        let errors = failure.field_errors();
        assert_eq!(errors.get("name"), Some("Joke name is too short"));
        assert_eq!(errors.get("content"), Some("Joke content is too short"));
    }

    #[test]
    fn test_passing_field_is_not_reported() {
        let failure = JOKE
            .validate(&json!({
                "name": "Chicken",
                "content": "too short"
            }))
            .unwrap_err();
        assert_eq!(failure.len(), 1);
        assert!(!failure.field_errors().contains("name"));
    }

    #[test]
    fn test_missing_content_reports_standard_message() {
        let failure = JOKE.validate(&json!({"name": "Chicken"})).unwrap_err();
        assert_eq!(failure.len(), 1);
        assert_eq!(
            failure.field_errors().get("content"),
            Some("Joke content is too short")
        );
    }

    #[test]
    fn test_non_string_name_reports_standard_message() {
        let failure = JOKE
            .validate(&json!({
                "name": 12345,
                "content": "Why did the chicken cross the road"
            }))
            .unwrap_err();
        assert_eq!(failure.field_errors().get("name"), Some("Joke name is too short"));
    }

    #[test]
    fn test_boundary_lengths_pass() {
        // name minimum is 5, content minimum is 10
        let record = JOKE
            .validate(&json!({"name": "Knock", "content": "0123456789"}))
            .unwrap();
        assert_eq!(record.get("name"), Some("Knock"));
    }
}
