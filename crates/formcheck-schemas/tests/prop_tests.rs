//! Property-based tests for form validation
//!
//! These tests verify that the validators behave correctly across a wide
//! range of generated field bags.

use formcheck_schemas::{validate_form, SchemaId};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Strategy for generating random JSON values with controlled complexity
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,50}".prop_map(Value::String),
    ];

    leaf.prop_recursive(3, 10, 5, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            proptest::collection::hash_map("[a-zA-Z_][a-zA-Z0-9_]{0,20}", inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Strategy for generating joke-like field bags with optional fields
fn joke_bag_strategy() -> impl Strategy<Value = Value> {
    (
        proptest::option::of("[a-zA-Z0-9 ]{0,20}"),
        proptest::option::of("[a-zA-Z0-9 .,!?]{0,40}"),
    )
        .prop_map(|(name, content)| {
            let mut bag = json!({});
            if let Some(n) = name {
                bag["name"] = json!(n);
            }
            if let Some(c) = content {
                bag["content"] = json!(c);
            }
            bag
        })
}

proptest! {
    /// Property: validation never panics on any JSON input
    #[test]
    fn prop_validators_never_panic(input in json_value_strategy()) {
        let _ = validate_form(SchemaId::Joke, &input);
        let _ = validate_form(SchemaId::User, &input);
    }

    /// Property: validation is deterministic, same input gives an equal outcome
    #[test]
    fn prop_validation_is_idempotent(input in json_value_strategy()) {
        let first = validate_form(SchemaId::Joke, &input);
        let second = validate_form(SchemaId::Joke, &input);
        prop_assert_eq!(first, second);
    }

    /// Property: a joke bag passes exactly when both fields meet their minimums
    #[test]
    fn prop_success_iff_all_minimums_met(bag in joke_bag_strategy()) {
        let name_len = bag.get("name").and_then(Value::as_str).map_or(0, |s| s.chars().count());
        let content_len = bag.get("content").and_then(Value::as_str).map_or(0, |s| s.chars().count());
        let should_pass = name_len >= 5 && content_len >= 10;

        prop_assert_eq!(validate_form(SchemaId::Joke, &bag).is_ok(), should_pass);
    }

    /// Property: on success the record equals the input restricted to declared fields
    #[test]
    fn prop_record_preserves_declared_values(
        name in "[a-zA-Z0-9 ]{5,20}",
        content in "[a-zA-Z0-9 .,!?]{10,40}",
        extra in "[a-zA-Z0-9]{0,10}",
    ) {
        let bag = json!({"name": name, "content": content, "extra": extra});
        let record = validate_form(SchemaId::Joke, &bag).unwrap();

        prop_assert_eq!(record.len(), 2);
        prop_assert_eq!(record.get("name"), Some(name.as_str()));
        prop_assert_eq!(record.get("content"), Some(content.as_str()));
        prop_assert_eq!(record.get("extra"), None);
    }

    /// Property: the field-error mapping has a key exactly for failing fields
    #[test]
    fn prop_field_errors_cover_exactly_failing_fields(bag in joke_bag_strategy()) {
        if let Err(failure) = validate_form(SchemaId::Joke, &bag) {
            let errors = failure.field_errors();
            for field in ["name", "content"] {
                let rule = SchemaId::Joke.schema().field(field).unwrap();
                let value = bag.get(field).and_then(Value::as_str);
                let passes = rule.constraint.check(value);
                prop_assert_eq!(errors.contains(field), !passes);
            }
        }
    }

    /// Property: a minimum-length boundary value always passes
    #[test]
    fn prop_boundary_is_inclusive(pad in 0usize..4) {
        let username = "a".repeat(3 + pad);
        let password = "b".repeat(6 + pad);
        let bag = json!({"username": username, "password": password});
        prop_assert!(validate_form(SchemaId::User, &bag).is_ok());
    }
}
