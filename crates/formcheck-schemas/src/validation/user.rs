//! The login/registration schema

use crate::validation::schema::{Constraint, FieldRule, Schema};

/// Schema for the login and registration forms: username and password.
pub static USER: Schema = Schema {
    name: "user",
    fields: &[
        FieldRule {
            field: "username",
            constraint: Constraint::MinLength(3),
            message: "Usernames must be at least 3 characters long",
        },
        FieldRule {
            field: "password",
            constraint: Constraint::MinLength(6),
            message: "Passwords must be at least 6 characters long",
        },
    ],
};
