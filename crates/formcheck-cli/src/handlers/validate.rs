//! Validation command handler and related utilities

use crate::cli::ValidateArgs;
use crate::error::{Error, Result};
use crate::logging::{redaction, timing::Timer};
use crate::output::OutputWriter;
use formcheck_schemas::{validate_form, SchemaId};
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Handle the validate command
pub fn handle_validate(args: ValidateArgs, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details(
        "validate_command",
        &format!("file: {}", args.field_bag.display()),
    );
    info!("Starting validation process");

    // Read and parse the field bag
    let content = read_field_bag(&args.field_bag)?;
    debug!("Field bag read, {} bytes", content.len());
    let bag = parse_field_bag(&args.field_bag, &content)?;

    // Resolve the schema, detecting it from the field names when not given
    let schema = match args.schema {
        Some(arg) => arg.into(),
        None => {
            let detected = detect_schema(&bag).ok_or(Error::SchemaDetection)?;
            output.info(&format!("Detected '{}' form fields", detected.name()))?;
            detected
        }
    };
    debug!(schema = schema.name(), "Validating field bag");
    output.info(&format!("Validating against the '{}' schema", schema.name()))?;

    // Run validation and render the outcome
    match validate_form(schema, &bag) {
        Ok(record) => {
            info!("Validation completed successfully");
            output.success("✓ Submission is valid")?;

            if args.detailed {
                output.section("Validated Record")?;
                output.data(&record)?;
            }

            Ok(())
        }
        Err(failure) => {
            warn!(violations = failure.len(), "Validation failed");
            output.error("✗ Submission failed validation")?;
            output.failure(&failure)?;

            if args.detailed {
                output.section("Submitted Fields")?;
                let mut echoed = bag.clone();
                redaction::redact_json_value(&mut echoed);
                output.data(&echoed)?;
            }

            Err(Error::Validation {
                count: failure.len(),
            })
        }
    }
}

/// Read the field bag from a file, or from stdin when the path is '-'
fn read_field_bag(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok(content);
    }

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    Ok(fs::read_to_string(path)?)
}

/// Parse the field bag content, choosing the format by file extension
fn parse_field_bag(path: &Path, content: &str) -> Result<Value> {
    let is_yaml = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);

    if is_yaml {
        serde_yaml::from_str(content).map_err(|_e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
        })
    } else {
        serde_json::from_str(content).map_err(|_e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
        })
    }
}

/// Detect which schema a field bag is meant for by its field names
fn detect_schema(bag: &Value) -> Option<SchemaId> {
    let obj = bag.as_object()?;

    // Joke submissions carry 'name' and 'content'
    if obj.contains_key("name") || obj.contains_key("content") {
        return Some(SchemaId::Joke);
    }

    // Login/registration submissions carry 'username' and 'password'
    if obj.contains_key("username") || obj.contains_key("password") {
        return Some(SchemaId::User);
    }

    None
}
