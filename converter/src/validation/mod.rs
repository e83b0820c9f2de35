//! JSON Schema validation for dataset documents.
//!
//! The persistence boundary only checks structure: a submitted dataset must be
//! an object with non-null `nodes` and `links`. The schema is embedded at
//! compile time from `schemas/dataset-submission.json`.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use graphdata::validation::{is_valid_dataset_submission, validate_dataset_submission};
//!
//! assert!(is_valid_dataset_submission(&json!({ "nodes": [], "links": [] })));
//! assert!(validate_dataset_submission(&json!({ "nodes": [] })).is_err());
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;

static DATASET_SUBMISSION_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/dataset-submission.json"))
        .expect("Invalid embedded schema")
});

/// Validate `data` against a JSON schema.
///
/// Returns every validation message on failure.
///
/// ```
/// use serde_json::json;
/// use graphdata::validation::validate;
///
/// let schema = json!({
///     "type": "object",
///     "required": ["name"],
///     "properties": { "name": { "type": "string" } }
/// });
///
/// assert!(validate(&schema, &json!({ "name": "test" })).is_ok());
/// assert!(validate(&schema, &json!({ "age": 42 })).is_err());
/// ```
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Boolean form of [`validate`].
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate a submitted replacement dataset.
pub fn validate_dataset_submission(data: &Value) -> Result<(), Vec<String>> {
    validate(&DATASET_SUBMISSION_SCHEMA, data)
}

pub fn is_valid_dataset_submission(data: &Value) -> bool {
    is_valid(&DATASET_SUBMISSION_SCHEMA, data)
}
