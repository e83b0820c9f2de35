//! Persistence boundary for edited datasets.
//!
//! An editing tool submits a complete, possibly modified dataset; it is
//! checked for structure only and then replaces the dataset file wholesale.
//! No merging, diffing, or deduplication happens here.
//!
//! Transport-agnostic: a request is a method name plus raw body bytes, and the
//! result is a [`SaveResponse`] carrying an HTTP-style status.

use serde_json::Value;
use std::path::Path;

use super::logs::{log_error, log_success};
use super::types::SaveResponse;
use crate::error::{SaveError, SaveResult};
use crate::transform::pipeline::write_file_replacing;
use crate::validation::validate_dataset_submission;

/// Handle one save request against `destination`.
///
/// | Outcome                              | Status |
/// |--------------------------------------|--------|
/// | written                              | 200    |
/// | body not JSON / missing `nodes`/`links` | 400 |
/// | method other than `POST`             | 405    |
/// | write failure                        | 500    |
pub fn handle_save(method: &str, body: &[u8], destination: &Path) -> SaveResponse {
    let result = check_method(method)
        .and_then(|()| parse_body(body))
        .and_then(|data| save_dataset(&data, destination));

    match result {
        Ok(()) => {
            log_success("Data saved successfully");
            SaveResponse::ok()
        }
        Err(e) => {
            if !e.is_client_error() {
                log_error(format!("Error saving data: {}", e));
            }
            SaveResponse::from(&e)
        }
    }
}

/// Validate structure and overwrite `destination` with `data`.
pub fn save_dataset(data: &Value, destination: &Path) -> SaveResult<()> {
    validate_dataset_submission(data).map_err(SaveError::InvalidStructure)?;

    let content = serde_json::to_string_pretty(data)?;
    write_file_replacing(destination, &content)?;
    Ok(())
}

fn check_method(method: &str) -> SaveResult<()> {
    if method.eq_ignore_ascii_case("POST") {
        Ok(())
    } else {
        Err(SaveError::MethodNotAllowed(method.to_string()))
    }
}

fn parse_body(body: &[u8]) -> SaveResult<Value> {
    Ok(serde_json::from_slice(body)?)
}
