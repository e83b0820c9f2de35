//! Response types for the dataset persistence boundary.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::SaveError;

/// Outcome of a save request: an HTTP-style status and a JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub status: u16,
    pub body: Value,
}

impl SaveResponse {
    pub fn ok() -> Self {
        Self {
            status: 200,
            body: json!({ "success": true, "message": "Data saved successfully" }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

impl From<&SaveError> for SaveResponse {
    fn from(err: &SaveError) -> Self {
        let message = match err {
            SaveError::MethodNotAllowed(_) => "Method not allowed",
            SaveError::MalformedBody(_) | SaveError::InvalidStructure(_) => {
                "Invalid data structure"
            }
            SaveError::Io(_) => "Failed to save data",
        };
        Self {
            status: err.status_code(),
            body: error_response(message),
        }
    }
}

/// Create an error body
pub fn error_response(error: &str) -> Value {
    json!({ "error": error })
}
