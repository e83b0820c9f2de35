//! Error types for the graphdata conversion pipeline.
//!
//! - [`SourceError`] - reading one category source
//! - [`SchemaError`] - invalid category schemas
//! - [`PipelineError`] - top-level run errors, including the fatal duplicate-id abort
//! - [`SaveError`] - persistence boundary for edited datasets
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::Report;

// =============================================================================
// Source Errors
// =============================================================================

/// Errors while reading a category source.
///
/// A source that does not exist is not an error; the reader returns no rows.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read the file.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content could not be decoded to text.
    #[error("Failed to decode {path} as {encoding}")]
    Encoding { path: PathBuf, encoding: String },

    /// Structurally invalid CSV.
    #[error("Invalid CSV format: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Schema Errors
// =============================================================================

/// Errors in a category schema definition.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A header table maps a label onto a key with no field declaration.
    #[error("Category '{category}': column '{label}' maps to undeclared field '{key}'")]
    UndeclaredField {
        category: String,
        label: String,
        key: String,
    },

    /// `id` or `name` is missing, optional, or list-typed.
    #[error("Category '{category}': field '{key}' must be declared as a required scalar")]
    IdentityField { category: String, key: String },

    /// A field key is declared twice in one category.
    #[error("Category '{category}': field '{key}' declared more than once")]
    DuplicateField { category: String, key: String },

    /// Two categories share a tag or a source.
    #[error("Category {what} '{value}' is declared more than once")]
    DuplicateCategory { what: &'static str, value: String },

    /// Schema file could not be read.
    #[error("Failed to read category schemas: {0}")]
    Io(#[from] std::io::Error),

    /// Schema file is not valid JSON for a category list.
    #[error("Invalid category schemas: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level errors of one conversion run.
///
/// Per-row problems never appear here; they are recorded in the [`Report`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A category source could not be read.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// The configured categories are invalid.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// At least one id occurs more than once. Nothing is written.
    #[error(
        "Duplicate node IDs found: {}. IDs must be unique across all files.",
        .ids.join(", ")
    )]
    DuplicateIds { ids: Vec<String>, report: Box<Report> },

    /// Failed to write an artifact.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize an artifact.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Save Errors (persistence boundary)
// =============================================================================

/// Errors at the dataset persistence boundary.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Only writes are accepted.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Body is not JSON.
    #[error("Malformed body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// Body lacks `nodes` or `links`.
    #[error("Invalid data structure: {}", .0.join("; "))]
    InvalidStructure(Vec<String>),

    /// Writing the dataset failed.
    #[error("Failed to save data: {0}")]
    Io(#[from] std::io::Error),
}

impl SaveError {
    /// HTTP-style status code for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            SaveError::MethodNotAllowed(_) => 405,
            SaveError::MalformedBody(_) | SaveError::InvalidStructure(_) => 400,
            SaveError::Io(_) => 500,
        }
    }

    /// Whether the caller sent a bad request (as opposed to a server-side failure).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for source reading.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for the persistence boundary.
pub type SaveResult<T> = Result<T, SaveError>;
