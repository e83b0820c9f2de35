//! # Graphdata - categorized CSV sources to a graph-node dataset
//!
//! Graphdata reads one CSV file per category (People, Projects, Institutions,
//! Methods by default), normalizes every row into a node, enforces that ids are
//! unique across all files, and writes a `{nodes, links}` dataset together with
//! a diagnostic report.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV files  │────▶│   Parser    │────▶│   Mapper    │────▶│  Pipeline   │
//! │ (per categ.)│     │ (decode+csv)│     │ (normalize) │     │ (validate)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────┬──────┘
//!                                                                   ▼
//!                                                   graphData.json + data-report.json
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use graphdata::{convert, ConvertOptions};
//!
//! let result = convert(&ConvertOptions::default()).unwrap();
//! println!("{}", result.report.summary());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Paths, environment overrides, run options
//! - [`models`] - Records, dataset and report
//! - [`parser`] - Category source reading
//! - [`transform`] - Schemas, normalization, mapping, and the pipeline
//! - [`validation`] - JSON Schema structural checks
//! - [`api`] - Logging and the dataset persistence boundary

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Validation
pub mod validation;

// Logging + persistence boundary
pub mod api;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{
    PipelineError, PipelineResult, SaveError, SaveResult, SchemaError, SchemaResult, SourceError,
    SourceResult,
};

// =============================================================================
// Re-exports - Config
// =============================================================================

pub use config::ConvertOptions;

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    Candidate, Dataset, FieldValue, MissingFields, Record, Report, SkippedRow, SourceCounts,
};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{parse_csv, parse_csv_file, read_category, ParseResult, Row};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{
    convert, default_categories, ingest, ingest_category, map_row, normalize_value,
    write_artifacts, CategorySchema, ConversionResult, FieldShape, IdRegistry,
};

// =============================================================================
// Re-exports - Boundary
// =============================================================================

pub use api::{handle_save, SaveResponse};
