//! Transformation module.
//!
//! - Schema: per-category field declarations and header tables
//! - Normalize: cell value normalization
//! - Mapper: one row -> one candidate record
//! - Registry: ids seen during a run
//! - Pipeline: the ingestion coordinator

pub mod mapper;
pub mod normalize;
pub mod pipeline;
pub mod registry;
pub mod schema;

pub use mapper::map_row;
pub use normalize::{normalize_value, MULTI_VALUE_DELIMITER};
pub use pipeline::*;
pub use registry::{IdRegistry, SeenAt};
pub use schema::{
    categories_from_json, default_categories, load_categories, validate_categories,
    CategorySchema, ColumnMapping, FieldShape, FieldSpec,
};
