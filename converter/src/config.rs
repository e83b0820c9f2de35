//! Run configuration.
//!
//! Built-in defaults, overridable from the environment (a `.env` file is
//! loaded by the CLI) and then from command-line flags.

use std::path::{Path, PathBuf};

use crate::error::SchemaResult;
use crate::transform::schema::{default_categories, load_categories, CategorySchema};

/// Directory holding the category CSV files.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Dataset artifact location.
pub const DEFAULT_OUTPUT_PATH: &str = "public/data/graphData.json";

/// Report artifact location.
pub const DEFAULT_REPORT_PATH: &str = "reports/data-report.json";

pub const ENV_DATA_DIR: &str = "GRAPHDATA_DATA_DIR";
pub const ENV_OUTPUT_PATH: &str = "GRAPHDATA_OUTPUT";
pub const ENV_REPORT_PATH: &str = "GRAPHDATA_REPORT";
/// Path to a JSON file of category schemas replacing the built-in ones.
pub const ENV_CATEGORIES: &str = "GRAPHDATA_CATEGORIES";

/// Options for one conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub data_dir: PathBuf,
    pub output_path: PathBuf,
    pub report_path: PathBuf,
    /// Categories in processing order
    pub categories: Vec<CategorySchema>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            categories: default_categories(),
        }
    }
}

impl ConvertOptions {
    /// Defaults with process environment overrides applied.
    pub fn from_env() -> SchemaResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides taken from `lookup` (unset or empty values are ignored).
    pub fn from_lookup<F>(lookup: F) -> SchemaResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut options = Self::default();

        if let Some(dir) = get(ENV_DATA_DIR) {
            options.data_dir = PathBuf::from(dir);
        }
        if let Some(path) = get(ENV_OUTPUT_PATH) {
            options.output_path = PathBuf::from(path);
        }
        if let Some(path) = get(ENV_REPORT_PATH) {
            options.report_path = PathBuf::from(path);
        }
        if let Some(path) = get(ENV_CATEGORIES) {
            options.categories = load_categories(Path::new(&path))?;
        }

        Ok(options)
    }

    /// Resolve a category's source file inside the data directory.
    pub fn source_path(&self, schema: &CategorySchema) -> PathBuf {
        self.data_dir.join(&schema.source)
    }
}
