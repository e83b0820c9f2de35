//! Domain models for the graphdata conversion pipeline.
//!
//! - [`FieldValue`] - a normalized cell: scalar string or ordered list of strings
//! - [`Candidate`] - one mapped row before required-field validation
//! - [`Record`] - an accepted graph node
//! - [`Dataset`] - the `{nodes, links}` artifact
//! - [`Report`] - per-run diagnostics

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// =============================================================================
// Field Values
// =============================================================================

/// A normalized field value.
///
/// Serializes as a bare JSON string or a JSON array of strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Coerce into list form (a scalar becomes a one-element list).
    pub fn into_list(self) -> Vec<String> {
        match self {
            FieldValue::Scalar(s) => vec![s],
            FieldValue::List(items) => items,
        }
    }

    /// Collapse into a single trimmed string. List items are joined with `,`.
    pub fn to_scalar_string(&self) -> String {
        match self {
            FieldValue::Scalar(s) => s.trim().to_string(),
            FieldValue::List(items) => items.join(",").trim().to_string(),
        }
    }

    /// Concatenate `other` after `self`, both coerced to lists.
    pub fn merge(self, other: FieldValue) -> FieldValue {
        let mut merged = self.into_list();
        merged.extend(other.into_list());
        FieldValue::List(merged)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Scalar(s.to_string())
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(String::from).collect())
    }
}

// =============================================================================
// Candidate / Record
// =============================================================================

/// A row mapped through a header table, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Category tag the row was read under.
    pub category: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub fields: BTreeMap<String, FieldValue>,
}

impl Candidate {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            id: None,
            name: None,
            fields: BTreeMap::new(),
        }
    }

    /// Whether a field key currently holds a non-blank value.
    pub fn has_value(&self, key: &str) -> bool {
        match key {
            "id" => self.id.as_deref().is_some_and(|s| !s.trim().is_empty()),
            "name" => self.name.as_deref().is_some_and(|s| !s.trim().is_empty()),
            other => self.fields.contains_key(other),
        }
    }

    /// Promote into a [`Record`].
    ///
    /// On failure returns the required fields lacking a value, never empty:
    /// `id` and `name` first, then any of `required` in the given order.
    pub fn into_record<'a>(
        self,
        required: impl IntoIterator<Item = &'a str>,
    ) -> Result<Record, Vec<String>> {
        let missing: Vec<String> = ["id", "name"]
            .into_iter()
            .chain(
                required
                    .into_iter()
                    .filter(|key| *key != "id" && *key != "name"),
            )
            .filter(|key| !self.has_value(key))
            .map(String::from)
            .collect();

        let id = self.id.filter(|s| !s.trim().is_empty());
        let name = self.name.filter(|s| !s.trim().is_empty());

        match (id, name) {
            (Some(id), Some(name)) if missing.is_empty() => Ok(Record {
                category: self.category,
                id: id.trim().to_string(),
                name: name.trim().to_string(),
                fields: self.fields,
            }),
            _ => Err(missing),
        }
    }
}

/// An accepted graph node.
///
/// Serialized field order is `type`, `id`, `name`, then optional fields by key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    #[serde(rename = "type")]
    pub category: String,
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// The dataset artifact.
///
/// `links` is reserved for the downstream editor; the pipeline never fills it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    pub nodes: Vec<Record>,
    pub links: Vec<Value>,
}

impl Dataset {
    pub fn from_nodes(nodes: Vec<Record>) -> Self {
        Self {
            nodes,
            links: Vec::new(),
        }
    }
}

// =============================================================================
// Report
// =============================================================================

/// Row counts for one source.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceCounts {
    pub total: usize,
    pub parsed: usize,
    pub skipped: usize,
}

/// A row that did not become a node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedRow {
    pub source: String,
    pub row_number: usize,
    pub reason: String,
}

/// A row lacking one or more required fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MissingFields {
    pub source: String,
    pub row_number: usize,
    pub missing_fields: Vec<String>,
}

/// Diagnostics accumulated over one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    /// Keyed by source file name.
    pub counts: BTreeMap<String, SourceCounts>,
    pub skipped_rows: Vec<SkippedRow>,
    pub duplicate_ids: Vec<String>,
    pub missing_required_fields: Vec<MissingFields>,
}

impl Report {
    /// Record a duplicate id, once per id.
    pub fn note_duplicate(&mut self, id: &str) {
        if !self.duplicate_ids.iter().any(|d| d == id) {
            self.duplicate_ids.push(id.to_string());
        }
    }

    pub fn summary(&self) -> String {
        let (parsed, skipped) = self
            .counts
            .values()
            .fold((0, 0), |(p, s), c| (p + c.parsed, s + c.skipped));
        format!(
            "{} nodes, {} skipped rows, {} duplicate ids",
            parsed,
            skipped,
            self.duplicate_ids.len()
        )
    }
}
