//! Category schemas.
//!
//! A [`CategorySchema`] declares, for one category, which fields exist (scalar
//! or list, required or optional) and the header table mapping exact CSV labels
//! onto those fields.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{SchemaError, SchemaResult};

/// Whether a field always holds a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldShape {
    /// Scalar unless the raw value contains the multi-value delimiter.
    #[default]
    Scalar,
    /// Always a list, even for a single value.
    List,
}

/// Declaration of one internal field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,
    #[serde(default)]
    pub shape: FieldShape,
    #[serde(default)]
    pub required: bool,
}

/// One header table entry: exact CSV label -> internal field key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub label: String,
    pub key: String,
}

/// Schema for one category of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySchema {
    /// Tag written to each record's `type`.
    pub category: String,
    /// Source file name, relative to the data directory. Also the report key.
    pub source: String,
    pub fields: Vec<FieldSpec>,
    pub columns: Vec<ColumnMapping>,
}

impl CategorySchema {
    /// New schema with `id` and `name` declared as required scalars.
    pub fn new(category: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            source: source.into(),
            fields: vec![
                FieldSpec { key: "id".into(), shape: FieldShape::Scalar, required: true },
                FieldSpec { key: "name".into(), shape: FieldShape::Scalar, required: true },
            ],
            columns: Vec::new(),
        }
    }

    /// Declare an optional scalar field.
    pub fn scalar(self, key: &str) -> Self {
        self.declare(key, FieldShape::Scalar)
    }

    /// Declare an optional always-list field.
    pub fn list(self, key: &str) -> Self {
        self.declare(key, FieldShape::List)
    }

    fn declare(mut self, key: &str, shape: FieldShape) -> Self {
        self.fields.push(FieldSpec { key: key.into(), shape, required: false });
        self
    }

    /// Add a header table entry.
    pub fn map(mut self, label: &str, key: &str) -> Self {
        self.columns.push(ColumnMapping { label: label.into(), key: key.into() });
        self
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Declared shape of a key; undeclared keys are scalar.
    pub fn shape_of(&self, key: &str) -> FieldShape {
        self.field(key).map(|f| f.shape).unwrap_or_default()
    }

    /// Required field keys in declaration order.
    pub fn required_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter(|f| f.required).map(|f| f.key.as_str())
    }

    /// Check internal consistency of this schema.
    pub fn validate(&self) -> SchemaResult<()> {
        let mut seen = HashSet::new();
        for f in &self.fields {
            if !seen.insert(f.key.as_str()) {
                return Err(SchemaError::DuplicateField {
                    category: self.category.clone(),
                    key: f.key.clone(),
                });
            }
        }

        for key in ["id", "name"] {
            let ok = self
                .field(key)
                .is_some_and(|f| f.required && f.shape == FieldShape::Scalar);
            if !ok {
                return Err(SchemaError::IdentityField {
                    category: self.category.clone(),
                    key: key.to_string(),
                });
            }
        }

        for col in &self.columns {
            if self.field(&col.key).is_none() {
                return Err(SchemaError::UndeclaredField {
                    category: self.category.clone(),
                    label: col.label.clone(),
                    key: col.key.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Validate a whole category set: each schema, plus unique tags and sources.
pub fn validate_categories(categories: &[CategorySchema]) -> SchemaResult<()> {
    let mut tags = HashSet::new();
    let mut sources = HashSet::new();
    for schema in categories {
        schema.validate()?;
        if !tags.insert(schema.category.as_str()) {
            return Err(SchemaError::DuplicateCategory {
                what: "tag",
                value: schema.category.clone(),
            });
        }
        if !sources.insert(schema.source.as_str()) {
            return Err(SchemaError::DuplicateCategory {
                what: "source",
                value: schema.source.clone(),
            });
        }
    }
    Ok(())
}

/// Parse a JSON array of category schemas and validate it.
pub fn categories_from_json(json: &str) -> SchemaResult<Vec<CategorySchema>> {
    let categories: Vec<CategorySchema> = serde_json::from_str(json)?;
    validate_categories(&categories)?;
    Ok(categories)
}

/// Load category schemas from a JSON file.
pub fn load_categories(path: &Path) -> SchemaResult<Vec<CategorySchema>> {
    let content = std::fs::read_to_string(path)?;
    categories_from_json(&content)
}

/// The built-in deployment, in processing order.
pub fn default_categories() -> Vec<CategorySchema> {
    vec![people(), projects(), institutions(), methods()]
}

fn people() -> CategorySchema {
    CategorySchema::new("People", "PEOPLE.csv")
        .scalar("bio")
        .list("websites")
        .list("social")
        .scalar("connections")
        .map("ID", "id")
        .map("Name [text]", "name")
        .map("Bio [text]", "bio")
        .map("Website [link]", "websites")
        .map("Social [link]", "social")
        .map("Connections to institution [text]", "connections")
}

fn projects() -> CategorySchema {
    CategorySchema::new("Projects", "PROJECTS.csv")
        .scalar("description")
        .scalar("who_involved")
        .scalar("legacy_impacts")
        .scalar("challenges")
        .scalar("budget")
        .scalar("methods")
        .list("website")
        .scalar("involved_institutions")
        .map("ID", "id")
        .map("Name [text]", "name")
        .map("Description [text]", "description")
        .map(
            "Who was involved (eg. creatives/communities) - who is being acted upon [text]",
            "who_involved",
        )
        .map("Legacy / Impacts [text]", "legacy_impacts")
        .map("Challenges the project faced [text]", "challenges")
        .map("What kind of budget was it? [text]", "budget")
        .map("What methods were used? [text]", "methods")
        .map("Website / Links to videos [link]", "website")
        .map(
            "Who was involved (Institutions: funded / presented / supported ) [text]",
            "involved_institutions",
        )
}

fn institutions() -> CategorySchema {
    CategorySchema::new("Institutions", "INSTITUTIONS.csv")
        .scalar("bio")
        .list("websites")
        .list("social")
        .map("ID", "id")
        .map("Name [text]", "name")
        .map("Bio [text]", "bio")
        .map("Website [link]", "websites")
        .map("Social [link]", "social")
}

fn methods() -> CategorySchema {
    CategorySchema::new("Methods", "METHODS.csv")
        .scalar("description")
        .scalar("steps")
        .scalar("challenges")
        .scalar("conditions")
        .scalar("publications")
        .scalar("templates")
        .scalar("category")
        .map("ID", "id")
        .map("Name [text]", "name")
        .map("Description [text]", "description")
        .map("Step-by-step guide [Numbered list text ]", "steps")
        .map("Challenges of this method [text]", "challenges")
        .map("What conditions / materials are needed? [text]", "conditions")
        .map("Links to reports / publications [link]", "publications")
        .map("Downloadable Templates you might need [link]", "templates")
        .map("Category [text]", "category")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories_are_valid() {
        let categories = default_categories();
        assert!(validate_categories(&categories).is_ok());

        let order: Vec<_> = categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["People", "Projects", "Institutions", "Methods"]);
    }

    #[test]
    fn test_list_fields() {
        let people = people();
        assert_eq!(people.shape_of("websites"), FieldShape::List);
        assert_eq!(people.shape_of("bio"), FieldShape::Scalar);
        assert_eq!(people.shape_of("not_declared"), FieldShape::Scalar);
        assert_eq!(projects().shape_of("website"), FieldShape::List);
        assert_eq!(methods().shape_of("publications"), FieldShape::Scalar);
    }

    #[test]
    fn test_required_keys_order() {
        let schema = people();
        let keys: Vec<_> = schema.required_keys().collect();
        assert_eq!(keys, vec!["id", "name"]);
    }

    #[test]
    fn test_mapping_to_undeclared_field_rejected() {
        let schema = CategorySchema::new("People", "PEOPLE.csv")
            .map("ID", "id")
            .map("Homepage", "homepage");
        let err = schema.validate().unwrap_err();
        assert!(matches!(err, SchemaError::UndeclaredField { ref key, .. } if key == "homepage"));
    }

    #[test]
    fn test_identity_fields_must_be_required_scalars() {
        let mut schema = CategorySchema::new("People", "PEOPLE.csv");
        schema.fields[0].shape = FieldShape::List;
        assert!(matches!(
            schema.validate(),
            Err(SchemaError::IdentityField { ref key, .. }) if key == "id"
        ));
    }

    #[test]
    fn test_duplicate_sources_rejected() {
        let a = CategorySchema::new("A", "SAME.csv");
        let b = CategorySchema::new("B", "SAME.csv");
        assert!(matches!(
            validate_categories(&[a, b]),
            Err(SchemaError::DuplicateCategory { what: "source", .. })
        ));
    }

    #[test]
    fn test_categories_json_roundtrip() {
        let json = serde_json::to_string(&default_categories()).unwrap();
        let loaded = categories_from_json(&json).unwrap();
        assert_eq!(loaded, default_categories());
    }

    #[test]
    fn test_categories_json_defaults() {
        let json = r#"[{
            "category": "Events",
            "source": "EVENTS.csv",
            "fields": [
                {"key": "id", "required": true},
                {"key": "name", "required": true},
                {"key": "tags", "shape": "list"}
            ],
            "columns": [
                {"label": "ID", "key": "id"},
                {"label": "Title", "key": "name"},
                {"label": "Tags", "key": "tags"}
            ]
        }]"#;
        let loaded = categories_from_json(json).unwrap();
        assert_eq!(loaded[0].shape_of("tags"), FieldShape::List);
        assert_eq!(loaded[0].shape_of("name"), FieldShape::Scalar);
    }
}
