//! Header mapping: one CSV row -> one candidate record.
//!
//! Knows nothing beyond the schema it is given, so it works for any category.

use crate::models::{Candidate, FieldValue};
use crate::parser::Row;

use super::normalize::normalize_value;
use super::schema::CategorySchema;

/// Map one row through a category's header table.
///
/// Columns are visited in header table order. Labels missing from the row and
/// blank cells are skipped. Unmapped row columns are ignored.
///
/// Merge rule: when two labels map onto the same (non-identity) key, the later
/// value is appended to the earlier one, both coerced to lists first.
/// `id` and `name` are always stored as trimmed scalars.
pub fn map_row(row: &Row, schema: &CategorySchema) -> Candidate {
    let mut candidate = Candidate::new(schema.category.clone());

    for column in &schema.columns {
        let raw = row.get(&column.label).map(String::as_str);
        let Some(value) = normalize_value(raw, schema.shape_of(&column.key)) else {
            continue;
        };

        match column.key.as_str() {
            "id" => candidate.id = Some(value.to_scalar_string()),
            "name" => candidate.name = Some(value.to_scalar_string()),
            key => merge_field(&mut candidate, key, value),
        }
    }

    candidate
}

fn merge_field(candidate: &mut Candidate, key: &str, value: FieldValue) {
    match candidate.fields.remove(key) {
        Some(existing) => {
            candidate.fields.insert(key.to_string(), existing.merge(value));
        }
        None => {
            candidate.fields.insert(key.to_string(), value);
        }
    }
}
