//! Cell value normalization.

use crate::models::FieldValue;

use super::schema::FieldShape;

/// Separator for multi-valued cells.
pub const MULTI_VALUE_DELIMITER: char = '|';

/// Normalize one raw cell for a field of the given shape.
///
/// Returns `None` when the field should be omitted: missing cell, blank cell,
/// or a delimited cell with no non-blank parts.
///
/// ```
/// use graphdata::transform::normalize::normalize_value;
/// use graphdata::transform::schema::FieldShape;
/// use graphdata::FieldValue;
///
/// assert_eq!(
///     normalize_value(Some("a|b| c "), FieldShape::Scalar),
///     Some(FieldValue::from(vec!["a", "b", "c"]))
/// );
/// assert_eq!(normalize_value(Some("   "), FieldShape::Scalar), None);
/// ```
pub fn normalize_value(raw: Option<&str>, shape: FieldShape) -> Option<FieldValue> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains(MULTI_VALUE_DELIMITER) {
        let parts: Vec<String> = trimmed
            .split(MULTI_VALUE_DELIMITER)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        return (!parts.is_empty()).then_some(FieldValue::List(parts));
    }

    match shape {
        FieldShape::List => Some(FieldValue::List(vec![trimmed.to_string()])),
        FieldShape::Scalar => Some(FieldValue::Scalar(trimmed.to_string())),
    }
}
