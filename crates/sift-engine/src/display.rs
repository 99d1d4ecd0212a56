//! Displayed-value lookup.
//!
//! Filters match on what users see, so every comparison goes through the
//! field's display processor. Lookups fail open to an empty string: a key
//! with no field, or a field with no display processor, displays as `""`.

use sift_core::{CellValue, Field, TableRow};

static NULL: CellValue = CellValue::Null;

/// Find the field whose display name is `key`.
pub fn find_field<'a>(fields: &'a [Field], key: &str) -> Option<&'a Field> {
    fields.iter().find(|field| field.display_name() == key)
}

/// Displayed value of `row[key]` using an already resolved field.
pub fn displayed_value_with(field: Option<&Field>, row: &TableRow, key: &str) -> String {
    let Some(field) = field else {
        return String::new();
    };
    let value = row.get(key).unwrap_or(&NULL);
    field.format(value).unwrap_or_default()
}

/// Displayed value of `row[key]`, resolving the field by display name.
pub fn displayed_value(row: &TableRow, key: &str, fields: &[Field]) -> String {
    displayed_value_with(find_field(fields, key), row, key)
}
