//! Column-oriented data frames and their conversion into rows.

use serde::{Deserialize, Serialize};

use crate::config::DisplayConfig;
use crate::error::FrameError;
use crate::field::{Field, FieldConfig, FieldType};
use crate::row::{Cells, TableRow};
use crate::value::CellValue;

/// A column of a data frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameField {
    pub name: String,

    #[serde(rename = "type", default)]
    pub field_type: FieldType,

    #[serde(default)]
    pub config: FieldConfig,

    /// One value per row. For `nestedFrames` fields each value is a list of
    /// frames, or null when the row has no sub-table.
    #[serde(default)]
    pub values: Vec<CellValue>,
}

/// Column-oriented table as produced by a query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub fields: Vec<FrameField>,
}

/// Fields plus flattened rows, ready for filtering.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub fields: Vec<Field>,
    pub rows: Vec<TableRow>,
}

impl DataFrame {
    pub fn from_json(text: &str) -> Result<Self, FrameError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Number of rows. All fields must have the same length.
    pub fn row_count(&self) -> Result<usize, FrameError> {
        let Some(first) = self.fields.first() else {
            return Ok(0);
        };
        let expected = first.values.len();
        for field in &self.fields {
            if field.values.len() != expected {
                return Err(FrameError::LengthMismatch {
                    field: field.name.clone(),
                    expected,
                    actual: field.values.len(),
                });
            }
        }
        Ok(expected)
    }

    /// Build field descriptors with a `StandardDisplay` each.
    pub fn to_fields(&self, display: &DisplayConfig) -> Vec<Field> {
        self.fields
            .iter()
            .map(|f| {
                Field::new(f.name.clone(), f.field_type)
                    .with_config(f.config.clone())
                    .with_standard_display(display)
            })
            .collect()
    }

    /// Flatten into rows.
    ///
    /// Row `i` becomes a parent with index `i`. Rows of any frames held by a
    /// nested-frames field at `i` become children with index `i`, placed
    /// right after the parent.
    pub fn to_table(&self, display: &DisplayConfig) -> Result<Table, FrameError> {
        let count = self.row_count()?;
        let fields = self.to_fields(display);
        let mut rows = Vec::with_capacity(count);

        for i in 0..count {
            let mut cells = Cells::with_capacity(self.fields.len());
            let mut children = Vec::new();

            for (frame_field, field) in self.fields.iter().zip(&fields) {
                let value = &frame_field.values[i];
                if !field.is_nested() {
                    cells.insert(field.display_name().to_string(), value.clone());
                    continue;
                }
                if value.is_null() {
                    continue;
                }
                let frames: Vec<DataFrame> =
                    serde_json::from_value(value.clone()).map_err(|source| FrameError::Nested {
                        row: i,
                        field: frame_field.name.clone(),
                        source,
                    })?;
                for frame in &frames {
                    children.extend(frame.child_rows(i)?);
                }
            }

            rows.push(TableRow::parent(i, cells));
            rows.extend(children);
        }

        tracing::debug!(
            "Flattened frame {:?}: {} fields, {} rows",
            self.name,
            fields.len(),
            rows.len()
        );
        Ok(Table { fields, rows })
    }

    fn child_rows(&self, parent: usize) -> Result<Vec<TableRow>, FrameError> {
        let count = self.row_count()?;
        let rows = (0..count)
            .map(|j| {
                let cells = self
                    .fields
                    .iter()
                    .map(|f| {
                        let key = f.config.display_name.as_deref().unwrap_or(&f.name);
                        (key.to_string(), f.values[j].clone())
                    })
                    .collect();
                TableRow::child(parent, cells)
            })
            .collect();
        Ok(rows)
    }
}
