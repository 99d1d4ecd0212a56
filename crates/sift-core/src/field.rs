//! Field descriptors and display processors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::config::DisplayConfig;
use crate::value::{CellValue, DisplayValue};

/// The kind of data a field holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Number,
    String,
    Boolean,
    Time,
    /// Each value is a list of sub-tables rendered beneath the parent row.
    NestedFrames,
    #[default]
    Other,
}

/// Maps one exact raw value to a fixed display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueMapping {
    pub value: CellValue,
    pub text: String,
}

/// Per-field display configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    /// Overrides the field name as the column key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Unit appended to numeric values, e.g. "ms".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Fixed number of decimals for numeric values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<usize>,

    /// Exact-value mappings, checked before any other formatting.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mappings: Vec<ValueMapping>,
}

/// Converts a raw cell value into its display form.
pub trait DisplayProcessor: Send + Sync {
    fn display(&self, value: &CellValue) -> DisplayValue;
}

struct FnDisplay<F>(F);

impl<F> DisplayProcessor for FnDisplay<F>
where
    F: Fn(&CellValue) -> DisplayValue + Send + Sync,
{
    fn display(&self, value: &CellValue) -> DisplayValue {
        (self.0)(value)
    }
}

/// Wrap a closure as a display processor.
pub fn display_fn<F>(f: F) -> Arc<dyn DisplayProcessor>
where
    F: Fn(&CellValue) -> DisplayValue + Send + Sync + 'static,
{
    Arc::new(FnDisplay(f))
}

/// Default display processor built from a field's configuration.
#[derive(Debug, Clone)]
pub struct StandardDisplay {
    unit: Option<String>,
    decimals: Option<usize>,
    mappings: Vec<ValueMapping>,
    null_text: String,
}

impl StandardDisplay {
    /// Build from field config, falling back to global display defaults.
    pub fn new(config: &FieldConfig, defaults: &DisplayConfig) -> Self {
        Self {
            unit: config.unit.clone(),
            decimals: config.decimals.or(defaults.decimals),
            mappings: config.mappings.clone(),
            null_text: defaults.null_text.clone(),
        }
    }
}

impl DisplayProcessor for StandardDisplay {
    fn display(&self, value: &CellValue) -> DisplayValue {
        if let Some(mapping) = self.mappings.iter().find(|m| &m.value == value) {
            return DisplayValue::text(mapping.text.clone());
        }

        match value {
            CellValue::Null => DisplayValue::text(self.null_text.clone()),
            CellValue::Number(n) => {
                let numeric = n.as_f64();
                let text = match (self.decimals, numeric) {
                    (Some(decimals), Some(f)) => format!("{f:.decimals$}"),
                    _ => n.to_string(),
                };
                DisplayValue {
                    text,
                    prefix: None,
                    suffix: self.unit.as_ref().map(|u| format!(" {u}")),
                    numeric,
                }
            }
            CellValue::String(s) => DisplayValue::text(s.clone()),
            CellValue::Bool(b) => DisplayValue::text(b.to_string()),
            other => DisplayValue::text(other.to_string()),
        }
    }
}

/// Describes one column: its key, type, config and display processor.
#[derive(Clone)]
pub struct Field {
    pub name: String,
    pub field_type: FieldType,
    pub config: FieldConfig,
    display: Option<Arc<dyn DisplayProcessor>>,
}

impl Field {
    /// Create a field without a display processor.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            config: FieldConfig::default(),
            display: None,
        }
    }

    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_display(mut self, display: Arc<dyn DisplayProcessor>) -> Self {
        self.display = Some(display);
        self
    }

    /// Attach a `StandardDisplay` built from this field's config.
    pub fn with_standard_display(self, defaults: &DisplayConfig) -> Self {
        let display = StandardDisplay::new(&self.config, defaults);
        self.with_display(Arc::new(display))
    }

    /// The column key rows use for this field.
    pub fn display_name(&self) -> &str {
        self.config.display_name.as_deref().unwrap_or(&self.name)
    }

    pub fn has_display(&self) -> bool {
        self.display.is_some()
    }

    pub fn is_nested(&self) -> bool {
        self.field_type == FieldType::NestedFrames
    }

    /// Format a raw value. `None` when no display processor is registered.
    pub fn format(&self, value: &CellValue) -> Option<String> {
        self.display
            .as_ref()
            .map(|display| display.display(value).formatted())
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("config", &self.config)
            .field("has_display", &self.display.is_some())
            .finish()
    }
}
