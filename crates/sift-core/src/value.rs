//! Raw cell values and their display form.

use serde::{Deserialize, Serialize};

/// A raw cell value, as delivered by the data source.
pub type CellValue = serde_json::Value;

/// The display form of a cell, produced by a field's display processor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayValue {
    /// Main text.
    pub text: String,

    /// Text placed before `text`, e.g. a currency symbol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Text placed after `text`, e.g. a unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    /// Numeric value, when the raw value was a number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric: Option<f64>,
}

impl DisplayValue {
    /// A display value with only text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// The string shown to users and matched against filters.
    pub fn formatted(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        if let Some(prefix) = &self.prefix {
            out.push_str(prefix);
        }
        out.push_str(&self.text);
        if let Some(suffix) = &self.suffix {
            out.push_str(suffix);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_text_only() {
        assert_eq!(DisplayValue::text("ok").formatted(), "ok");
    }

    #[test]
    fn test_formatted_with_prefix_and_suffix() {
        let value = DisplayValue {
            text: "12.5".to_string(),
            prefix: Some("$".to_string()),
            suffix: Some(" USD".to_string()),
            numeric: Some(12.5),
        };
        assert_eq!(value.formatted(), "$12.5 USD");
    }
}
