//! Column filters.
//!
//! A [`Filter`] maps column keys to a [`FilterSpec`] holding the set of
//! accepted *displayed* values. Keys keep the order in which they were
//! added; that order drives cross-filtering.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;

// =============================================================================
// Filter Operator
// =============================================================================

/// Operator used to search the value list of a filter popup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    #[default]
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessOrEqual,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Contains => "contains",
            FilterOperator::Equal => "=",
            FilterOperator::NotEqual => "!=",
            FilterOperator::Greater => ">",
            FilterOperator::GreaterOrEqual => ">=",
            FilterOperator::Less => "<",
            FilterOperator::LessOrEqual => "<=",
        }
    }

    /// Check whether `candidate` satisfies `<candidate> <op> <search>`.
    ///
    /// An empty search matches everything. Comparisons are numeric when both
    /// sides parse as numbers and lexicographic otherwise.
    pub fn matches(&self, candidate: &str, search: &str, case_sensitive: bool) -> bool {
        if search.is_empty() {
            return true;
        }

        let (candidate, search): (Cow<'_, str>, Cow<'_, str>) = if case_sensitive {
            (Cow::Borrowed(candidate), Cow::Borrowed(search))
        } else {
            (
                Cow::Owned(candidate.to_lowercase()),
                Cow::Owned(search.to_lowercase()),
            )
        };

        let ordering = || compare(&candidate, &search);
        match self {
            FilterOperator::Contains => candidate.contains(search.as_ref()),
            FilterOperator::Equal => ordering() == Ordering::Equal,
            FilterOperator::NotEqual => ordering() != Ordering::Equal,
            FilterOperator::Greater => ordering() == Ordering::Greater,
            FilterOperator::GreaterOrEqual => ordering() != Ordering::Less,
            FilterOperator::Less => ordering() == Ordering::Less,
            FilterOperator::LessOrEqual => ordering() != Ordering::Greater,
        }
    }
}

fn compare(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or_else(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contains" => Ok(FilterOperator::Contains),
            "=" | "==" | "eq" => Ok(FilterOperator::Equal),
            "!=" | "ne" => Ok(FilterOperator::NotEqual),
            ">" | "gt" => Ok(FilterOperator::Greater),
            ">=" | "ge" => Ok(FilterOperator::GreaterOrEqual),
            "<" | "lt" => Ok(FilterOperator::Less),
            "<=" | "le" => Ok(FilterOperator::LessOrEqual),
            _ => Err(FilterError::UnknownOperator(s.to_string())),
        }
    }
}

// =============================================================================
// Filter Spec
// =============================================================================

/// Filter state for one column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    /// Displayed values a row may have in this column.
    pub filtered_set: BTreeSet<String>,

    /// Text typed into the popup search box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_filter: Option<String>,

    /// Operator applied to `search_filter`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<FilterOperator>,
}

impl FilterSpec {
    /// Accept exactly the given displayed values.
    pub fn accepting<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            filtered_set: values.into_iter().map(Into::into).collect(),
            search_filter: None,
            operator: None,
        }
    }

    /// Remember the popup search that produced this selection.
    pub fn with_search(mut self, operator: FilterOperator, search: impl Into<String>) -> Self {
        self.operator = Some(operator);
        self.search_filter = Some(search.into());
        self
    }

    pub fn accepts(&self, displayed: &str) -> bool {
        self.filtered_set.contains(displayed)
    }

    pub fn is_empty(&self) -> bool {
        self.filtered_set.is_empty()
    }
}

// =============================================================================
// Filter
// =============================================================================

/// Active filters keyed by column display name, in the order they were added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(IndexMap<String, FilterSpec>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&FilterSpec> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set the spec for a column.
    ///
    /// A new key is appended; an existing key keeps its position.
    pub fn set(&mut self, key: impl Into<String>, spec: FilterSpec) {
        self.0.insert(key.into(), spec);
    }

    /// Remove a column, keeping the relative order of the others.
    pub fn remove(&mut self, key: &str) -> Option<FilterSpec> {
        self.0.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Column keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterSpec)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Equality includes key order, since order changes cross-filter results.
impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl Eq for Filter {}

impl<K: Into<String>> FromIterator<(K, FilterSpec)> for Filter {
    fn from_iter<T: IntoIterator<Item = (K, FilterSpec)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
