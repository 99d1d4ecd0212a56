//! Row Filter Engine
//!
//! One pass over the rows produces three outputs:
//!
//! ```text
//!  rows ──┐
//!         │   for each row, for each (key, spec) in filter order:
//! fields ─┼─►   displayed(row, key) ∈ spec.filtered_set ?
//!         │       no  → reject row, stop checking it
//! filter ─┘       yes → push row into cross_filter_rows[key]
//!                 all yes → keep row
//! ```
//!
//! - `filtered_rows`: rows matching every filter, in original order
//! - `active_filter_order`: filter keys in the order they were added
//! - `cross_filter_rows`: per key, the rows that passed every check up to
//!   and including that key
//!
//! Because a rejected row stops being checked, `cross_filter_rows[k]` holds
//! rows that passed all *preceding* filters and `k`, not "all filters except
//! `k`". The popup for a column reads the rows of the filter before it.

use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

use sift_core::{Field, Filter, FilterSpec, TableRow};

use crate::display::{displayed_value_with, find_field};

mod nested;

pub use nested::{process_nested_rows, RowLayout};

// =============================================================================
// Filtered View
// =============================================================================

/// Result of a filter pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredView {
    /// Rows matching every active filter, in original order.
    pub filtered_rows: Arc<[TableRow]>,

    /// Active filter keys in the order they were added.
    pub active_filter_order: Vec<String>,

    /// Per key, rows that passed every check up to and including that key.
    pub cross_filter_rows: IndexMap<String, Vec<TableRow>>,
}

impl FilteredView {
    /// Rows accumulated for `key`, empty if none passed.
    pub fn cross_rows(&self, key: &str) -> &[TableRow] {
        self.cross_filter_rows
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Rows whose values populate the filter popup of `key`.
    ///
    /// - `key` at position `p > 0` of the order: rows of the key before it
    /// - `key` not filtered while others are: rows of the last key
    /// - otherwise: all rows
    pub fn option_rows<'a>(&'a self, key: &str, all_rows: &'a [TableRow]) -> &'a [TableRow] {
        let order = &self.active_filter_order;
        match order.iter().position(|k| k == key) {
            Some(p) if p > 0 => self.cross_rows(&order[p - 1]),
            None => match order.last() {
                Some(last) => self.cross_rows(last),
                None => all_rows,
            },
            _ => all_rows,
        }
    }

    pub fn len(&self) -> usize {
        self.filtered_rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered_rows.is_empty()
    }
}

// =============================================================================
// Filter Pass
// =============================================================================

/// A filter entry with its field resolved once for the whole pass.
struct ColumnCheck<'a> {
    key: &'a str,
    spec: &'a FilterSpec,
    field: Option<&'a Field>,
}

impl ColumnCheck<'_> {
    fn accepts(&self, row: &TableRow) -> bool {
        self.spec
            .accepts(&displayed_value_with(self.field, row, self.key))
    }
}

/// Active filter keys in the order they were added.
pub fn active_filter_order(filter: &Filter) -> Vec<String> {
    // Filter keys are unique, so no dedup pass is needed
    filter.keys().map(str::to_owned).collect()
}

/// Filter `rows` by `filter`, collecting cross-filter rows on the way.
///
/// With an empty filter the returned `filtered_rows` is `rows` itself.
pub fn compute_filtered_view(
    rows: &Arc<[TableRow]>,
    fields: &[Field],
    filter: &Filter,
) -> FilteredView {
    let active_filter_order = active_filter_order(filter);

    if filter.is_empty() {
        return FilteredView {
            filtered_rows: Arc::clone(rows),
            active_filter_order,
            cross_filter_rows: IndexMap::new(),
        };
    }

    let checks: Vec<ColumnCheck<'_>> = filter
        .iter()
        .map(|(key, spec)| {
            let field = find_field(fields, key);
            if field.is_none() {
                tracing::warn!(
                    "Filter key '{}' matches no field; its cells display as \"\"",
                    key
                );
            }
            ColumnCheck { key, spec, field }
        })
        .collect();

    let mut cross_filter_rows: IndexMap<String, Vec<TableRow>> = IndexMap::new();
    let mut passes = |row: &TableRow| -> bool {
        for check in &checks {
            if !check.accepts(row) {
                return false;
            }
            cross_filter_rows
                .entry(check.key.to_owned())
                .or_default()
                .push(row.clone());
        }
        true
    };

    let layout = RowLayout::detect(fields);
    let filtered: Vec<TableRow> = match layout {
        RowLayout::Flat => rows.iter().filter(|row| passes(*row)).cloned().collect(),
        RowLayout::Nested => process_nested_rows(rows, |parents| {
            parents.into_iter().filter(|row| passes(*row)).collect()
        }),
    };

    tracing::debug!(
        "Filtered {} of {} rows ({:?}, {} filters)",
        filtered.len(),
        rows.len(),
        layout,
        checks.len()
    );
    for (key, accumulated) in &cross_filter_rows {
        tracing::trace!("Cross-filter '{}': {} rows", key, accumulated.len());
    }

    FilteredView {
        filtered_rows: filtered.into(),
        active_filter_order,
        cross_filter_rows,
    }
}
