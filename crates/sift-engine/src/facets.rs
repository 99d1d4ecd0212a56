//! Facet counts for filter popups.
//!
//! A popup lists the distinct displayed values of a column together with how
//! many rows carry each one. Feed it [`FilteredView::option_rows`] to get
//! cross-filtered counts.
//!
//! [`FilteredView::option_rows`]: crate::engine::FilteredView::option_rows

use serde::Serialize;
use std::collections::BTreeMap;

use sift_core::{Field, FilterOperator, TableRow};

use crate::display::displayed_value_with;

/// One distinct displayed value and the number of rows showing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

/// Distinct displayed values of `field` with counts, sorted by value.
///
/// Child rows of nested tables are not counted.
pub fn facet_counts(rows: &[TableRow], field: &Field) -> Vec<FacetCount> {
    let key = field.display_name();
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.is_parent()) {
        *counts
            .entry(displayed_value_with(Some(field), row, key))
            .or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(value, count)| FacetCount { value, count })
        .collect()
}

/// Distinct displayed values of `field`, sorted.
pub fn unique_values(rows: &[TableRow], field: &Field) -> Vec<String> {
    facet_counts(rows, field)
        .into_iter()
        .map(|facet| facet.value)
        .collect()
}

/// Keep the facets whose value satisfies `<value> <operator> <search>`.
pub fn search_options(
    facets: &[FacetCount],
    operator: FilterOperator,
    search: &str,
    case_sensitive: bool,
) -> Vec<FacetCount> {
    facets
        .iter()
        .filter(|facet| operator.matches(&facet.value, search, case_sensitive))
        .cloned()
        .collect()
}
