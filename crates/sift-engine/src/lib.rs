//! Row filtering for sift.
//!
//! This crate provides:
//! - `compute_filtered_view` - the filter pass producing filtered rows, the
//!   active filter order and cross-filter rows
//! - Nested table handling (filter parents, keep their children)
//! - Facet counts and popup option search
//! - `FilterStore` - observable owner of the filter state
//! - `TableFilters` - memoized view over rows, fields and a filter store

pub mod display;
pub mod engine;
pub mod facets;
pub mod store;
pub mod view;

pub use display::{displayed_value, find_field};
pub use engine::{
    active_filter_order, compute_filtered_view, process_nested_rows, FilteredView, RowLayout,
};
pub use facets::{facet_counts, search_options, unique_values, FacetCount};
pub use store::FilterStore;
pub use view::TableFilters;

// Re-export sift_core types for convenience
pub use sift_core::{
    CellValue, DisplayValue, Field, FieldConfig, FieldType, Filter, FilterOperator, FilterSpec,
    TableRow,
};
