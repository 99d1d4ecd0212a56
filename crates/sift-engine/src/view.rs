//! Memoized filtered view over one table.
//!
//! `TableFilters` bundles the three inputs of the filter pass (rows, fields
//! and a [`FilterStore`]) and caches the last [`FilteredView`]. The cache is
//! reused while rows and fields are the same allocations and the filter
//! generation is unchanged.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use sift_core::{Field, Filter, TableRow};

use crate::display::find_field;
use crate::engine::{compute_filtered_view, FilteredView};
use crate::facets::{facet_counts, unique_values, FacetCount};
use crate::store::FilterStore;

#[derive(Clone)]
struct CachedView {
    rows: Arc<[TableRow]>,
    fields: Arc<[Field]>,
    generation: u64,
    view: Arc<FilteredView>,
}

impl CachedView {
    fn is_current(&self, rows: &Arc<[TableRow]>, fields: &Arc<[Field]>, generation: u64) -> bool {
        self.generation == generation
            && Arc::ptr_eq(&self.rows, rows)
            && Arc::ptr_eq(&self.fields, fields)
    }
}

/// Filter state plus cached derived view for one table.
pub struct TableFilters {
    rows: RwLock<Arc<[TableRow]>>,
    fields: RwLock<Arc<[Field]>>,
    store: Arc<FilterStore>,
    cache: Mutex<Option<CachedView>>,
}

impl TableFilters {
    /// Create with a fresh, empty filter store.
    pub fn new(rows: impl Into<Arc<[TableRow]>>, fields: impl Into<Arc<[Field]>>) -> Self {
        Self::with_store(rows, fields, Arc::new(FilterStore::new()))
    }

    /// Create around an existing filter store.
    pub fn with_store(
        rows: impl Into<Arc<[TableRow]>>,
        fields: impl Into<Arc<[Field]>>,
        store: Arc<FilterStore>,
    ) -> Self {
        Self {
            rows: RwLock::new(rows.into()),
            fields: RwLock::new(fields.into()),
            store,
            cache: Mutex::new(None),
        }
    }

    /// The filter store; mutate it to change the active filters.
    pub fn filters(&self) -> &Arc<FilterStore> {
        &self.store
    }

    /// Copy of the active filter.
    pub fn filter(&self) -> Filter {
        self.store.get()
    }

    pub fn rows(&self) -> Arc<[TableRow]> {
        Arc::clone(&self.rows.read())
    }

    pub fn fields(&self) -> Arc<[Field]> {
        Arc::clone(&self.fields.read())
    }

    /// Replace the rows. Passing the current allocation keeps the cache.
    pub fn set_rows(&self, rows: impl Into<Arc<[TableRow]>>) {
        *self.rows.write() = rows.into();
    }

    /// Replace the fields. Passing the current allocation keeps the cache.
    pub fn set_fields(&self, fields: impl Into<Arc<[Field]>>) {
        *self.fields.write() = fields.into();
    }

    /// The filtered view, recomputed only when an input changed.
    pub fn view(&self) -> Arc<FilteredView> {
        self.current().view
    }

    /// Facet counts for the filter popup of `key`, based on cross-filter rows.
    ///
    /// Empty when no field has `key` as its display name.
    pub fn facets(&self, key: &str) -> Vec<FacetCount> {
        let current = self.current();
        match find_field(&current.fields, key) {
            Some(field) => facet_counts(current.view.option_rows(key, &current.rows), field),
            None => Vec::new(),
        }
    }

    /// Distinct displayed values offered by the filter popup of `key`.
    pub fn unique_values(&self, key: &str) -> Vec<String> {
        let current = self.current();
        match find_field(&current.fields, key) {
            Some(field) => unique_values(current.view.option_rows(key, &current.rows), field),
            None => Vec::new(),
        }
    }

    /// The cached view together with the inputs it was computed from.
    fn current(&self) -> CachedView {
        let rows = self.rows();
        let fields = self.fields();

        let mut cache = self.cache.lock();
        if let Some(cached) = cache.as_ref() {
            if cached.is_current(&rows, &fields, self.store.generation()) {
                return cached.clone();
            }
        }

        let (filter, generation) = self.store.snapshot();
        tracing::debug!(
            "Recomputing filtered view (generation {}, {} rows)",
            generation,
            rows.len()
        );
        let computed = CachedView {
            view: Arc::new(compute_filtered_view(&rows, &fields, &filter)),
            rows,
            fields,
            generation,
        };
        *cache = Some(computed.clone());
        computed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use serde_json::json;
    use sift_core::{CellValue, DisplayProcessor, DisplayValue, FieldType, FilterSpec};

    mock! {
        pub Display {}
        impl DisplayProcessor for Display {
            fn display(&self, value: &CellValue) -> DisplayValue;
        }
    }

    fn rows() -> Arc<[TableRow]> {
        ["ok", "fail", "ok"]
            .into_iter()
            .enumerate()
            .map(|(i, status)| {
                TableRow::parent(
                    i,
                    [("status".to_string(), json!(status))].into_iter().collect(),
                )
            })
            .collect()
    }

    fn counting_field(expected_calls: usize) -> Field {
        let mut display = MockDisplay::new();
        display
            .expect_display()
            .times(expected_calls)
            .returning(|v| DisplayValue::text(v.as_str().unwrap_or_default()));
        Field::new("status", FieldType::String).with_display(Arc::new(display))
    }

    #[test]
    fn test_view_is_memoized() {
        // One filter pass over three rows formats three values
        let table = TableFilters::new(rows(), vec![counting_field(3)]);
        table
            .filters()
            .set_column("status", FilterSpec::accepting(["ok"]));

        let first = table.view();
        let second = table.view();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_filter_change_recomputes() {
        let table = TableFilters::new(rows(), vec![counting_field(6)]);
        table
            .filters()
            .set_column("status", FilterSpec::accepting(["ok"]));
        let first = table.view();

        table
            .filters()
            .set_column("status", FilterSpec::accepting(["fail"]));
        let second = table.view();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_same_rows_allocation_keeps_cache() {
        let table = TableFilters::new(rows(), vec![counting_field(3)]);
        table
            .filters()
            .set_column("status", FilterSpec::accepting(["ok"]));
        let first = table.view();

        table.set_rows(table.rows());
        let second = table.view();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_new_rows_recompute() {
        let table = TableFilters::new(rows(), vec![counting_field(6)]);
        table
            .filters()
            .set_column("status", FilterSpec::accepting(["ok"]));
        let first = table.view();

        // Equal contents, new allocation
        table.set_rows(rows());
        let second = table.view();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.filtered_rows, second.filtered_rows);
    }

    #[test]
    fn test_empty_filter_view_shares_rows() {
        let table = TableFilters::new(rows(), vec![counting_field(0)]);
        let view = table.view();
        assert!(Arc::ptr_eq(&view.filtered_rows, &table.rows()));
    }

    #[test]
    fn test_facets_follow_cross_filter_order() {
        let rows: Arc<[TableRow]> = [("ok", "a"), ("fail", "a"), ("ok", "b")]
            .into_iter()
            .enumerate()
            .map(|(i, (status, host))| {
                TableRow::parent(
                    i,
                    [
                        ("status".to_string(), json!(status)),
                        ("host".to_string(), json!(host)),
                    ]
                    .into_iter()
                    .collect(),
                )
            })
            .collect();
        let defaults = sift_core::DisplayConfig::default();
        let fields = vec![
            Field::new("status", FieldType::String).with_standard_display(&defaults),
            Field::new("host", FieldType::String).with_standard_display(&defaults),
        ];
        let table = TableFilters::new(rows, fields);

        // Before filtering, every row counts
        let hosts = table.facets("host");
        assert_eq!(hosts.iter().map(|f| f.count).sum::<usize>(), 3);

        table
            .filters()
            .set_column("status", FilterSpec::accepting(["ok"]));

        // First filtered column still sees all rows
        assert_eq!(table.facets("status").len(), 2);

        // Unfiltered column sees rows passing the last filter
        let hosts = table.facets("host");
        assert_eq!(
            hosts,
            vec![
                FacetCount {
                    value: "a".to_string(),
                    count: 1
                },
                FacetCount {
                    value: "b".to_string(),
                    count: 1
                },
            ]
        );

        assert!(table.facets("unknown").is_empty());
    }

    fn host_rows(hosts: &[&str]) -> Arc<[TableRow]> {
        hosts
            .iter()
            .enumerate()
            .map(|(i, host)| {
                TableRow::parent(i, [("host".to_string(), json!(host))].into_iter().collect())
            })
            .collect()
    }

    fn host_field() -> Field {
        Field::new("host", FieldType::String)
            .with_standard_display(&sift_core::DisplayConfig::default())
    }

    #[test]
    fn test_facets_use_rows_of_their_own_view() {
        let table = TableFilters::new(host_rows(&["a", "a", "b"]), vec![host_field()]);
        let counts = |facets: Vec<FacetCount>| -> Vec<(String, usize)> {
            facets.into_iter().map(|f| (f.value, f.count)).collect()
        };

        assert_eq!(
            counts(table.facets("host")),
            vec![("a".to_string(), 2), ("b".to_string(), 1)]
        );

        // Swap rows between two popup reads
        table.set_rows(host_rows(&["c"]));
        assert_eq!(counts(table.facets("host")), vec![("c".to_string(), 1)]);
        assert_eq!(table.unique_values("host"), vec!["c"]);

        let view = table.view();
        assert!(Arc::ptr_eq(&view.filtered_rows, &table.rows()));
    }

    #[test]
    fn test_unique_values_follow_cross_filter_order() {
        let table = TableFilters::new(host_rows(&["a", "b", "c"]), vec![host_field()]);
        assert_eq!(table.unique_values("host"), vec!["a", "b", "c"]);

        table
            .filters()
            .set_column("host", FilterSpec::accepting(["a", "c"]));
        // First filtered column still lists every value
        assert_eq!(table.unique_values("host"), vec!["a", "b", "c"]);
        assert!(table.unique_values("missing").is_empty());
    }
}
