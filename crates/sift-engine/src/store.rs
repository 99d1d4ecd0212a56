//! Observable filter state with automatic change notifications.
//!
//! Mutation = notification. Every method that changes the filter also bumps
//! the generation and broadcasts the new filter. Setting a filter equal to
//! the current one is a no-op, so derived views are not recomputed.

use parking_lot::RwLock;
use tokio::sync::watch;

use sift_core::{Filter, FilterSpec};

// =============================================================================
// FilterStore
// =============================================================================

struct StoreState {
    filter: Filter,
    generation: u64,
}

/// Owner of the active filter for one table.
///
/// ## Thread Safety
///
/// Uses `parking_lot::RwLock` for the filter (never poisons) and
/// `tokio::sync::watch` for broadcasts. Readers run concurrently; writes
/// are exclusive.
///
/// ## Usage
///
/// ```ignore
/// let store = FilterStore::new();
/// let rx = store.subscribe();
///
/// // This sets AND broadcasts
/// store.set_column("status", FilterSpec::accepting(["ok"]));
///
/// assert!(rx.borrow().contains_key("status"));
/// ```
pub struct FilterStore {
    inner: RwLock<StoreState>,
    tx: watch::Sender<Filter>,
    rx: watch::Receiver<Filter>,
}

impl FilterStore {
    /// Create a store with no active filters.
    pub fn new() -> Self {
        Self::with_filter(Filter::new())
    }

    /// Create a store starting from `filter`.
    pub fn with_filter(filter: Filter) -> Self {
        let (tx, rx) = watch::channel(filter.clone());
        Self {
            inner: RwLock::new(StoreState {
                filter,
                generation: 0,
            }),
            tx,
            rx,
        }
    }

    // =========================================================================
    // Mutation Methods (all broadcast automatically)
    // =========================================================================

    /// Replace the whole filter.
    ///
    /// Returns `false` (and does not broadcast) when nothing changed.
    pub fn set(&self, filter: Filter) -> bool {
        self.update(|current| *current = filter)
    }

    /// Edit the filter in place.
    ///
    /// Returns `false` (and does not broadcast) when nothing changed.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut Filter),
    {
        let snapshot = {
            let mut inner = self.inner.write();
            let mut next = inner.filter.clone();
            f(&mut next);
            if next == inner.filter {
                return false;
            }
            inner.filter = next;
            inner.generation += 1;
            tracing::debug!(
                "Filter changed, generation {}, {} active",
                inner.generation,
                inner.filter.len()
            );
            inner.filter.clone()
        };
        let _ = self.tx.send(snapshot);
        true
    }

    /// Set the accepted values for one column.
    ///
    /// A new column goes to the end of the order. An empty accepted set
    /// removes the column instead.
    pub fn set_column(&self, key: &str, spec: FilterSpec) -> bool {
        if spec.is_empty() {
            return self.clear_column(key);
        }
        self.update(|filter| filter.set(key, spec))
    }

    /// Remove one column's filter.
    pub fn clear_column(&self, key: &str) -> bool {
        self.update(|filter| {
            filter.remove(key);
        })
    }

    /// Remove all filters.
    pub fn clear(&self) -> bool {
        self.update(Filter::clear)
    }

    // =========================================================================
    // Read Methods
    // =========================================================================

    /// Get a copy of the current filter.
    pub fn get(&self) -> Filter {
        self.inner.read().filter.clone()
    }

    /// Current filter together with its generation, read atomically.
    pub fn snapshot(&self) -> (Filter, u64) {
        let inner = self.inner.read();
        (inner.filter.clone(), inner.generation)
    }

    /// Number of changes applied so far.
    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    /// Read the filter with a closure.
    pub fn with_filter_ref<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Filter) -> R,
    {
        let inner = self.inner.read();
        f(&inner.filter)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().filter.is_empty()
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Subscribe to filter changes.
    ///
    /// The receiver sees the current filter immediately and all future changes.
    pub fn subscribe(&self) -> watch::Receiver<Filter> {
        self.rx.clone()
    }
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(filter: &Filter) -> Vec<String> {
        filter.keys().map(str::to_owned).collect()
    }

    #[test]
    fn test_set_column_broadcasts() {
        let store = FilterStore::new();
        let rx = store.subscribe();

        assert!(rx.borrow().is_empty());

        assert!(store.set_column("status", FilterSpec::accepting(["ok"])));
        assert_eq!(keys(&rx.borrow()), vec!["status"]);
        assert_eq!(store.generation(), 1);

        assert!(store.set_column("host", FilterSpec::accepting(["a"])));
        assert_eq!(keys(&rx.borrow()), vec!["status", "host"]);
        assert_eq!(store.generation(), 2);
    }

    #[test]
    fn test_unchanged_set_does_not_bump_generation() {
        let store = FilterStore::new();
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        store.set_column("status", FilterSpec::accepting(["ok"]));
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        assert!(!store.set_column("status", FilterSpec::accepting(["ok"])));
        assert_eq!(store.generation(), 1);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_clear_column_keeps_order() {
        let store = FilterStore::new();
        store.set_column("a", FilterSpec::accepting(["1"]));
        store.set_column("b", FilterSpec::accepting(["2"]));
        store.set_column("c", FilterSpec::accepting(["3"]));

        assert!(store.clear_column("b"));
        assert_eq!(keys(&store.get()), vec!["a", "c"]);

        // Removing a missing column changes nothing
        assert!(!store.clear_column("b"));

        // Re-adding appends
        store.set_column("b", FilterSpec::accepting(["2"]));
        assert_eq!(keys(&store.get()), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_empty_spec_removes_column() {
        let store = FilterStore::new();
        store.set_column("a", FilterSpec::accepting(["1"]));
        assert!(store.set_column("a", FilterSpec::default()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_broadcasts_empty() {
        let store = FilterStore::new();
        let rx = store.subscribe();
        store.set_column("a", FilterSpec::accepting(["1"]));
        store.set_column("b", FilterSpec::accepting(["2"]));

        assert!(store.clear());
        assert!(rx.borrow().is_empty());
        assert!(!store.clear());
    }

    #[test]
    fn test_snapshot_and_read() {
        let store = FilterStore::with_filter(
            [("a", FilterSpec::accepting(["1"]))].into_iter().collect(),
        );
        let (filter, generation) = store.snapshot();
        assert_eq!(generation, 0);
        assert_eq!(keys(&filter), vec!["a"]);
        assert_eq!(store.with_filter_ref(Filter::len), 1);
    }

    #[tokio::test]
    async fn test_subscriber_wakes_on_change() {
        let store = std::sync::Arc::new(FilterStore::new());
        let mut rx = store.subscribe();

        let writer = std::sync::Arc::clone(&store);
        tokio::spawn(async move {
            writer.set_column("status", FilterSpec::accepting(["ok"]));
        });

        rx.changed().await.unwrap();
        assert!(rx.borrow().contains_key("status"));
    }
}
