//! Table rows.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::value::CellValue;

/// Cells of one row, keyed by column display name in column order.
pub type Cells = IndexMap<String, CellValue>;

/// One record of tabular data.
///
/// Nested tables are flattened: a parent has `depth == 0` and its children
/// follow it with `depth > 0` and the parent's `index`. Cells sit behind an
/// `Arc` so filter passes can collect rows without copying them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Position of the parent row in the source frame.
    #[serde(rename = "__index")]
    pub index: usize,

    /// 0 for top-level rows, 1 for rows of a nested sub-table.
    #[serde(rename = "__depth")]
    pub depth: usize,

    #[serde(flatten)]
    pub cells: Arc<Cells>,
}

impl TableRow {
    /// A top-level row.
    pub fn parent(index: usize, cells: Cells) -> Self {
        Self {
            index,
            depth: 0,
            cells: Arc::new(cells),
        }
    }

    /// A row of the sub-table belonging to the parent at `index`.
    pub fn child(index: usize, cells: Cells) -> Self {
        Self {
            index,
            depth: 1,
            cells: Arc::new(cells),
        }
    }

    /// Raw value of a cell.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }

    pub fn is_parent(&self) -> bool {
        self.depth == 0
    }
}
