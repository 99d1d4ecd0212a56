//! Nested table handling.

use std::collections::HashMap;

use sift_core::{Field, TableRow};

/// How rows are laid out, decided once per input from the field metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLayout {
    /// Every row is filtered on its own.
    Flat,
    /// Parents are filtered; children travel with their parent.
    Nested,
}

impl RowLayout {
    /// `Nested` when any field holds nested frames.
    pub fn detect(fields: &[Field]) -> Self {
        if fields.iter().any(Field::is_nested) {
            RowLayout::Nested
        } else {
            RowLayout::Flat
        }
    }
}

/// Run `process_parents` over the top-level rows only, then re-attach each
/// surviving parent's children right after it, in their original order.
///
/// Children of parents that `process_parents` drops are dropped too.
pub fn process_nested_rows<'a, F>(rows: &'a [TableRow], process_parents: F) -> Vec<TableRow>
where
    F: FnOnce(Vec<&'a TableRow>) -> Vec<&'a TableRow>,
{
    let mut parents = Vec::new();
    let mut children: HashMap<usize, Vec<&TableRow>> = HashMap::new();

    for row in rows {
        if row.is_parent() {
            parents.push(row);
        } else {
            children.entry(row.index).or_default().push(row);
        }
    }

    let processed = process_parents(parents);

    let mut result = Vec::with_capacity(rows.len());
    for parent in processed {
        result.push(parent.clone());
        if let Some(kids) = children.get(&parent.index) {
            result.extend(kids.iter().map(|&kid| kid.clone()));
        }
    }
    result
}
