//! Exact duplicate row removal.

use std::collections::HashSet;

use sweeper_common::{Cell, Table};

use crate::error::Result;

/// Removes rows that exactly match an earlier row across all columns.
///
/// The first occurrence is kept and surviving rows keep their order. Missing
/// values are equal to each other. Returns the number of rows removed.
pub fn remove_duplicates(table: &mut Table) -> Result<usize> {
    let row_count = table.height();
    if row_count == 0 {
        return Ok(0);
    }
    let mut seen: HashSet<Vec<Option<String>>> = HashSet::with_capacity(row_count);
    let mut keep = Vec::with_capacity(row_count);
    for idx in 0..row_count {
        let key: Vec<Option<String>> = table.row(idx).iter().map(Cell::key).collect();
        keep.push(seen.insert(key));
    }
    let removed = keep.iter().filter(|kept| !**kept).count();
    if removed > 0 {
        table.retain_rows(&keep)?;
    }
    Ok(removed)
}
