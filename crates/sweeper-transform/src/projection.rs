//! Column projection.

use std::collections::HashSet;

use sweeper_common::Table;

use crate::error::{Result, TransformError};

/// Keeps only the selected columns, in their original table order.
///
/// `None` keeps every column. Naming a column the table does not have is an
/// error; repeated names are ignored.
pub fn project(table: Table, selected: Option<&[String]>) -> Result<Table> {
    let Some(selected) = selected else {
        return Ok(table);
    };
    if let Some(missing) = selected.iter().find(|name| table.position(name).is_none()) {
        return Err(TransformError::UnknownColumn {
            column: missing.clone(),
        });
    }
    let wanted: HashSet<&str> = selected.iter().map(String::as_str).collect();
    let ordered: Vec<String> = table
        .column_names()
        .into_iter()
        .filter(|name| wanted.contains(name.as_str()))
        .collect();
    if ordered.len() == table.width() {
        return Ok(table);
    }
    Ok(table.select(&ordered)?)
}
