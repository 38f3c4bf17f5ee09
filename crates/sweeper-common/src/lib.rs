//! Shared utilities for the Data Sweeper crates.
//!
//! This crate provides the in-memory [`Table`] every pipeline stage works on,
//! plus Polars `AnyValue` helpers for reading individual cells.

pub mod polars;
pub mod table;

// Re-export commonly used items at crate root for convenience
pub use crate::polars::{Cell, any_to_cell, any_to_f64, format_float, format_numeric, kind_for_dtype};
pub use table::{Table, TableError};
