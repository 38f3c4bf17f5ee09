//! Polars AnyValue utility functions.
//!
//! This module provides helpers for classifying Polars data types and for
//! turning individual `AnyValue`s into owned [`Cell`]s that writers can
//! format without caring about Polars' physical types.

use polars::prelude::{AnyValue, DataType};

use sweeper_model::ColumnKind;

/// An owned cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric value of the cell, if it is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Key used for exact row comparison.
    ///
    /// Missing values map to `None` so that two missing cells compare equal
    /// while never matching an empty string.
    pub fn key(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Int(v) => Some(format!("i:{v}")),
            Self::Float(v) => Some(format!("f:{v}")),
            Self::Bool(v) => Some(format!("b:{v}")),
            Self::Text(s) => Some(format!("s:{s}")),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&format_float(*v)),
            Self::Bool(true) => f.write_str("true"),
            Self::Bool(false) => f.write_str("false"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Maps a Polars data type to the declared column kind.
pub fn kind_for_dtype(dtype: &DataType) -> ColumnKind {
    match dtype {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64 => ColumnKind::Numeric,
        DataType::Boolean => ColumnKind::Boolean,
        _ => ColumnKind::Text,
    }
}

/// Converts a Polars `AnyValue` into an owned [`Cell`].
pub fn any_to_cell(value: AnyValue<'_>) -> Cell {
    match value {
        AnyValue::Null => Cell::Null,
        AnyValue::Int8(v) => Cell::Int(i64::from(v)),
        AnyValue::Int16(v) => Cell::Int(i64::from(v)),
        AnyValue::Int32(v) => Cell::Int(i64::from(v)),
        AnyValue::Int64(v) => Cell::Int(v),
        AnyValue::UInt8(v) => Cell::Int(i64::from(v)),
        AnyValue::UInt16(v) => Cell::Int(i64::from(v)),
        AnyValue::UInt32(v) => Cell::Int(i64::from(v)),
        AnyValue::UInt64(v) => match i64::try_from(v) {
            Ok(v) => Cell::Int(v),
            Err(_) => Cell::Float(v as f64),
        },
        AnyValue::Float32(v) => Cell::Float(f64::from(v)),
        AnyValue::Float64(v) => Cell::Float(v),
        AnyValue::Boolean(b) => Cell::Bool(b),
        AnyValue::String(s) => Cell::Text(s.to_string()),
        AnyValue::StringOwned(s) => Cell::Text(s.to_string()),
        other => Cell::Text(other.to_string()),
    }
}

/// Converts an `AnyValue` to `f64`, returning `None` for non-numeric or null values.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        _ => None,
    }
}

/// Formats a float for tabular output.
///
/// Uses the shortest representation that round-trips and keeps a trailing
/// `.0` on integral values so the column is re-read as floating point.
///
/// # Examples
///
/// ```
/// use sweeper_common::format_float;
///
/// assert_eq!(format_float(4.0), "4.0");
/// assert_eq!(format_float(4.5), "4.5");
/// assert_eq!(format_float(-0.25), "-0.25");
/// ```
pub fn format_float(v: f64) -> String {
    if !v.is_finite() {
        return if v.is_nan() {
            "NaN".to_string()
        } else if v > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    let s = format!("{v}");
    if s.contains(['.', 'e', 'E']) {
        s
    } else {
        format!("{s}.0")
    }
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// Used when a number has to be rendered as text, e.g. a numeric cell in a
/// spreadsheet column that is otherwise text.
///
/// # Examples
///
/// ```
/// use sweeper_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_for_dtype() {
        assert_eq!(kind_for_dtype(&DataType::Int64), ColumnKind::Numeric);
        assert_eq!(kind_for_dtype(&DataType::Float32), ColumnKind::Numeric);
        assert_eq!(kind_for_dtype(&DataType::Boolean), ColumnKind::Boolean);
        assert_eq!(kind_for_dtype(&DataType::String), ColumnKind::Text);
    }

    #[test]
    fn test_any_to_cell() {
        assert_eq!(any_to_cell(AnyValue::Null), Cell::Null);
        assert_eq!(any_to_cell(AnyValue::Int32(42)), Cell::Int(42));
        assert_eq!(any_to_cell(AnyValue::Float64(1.5)), Cell::Float(1.5));
        assert_eq!(any_to_cell(AnyValue::Boolean(true)), Cell::Bool(true));
        assert_eq!(
            any_to_cell(AnyValue::String("hello")),
            Cell::Text("hello".to_string())
        );
    }

    #[test]
    fn test_any_to_f64() {
        assert_eq!(any_to_f64(AnyValue::Int64(3)), Some(3.0));
        assert_eq!(any_to_f64(AnyValue::Float32(0.5)), Some(0.5));
        assert_eq!(any_to_f64(AnyValue::Null), None);
        assert_eq!(any_to_f64(AnyValue::String("1")), None);
    }

    #[test]
    fn test_cell_keys_distinguish_null_and_empty() {
        assert_eq!(Cell::Null.key(), None);
        assert_eq!(Cell::Text(String::new()).key(), Some("s:".to_string()));
        assert_ne!(Cell::Int(1).key(), Cell::Text("1".to_string()).key());
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Null.to_string(), "");
        assert_eq!(Cell::Int(-7).to_string(), "-7");
        assert_eq!(Cell::Float(2.0).to_string(), "2.0");
        assert_eq!(Cell::Bool(false).to_string(), "false");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(1.0 / 3.0), "0.3333333333333333");
        assert_eq!(format_float(f64::NAN), "NaN");
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(10.0), "10");
        assert_eq!(format_numeric(2.25), "2.25");
        assert_eq!(format_numeric(-0.0), "-0");
    }
}
