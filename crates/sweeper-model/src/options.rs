//! Caller-selected cleaning and conversion options.

use serde::{Deserialize, Serialize};

use crate::file::FileFormat;

/// A single cleaning transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStep {
    /// Drop rows that exactly duplicate an earlier row.
    RemoveDuplicates,
    /// Replace missing numeric values with the column mean.
    FillMissingNumeric,
}

impl CleaningStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RemoveDuplicates => "remove_duplicates",
            Self::FillMissingNumeric => "fill_missing_numeric",
        }
    }
}

/// Options controlling how one file is cleaned.
///
/// `steps` run in the listed order; the column selection is applied after
/// all steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningOptions {
    /// Cleaning transforms, applied in order.
    pub steps: Vec<CleaningStep>,
    /// Columns to keep. `None` keeps every column.
    pub selected_columns: Option<Vec<String>>,
    /// Whether a chart of the numeric columns is requested.
    pub visualize: bool,
}

impl CleaningOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from the two cleaning toggles.
    ///
    /// Duplicate removal is listed before filling when both are set.
    pub fn from_flags(remove_duplicates: bool, fill_missing_numeric: bool) -> Self {
        let mut steps = Vec::new();
        if remove_duplicates {
            steps.push(CleaningStep::RemoveDuplicates);
        }
        if fill_missing_numeric {
            steps.push(CleaningStep::FillMissingNumeric);
        }
        Self {
            steps,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_step(mut self, step: CleaningStep) -> Self {
        self.steps.push(step);
        self
    }

    #[must_use]
    pub fn with_selected_columns(mut self, columns: Vec<String>) -> Self {
        self.selected_columns = Some(columns);
        self
    }

    #[must_use]
    pub fn with_visualize(mut self, enable: bool) -> Self {
        self.visualize = enable;
        self
    }

    pub fn remove_duplicates(&self) -> bool {
        self.steps.contains(&CleaningStep::RemoveDuplicates)
    }

    pub fn fill_missing_numeric(&self) -> bool {
        self.steps.contains(&CleaningStep::FillMissingNumeric)
    }
}

/// Requested output format for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub target_format: FileFormat,
}

impl ConversionRequest {
    pub fn new(target_format: FileFormat) -> Self {
        Self { target_format }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_keep_fixed_order() {
        let options = CleaningOptions::from_flags(true, true);
        assert_eq!(
            options.steps,
            vec![
                CleaningStep::RemoveDuplicates,
                CleaningStep::FillMissingNumeric
            ]
        );
        assert!(options.remove_duplicates());
        assert!(options.fill_missing_numeric());
        assert!(options.selected_columns.is_none());
    }

    #[test]
    fn builder_preserves_caller_order() {
        let options = CleaningOptions::new()
            .with_step(CleaningStep::FillMissingNumeric)
            .with_step(CleaningStep::RemoveDuplicates)
            .with_selected_columns(vec!["a".to_string()]);
        assert_eq!(options.steps[0], CleaningStep::FillMissingNumeric);
        assert_eq!(options.selected_columns.as_deref(), Some(&["a".to_string()][..]));
    }

    #[test]
    fn options_serialize() {
        let options = CleaningOptions::from_flags(true, false).with_visualize(true);
        let json = serde_json::to_string(&options).expect("serialize options");
        assert!(json.contains("remove_duplicates"));
        let round: CleaningOptions = serde_json::from_str(&json).expect("deserialize options");
        assert_eq!(round, options);
    }
}
