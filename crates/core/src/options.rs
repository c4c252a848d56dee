//! Parsing and iteration options.

use crate::error::ParseWarning;
use frontsheet_sheet::Sheet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default marker that ends a data body without an error.
pub const DEFAULT_TERMINATION_MARKER: &str = "---";

/// What to do when a cell does not satisfy its declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoercionPolicy {
    /// Fail the whole worksheet on the first bad cell.
    #[default]
    Abort,
    /// Attach the error to the cell's record and keep parsing.
    Collect,
}

/// Options that control how a worksheet is parsed.
///
/// Field names follow the camelCase keys used in options files:
/// `reportProgress`, `reportWarnings`, `dataTerminationRow`,
/// `coercionPolicy`, `strictMissingValues`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    /// Emit a notice per worksheet and per parsed row (default: true)
    pub report_progress: bool,
    /// Emit and collect warnings for skipped rows (default: true)
    pub report_warnings: bool,
    /// Value in a row's first non-blank cell that ends a data body; `None`
    /// disables it (default: `---`)
    pub data_termination_row: Option<String>,
    /// Handling of cells that fail coercion (default: abort)
    pub coercion_policy: CoercionPolicy,
    /// Treat absent non-string cells as coercion errors (default: false)
    pub strict_missing_values: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            report_progress: true,
            report_warnings: true,
            data_termination_row: Some(DEFAULT_TERMINATION_MARKER.to_string()),
            coercion_policy: CoercionPolicy::Abort,
            strict_missing_values: false,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn with_report_progress(mut self, report_progress: bool) -> Self {
        self.report_progress = report_progress;
        self
    }

    #[must_use]
    pub fn with_report_warnings(mut self, report_warnings: bool) -> Self {
        self.report_warnings = report_warnings;
        self
    }

    /// Set the termination marker, or `None` to stop only at blank rows
    #[must_use]
    pub fn with_data_termination_row(mut self, marker: Option<&str>) -> Self {
        self.data_termination_row = marker.map(str::to_string);
        self
    }

    #[must_use]
    pub fn with_coercion_policy(mut self, policy: CoercionPolicy) -> Self {
        self.coercion_policy = policy;
        self
    }

    #[must_use]
    pub fn with_strict_missing_values(mut self, strict: bool) -> Self {
        self.strict_missing_values = strict;
        self
    }

    /// The active termination marker
    #[must_use]
    pub fn termination_marker(&self) -> Option<&str> {
        self.data_termination_row.as_deref()
    }

    /// Log and keep a warning, when warnings are enabled.
    pub(crate) fn warn(
        &self,
        warnings: &mut Vec<ParseWarning>,
        sheet: &Sheet,
        row_number: usize,
        message: impl Into<String>,
    ) {
        if !self.report_warnings {
            return;
        }
        let warning = ParseWarning {
            worksheet_name: sheet.name().to_string(),
            row_number,
            message: message.into(),
        };
        tracing::warn!("{warning}");
        warnings.push(warning);
    }
}

/// Predicate deciding whether a worksheet takes part in an iteration.
pub type SheetFilter = Box<dyn Fn(&Sheet) -> bool>;

/// Options for walking the worksheets of a workbook.
pub struct WorkbookOptions {
    /// 1-based row where every worksheet's content starts (default: 1)
    pub start_row: usize,
    /// Worksheets must pass every filter to be parsed (default: none)
    pub filters: Vec<SheetFilter>,
}

impl Default for WorkbookOptions {
    fn default() -> Self {
        WorkbookOptions {
            start_row: 1,
            filters: Vec::new(),
        }
    }
}

impl WorkbookOptions {
    #[must_use]
    pub fn with_start_row(mut self, start_row: usize) -> Self {
        self.start_row = start_row;
        self
    }

    /// Add a worksheet filter
    #[must_use]
    pub fn with_filter(mut self, filter: impl Fn(&Sheet) -> bool + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl fmt::Debug for WorkbookOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkbookOptions")
            .field("start_row", &self.start_row)
            .field("filters", &self.filters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ParseOptions::default();
        assert!(opts.report_progress);
        assert!(opts.report_warnings);
        assert_eq!(opts.termination_marker(), Some("---"));
        assert_eq!(opts.coercion_policy, CoercionPolicy::Abort);
        assert!(!opts.strict_missing_values);

        let workbook = WorkbookOptions::default();
        assert_eq!(workbook.start_row, 1);
        assert!(workbook.filters.is_empty());
    }

    #[test]
    fn test_builders() {
        let opts = ParseOptions::default()
            .with_report_progress(false)
            .with_data_termination_row(None)
            .with_coercion_policy(CoercionPolicy::Collect);
        assert!(!opts.report_progress);
        assert_eq!(opts.termination_marker(), None);
        assert_eq!(opts.coercion_policy, CoercionPolicy::Collect);

        let workbook = WorkbookOptions::default()
            .with_start_row(3)
            .with_filter(|sheet| sheet.name() != "Notes");
        assert_eq!(workbook.start_row, 3);
        assert!(!(workbook.filters[0])(&Sheet::with_name("Notes")));
        assert_eq!(format!("{workbook:?}"), "WorkbookOptions { start_row: 3, filters: 1 }");
    }

    #[test]
    fn test_deserialize_partial_options() {
        let opts: ParseOptions = serde_json::from_str(
            r#"{"reportProgress": false, "dataTerminationRow": "END", "coercionPolicy": "collect"}"#,
        )
        .unwrap();
        assert!(!opts.report_progress);
        assert!(opts.report_warnings);
        assert_eq!(opts.termination_marker(), Some("END"));
        assert_eq!(opts.coercion_policy, CoercionPolicy::Collect);

        let opts: ParseOptions = serde_json::from_str(r#"{"dataTerminationRow": null}"#).unwrap();
        assert_eq!(opts.termination_marker(), None);
    }

    #[test]
    fn test_warnings_respect_flag() {
        let sheet = Sheet::with_name("Meta");
        let mut warnings = Vec::new();

        ParseOptions::default()
            .with_report_warnings(false)
            .warn(&mut warnings, &sheet, 2, "skipped");
        assert!(warnings.is_empty());

        ParseOptions::default().warn(&mut warnings, &sheet, 2, "skipped");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].to_string(), "Worksheet 'Meta' row 2: skipped");
    }
}
