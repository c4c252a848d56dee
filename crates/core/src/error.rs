//! Error and warning types for worksheet parsing.

use crate::value::DataType;
use frontsheet_sheet::{CellValue, SheetError};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Coordinates of the cell being coerced. Rows and columns are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMeta<'a> {
    pub worksheet_name: &'a str,
    pub row_number: usize,
    pub col_number: usize,
    pub prop_name: &'a str,
}

impl CellMeta<'_> {
    /// Build the error for a cell that failed to coerce.
    pub(crate) fn error(
        &self,
        raw: &CellValue,
        data_type: DataType,
        reason: impl Into<String>,
    ) -> CoercionError {
        CoercionError {
            worksheet_name: self.worksheet_name.to_string(),
            row_number: self.row_number,
            col_number: self.col_number,
            prop_name: self.prop_name.to_string(),
            data_type,
            raw: raw.clone(),
            reason: reason.into(),
        }
    }
}

/// A cell value that does not satisfy its declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionError {
    pub worksheet_name: String,
    pub row_number: usize,
    pub col_number: usize,
    pub prop_name: String,
    pub data_type: DataType,
    pub raw: CellValue,
    pub reason: String,
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Worksheet '{}' row {} col {}: cannot read property '{}' as {}: {}",
            self.worksheet_name,
            self.row_number,
            self.col_number,
            self.prop_name,
            self.data_type,
            self.reason
        )?;
        // password cells never echo their raw text
        if self.data_type != DataType::Password && !self.raw.is_null() {
            write!(f, " (raw {} value '{}')", self.raw.type_name(), self.raw)?;
        }
        Ok(())
    }
}

impl std::error::Error for CoercionError {}

/// A non-fatal problem with a worksheet row that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub worksheet_name: String,
    pub row_number: usize,
    pub message: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Worksheet '{}' row {}: {}",
            self.worksheet_name, self.row_number, self.message
        )
    }
}

/// Errors that abort parsing of a worksheet or workbook.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body starting at this row is neither a data table nor a data list.
    #[error("Worksheet '{worksheet_name}' row {row_number}: cannot determine data layout: {message}")]
    UnclassifiableLayout {
        worksheet_name: String,
        row_number: usize,
        message: String,
    },

    /// A key or column name declared twice in the same block.
    #[error("Worksheet '{worksheet_name}' row {row_number} col {col_number}: duplicate key '{key}'")]
    DuplicateKey {
        worksheet_name: String,
        row_number: usize,
        col_number: usize,
        key: String,
    },

    /// A key or column without a type token.
    #[error("Worksheet '{worksheet_name}' row {row_number} col {col_number}: missing data type for '{key}'")]
    MissingDataType {
        worksheet_name: String,
        row_number: usize,
        col_number: usize,
        key: String,
    },

    /// A type token outside the closed set of data types.
    #[error(
        "Worksheet '{worksheet_name}' row {row_number} col {col_number}: unknown data type '{token}' (expected one of: {})",
        DataType::token_list()
    )]
    UnknownDataType {
        worksheet_name: String,
        row_number: usize,
        col_number: usize,
        token: String,
    },

    /// A data list row without a key.
    #[error("Worksheet '{worksheet_name}' row {row_number}: missing key in column 1")]
    MissingKey {
        worksheet_name: String,
        row_number: usize,
    },

    /// A cell that failed to coerce to its declared type.
    #[error(transparent)]
    Coercion(Box<CoercionError>),

    /// The workbook file does not exist.
    #[error("Spreadsheet file not found: {}", .path.display())]
    MissingInput { path: PathBuf },

    /// The workbook could not be read.
    #[error("Workbook error: {0}")]
    Workbook(#[from] SheetError),
}

impl From<CoercionError> for ParseError {
    fn from(error: CoercionError) -> Self {
        Self::Coercion(Box::new(error))
    }
}

impl ParseError {
    /// Create an unclassifiable layout error.
    pub fn layout(worksheet_name: &str, row_number: usize, message: impl Into<String>) -> Self {
        Self::UnclassifiableLayout {
            worksheet_name: worksheet_name.to_string(),
            row_number,
            message: message.into(),
        }
    }

    /// Create a duplicate key error.
    pub fn duplicate_key(
        worksheet_name: &str,
        row_number: usize,
        col_number: usize,
        key: impl Into<String>,
    ) -> Self {
        Self::DuplicateKey {
            worksheet_name: worksheet_name.to_string(),
            row_number,
            col_number,
            key: key.into(),
        }
    }

    /// Create a missing data type error.
    pub fn missing_data_type(
        worksheet_name: &str,
        row_number: usize,
        col_number: usize,
        key: impl Into<String>,
    ) -> Self {
        Self::MissingDataType {
            worksheet_name: worksheet_name.to_string(),
            row_number,
            col_number,
            key: key.into(),
        }
    }

    /// Create an unknown data type error.
    pub fn unknown_data_type(
        worksheet_name: &str,
        row_number: usize,
        col_number: usize,
        token: impl Into<String>,
    ) -> Self {
        Self::UnknownDataType {
            worksheet_name: worksheet_name.to_string(),
            row_number,
            col_number,
            token: token.into(),
        }
    }

    /// Whether this error comes from the worksheet's shape rather than a cell value.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::UnclassifiableLayout { .. }
                | Self::DuplicateKey { .. }
                | Self::MissingDataType { .. }
                | Self::UnknownDataType { .. }
                | Self::MissingKey { .. }
        )
    }

    /// The worksheet the error belongs to, if any.
    #[must_use]
    pub fn worksheet_name(&self) -> Option<&str> {
        match self {
            Self::UnclassifiableLayout { worksheet_name, .. }
            | Self::DuplicateKey { worksheet_name, .. }
            | Self::MissingDataType { worksheet_name, .. }
            | Self::UnknownDataType { worksheet_name, .. }
            | Self::MissingKey { worksheet_name, .. } => Some(worksheet_name),
            Self::Coercion(error) => Some(&error.worksheet_name),
            Self::MissingInput { .. } | Self::Workbook(_) => None,
        }
    }
}
