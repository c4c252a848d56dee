use thiserror::Error;

/// Errors that can occur while loading or reading sheets
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Index out of bounds: row {row}, col {col} (sheet has {rows} rows)")]
    IndexOutOfBounds { row: usize, col: usize, rows: usize },

    #[error("Row index out of bounds: {index} (sheet has {count} rows)")]
    RowIndexOutOfBounds { index: usize, count: usize },

    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Sheet already exists: {name}")]
    SheetAlreadyExists { name: String },

    #[error("Workbook error in {path}: {message}")]
    Workbook { path: String, message: String },
}

impl SheetError {
    /// Create a workbook read error for the given file.
    pub fn workbook(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Workbook {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
