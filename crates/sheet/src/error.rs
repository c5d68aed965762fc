use thiserror::Error;

/// Errors that can occur while reading workbook windows or working with tables
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Column not found: {name}")]
    ColumnNotFound { name: String },

    #[error("Row not found: {row}")]
    RowNotFound { row: usize },

    #[error("Invalid column letters: {0}")]
    InvalidColumnLetters(String),

    #[error("Data length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<calamine::XlsxError> for SheetError {
    fn from(e: calamine::XlsxError) -> Self {
        SheetError::Workbook(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
