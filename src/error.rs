use serde::Serialize;
use thiserror::Error;

/// Convenience result type for ingestion and service operations.
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Error type returned by ingestion, transforms, and the service layer.
///
/// The `Display` text of every variant is the exact message handed back to clients.
#[derive(Debug, Error)]
pub enum MatrixError {
    /// The declared content type is not the accepted CSV media type.
    #[error("File is not a CSV file")]
    InvalidFile { content_type: Option<String> },

    /// The content is absent, empty, jagged, or holds an unusable cell.
    #[error(transparent)]
    InvalidMatrix(#[from] MatrixViolation),

    /// A derived aggregate does not fit the 32-bit signed range.
    #[error(transparent)]
    Overflow(#[from] Overflow),

    /// Underlying I/O error while reading the input stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reason a submitted grid was rejected. Rows and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum MatrixViolation {
    #[error("File is null or empty")]
    Empty,

    #[error("File contains no rows")]
    NoRows,

    #[error("File contains no columns")]
    NoColumns,

    #[error("Number of columns in row {row} does not match number of columns in first row")]
    ColumnMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid integer value at row {row}, column {column}")]
    InvalidInteger { row: usize, column: usize },

    #[error("Integer value at row {row}, column {column} exceeds the maximum value of integer")]
    AboveMaximum { row: usize, column: usize },

    #[error("Integer value at row {row}, column {column} is below the minimum value of integer")]
    BelowMinimum { row: usize, column: usize },
}

impl MatrixViolation {
    /// Row the violation was found in, if it is tied to one.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::Empty | Self::NoRows | Self::NoColumns => None,
            Self::ColumnMismatch { row, .. }
            | Self::InvalidInteger { row, .. }
            | Self::AboveMaximum { row, .. }
            | Self::BelowMinimum { row, .. } => Some(*row),
        }
    }

    /// Column the violation was found in, if it is tied to a single cell.
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::InvalidInteger { column, .. }
            | Self::AboveMaximum { column, .. }
            | Self::BelowMinimum { column, .. } => Some(*column),
            _ => None,
        }
    }
}

/// Aggregate that left the `i32` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Overflow {
    #[error("Sum of the integers in the matrix exceeds the integer limit")]
    Sum,

    #[error("Product of integers in the matrix is out of range of the int data type")]
    Product,
}

/// Coarse failure kind, stable across the error's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidFile,
    InvalidMatrix,
    Overflow,
    Io,
}

/// Who is responsible for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// The submitted input was unacceptable.
    Client,
    /// The input was well-formed but the request could not be completed.
    Server,
}

impl MatrixError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFile { .. } => ErrorKind::InvalidFile,
            Self::InvalidMatrix(_) => ErrorKind::InvalidMatrix,
            Self::Overflow(_) => ErrorKind::Overflow,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    pub fn class(&self) -> FailureClass {
        match self {
            Self::InvalidFile { .. } | Self::InvalidMatrix(_) => FailureClass::Client,
            Self::Overflow(_) | Self::Io(_) => FailureClass::Server,
        }
    }

    /// The structured violation, when this is an [`MatrixError::InvalidMatrix`].
    pub fn violation(&self) -> Option<&MatrixViolation> {
        match self {
            Self::InvalidMatrix(v) => Some(v),
            _ => None,
        }
    }
}
