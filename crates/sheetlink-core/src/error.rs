//! Error types for sheetlink-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetlink-core
#[derive(Debug, Error)]
pub enum Error {
    /// Column label containing non-alphabetic characters
    #[error("Invalid column label: {0}")]
    InvalidColumnLabel(String),

    /// Text does not match the range grammar
    #[error("{0} is not a valid range")]
    InvalidRange(String),

    /// Cell reference that is neither a column label nor a cell address
    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),

    /// One-based index outside the valid range (rows and columns start at 1)
    #[error("One-based index must be >= 1, got {0}")]
    InvalidIndex(u32),

    /// Raw cell text that cannot be converted to its probed data kind
    #[error("Cannot convert {value:?} to {expected}")]
    Conversion {
        value: String,
        expected: &'static str,
    },
}
