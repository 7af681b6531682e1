//! Error types for the sheetlink client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] sheetlink_core::Error),

    #[error("No connection attached. Attach a connection before fetching or committing.")]
    NoConnection,

    #[error("No tab named {0:?}")]
    TabNotFound(String),

    #[error("A tab named {0:?} already exists")]
    DuplicateTab(String),

    #[error("Shape mismatch: expected {expected} {unit}, got {actual}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
        unit: &'static str,
    },

    #[error("Freeze needs at least one of rows or columns")]
    InvalidFreeze,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Wrap a transport-layer failure
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Error::Transport(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
