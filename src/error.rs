use std::fmt;

/// Unified error type for the skip list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cursor points at a sentinel (head/tail) or at a node that was erased.
    InvalidIterator,
    /// Construction options failed validation.
    InvalidOptions(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidIterator => write!(f, "Cursor does not point to a valid node"),
            Error::InvalidOptions(msg) => write!(f, "Invalid options: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
