//! Errors raised while building a compound file.

use thiserror::Error;

/// Error types for compound file construction
#[derive(Error, Debug)]
pub enum OleError {
    /// Underlying writer failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry name is empty, too long or contains a forbidden character
    #[error("Invalid entry name '{0}'")]
    InvalidName(String),

    /// Parent storage has not been created
    #[error("Storage not found: {0}")]
    StorageNotFound(String),

    /// A stream and a storage would share the same path
    #[error("Path already used by a different entry kind: {0}")]
    EntryKindConflict(String),

    /// Sector arithmetic exceeded the format limits
    #[error("File too large: {0}")]
    TooLarge(String),
}
