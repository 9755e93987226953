//! Unified error types for oxmsg.
use thiserror::Error;

/// Main error type for oxmsg operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Compound-file container failure
    #[error("Container error: {0}")]
    Container(String),

    /// Property codec or message builder failure
    #[error("Message error: {0}")]
    Message(String),

    /// Compressed RTF failure
    #[error("RTF error: {0}")]
    Rtf(String),

    /// Caller passed input that cannot be written
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Feature disabled at compile time
    #[error("Feature '{0}' is disabled. Enable it with --features {0}")]
    FeatureDisabled(String),
}

/// Result type for oxmsg operations.
pub type Result<T> = std::result::Result<T, Error>;
