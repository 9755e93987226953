//! Error types for the property codec and message builders.

use super::property::PropertyType;
use crate::ole::OleError;
use thiserror::Error;

/// Result type for message operations.
pub type MsgResult<T> = Result<T, MsgError>;

/// Errors raised while encoding properties or assembling a message.
#[derive(Error, Debug)]
pub enum MsgError {
    /// IO error while writing the output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Container primitive failed
    #[error("Container error: {0}")]
    Ole(#[from] OleError),

    /// Request rejected before anything was written
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Named property encoded without being resolved in the table first
    #[error("Named property {0} was not resolved before encoding")]
    UnresolvedNamedProperty(String),

    /// Named-property table used after it was serialized
    #[error("Named property table has already been serialized")]
    TableSealed,

    /// Value type disagrees with the declared property type
    #[error("Type mismatch for {property}: declared {expected}, got {actual}")]
    TypeMismatch {
        property: String,
        expected: PropertyType,
        actual: PropertyType,
    },

    /// Value does not fit the 32-bit size fields of the format
    #[error("Value of {property} is too large ({len} bytes)")]
    ValueTooLarge { property: String, len: u64 },

    /// Property set missing from the table's GUID list
    #[error("Property set {0} is not registered in the named property table")]
    UnknownPropertySet(crate::common::Guid),

    /// Two records share the same tag
    #[error("Duplicate property tag {0:#010X}")]
    DuplicateTag(u32),

    /// Named-property id space exhausted
    #[error("Too many named properties (limit {0})")]
    TooManyNamedProperties(usize),

    /// Input needs a feature that was compiled out
    #[error("Feature '{0}' is disabled")]
    FeatureDisabled(&'static str),

    /// Compressed RTF could not be produced
    #[cfg(feature = "rtf")]
    #[error("RTF error: {0}")]
    Rtf(#[from] crate::rtf::RtfError),
}
