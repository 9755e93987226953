//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.

use super::types::Error;

impl From<crate::ole::OleError> for Error {
    fn from(err: crate::ole::OleError) -> Self {
        match err {
            crate::ole::OleError::Io(e) => Error::Io(e),
            other => Error::Container(other.to_string()),
        }
    }
}

impl From<crate::msg::MsgError> for Error {
    fn from(err: crate::msg::MsgError) -> Self {
        match err {
            crate::msg::MsgError::Io(e) => Error::Io(e),
            crate::msg::MsgError::Ole(e) => Error::from(e),
            crate::msg::MsgError::InvalidInput(s) => Error::InvalidInput(s),
            crate::msg::MsgError::FeatureDisabled(f) => Error::FeatureDisabled(f.to_string()),
            other => Error::Message(other.to_string()),
        }
    }
}

#[cfg(feature = "rtf")]
impl From<crate::rtf::RtfError> for Error {
    fn from(err: crate::rtf::RtfError) -> Self {
        Error::Rtf(err.to_string())
    }
}

impl From<crate::common::binary::BinaryError> for Error {
    fn from(err: crate::common::binary::BinaryError) -> Self {
        Error::InvalidInput(err.to_string())
    }
}
