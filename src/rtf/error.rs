//! Error types for compressed RTF.

use std::fmt;

/// Result type for RTF operations.
pub type RtfResult<T> = Result<T, RtfError>;

/// Compressed RTF errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RtfError {
    /// Header or payload does not follow MS-OXRTFCP
    InvalidStructure(String),
    /// Payload checksum does not match the header
    CrcMismatch { expected: u32, actual: u32 },
    /// Payload ended before the end-of-stream token
    UnexpectedEof,
    /// Input does not fit the 32-bit size fields
    TooLarge(usize),
}

impl fmt::Display for RtfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RtfError::InvalidStructure(msg) => write!(f, "Invalid compressed RTF: {}", msg),
            RtfError::CrcMismatch { expected, actual } => write!(
                f,
                "CRC32 mismatch: expected {:#010x}, got {:#010x}",
                expected, actual
            ),
            RtfError::UnexpectedEof => write!(f, "Unexpected end of compressed RTF"),
            RtfError::TooLarge(len) => write!(f, "RTF input of {} bytes is too large", len),
        }
    }
}

impl std::error::Error for RtfError {}
