//! Common types and utilities shared by the container and the message codec.

// Submodule declarations
pub mod binary;
pub mod codepage;
pub mod crc;
pub mod error;
pub mod guid;

// Re-exports for convenience
pub use error::{Error, Result};
pub use guid::Guid;
