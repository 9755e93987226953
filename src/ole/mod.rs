//! OLE2 compound file support.
//!
//! Message files are compound files: a tree of storages (directories) and
//! streams (byte blobs). This module builds that tree in memory and
//! serializes it following MS-CFB.

/// Constants for the compound file format
pub mod consts;

/// Error type for container operations
mod error;

/// Storage handles and the container primitives used by the codec
mod storage;

/// Compound file writer
pub mod writer;

// Re-export public types for convenient access
pub use error::OleError;
pub use storage::{Storage, StoragePath};
pub use writer::{OleWriter, SectorSize};
