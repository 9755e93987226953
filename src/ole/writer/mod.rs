//! OLE2 file writing module
//!
//! Builds compound documents in memory and serializes them following the
//! Microsoft Compound File Binary Format (MS-CFB).

/// FAT and MiniFAT allocation tables
mod fat;

/// Mini stream packing for small streams
mod minifat;

/// DIFAT generation
mod difat;

/// Directory tree generation
mod directory;

/// Compound file header generation
mod header;

/// Core writer implementation
mod core;

/// Integration tests for the writer
#[cfg(test)]
pub(crate) mod tests;

// Re-export public types
pub use core::{OleWriter, SectorSize};
