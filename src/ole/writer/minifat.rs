//! Mini stream packing.
//!
//! Streams shorter than the 4096-byte cutoff are packed into 64-byte mini
//! sectors inside a single "mini stream", which is itself stored as an
//! ordinary FAT chain starting at the root entry. The MiniFAT links the mini
//! sectors of each small stream.

use super::super::consts::*;
use super::fat::AllocationTable;

/// Mini stream under construction
#[derive(Debug)]
pub struct MiniStream {
    /// MiniFAT
    table: AllocationTable,
    /// Concatenated small streams, each padded to a mini sector
    data: Vec<u8>,
}

impl MiniStream {
    /// Create an empty mini stream.
    pub fn new() -> Self {
        Self {
            table: AllocationTable::new(MINI_SECTOR_SIZE),
            data: Vec::new(),
        }
    }

    /// Append a small stream and return its first mini sector.
    pub fn push(&mut self, stream: &[u8]) -> u32 {
        let start = self.table.allocate_chain(stream.len());
        if start != ENDOFCHAIN {
            self.data.extend_from_slice(stream);
            let padded = self.data.len().div_ceil(MINI_SECTOR_SIZE) * MINI_SECTOR_SIZE;
            self.data.resize(padded, 0);
        }
        start
    }

    /// Packed mini stream bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// MiniFAT.
    pub fn table(&self) -> &AllocationTable {
        &self.table
    }

    /// Whether no small stream was stored.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for MiniStream {
    fn default() -> Self {
        Self::new()
    }
}
