//! Sector allocation tables.
//!
//! The FAT and the MiniFAT share one shape: entry `n` holds the id of the
//! sector that follows sector `n` in its chain, `ENDOFCHAIN` on the last
//! sector, or a marker for sectors that hold the allocation structures
//! themselves. [`AllocationTable`] builds either one; only the unit size
//! differs (512/4096 bytes for the FAT, 64 bytes for the MiniFAT).

use super::super::consts::*;
use zerocopy::{IntoBytes, LE, U32};

/// Append-only allocation table
#[derive(Debug, Clone)]
pub struct AllocationTable {
    /// Next-sector links, indexed by sector id
    entries: Vec<u32>,
    /// Bytes covered by one entry
    unit: usize,
}

impl AllocationTable {
    /// Create an empty table whose entries each cover `unit` bytes.
    pub fn new(unit: usize) -> Self {
        Self {
            entries: Vec::new(),
            unit,
        }
    }

    /// Allocate a contiguous chain big enough for `len` bytes.
    ///
    /// Returns the first sector id, or `ENDOFCHAIN` for an empty stream.
    pub fn allocate_chain(&mut self, len: usize) -> u32 {
        if len == 0 {
            return ENDOFCHAIN;
        }

        let count = len.div_ceil(self.unit);
        let start = self.entries.len() as u32;
        self.entries.reserve(count);
        for i in 1..count as u32 {
            self.entries.push(start + i);
        }
        self.entries.push(ENDOFCHAIN);
        start
    }

    /// Reserve `count` sectors tagged with `marker` (`FATSECT`, `DIFSECT`).
    pub fn reserve(&mut self, count: u32, marker: u32) -> u32 {
        if count == 0 {
            return ENDOFCHAIN;
        }
        let start = self.entries.len() as u32;
        self.entries
            .extend(std::iter::repeat_n(marker, count as usize));
        start
    }

    /// Number of sectors in use.
    pub fn len(&self) -> u32 {
        self.entries.len() as u32
    }

    /// Whether nothing has been allocated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw entries.
    pub fn entries(&self) -> &[u32] {
        &self.entries
    }

    /// Serialize the table into whole sectors, padding with `FREESECT`.
    pub fn to_sectors(&self, sector_size: usize) -> Vec<u8> {
        let per_sector = sector_size / 4;
        let sectors = self.entries.len().div_ceil(per_sector);
        let mut out = Vec::with_capacity(sectors * sector_size);
        for &entry in &self.entries {
            out.extend_from_slice(U32::<LE>::new(entry).as_bytes());
        }
        out.resize(sectors * sector_size, 0xFF);
        out
    }

    /// Check that every chain ends and no chain points outside the table.
    pub fn validate(&self) -> Result<(), String> {
        let len = self.entries.len() as u32;
        let mut referenced = vec![false; self.entries.len()];
        for (sector, &next) in self.entries.iter().enumerate() {
            match next {
                ENDOFCHAIN | FREESECT | FATSECT | DIFSECT => {},
                n if n >= len => {
                    return Err(format!("sector {} links past the table to {}", sector, n));
                },
                n => {
                    if std::mem::replace(&mut referenced[n as usize], true) {
                        return Err(format!("sector {} is linked twice", n));
                    }
                },
            }
        }
        Ok(())
    }
}
