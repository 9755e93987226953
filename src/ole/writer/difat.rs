//! DIFAT (Double Indirect FAT) sectors.
//!
//! The header lists the first 109 FAT sectors. Any further FAT sector ids are
//! chained through DIFAT sectors: each holds `sector_size / 4 - 1` ids and
//! ends with the id of the next DIFAT sector.

use super::super::consts::*;
use zerocopy::{IntoBytes, LE, U32};

/// Number of DIFAT sectors needed for `fat_sectors` FAT sectors.
pub fn difat_sector_count(fat_sectors: u32, sector_size: usize) -> u32 {
    let overflow = fat_sectors.saturating_sub(HEADER_DIFAT_SLOTS as u32);
    let per_sector = (sector_size / 4 - 1) as u32;
    overflow.div_ceil(per_sector)
}

/// Serialize the DIFAT chain for the FAT sector ids beyond the header.
///
/// DIFAT sectors are assumed contiguous, starting at `first_difat_sector`.
pub fn build_difat(fat_sector_ids: &[u32], first_difat_sector: u32, sector_size: usize) -> Vec<u8> {
    let overflow = fat_sector_ids.get(HEADER_DIFAT_SLOTS..).unwrap_or(&[]);
    if overflow.is_empty() {
        return Vec::new();
    }

    let per_sector = sector_size / 4 - 1;
    let chunks: Vec<&[u32]> = overflow.chunks(per_sector).collect();
    let mut out = Vec::with_capacity(chunks.len() * sector_size);
    for (i, chunk) in chunks.iter().enumerate() {
        let mut sector = vec![0xFFu8; sector_size];
        for (slot, &id) in chunk.iter().enumerate() {
            sector[slot * 4..slot * 4 + 4].copy_from_slice(U32::<LE>::new(id).as_bytes());
        }
        let next = if i + 1 < chunks.len() {
            first_difat_sector + i as u32 + 1
        } else {
            ENDOFCHAIN
        };
        sector[sector_size - 4..].copy_from_slice(U32::<LE>::new(next).as_bytes());
        out.extend_from_slice(&sector);
    }
    out
}
