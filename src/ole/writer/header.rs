//! Compound file header.
//!
//! The 512-byte header records the format version, sector sizes and where
//! the directory, MiniFAT, DIFAT and the first 109 FAT sectors live. Version 4
//! files (4096-byte sectors) pad the header out to a full sector.

use super::super::consts::*;
use zerocopy::{IntoBytes, LE, U16, U32};
use zerocopy_derive::{Immutable, IntoBytes as DeriveIntoBytes, KnownLayout};

/// On-disk header layout
#[repr(C)]
#[derive(Debug, Clone, Copy, DeriveIntoBytes, Immutable, KnownLayout)]
struct RawHeader {
    magic: [u8; 8],
    clsid: [u8; 16],
    minor_version: U16<LE>,
    major_version: U16<LE>,
    byte_order: U16<LE>,
    sector_shift: U16<LE>,
    mini_sector_shift: U16<LE>,
    reserved: [u8; 6],
    num_dir_sectors: U32<LE>,
    num_fat_sectors: U32<LE>,
    first_dir_sector: U32<LE>,
    transaction_signature: U32<LE>,
    mini_stream_cutoff: U32<LE>,
    first_minifat_sector: U32<LE>,
    num_minifat_sectors: U32<LE>,
    first_difat_sector: U32<LE>,
    num_difat_sectors: U32<LE>,
    difat: [U32<LE>; HEADER_DIFAT_SLOTS],
}

/// Sector layout recorded in the header
#[derive(Debug, Clone, Default)]
pub struct HeaderLayout {
    /// First directory sector
    pub first_dir_sector: u32,
    /// Directory sector count (written only for version 4)
    pub num_dir_sectors: u32,
    /// First MiniFAT sector, `ENDOFCHAIN` when absent
    pub first_minifat_sector: u32,
    /// MiniFAT sector count
    pub num_minifat_sectors: u32,
    /// First DIFAT sector, `ENDOFCHAIN` when absent
    pub first_difat_sector: u32,
    /// DIFAT sector count
    pub num_difat_sectors: u32,
    /// Every FAT sector id, in order
    pub fat_sectors: Vec<u32>,
}

/// Serialize the header into one sector's worth of bytes.
pub fn build_header(layout: &HeaderLayout, sector_size: usize) -> Vec<u8> {
    let version_4 = sector_size == 4096;

    let mut difat = [U32::<LE>::new(FREESECT); HEADER_DIFAT_SLOTS];
    for (slot, &id) in difat.iter_mut().zip(&layout.fat_sectors) {
        *slot = U32::new(id);
    }

    let raw = RawHeader {
        magic: *MAGIC,
        clsid: [0; 16],
        minor_version: U16::new(0x003E),
        major_version: U16::new(if version_4 { 4 } else { 3 }),
        byte_order: U16::new(0xFFFE),
        sector_shift: U16::new(if version_4 { 12 } else { 9 }),
        mini_sector_shift: U16::new(6),
        reserved: [0; 6],
        // Must be zero for version 3 files
        num_dir_sectors: U32::new(if version_4 { layout.num_dir_sectors } else { 0 }),
        num_fat_sectors: U32::new(layout.fat_sectors.len() as u32),
        first_dir_sector: U32::new(layout.first_dir_sector),
        transaction_signature: U32::new(0),
        mini_stream_cutoff: U32::new(MINI_STREAM_CUTOFF as u32),
        first_minifat_sector: U32::new(layout.first_minifat_sector),
        num_minifat_sectors: U32::new(layout.num_minifat_sectors),
        first_difat_sector: U32::new(layout.first_difat_sector),
        num_difat_sectors: U32::new(layout.num_difat_sectors),
        difat,
    };

    let mut out = raw.as_bytes().to_vec();
    out.resize(sector_size, 0);
    out
}
