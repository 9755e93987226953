//! Constants of the compound file binary format (MS-CFB).

/// Magic bytes that start every compound file
pub const MAGIC: &[u8; 8] = b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1";

/// Size of a directory entry in bytes
pub const DIRENTRY_SIZE: usize = 128;

/// Size of the on-disk header structure
pub const HEADER_SIZE: usize = 512;

/// Number of FAT sector ids stored directly in the header
pub const HEADER_DIFAT_SLOTS: usize = 109;

/// Mini sector size in bytes (2^6)
pub const MINI_SECTOR_SIZE: usize = 64;

/// Streams shorter than this live in the mini stream
pub const MINI_STREAM_CUTOFF: usize = 4096;

/// Longest directory entry name, in UTF-16 code units (excluding terminator)
pub const MAX_NAME_UNITS: usize = 31;

// Sector IDs
/// Maximum regular sector ID
pub const MAXREGSECT: u32 = 0xFFFFFFFA; // -6
/// Denotes a DIFAT sector in a FAT
pub const DIFSECT: u32 = 0xFFFFFFFC; // -4
/// Denotes a FAT sector in a FAT
pub const FATSECT: u32 = 0xFFFFFFFD; // -3
/// End of a virtual stream chain
pub const ENDOFCHAIN: u32 = 0xFFFFFFFE; // -2
/// Unallocated sector
pub const FREESECT: u32 = 0xFFFFFFFF; // -1

/// Unallocated directory entry
pub const NOSTREAM: u32 = 0xFFFFFFFF; // -1

// Object types in storage
/// Empty directory entry
pub const STGTY_EMPTY: u8 = 0;
/// Element is a storage object
pub const STGTY_STORAGE: u8 = 1;
/// Element is a stream object
pub const STGTY_STREAM: u8 = 2;
/// Element is a root storage
pub const STGTY_ROOT: u8 = 5;

/// Red-black tree node colours
pub const COLOR_BLACK: u8 = 1;
