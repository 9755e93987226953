//! Directory stream generation.
//!
//! Every storage keeps its children in a binary search tree ordered by the
//! MS-CFB comparison rule: shorter names sort first, equal-length names
//! compare by their upper-cased UTF-16 code units. The tree built here is
//! balanced (the median of each range becomes the subtree root) and all
//! nodes are coloured black, which every reader accepts.
//!
//! ```text
//! Root Entry
//!     └─ child = median of sorted children
//!          ├─ left  = median of the shorter half
//!          └─ right = median of the longer half
//! ```

use super::super::consts::*;
use std::cmp::Ordering;
use zerocopy::{IntoBytes, LE, U16, U32, U64};
use zerocopy_derive::{Immutable, IntoBytes as DeriveIntoBytes, KnownLayout};

/// On-disk directory entry (128 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, DeriveIntoBytes, Immutable, KnownLayout)]
struct RawDirEntry {
    name: [u8; 64],
    name_len: U16<LE>,
    entry_type: u8,
    color: u8,
    sid_left: U32<LE>,
    sid_right: U32<LE>,
    sid_child: U32<LE>,
    clsid: [u8; 16],
    state_bits: U32<LE>,
    creation_time: U64<LE>,
    modified_time: U64<LE>,
    start_sector: U32<LE>,
    stream_size: U64<LE>,
}

/// Directory entry under construction
#[derive(Debug, Clone)]
struct DirEntry {
    name: String,
    entry_type: u8,
    clsid: [u8; 16],
    start_sector: u32,
    size: u64,
    sid_left: u32,
    sid_right: u32,
    sid_child: u32,
}

impl DirEntry {
    fn new(name: &str, entry_type: u8, start_sector: u32, size: u64) -> Self {
        Self {
            name: name.to_string(),
            entry_type,
            clsid: [0; 16],
            start_sector,
            size,
            sid_left: NOSTREAM,
            sid_right: NOSTREAM,
            sid_child: NOSTREAM,
        }
    }

    fn to_raw(&self) -> RawDirEntry {
        let mut name = [0u8; 64];
        let mut units = 0usize;
        for (i, unit) in self.name.encode_utf16().take(MAX_NAME_UNITS).enumerate() {
            name[i * 2..i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
            units += 1;
        }

        RawDirEntry {
            name,
            // Byte length including the terminator
            name_len: U16::new(((units + 1) * 2) as u16),
            entry_type: self.entry_type,
            color: COLOR_BLACK,
            sid_left: U32::new(self.sid_left),
            sid_right: U32::new(self.sid_right),
            sid_child: U32::new(self.sid_child),
            clsid: self.clsid,
            state_bits: U32::new(0),
            creation_time: U64::new(0),
            modified_time: U64::new(0),
            start_sector: U32::new(self.start_sector),
            stream_size: U64::new(self.size),
        }
    }

    fn unused() -> RawDirEntry {
        RawDirEntry {
            name: [0; 64],
            name_len: U16::new(0),
            entry_type: STGTY_EMPTY,
            color: 0,
            sid_left: U32::new(NOSTREAM),
            sid_right: U32::new(NOSTREAM),
            sid_child: U32::new(NOSTREAM),
            clsid: [0; 16],
            state_bits: U32::new(0),
            creation_time: U64::new(0),
            modified_time: U64::new(0),
            start_sector: U32::new(0),
            stream_size: U64::new(0),
        }
    }
}

/// Compare two entry names the way MS-CFB orders siblings.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let a_len = a.encode_utf16().count();
    let b_len = b.encode_utf16().count();
    a_len.cmp(&b_len).then_with(|| {
        let a_upper = a.to_uppercase();
        let b_upper = b.to_uppercase();
        a_upper.encode_utf16().cmp(b_upper.encode_utf16())
    })
}

/// Directory tree builder; the SID of an entry is its insertion index
pub struct DirectoryBuilder {
    entries: Vec<DirEntry>,
    /// Children of each entry, by SID
    children: Vec<Vec<u32>>,
}

impl DirectoryBuilder {
    /// Create a builder holding only the root entry.
    pub fn new(root_clsid: [u8; 16]) -> Self {
        let mut root = DirEntry::new("Root Entry", STGTY_ROOT, ENDOFCHAIN, 0);
        root.clsid = root_clsid;
        Self {
            entries: vec![root],
            children: vec![Vec::new()],
        }
    }

    /// Point the root entry at the mini stream.
    pub fn set_mini_stream(&mut self, start_sector: u32, size: u64) {
        self.entries[0].start_sector = start_sector;
        self.entries[0].size = size;
    }

    /// Add a storage under `parent` and return its SID.
    pub fn add_storage(&mut self, parent: u32, name: &str) -> u32 {
        self.push(parent, DirEntry::new(name, STGTY_STORAGE, 0, 0))
    }

    /// Add a stream under `parent` and return its SID.
    pub fn add_stream(&mut self, parent: u32, name: &str, start_sector: u32, size: u64) -> u32 {
        self.push(parent, DirEntry::new(name, STGTY_STREAM, start_sector, size))
    }

    fn push(&mut self, parent: u32, entry: DirEntry) -> u32 {
        let sid = self.entries.len() as u32;
        self.entries.push(entry);
        self.children.push(Vec::new());
        self.children[parent as usize].push(sid);
        sid
    }

    /// Number of entries, root included.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Link the sibling trees and serialize the directory stream, padded
    /// with unused entries to a whole number of sectors.
    pub fn build(mut self, sector_size: usize) -> Vec<u8> {
        for parent in 0..self.entries.len() {
            let mut kids = std::mem::take(&mut self.children[parent]);
            kids.sort_by(|&a, &b| {
                compare_names(&self.entries[a as usize].name, &self.entries[b as usize].name)
            });
            self.entries[parent].sid_child = link_subtree(&kids, &mut self.entries);
        }

        let per_sector = sector_size / DIRENTRY_SIZE;
        let slots = self.entries.len().div_ceil(per_sector) * per_sector;
        let mut out = Vec::with_capacity(slots * DIRENTRY_SIZE);
        for entry in &self.entries {
            out.extend_from_slice(entry.to_raw().as_bytes());
        }
        for _ in self.entries.len()..slots {
            out.extend_from_slice(DirEntry::unused().as_bytes());
        }
        out
    }
}

/// Build a balanced tree over sorted SIDs and return its root.
fn link_subtree(sorted: &[u32], entries: &mut [DirEntry]) -> u32 {
    if sorted.is_empty() {
        return NOSTREAM;
    }
    let mid = sorted.len() / 2;
    let root = sorted[mid];
    let left = link_subtree(&sorted[..mid], entries);
    let right = link_subtree(&sorted[mid + 1..], entries);
    entries[root as usize].sid_left = left;
    entries[root as usize].sid_right = right;
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(data: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
    }

    #[test]
    fn test_compare_names() {
        assert_eq!(compare_names("Data", "1Table"), Ordering::Less);
        assert_eq!(compare_names("abc", "ABD"), Ordering::Less);
        assert_eq!(compare_names("ABC", "abc"), Ordering::Equal);
        assert_eq!(compare_names("WordDocument", "1Table"), Ordering::Greater);
    }

    #[test]
    fn test_root_only_directory() {
        let dir = DirectoryBuilder::new([0; 16]);
        let data = dir.build(512);
        assert_eq!(data.len(), 512);
        assert_eq!(data[66], STGTY_ROOT);
        assert_eq!(u32_at(&data, 76), NOSTREAM);
        // Padding entries carry NOSTREAM links
        assert_eq!(data[128 + 66], STGTY_EMPTY);
        assert_eq!(u32_at(&data, 128 + 68), NOSTREAM);
    }

    #[test]
    fn test_balanced_children() {
        let mut dir = DirectoryBuilder::new([0; 16]);
        let c = dir.add_stream(0, "CCC", ENDOFCHAIN, 0);
        let a = dir.add_stream(0, "AAA", ENDOFCHAIN, 0);
        let b = dir.add_stream(0, "BBB", ENDOFCHAIN, 0);
        assert_eq!(dir.entry_count(), 4);

        let data = dir.build(512);
        // Root child is the median
        assert_eq!(u32_at(&data, 76), b);
        let b_off = b as usize * DIRENTRY_SIZE;
        assert_eq!(u32_at(&data, b_off + 68), a);
        assert_eq!(u32_at(&data, b_off + 72), c);
    }

    #[test]
    fn test_nested_storage_entry() {
        let mut dir = DirectoryBuilder::new([0; 16]);
        let storage = dir.add_storage(0, "Inner");
        let stream = dir.add_stream(storage, "S", 3, 10);
        let data = dir.build(512);
        let s_off = storage as usize * DIRENTRY_SIZE;
        assert_eq!(data[s_off + 66], STGTY_STORAGE);
        assert_eq!(u32_at(&data, s_off + 76), stream);
        let t_off = stream as usize * DIRENTRY_SIZE;
        assert_eq!(u32_at(&data, t_off + 116), 3);
        // "S" + terminator = 4 bytes
        assert_eq!(&data[t_off + 64..t_off + 66], &4u16.to_le_bytes());
    }
}
