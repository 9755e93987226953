//! Compound file writer.
//!
//! The writer keeps the whole storage tree in memory: storages are created
//! explicitly through [`Storage::create_sub_storage`], streams through
//! [`Storage::write_stream`], and nothing touches the output until
//! [`OleWriter::write_to`] or [`OleWriter::save`] is called.
//!
//! # Sector layout
//!
//! Sectors are allocated in a fixed order so the output is deterministic:
//!
//! 1. streams of 4096 bytes or more, in creation order
//! 2. the mini stream holding every smaller stream
//! 3. the directory stream
//! 4. the MiniFAT
//! 5. DIFAT sectors, then FAT sectors
//!
//! # Example
//!
//! ```rust,no_run
//! use oxmsg::ole::{OleWriter, Storage, StoragePath};
//!
//! let mut writer = OleWriter::new();
//! let root = StoragePath::root();
//! writer.write_stream(&root, "MyStream", b"Hello, World!")?;
//! let inner = writer.create_sub_storage(&root, "MyStorage")?;
//! writer.write_stream(&inner, "Nested", b"Nested content")?;
//! writer.save("output.ole")?;
//! # Ok::<(), oxmsg::ole::OleError>(())
//! ```

use super::super::consts::*;
use super::super::error::OleError;
use super::super::storage::{Storage, StoragePath};
use super::difat::{build_difat, difat_sector_count};
use super::directory::DirectoryBuilder;
use super::fat::AllocationTable;
use super::header::{HeaderLayout, build_header};
use super::minifat::MiniStream;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::io::{Seek, SeekFrom, Write};

/// Sector size of the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SectorSize {
    /// Version 3 file, 512-byte sectors
    #[default]
    #[serde(rename = "512")]
    V3,
    /// Version 4 file, 4096-byte sectors
    #[serde(rename = "4096")]
    V4,
}

impl SectorSize {
    /// Size in bytes.
    pub fn bytes(self) -> usize {
        match self {
            SectorSize::V3 => 512,
            SectorSize::V4 => 4096,
        }
    }
}

/// Compound file writer
///
/// Provides the container primitives used by the message codec and
/// serializes the result as an MS-CFB file.
#[derive(Debug)]
pub struct OleWriter {
    sector_size: usize,
    root_clsid: [u8; 16],
    /// Every storage except the root
    storages: BTreeSet<StoragePath>,
    /// Streams in creation order
    streams: Vec<(StoragePath, Vec<u8>)>,
    /// Stream path to index in `streams`
    stream_index: HashMap<StoragePath, usize>,
}

impl OleWriter {
    /// Create a writer producing a version 3 file (512-byte sectors).
    pub fn new() -> Self {
        Self::with_sector_size(SectorSize::V3)
    }

    /// Create a writer with the given sector size.
    pub fn with_sector_size(sector_size: SectorSize) -> Self {
        Self {
            sector_size: sector_size.bytes(),
            root_clsid: [0; 16],
            storages: BTreeSet::new(),
            streams: Vec::new(),
            stream_index: HashMap::new(),
        }
    }

    /// Set the CLSID of the root entry (on-disk byte order).
    pub fn set_root_clsid(&mut self, clsid: [u8; 16]) {
        self.root_clsid = clsid;
    }

    /// Whether `path` names the root or a created storage.
    pub fn is_storage(&self, path: &StoragePath) -> bool {
        path.is_root() || self.storages.contains(path)
    }

    /// Contents of the stream at `path`, if any.
    pub fn stream(&self, path: &StoragePath) -> Option<&[u8]> {
        self.stream_index
            .get(path)
            .map(|&i| self.streams[i].1.as_slice())
    }

    /// Names of the direct children of a storage, sorted.
    pub fn children(&self, parent: &StoragePath) -> Vec<String> {
        let is_child = |p: &StoragePath| p.parent().as_ref() == Some(parent);
        let mut names: Vec<String> = self
            .storages
            .iter()
            .filter(|p| is_child(p))
            .chain(self.streams.iter().map(|(p, _)| p).filter(|p| is_child(p)))
            .filter_map(|p| p.name().map(str::to_string))
            .collect();
        names.sort();
        names
    }

    /// Number of streams written so far.
    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    fn check_name(name: &str) -> Result<(), OleError> {
        let units = name.encode_utf16().count();
        if units == 0 || units > MAX_NAME_UNITS || name.contains(['/', '\\', ':', '!']) {
            return Err(OleError::InvalidName(name.to_string()));
        }
        Ok(())
    }

    fn check_parent(&self, parent: &StoragePath) -> Result<(), OleError> {
        if self.is_storage(parent) {
            Ok(())
        } else {
            Err(OleError::StorageNotFound(parent.to_string()))
        }
    }

    /// Serialize the compound file.
    pub fn write_to<W: Write + Seek>(&self, writer: &mut W) -> Result<(), OleError> {
        let sector_size = self.sector_size;
        let mut fat = AllocationTable::new(sector_size);
        let mut mini = MiniStream::new();

        // Small streams live in the mini stream; large ones get FAT chains in creation order
        let mut placements: HashMap<&StoragePath, (u32, u64)> = HashMap::new();
        for (path, data) in &self.streams {
            if data.len() < MINI_STREAM_CUTOFF {
                placements.insert(path, (mini.push(data), data.len() as u64));
            }
        }

        let mut large: Vec<(u32, &[u8])> = Vec::new();
        for (path, data) in &self.streams {
            if data.len() >= MINI_STREAM_CUTOFF {
                let start = fat.allocate_chain(data.len());
                placements.insert(path, (start, data.len() as u64));
                large.push((start, data));
            }
        }

        let mini_start = fat.allocate_chain(mini.data().len());

        // Directory: storages first (sorted, so parents precede children), then streams
        let mut directory = DirectoryBuilder::new(self.root_clsid);
        directory.set_mini_stream(mini_start, mini.data().len() as u64);
        let mut sids: HashMap<&StoragePath, u32> = HashMap::new();
        for path in &self.storages {
            let parent = path.parent().and_then(|p| sids.get(&p).copied()).unwrap_or(0);
            let name = path.name().unwrap_or_default();
            sids.insert(path, directory.add_storage(parent, name));
        }
        for (path, _) in &self.streams {
            let parent = path.parent().and_then(|p| sids.get(&p).copied()).unwrap_or(0);
            let (start, size) = placements.get(path).copied().unwrap_or((ENDOFCHAIN, 0));
            directory.add_stream(parent, path.name().unwrap_or_default(), start, size);
        }
        let dir_stream = directory.build(sector_size);
        let dir_start = fat.allocate_chain(dir_stream.len());

        let minifat_bytes = if mini.is_empty() {
            Vec::new()
        } else {
            mini.table().to_sectors(sector_size)
        };
        let minifat_start = fat.allocate_chain(minifat_bytes.len());

        // The FAT must also describe its own sectors and the DIFAT's
        let per_fat_sector = (sector_size / 4) as u32;
        let used = fat.len();
        let (mut n_fat, mut n_difat) = (0u32, 0u32);
        loop {
            let needed = (used + n_fat + n_difat).div_ceil(per_fat_sector);
            let needed_difat = difat_sector_count(needed, sector_size);
            if needed == n_fat && needed_difat == n_difat {
                break;
            }
            n_fat = needed;
            n_difat = needed_difat;
        }
        let difat_start = fat.reserve(n_difat, DIFSECT);
        let fat_start = fat.reserve(n_fat, FATSECT);
        if fat.len() > MAXREGSECT {
            return Err(OleError::TooLarge(format!("{} sectors", fat.len())));
        }
        fat.validate().map_err(OleError::TooLarge)?;

        let fat_ids: Vec<u32> = (fat_start..fat_start + n_fat).collect();
        let difat_bytes = build_difat(&fat_ids, difat_start, sector_size);
        let fat_bytes = fat.to_sectors(sector_size);

        log::debug!(
            "compound file: {} streams, {} storages, {} sectors, {} FAT, {} DIFAT",
            self.streams.len(),
            self.storages.len(),
            fat.len(),
            n_fat,
            n_difat
        );

        let header = build_header(
            &HeaderLayout {
                first_dir_sector: dir_start,
                num_dir_sectors: (dir_stream.len() / sector_size) as u32,
                first_minifat_sector: minifat_start,
                num_minifat_sectors: (minifat_bytes.len() / sector_size) as u32,
                first_difat_sector: difat_start,
                num_difat_sectors: n_difat,
                fat_sectors: fat_ids,
            },
            sector_size,
        );

        writer.write_all(&header)?;
        for (start, data) in &large {
            self.write_chain(writer, *start, data)?;
        }
        self.write_chain(writer, mini_start, mini.data())?;
        self.write_chain(writer, dir_start, &dir_stream)?;
        self.write_chain(writer, minifat_start, &minifat_bytes)?;
        self.write_chain(writer, difat_start, &difat_bytes)?;
        self.write_chain(writer, fat_start, &fat_bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Write `data` at the contiguous sectors starting at `start`, zero padded.
    fn write_chain<W: Write + Seek>(
        &self,
        writer: &mut W,
        start: u32,
        data: &[u8],
    ) -> Result<(), OleError> {
        if start == ENDOFCHAIN || data.is_empty() {
            return Ok(());
        }
        let position = (start as u64 + 1) * self.sector_size as u64;
        writer.seek(SeekFrom::Start(position))?;
        writer.write_all(data)?;
        let tail = data.len() % self.sector_size;
        if tail != 0 {
            writer.write_all(&vec![0u8; self.sector_size - tail])?;
        }
        Ok(())
    }

    /// Serialize into a new byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>, OleError> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        self.write_to(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Save the compound file to a path.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), OleError> {
        let file = std::fs::File::create(path)?;
        let mut buffered = std::io::BufWriter::new(file);
        self.write_to(&mut buffered)?;
        buffered.flush()?;
        Ok(())
    }
}

impl Default for OleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for OleWriter {
    fn create_sub_storage(
        &mut self,
        parent: &StoragePath,
        name: &str,
    ) -> Result<StoragePath, OleError> {
        Self::check_name(name)?;
        self.check_parent(parent)?;
        let path = parent.child(name);
        if self.stream_index.contains_key(&path) {
            return Err(OleError::EntryKindConflict(path.to_string()));
        }
        self.storages.insert(path.clone());
        Ok(path)
    }

    fn write_stream(
        &mut self,
        parent: &StoragePath,
        name: &str,
        data: &[u8],
    ) -> Result<(), OleError> {
        Self::check_name(name)?;
        self.check_parent(parent)?;
        let path = parent.child(name);
        if self.storages.contains(&path) {
            return Err(OleError::EntryKindConflict(path.to_string()));
        }
        log::trace!("stream {} ({} bytes)", path, data.len());
        match self.stream_index.get(&path) {
            Some(&i) => self.streams[i].1 = data.to_vec(),
            None => {
                self.stream_index.insert(path.clone(), self.streams.len());
                self.streams.push((path, data.to_vec()));
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_writer() {
        let writer = OleWriter::new();
        assert_eq!(writer.sector_size, 512);
        assert_eq!(writer.stream_count(), 0);
        assert!(writer.is_storage(&StoragePath::root()));
    }

    #[test]
    fn test_stream_overwrite_keeps_position() {
        let mut writer = OleWriter::new();
        let root = StoragePath::root();
        writer.write_stream(&root, "A", b"one").unwrap();
        writer.write_stream(&root, "B", b"two").unwrap();
        writer.write_stream(&root, "A", b"three").unwrap();
        assert_eq!(writer.stream_count(), 2);
        assert_eq!(writer.stream(&root.child("A")), Some(&b"three"[..]));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut writer = OleWriter::new();
        let missing = StoragePath::root().child("missing");
        let err = writer.write_stream(&missing, "S", b"x").unwrap_err();
        assert!(matches!(err, OleError::StorageNotFound(_)));
    }

    #[test]
    fn test_name_validation() {
        let mut writer = OleWriter::new();
        let root = StoragePath::root();
        assert!(writer.write_stream(&root, "", b"x").is_err());
        assert!(writer.write_stream(&root, &"x".repeat(32), b"x").is_err());
        assert!(writer.write_stream(&root, &"x".repeat(31), b"x").is_ok());
        assert!(writer.create_sub_storage(&root, "a/b").is_err());
    }

    #[test]
    fn test_kind_conflict() {
        let mut writer = OleWriter::new();
        let root = StoragePath::root();
        writer.create_sub_storage(&root, "X").unwrap();
        assert!(matches!(
            writer.write_stream(&root, "X", b"x"),
            Err(OleError::EntryKindConflict(_))
        ));
    }

    #[test]
    fn test_children_listing() {
        let mut writer = OleWriter::new();
        let root = StoragePath::root();
        let inner = writer.create_sub_storage(&root, "Inner").unwrap();
        writer.write_stream(&inner, "Deep", b"x").unwrap();
        writer.write_stream(&root, "Top", b"y").unwrap();
        assert_eq!(writer.children(&root), vec!["Inner", "Top"]);
        assert_eq!(writer.children(&inner), vec!["Deep"]);
    }
}
