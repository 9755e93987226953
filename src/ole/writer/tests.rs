//! Integration tests for the compound file writer
//!
//! The output is decoded with a small reader that follows the header, FAT,
//! MiniFAT and directory tree exactly as a consumer would.

use super::super::consts::*;
use super::super::storage::{Storage, StoragePath};
use super::core::{OleWriter, SectorSize};

fn u16_at(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn u32_at(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

/// Reads compound files produced by the writer
pub(crate) struct TestReader {
    data: Vec<u8>,
    sector_size: usize,
    fat: Vec<u32>,
    minifat: Vec<u32>,
    directory: Vec<u8>,
    ministream: Vec<u8>,
}

impl TestReader {
    pub(crate) fn new(data: Vec<u8>) -> Self {
        assert_eq!(&data[0..8], MAGIC);
        let sector_size = 1usize << u16_at(&data, 30);

        let mut fat_sectors: Vec<u32> = (0..HEADER_DIFAT_SLOTS)
            .map(|i| u32_at(&data, 76 + i * 4))
            .filter(|&s| s != FREESECT)
            .collect();
        let mut difat = u32_at(&data, 68);
        while difat != ENDOFCHAIN && difat != FREESECT {
            let off = (difat as usize + 1) * sector_size;
            for i in 0..sector_size / 4 - 1 {
                let id = u32_at(&data, off + i * 4);
                if id != FREESECT {
                    fat_sectors.push(id);
                }
            }
            difat = u32_at(&data, off + sector_size - 4);
        }
        assert_eq!(fat_sectors.len() as u32, u32_at(&data, 44));

        let mut fat = Vec::new();
        for s in fat_sectors {
            let off = (s as usize + 1) * sector_size;
            for i in 0..sector_size / 4 {
                fat.push(u32_at(&data, off + i * 4));
            }
        }

        let mut reader = Self {
            data,
            sector_size,
            fat,
            minifat: Vec::new(),
            directory: Vec::new(),
            ministream: Vec::new(),
        };
        reader.directory = reader.read_chain(u32_at(&reader.data, 48));
        let minifat_bytes = reader.read_chain(u32_at(&reader.data, 60));
        reader.minifat = minifat_bytes.chunks(4).map(|c| u32_at(c, 0)).collect();
        let root_start = u32_at(&reader.directory, 116);
        reader.ministream = reader.read_chain(root_start);
        reader
    }

    fn read_chain(&self, mut sector: u32) -> Vec<u8> {
        let mut out = Vec::new();
        let mut guard = 0;
        while sector != ENDOFCHAIN && sector != FREESECT {
            let off = (sector as usize + 1) * self.sector_size;
            out.extend_from_slice(&self.data[off..off + self.sector_size]);
            sector = self.fat[sector as usize];
            guard += 1;
            assert!(guard < 1_000_000, "FAT loop");
        }
        out
    }

    fn read_mini_chain(&self, mut sector: u32) -> Vec<u8> {
        let mut out = Vec::new();
        while sector != ENDOFCHAIN {
            let off = sector as usize * MINI_SECTOR_SIZE;
            out.extend_from_slice(&self.ministream[off..off + MINI_SECTOR_SIZE]);
            sector = self.minifat[sector as usize];
        }
        out
    }

    fn entry(&self, sid: u32) -> &[u8] {
        let off = sid as usize * DIRENTRY_SIZE;
        &self.directory[off..off + DIRENTRY_SIZE]
    }

    fn entry_name(&self, sid: u32) -> String {
        let e = self.entry(sid);
        let len = u16_at(e, 64) as usize;
        let units: Vec<u16> = (0..len.saturating_sub(2) / 2).map(|i| u16_at(e, i * 2)).collect();
        String::from_utf16_lossy(&units)
    }

    /// Walk the sibling tree below `parent` looking for `name`.
    fn find_child(&self, parent: u32, name: &str) -> Option<u32> {
        let mut stack = vec![u32_at(self.entry(parent), 76)];
        while let Some(sid) = stack.pop() {
            if sid == NOSTREAM {
                continue;
            }
            if self.entry_name(sid) == name {
                return Some(sid);
            }
            stack.push(u32_at(self.entry(sid), 68));
            stack.push(u32_at(self.entry(sid), 72));
        }
        None
    }

    /// Read the stream at `path`.
    pub(crate) fn stream(&self, path: &[&str]) -> Option<Vec<u8>> {
        let mut sid = 0;
        for name in path {
            sid = self.find_child(sid, name)?;
        }
        let e = self.entry(sid);
        if e[66] != STGTY_STREAM {
            return None;
        }
        let start = u32_at(e, 116);
        let size = u32_at(e, 120) as usize;
        let mut bytes = if size < MINI_STREAM_CUTOFF {
            self.read_mini_chain(start)
        } else {
            self.read_chain(start)
        };
        bytes.truncate(size);
        Some(bytes)
    }

    /// Whether `path` resolves to a storage.
    pub(crate) fn is_storage(&self, path: &[&str]) -> bool {
        let mut sid = 0;
        for name in path {
            match self.find_child(sid, name) {
                Some(s) => sid = s,
                None => return false,
            }
        }
        self.entry(sid)[66] == STGTY_STORAGE
    }

    /// Root entry CLSID.
    pub(crate) fn root_clsid(&self) -> [u8; 16] {
        let mut clsid = [0u8; 16];
        clsid.copy_from_slice(&self.entry(0)[80..96]);
        clsid
    }
}

#[test]
fn test_write_simple_file() {
    let mut writer = OleWriter::new();
    writer
        .write_stream(&StoragePath::root(), "TestStream", b"Hello, World!")
        .unwrap();

    let data = writer.to_bytes().unwrap();
    // Header, mini stream, directory, MiniFAT, FAT
    assert!(data.len() >= 512 * 5);

    let reader = TestReader::new(data);
    assert_eq!(reader.stream(&["TestStream"]).unwrap(), b"Hello, World!");
}

#[test]
fn test_small_and_large_streams() {
    let mut writer = OleWriter::new();
    let root = StoragePath::root();
    writer.write_stream(&root, "Small1", b"Small").unwrap();
    writer.write_stream(&root, "Large1", &vec![0xAA; 5000]).unwrap();
    writer.write_stream(&root, "Small2", b"Data").unwrap();
    writer.write_stream(&root, "Large2", &vec![0xBB; 10_000]).unwrap();

    let reader = TestReader::new(writer.to_bytes().unwrap());
    assert_eq!(reader.stream(&["Small1"]).unwrap(), b"Small");
    assert_eq!(reader.stream(&["Small2"]).unwrap(), b"Data");
    let large1 = reader.stream(&["Large1"]).unwrap();
    assert_eq!(large1.len(), 5000);
    assert!(large1.iter().all(|&b| b == 0xAA));
    let large2 = reader.stream(&["Large2"]).unwrap();
    assert_eq!(large2.len(), 10_000);
    assert!(large2.iter().all(|&b| b == 0xBB));
}

#[test]
fn test_empty_stream() {
    let mut writer = OleWriter::new();
    writer.write_stream(&StoragePath::root(), "Empty", b"").unwrap();
    let reader = TestReader::new(writer.to_bytes().unwrap());
    assert_eq!(reader.stream(&["Empty"]).unwrap().len(), 0);
}

#[test]
fn test_nested_storages() {
    let mut writer = OleWriter::new();
    let root = StoragePath::root();
    let outer = writer.create_sub_storage(&root, "Outer").unwrap();
    let inner = writer.create_sub_storage(&outer, "Inner").unwrap();
    writer.write_stream(&inner, "Leaf", b"deep").unwrap();
    writer.write_stream(&outer, "Mid", b"middle").unwrap();

    let reader = TestReader::new(writer.to_bytes().unwrap());
    assert!(reader.is_storage(&["Outer"]));
    assert!(reader.is_storage(&["Outer", "Inner"]));
    assert_eq!(reader.stream(&["Outer", "Inner", "Leaf"]).unwrap(), b"deep");
    assert_eq!(reader.stream(&["Outer", "Mid"]).unwrap(), b"middle");
    assert!(reader.stream(&["Leaf"]).is_none());
}

#[test]
fn test_many_siblings_are_reachable() {
    let mut writer = OleWriter::new();
    let root = StoragePath::root();
    for i in 0..40 {
        let name = format!("__substg1.0_{:04X}001F", 0x1000 + i);
        writer.write_stream(&root, &name, &[i as u8; 10]).unwrap();
    }
    let reader = TestReader::new(writer.to_bytes().unwrap());
    for i in 0..40 {
        let name = format!("__substg1.0_{:04X}001F", 0x1000 + i);
        assert_eq!(reader.stream(&[&name]).unwrap(), vec![i as u8; 10]);
    }
}

#[test]
fn test_root_clsid() {
    let mut writer = OleWriter::new();
    let clsid = [0x0B, 0x0D, 0x02, 0, 0, 0, 0, 0, 0xC0, 0, 0, 0, 0, 0, 0, 0x46];
    writer.set_root_clsid(clsid);
    let reader = TestReader::new(writer.to_bytes().unwrap());
    assert_eq!(reader.root_clsid(), clsid);
}

#[test]
fn test_difat_for_large_file() {
    // 110+ FAT sectors need a DIFAT sector: 110 * 128 sectors * 512 bytes
    let mut writer = OleWriter::new();
    let big = vec![0x5Au8; 110 * 128 * 512];
    writer.write_stream(&StoragePath::root(), "Big", &big).unwrap();
    let data = writer.to_bytes().unwrap();
    assert_eq!(u32_at(&data, 72), 1);
    let reader = TestReader::new(data);
    let read = reader.stream(&["Big"]).unwrap();
    assert_eq!(read.len(), big.len());
    assert!(read.iter().all(|&b| b == 0x5A));
}

#[test]
fn test_version_4_sectors() {
    let mut writer = OleWriter::with_sector_size(SectorSize::V4);
    writer.write_stream(&StoragePath::root(), "S", &[1, 2, 3]).unwrap();
    writer.write_stream(&StoragePath::root(), "L", &vec![7u8; 9000]).unwrap();
    let data = writer.to_bytes().unwrap();
    assert_eq!(data.len() % 4096, 0);
    let reader = TestReader::new(data);
    assert_eq!(reader.stream(&["S"]).unwrap(), vec![1, 2, 3]);
    assert_eq!(reader.stream(&["L"]).unwrap().len(), 9000);
}

#[test]
fn test_save_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.cfb");
    let mut writer = OleWriter::new();
    writer.write_stream(&StoragePath::root(), "S", b"saved").unwrap();
    writer.save(&path).unwrap();

    let reader = TestReader::new(std::fs::read(&path).unwrap());
    assert_eq!(reader.stream(&["S"]).unwrap(), b"saved");
}
