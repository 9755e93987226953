//! Named-property id allocation and the `__nameid_version1.0` storage.
//!
//! Every named property used anywhere in a file gets a file-local id
//! `0x8000 + index`, where `index` is its position in allocation order. The
//! allocation is serialized as three correlated streams (MS-OXMSG 2.2.3):
//!
//! - GUID stream: 16-byte property-set GUIDs other than PS_MAPI and
//!   PS_PUBLIC_STRINGS, in first-use order.
//! - Entry stream: 8 bytes per name. A LID or an offset into the string
//!   stream, then `index << 16 | guid_index << 1 | kind`.
//! - String stream: `u32` byte length plus UTF-16LE name, 4-byte aligned.
//!
//! plus hash-bucket streams that let readers map names back to ids.

use super::error::{MsgError, MsgResult};
use super::property::{NAMED_ID_BASE, NamedKey, NamedPropertyName};
use super::tags::{PS_MAPI, PS_PUBLIC_STRINGS};
use crate::common::Guid;
use crate::common::binary::{encode_utf16le, pad_to, write_u32_le};
use crate::common::crc::crc32_raw;
use crate::ole::{Storage, StoragePath};
use std::collections::HashMap;

/// Name of the storage holding the table.
pub const NAMEID_STORAGE: &str = "__nameid_version1.0";
/// GUID stream name.
pub const GUID_STREAM: &str = "__substg1.0_00020102";
/// Entry stream name.
pub const ENTRY_STREAM: &str = "__substg1.0_00030102";
/// String stream name.
pub const STRING_STREAM: &str = "__substg1.0_00040102";

/// Largest number of names a file can carry.
pub const MAX_NAMED_PROPERTIES: usize = 0x7FFF;

/// Number of hash buckets.
const BUCKET_COUNT: u32 = 0x1F;

/// On-disk GUID index of PS_MAPI.
const GUID_INDEX_MAPI: u16 = 1;
/// On-disk GUID index of PS_PUBLIC_STRINGS.
const GUID_INDEX_PUBLIC_STRINGS: u16 = 2;
/// On-disk GUID index of the first GUID-stream entry.
const GUID_INDEX_FIRST_STREAM: u16 = 3;

/// Append-only allocation of named-property ids for one output file.
#[derive(Debug, Default)]
pub struct NamedPropertyTable {
    entries: Vec<NamedKey>,
    index: HashMap<NamedKey, u16>,
    guids: Vec<Guid>,
    sealed: bool,
}

impl NamedPropertyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `(property_set, name)`, allocating it on first sight.
    ///
    /// # Errors
    ///
    /// [`MsgError::TableSealed`] once the table has been serialized and
    /// [`MsgError::TooManyNamedProperties`] when the id space is exhausted.
    ///
    /// ```
    /// use oxmsg::msg::named::NamedPropertyTable;
    /// use oxmsg::msg::property::NamedPropertyName;
    /// use oxmsg::msg::tags::PSETID_APPOINTMENT;
    ///
    /// let mut table = NamedPropertyTable::new();
    /// let name = NamedPropertyName::Id(0x8208);
    /// let id = table.resolve(PSETID_APPOINTMENT, &name)?;
    /// assert_eq!(id, 0x8000);
    /// assert_eq!(table.resolve(PSETID_APPOINTMENT, &name)?, id);
    /// # Ok::<(), oxmsg::msg::MsgError>(())
    /// ```
    pub fn resolve(&mut self, property_set: Guid, name: &NamedPropertyName) -> MsgResult<u16> {
        let key = NamedKey {
            property_set,
            name: name.clone(),
        };
        self.resolve_key(&key)
    }

    /// [`resolve`](Self::resolve) taking a prepared key.
    pub fn resolve_key(&mut self, key: &NamedKey) -> MsgResult<u16> {
        if self.sealed {
            return Err(MsgError::TableSealed);
        }
        if let Some(&index) = self.index.get(key) {
            return Ok(NAMED_ID_BASE + index);
        }
        if self.entries.len() >= MAX_NAMED_PROPERTIES {
            return Err(MsgError::TooManyNamedProperties(MAX_NAMED_PROPERTIES));
        }

        let index = self.entries.len() as u16;
        if !is_well_known_set(&key.property_set) && !self.guids.contains(&key.property_set) {
            self.guids.push(key.property_set);
        }
        self.entries.push(key.clone());
        self.index.insert(key.clone(), index);
        log::trace!(
            "named: {}:{} -> {:#06X}",
            key.property_set,
            key.name,
            NAMED_ID_BASE + index
        );
        Ok(NAMED_ID_BASE + index)
    }

    /// Id of an already resolved name.
    pub fn lookup(&self, property_set: Guid, name: &NamedPropertyName) -> Option<u16> {
        let key = NamedKey {
            property_set,
            name: name.clone(),
        };
        self.lookup_key(&key)
    }

    /// [`lookup`](Self::lookup) taking a prepared key.
    pub fn lookup_key(&self, key: &NamedKey) -> Option<u16> {
        self.index.get(key).map(|&index| NAMED_ID_BASE + index)
    }

    /// Number of allocated names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether [`serialize`](Self::serialize) has run.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Allocated keys in allocation order.
    pub fn entries(&self) -> &[NamedKey] {
        &self.entries
    }

    /// On-disk GUID index of a property set.
    fn guid_index(&self, property_set: &Guid) -> MsgResult<u16> {
        if *property_set == PS_MAPI {
            return Ok(GUID_INDEX_MAPI);
        }
        if *property_set == PS_PUBLIC_STRINGS {
            return Ok(GUID_INDEX_PUBLIC_STRINGS);
        }
        self.guids
            .iter()
            .position(|g| g == property_set)
            .map(|position| GUID_INDEX_FIRST_STREAM + position as u16)
            .ok_or(MsgError::UnknownPropertySet(*property_set))
    }

    /// Build the stream contents without writing them.
    fn build_streams(&self) -> MsgResult<TableStreams> {
        let mut streams = TableStreams::default();
        for guid in &self.guids {
            streams.guids.extend_from_slice(guid.as_bytes());
        }

        for (index, key) in self.entries.iter().enumerate() {
            let guid_index = u32::from(self.guid_index(&key.property_set)?);
            let (id_or_offset, kind, hash_key) = match &key.name {
                NamedPropertyName::Id(lid) => (*lid, 0u32, *lid),
                NamedPropertyName::String(name) => {
                    let encoded = encode_utf16le(name);
                    let offset = u32::try_from(streams.strings.len()).map_err(|_| {
                        MsgError::ValueTooLarge {
                            property: NAMEID_STORAGE.to_string(),
                            len: streams.strings.len() as u64,
                        }
                    })?;
                    let len = u32::try_from(encoded.len()).map_err(|_| MsgError::ValueTooLarge {
                        property: key.name.to_string(),
                        len: encoded.len() as u64,
                    })?;
                    write_u32_le(&mut streams.strings, len);
                    streams.strings.extend_from_slice(&encoded);
                    pad_to(&mut streams.strings, 4);
                    (offset, 1u32, crc32_raw(&encoded))
                },
            };

            let info = ((index as u32) << 16) | (guid_index << 1) | kind;
            write_u32_le(&mut streams.entries, id_or_offset);
            write_u32_le(&mut streams.entries, info);

            let bucket = (hash_key ^ ((guid_index << 1) | kind)) % BUCKET_COUNT;
            let slot = &mut streams.buckets[bucket as usize];
            write_u32_le(slot, hash_key);
            write_u32_le(slot, info);
        }
        Ok(streams)
    }

    /// Write the table into `__nameid_version1.0` below `parent` and seal it.
    ///
    /// Returns the number of bytes written.
    pub fn serialize<S: Storage>(&mut self, storage: &mut S, parent: &StoragePath) -> MsgResult<u64> {
        if self.sealed {
            return Err(MsgError::TableSealed);
        }
        let streams = self.build_streams()?;
        let at = storage.create_sub_storage(parent, NAMEID_STORAGE)?;

        storage.write_stream(&at, GUID_STREAM, &streams.guids)?;
        storage.write_stream(&at, ENTRY_STREAM, &streams.entries)?;
        storage.write_stream(&at, STRING_STREAM, &streams.strings)?;
        let mut written = (streams.guids.len() + streams.entries.len() + streams.strings.len()) as u64;

        for (bucket, data) in streams.buckets.iter().enumerate() {
            if data.is_empty() {
                continue;
            }
            let name = format!("__substg1.0_{:04X}0102", 0x1000 + bucket);
            storage.write_stream(&at, &name, data)?;
            written += data.len() as u64;
        }

        self.sealed = true;
        log::debug!(
            "named: wrote {} names, {} property sets, {} bytes",
            self.entries.len(),
            self.guids.len(),
            written
        );
        Ok(written)
    }
}

fn is_well_known_set(guid: &Guid) -> bool {
    *guid == PS_MAPI || *guid == PS_PUBLIC_STRINGS
}

#[derive(Default)]
struct TableStreams {
    guids: Vec<u8>,
    entries: Vec<u8>,
    strings: Vec<u8>,
    buckets: [Vec<u8>; BUCKET_COUNT as usize],
}
