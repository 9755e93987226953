//! Property stream encoder.
//!
//! Serializes one [`PropertyRecordSet`] into its storage (MS-OXMSG 2.4):
//!
//! ```text
//! __properties_version1.0   header + one 16-byte record per property
//! __substg1.0_IIIITTTT      value of each variable-length property
//! __substg1.0_IIIITTTT-NNNNNNNN   elements of variable multi-valued ones
//! ```
//!
//! A record is the little-endian tag `id << 16 | type`, the record flags
//! and 8 value bytes holding either the inline value or the stream size
//! followed by 4 reserved bytes.

use super::error::{MsgError, MsgResult};
use super::named::NamedPropertyTable;
use super::property::{NAMED_ID_BASE, PropertyKey, PropertyType, PropertyValue, property_tag};
use super::record_set::{PropertyEntry, PropertyRecordSet};
use crate::common::binary::{
    encode_utf16le_nul, filetime_from_datetime, write_f32_le, write_f64_le, write_i16_le,
    write_i32_le, write_i64_le, write_u32_le, write_u64_le,
};
use crate::common::codepage::{codepage_to_encoding, encode_string8};
use crate::ole::{Storage, StoragePath};
use encoding_rs::Encoding;

/// Name of the fixed-record stream of every storage.
pub const PROPERTIES_STREAM: &str = "__properties_version1.0";

/// Size of one fixed record.
pub const RECORD_SIZE: usize = 16;

/// Size value recorded for `Object` properties.
const OBJECT_SIZE: u32 = 0xFFFF_FFFF;

/// Header preceding the records of a storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyHeader {
    /// Top-level message (32 bytes)
    Message(MessageCounters),
    /// Message embedded in an attachment (24 bytes)
    EmbeddedMessage(MessageCounters),
    /// Recipient or attachment (8 reserved bytes)
    Nested,
}

/// Recipient and attachment bookkeeping of a message header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageCounters {
    pub next_recipient_id: u32,
    pub next_attachment_id: u32,
    pub recipient_count: u32,
    pub attachment_count: u32,
}

impl MessageCounters {
    /// Counters for a message with the given number of children.
    pub fn new(recipient_count: u32, attachment_count: u32) -> Self {
        Self {
            next_recipient_id: recipient_count,
            next_attachment_id: attachment_count,
            recipient_count,
            attachment_count,
        }
    }
}

impl PropertyHeader {
    /// Serialized header size in bytes.
    pub const fn size(&self) -> usize {
        match self {
            PropertyHeader::Message(_) => 32,
            PropertyHeader::EmbeddedMessage(_) => 24,
            PropertyHeader::Nested => 8,
        }
    }

    fn write(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&[0u8; 8]);
        if let PropertyHeader::Message(c) | PropertyHeader::EmbeddedMessage(c) = self {
            write_u32_le(buf, c.next_recipient_id);
            write_u32_le(buf, c.next_attachment_id);
            write_u32_le(buf, c.recipient_count);
            write_u32_le(buf, c.attachment_count);
        }
        if let PropertyHeader::Message(_) = self {
            buf.extend_from_slice(&[0u8; 8]);
        }
    }
}

/// Name of the value stream of a property.
pub fn value_stream_name(id: u16, value_type: PropertyType) -> String {
    format!("__substg1.0_{:08X}", property_tag(id, value_type))
}

/// Name of one element stream of a variable-length multi-valued property.
pub fn element_stream_name(id: u16, value_type: PropertyType, index: usize) -> String {
    format!("__substg1.0_{:08X}-{:08X}", property_tag(id, value_type), index)
}

/// A record ready to be written.
struct Record<'a> {
    id: u16,
    named: bool,
    entry: &'a PropertyEntry,
    label: String,
}

/// Encodes record sets against one named-property table.
pub struct PropertyEncoder<'a> {
    table: &'a NamedPropertyTable,
    encoding: &'static Encoding,
}

impl<'a> PropertyEncoder<'a> {
    /// Encoder writing `String8` values in Windows-1252.
    pub fn new(table: &'a NamedPropertyTable) -> Self {
        Self {
            table,
            encoding: encoding_rs::WINDOWS_1252,
        }
    }

    /// Encoder writing `String8` values in `code_page`.
    pub fn with_code_page(table: &'a NamedPropertyTable, code_page: u32) -> MsgResult<Self> {
        let encoding = codepage_to_encoding(code_page)
            .ok_or_else(|| MsgError::InvalidInput(format!("unsupported code page {}", code_page)))?;
        Ok(Self { table, encoding })
    }

    /// Serialize `set` into the storage at `at` and return the bytes written.
    ///
    /// All streams are built before the first write, so misuse errors leave
    /// the storage untouched.
    ///
    /// # Errors
    ///
    /// - [`MsgError::TableSealed`] if the table was already serialized
    /// - [`MsgError::UnresolvedNamedProperty`] for a named property the table
    ///   does not know
    /// - [`MsgError::ValueTooLarge`] when a size does not fit 32 bits
    /// - container errors from `storage`
    pub fn encode<S: Storage>(
        &self,
        storage: &mut S,
        at: &StoragePath,
        set: &PropertyRecordSet,
        header: &PropertyHeader,
    ) -> MsgResult<u64> {
        if self.table.is_sealed() {
            return Err(MsgError::TableSealed);
        }

        let mut records = Vec::with_capacity(set.len());
        for (key, entry) in set.iter() {
            let (id, label) = match key {
                PropertyKey::Standard(id) => (*id, format!("{:04X}", id)),
                PropertyKey::Named(named) => {
                    let label = format!("{}:{}", named.property_set, named.name);
                    let id = self
                        .table
                        .lookup_key(named)
                        .ok_or_else(|| MsgError::UnresolvedNamedProperty(label.clone()))?;
                    (id, label)
                },
            };
            let named = matches!(key, PropertyKey::Named(_));
            records.push(Record { id, named, entry, label });
        }
        records.sort_by_key(|r| (r.id, r.entry.value_type().code()));
        check_tags(&records)?;

        let mut table = Vec::with_capacity(header.size() + records.len() * RECORD_SIZE);
        header.write(&mut table);
        let mut streams: Vec<(String, Vec<u8>)> = Vec::new();
        for record in &records {
            self.encode_record(record, &mut table, &mut streams)?;
        }

        let mut written = table.len() as u64;
        for (name, data) in &streams {
            storage.write_stream(at, name, data)?;
            written += data.len() as u64;
        }
        storage.write_stream(at, PROPERTIES_STREAM, &table)?;

        log::debug!(
            "encoder: {} -> {} records, {} streams, {} bytes",
            at,
            records.len(),
            streams.len(),
            written
        );
        Ok(written)
    }

    fn encode_record(
        &self,
        record: &Record<'_>,
        table: &mut Vec<u8>,
        streams: &mut Vec<(String, Vec<u8>)>,
    ) -> MsgResult<()> {
        use PropertyValue as V;

        let value = &record.entry.value;
        let value_type = value.property_type();
        write_u32_le(table, property_tag(record.id, value_type));
        write_u32_le(table, record.entry.flags.bits());

        let size = match value {
            V::Integer16(v) => return self.inline(record, table, &v.to_le_bytes()),
            V::Integer32(v) => return self.inline(record, table, &v.to_le_bytes()),
            V::Floating32(v) => return self.inline(record, table, &v.to_le_bytes()),
            V::Floating64(v) | V::FloatingTime(v) => return self.inline(record, table, &v.to_le_bytes()),
            V::Currency(v) | V::Integer64(v) => return self.inline(record, table, &v.to_le_bytes()),
            V::ErrorCode(v) => return self.inline(record, table, &v.to_le_bytes()),
            V::Boolean(v) => return self.inline(record, table, &u32::from(*v).to_le_bytes()),
            V::Time(t) => {
                return self.inline(record, table, &filetime_from_datetime(t).to_le_bytes());
            },
            V::Object => OBJECT_SIZE,
            V::String(s) => self.single_stream(record, encode_utf16le_nul(s), streams)?,
            V::String8(s) => self.single_stream(record, encode_string8(s, self.encoding), streams)?,
            V::Binary(b) => self.single_stream(record, b.clone(), streams)?,
            V::Guid(g) => self.single_stream(record, g.as_bytes().to_vec(), streams)?,
            V::MultipleString(items) => {
                let elements = items.iter().map(|s| encode_utf16le_nul(s));
                self.element_streams(record, elements, false, streams)?
            },
            V::MultipleString8(items) => {
                let elements = items.iter().map(|s| encode_string8(s, self.encoding));
                self.element_streams(record, elements, false, streams)?
            },
            V::MultipleBinary(items) => {
                self.element_streams(record, items.iter().cloned(), true, streams)?
            },
            V::MultipleInteger16(v) => {
                self.packed_stream(record, v.as_slice(), |buf, &x| write_i16_le(buf, x), streams)?
            },
            V::MultipleInteger32(v) => {
                self.packed_stream(record, v.as_slice(), |buf, &x| write_i32_le(buf, x), streams)?
            },
            V::MultipleFloating32(v) => {
                self.packed_stream(record, v.as_slice(), |buf, &x| write_f32_le(buf, x), streams)?
            },
            V::MultipleFloating64(v) | V::MultipleFloatingTime(v) => {
                self.packed_stream(record, v.as_slice(), |buf, &x| write_f64_le(buf, x), streams)?
            },
            V::MultipleCurrency(v) | V::MultipleInteger64(v) => {
                self.packed_stream(record, v.as_slice(), |buf, &x| write_i64_le(buf, x), streams)?
            },
            V::MultipleTime(v) => self.packed_stream(
                record,
                v.as_slice(),
                |buf, t| write_u64_le(buf, filetime_from_datetime(t)),
                streams,
            )?,
            V::MultipleGuid(v) => self.packed_stream(
                record,
                v.as_slice(),
                |buf, g| buf.extend_from_slice(g.as_bytes()),
                streams,
            )?,
        };
        write_u32_le(table, size);
        write_u32_le(table, 0);
        log::trace!(
            "encoder: {} {:04X} size {}",
            record.label,
            value_type.code(),
            size
        );
        Ok(())
    }

    /// Value bytes of a fixed-length property, zero-padded to 8.
    fn inline(&self, record: &Record<'_>, table: &mut Vec<u8>, bytes: &[u8]) -> MsgResult<()> {
        let mut slot = [0u8; 8];
        slot[..bytes.len()].copy_from_slice(bytes);
        table.extend_from_slice(&slot);
        log::trace!(
            "encoder: {} {:04X} inline",
            record.label,
            record.entry.value_type().code()
        );
        Ok(())
    }

    /// One value stream holding `data`; returns the recorded size.
    fn single_stream(
        &self,
        record: &Record<'_>,
        data: Vec<u8>,
        streams: &mut Vec<(String, Vec<u8>)>,
    ) -> MsgResult<u32> {
        let size = checked_size(&record.label, data.len())?;
        streams.push((value_stream_name(record.id, record.entry.value_type()), data));
        Ok(size)
    }

    /// Fixed-size elements packed back to back in the value stream.
    fn packed_stream<T>(
        &self,
        record: &Record<'_>,
        items: &[T],
        write: impl Fn(&mut Vec<u8>, &T),
        streams: &mut Vec<(String, Vec<u8>)>,
    ) -> MsgResult<u32> {
        let mut data = Vec::new();
        items.iter().for_each(|item| write(&mut data, item));
        self.single_stream(record, data, streams)
    }

    /// Length stream plus one element stream per item.
    fn element_streams<I>(
        &self,
        record: &Record<'_>,
        elements: I,
        binary: bool,
        streams: &mut Vec<(String, Vec<u8>)>,
    ) -> MsgResult<u32>
    where
        I: Iterator<Item = Vec<u8>>,
    {
        let mut lengths = Vec::new();
        self.push_elements(record, elements, binary, &mut lengths, streams)?;
        self.single_stream(record, lengths, streams)
    }

    /// Write one element stream per item and its entry in the length stream.
    fn push_elements<I>(
        &self,
        record: &Record<'_>,
        elements: I,
        binary: bool,
        lengths: &mut Vec<u8>,
        streams: &mut Vec<(String, Vec<u8>)>,
    ) -> MsgResult<()>
    where
        I: Iterator<Item = Vec<u8>>,
    {
        let value_type = record.entry.value_type();
        for (index, data) in elements.enumerate() {
            write_u32_le(lengths, checked_size(&record.label, data.len())?);
            if binary {
                write_u32_le(lengths, 0);
            }
            streams.push((element_stream_name(record.id, value_type, index), data));
        }
        Ok(())
    }
}

/// Encode `set` with a Windows-1252 encoder over `table`.
///
/// ```
/// use oxmsg::msg::encoder::{encode, PropertyHeader};
/// use oxmsg::msg::{named::NamedPropertyTable, record_set::PropertyRecordSet, tags};
/// use oxmsg::ole::{OleWriter, StoragePath};
///
/// let mut set = PropertyRecordSet::new();
/// set.set(&tags::SUBJECT, "Hi")?;
/// let table = NamedPropertyTable::new();
/// let mut writer = OleWriter::new();
/// let written = encode(&mut writer, &StoragePath::root(), &set, &PropertyHeader::Nested, &table)?;
/// // 8-byte header, one record, "Hi\0" in UTF-16
/// assert_eq!(written, 8 + 16 + 6);
/// # Ok::<(), oxmsg::msg::MsgError>(())
/// ```
pub fn encode<S: Storage>(
    storage: &mut S,
    at: &StoragePath,
    set: &PropertyRecordSet,
    header: &PropertyHeader,
    table: &NamedPropertyTable,
) -> MsgResult<u64> {
    PropertyEncoder::new(table).encode(storage, at, set, header)
}

/// Reject tag collisions and standard ids in the named range.
fn check_tags(records: &[Record<'_>]) -> MsgResult<()> {
    if let Some(record) = records
        .iter()
        .find(|r| r.id >= NAMED_ID_BASE && !r.named)
    {
        return Err(MsgError::InvalidInput(format!(
            "standard property id {:#06X} is in the named range",
            record.id
        )));
    }
    match records.windows(2).find(|pair| same_tag(&pair[0], &pair[1])) {
        Some(pair) => Err(MsgError::DuplicateTag(property_tag(
            pair[0].id,
            pair[0].entry.value_type(),
        ))),
        None => Ok(()),
    }
}

fn same_tag(a: &Record<'_>, b: &Record<'_>) -> bool {
    a.id == b.id && a.entry.value_type() == b.entry.value_type()
}

fn checked_size(label: &str, len: usize) -> MsgResult<u32> {
    // 0xFFFFFFFF is reserved for object properties
    match u32::try_from(len) {
        Ok(size) if size != OBJECT_SIZE => Ok(size),
        _ => Err(MsgError::ValueTooLarge {
            property: label.to_string(),
            len: len as u64,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Guid;
    use crate::msg::property::{PropertyFlags, PropertyIdentity};
    use crate::msg::tags;
    use crate::ole::OleWriter;
    use chrono::{TimeZone, Utc};

    fn u32_at(data: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(data[offset..offset + 4].try_into().unwrap())
    }

    fn encode_nested(set: &PropertyRecordSet) -> (OleWriter, u64) {
        let table = NamedPropertyTable::new();
        let mut writer = OleWriter::new();
        let written = encode(&mut writer, &StoragePath::root(), set, &PropertyHeader::Nested, &table).unwrap();
        (writer, written)
    }

    fn stream<'w>(writer: &'w OleWriter, name: &str) -> &'w [u8] {
        writer.stream(&StoragePath::root().child(name)).unwrap()
    }

    #[test]
    fn test_header_sizes() {
        let counters = MessageCounters::new(2, 1);
        let mut buf = Vec::new();
        PropertyHeader::Message(counters).write(&mut buf);
        assert_eq!(buf.len(), 32);
        assert_eq!(PropertyHeader::Message(counters).size(), 32);
        assert_eq!(u32_at(&buf, 8), 2);
        assert_eq!(u32_at(&buf, 12), 1);
        assert_eq!(u32_at(&buf, 16), 2);
        assert_eq!(u32_at(&buf, 20), 1);

        buf.clear();
        PropertyHeader::EmbeddedMessage(counters).write(&mut buf);
        assert_eq!(buf.len(), 24);
        assert_eq!(PropertyHeader::EmbeddedMessage(counters).size(), 24);
        buf.clear();
        PropertyHeader::Nested.write(&mut buf);
        assert_eq!(buf, vec![0u8; 8]);
        assert_eq!(PropertyHeader::Nested.size(), buf.len());
    }

    #[test]
    fn test_record_layout() {
        let mut set = PropertyRecordSet::new();
        set.set(&tags::IMPORTANCE, 2).unwrap();
        set.set(&tags::SUBJECT, "Hello").unwrap();
        let (writer, written) = encode_nested(&set);

        let props = stream(&writer, PROPERTIES_STREAM);
        assert_eq!(props.len(), 8 + 2 * RECORD_SIZE);
        // Importance: tag bytes are type then id
        assert_eq!(&props[8..12], &[0x03, 0x00, 0x17, 0x00]);
        assert_eq!(u32_at(props, 12), 6);
        assert_eq!(&props[16..24], &[2, 0, 0, 0, 0, 0, 0, 0]);
        // Subject: size of the stream, then 4 reserved bytes
        assert_eq!(u32_at(props, 24), 0x0037_001F);
        let subject = stream(&writer, "__substg1.0_0037001F");
        assert_eq!(u32_at(props, 32) as usize, subject.len());
        assert_eq!(u32_at(props, 36), 0);
        assert_eq!(subject.len(), 12);
        assert!(subject.ends_with(&[b'o', 0, 0, 0]));

        // Header + table + one string stream
        assert_eq!(writer.stream_count(), 2);
        assert_eq!(written, 40 + 12);
    }

    #[test]
    fn test_inline_values() {
        let mut set = PropertyRecordSet::new();
        let when = Utc.timestamp_opt(0, 0).unwrap();
        set.set(&tags::CLIENT_SUBMIT_TIME, when).unwrap();
        set.set(&tags::HAS_ATTACHMENTS, true).unwrap();
        let (writer, _) = encode_nested(&set);
        let props = stream(&writer, PROPERTIES_STREAM);
        assert_eq!(
            u64::from_le_bytes(props[16..24].try_into().unwrap()),
            116_444_736_000_000_000
        );
        assert_eq!(&props[32..40], &[1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_flags_written() {
        let mut set = PropertyRecordSet::new();
        set.set_with_flags(&tags::MESSAGE_FLAGS, 8, PropertyFlags::READABLE | PropertyFlags::MANDATORY)
            .unwrap();
        let (writer, _) = encode_nested(&set);
        assert_eq!(u32_at(stream(&writer, PROPERTIES_STREAM), 12), 3);
    }

    #[test]
    fn test_multi_valued_fixed() {
        let id = PropertyIdentity::standard(0x6601, PropertyType::MultipleInteger32);
        let mut set = PropertyRecordSet::new();
        set.set(&id, PropertyValue::MultipleInteger32(vec![1, 2, 3])).unwrap();
        let (writer, _) = encode_nested(&set);
        let data = stream(&writer, "__substg1.0_66011003");
        assert_eq!(data.len(), 12);
        assert_eq!(u32_at(data, 8), 3);
        assert_eq!(u32_at(stream(&writer, PROPERTIES_STREAM), 16), 12);
    }

    #[test]
    fn test_multi_valued_strings() {
        let id = PropertyIdentity::standard(0x6602, PropertyType::MultipleString);
        let mut set = PropertyRecordSet::new();
        let items = vec!["a".to_string(), "bc".to_string(), String::new()];
        set.set(&id, PropertyValue::MultipleString(items)).unwrap();
        let (writer, _) = encode_nested(&set);

        // Length stream plus one stream per element
        assert_eq!(writer.stream_count(), 1 + 4);
        let lengths = stream(&writer, "__substg1.0_6602101F");
        assert_eq!(lengths.len() / 4, 3);
        assert_eq!([u32_at(lengths, 0), u32_at(lengths, 4), u32_at(lengths, 8)], [4, 6, 2]);
        assert_eq!(stream(&writer, "__substg1.0_6602101F-00000001"), &[b'b', 0, b'c', 0, 0, 0]);
        assert_eq!(stream(&writer, "__substg1.0_6602101F-00000002"), &[0, 0]);
    }

    #[test]
    fn test_multi_valued_binary_lengths() {
        let id = PropertyIdentity::standard(0x6603, PropertyType::MultipleBinary);
        let mut set = PropertyRecordSet::new();
        set.set(&id, PropertyValue::MultipleBinary(vec![vec![1, 2, 3], vec![]])).unwrap();
        let (writer, _) = encode_nested(&set);
        let lengths = stream(&writer, "__substg1.0_66031102");
        assert_eq!(lengths.len(), 16);
        assert_eq!(u32_at(lengths, 0), 3);
        assert_eq!(u32_at(lengths, 8), 0);
        assert_eq!(stream(&writer, "__substg1.0_66031102-00000000"), &[1, 2, 3]);
    }

    #[test]
    fn test_multi_valued_guid_is_packed() {
        let id = PropertyIdentity::standard(0x6604, PropertyType::MultipleGuid);
        let mut set = PropertyRecordSet::new();
        set.set(&id, PropertyValue::MultipleGuid(vec![tags::PS_MAPI, Guid::NIL])).unwrap();
        let (writer, _) = encode_nested(&set);
        assert_eq!(stream(&writer, "__substg1.0_66041048").len(), 32);
    }

    #[test]
    fn test_empty_multi_valued_is_legal() {
        let id = PropertyIdentity::standard(0x6605, PropertyType::MultipleString);
        let mut set = PropertyRecordSet::new();
        set.set(&id, PropertyValue::MultipleString(Vec::new())).unwrap();
        let (writer, _) = encode_nested(&set);
        assert!(stream(&writer, "__substg1.0_6605101F").is_empty());
        assert_eq!(u32_at(stream(&writer, PROPERTIES_STREAM), 16), 0);
    }

    #[test]
    fn test_object_size_marker() {
        let mut set = PropertyRecordSet::new();
        set.set(&tags::ATTACH_DATA_OBJECT, PropertyValue::Object).unwrap();
        let (writer, _) = encode_nested(&set);
        let props = stream(&writer, PROPERTIES_STREAM);
        assert_eq!(u32_at(props, 8), 0x3701_000D);
        assert_eq!(u32_at(props, 16), 0xFFFF_FFFF);
        assert_eq!(writer.stream_count(), 1);
    }

    #[test]
    fn test_string8_code_page() {
        let id = PropertyIdentity::standard(0x0037, PropertyType::String8);
        let mut set = PropertyRecordSet::new();
        set.set(&id, PropertyValue::String8("\u{416}".into())).unwrap();
        let table = NamedPropertyTable::new();
        let mut writer = OleWriter::new();
        PropertyEncoder::with_code_page(&table, 1251)
            .unwrap()
            .encode(&mut writer, &StoragePath::root(), &set, &PropertyHeader::Nested)
            .unwrap();
        assert_eq!(stream(&writer, "__substg1.0_0037001E"), &[0xC6, 0]);
        assert!(PropertyEncoder::with_code_page(&table, 4).is_err());
    }

    #[test]
    fn test_named_records_sorted_after_standard() {
        let mut table = NamedPropertyTable::new();
        let mut set = PropertyRecordSet::new();
        set.set_resolved(&mut table, &tags::LOCATION, "Room").unwrap();
        set.set_resolved(&mut table, &tags::SUBJECT, "s").unwrap();
        let mut writer = OleWriter::new();
        encode(&mut writer, &StoragePath::root(), &set, &PropertyHeader::Nested, &table).unwrap();
        let props = stream(&writer, PROPERTIES_STREAM);
        assert_eq!(u32_at(props, 8), 0x0037_001F);
        assert_eq!(u32_at(props, 24), 0x8000_001F);
        assert!(writer.stream(&StoragePath::root().child("__substg1.0_8000001F")).is_some());
    }

    #[test]
    fn test_unresolved_named_property_fails_before_writing() {
        let mut set = PropertyRecordSet::new();
        set.set(&tags::SUBJECT, "s").unwrap();
        set.set(&tags::LOCATION, "Room").unwrap();
        let table = NamedPropertyTable::new();
        let mut writer = OleWriter::new();
        let err = encode(&mut writer, &StoragePath::root(), &set, &PropertyHeader::Nested, &table)
            .unwrap_err();
        assert!(matches!(err, MsgError::UnresolvedNamedProperty(_)));
        assert_eq!(writer.stream_count(), 0);
    }

    #[test]
    fn test_colliding_tags_rejected() {
        let subject = PropertyEntry {
            value: PropertyValue::String("a".into()),
            flags: PropertyFlags::default(),
        };
        let record = |id, named| Record {
            id,
            named,
            entry: &subject,
            label: format!("{:04X}", id),
        };
        assert!(check_tags(&[record(0x0037, false), record(0x8000, true)]).is_ok());
        assert!(matches!(
            check_tags(&[record(0x8000, false), record(0x8000, true)]),
            Err(MsgError::InvalidInput(_))
        ));
        assert!(matches!(
            check_tags(&[record(0x0037, false), record(0x0037, false)]),
            Err(MsgError::DuplicateTag(0x0037_001F))
        ));
    }

    #[test]
    fn test_standard_id_in_named_range_never_reaches_storage() {
        let mut table = NamedPropertyTable::new();
        let mut set = PropertyRecordSet::new();
        set.set_resolved(&mut table, &tags::LOCATION, "Room").unwrap();
        let clash = PropertyIdentity::standard(0x8000, PropertyType::String);
        assert!(matches!(set.set(&clash, "x"), Err(MsgError::InvalidInput(_))));
        assert_eq!(set.len(), 1);

        let mut writer = OleWriter::new();
        encode(&mut writer, &StoragePath::root(), &set, &PropertyHeader::Nested, &table).unwrap();
        let props = stream(&writer, PROPERTIES_STREAM);
        assert_eq!(props.len(), 8 + RECORD_SIZE);
    }

    #[test]
    fn test_sealed_table_rejected() {
        let mut table = NamedPropertyTable::new();
        let mut writer = OleWriter::new();
        table.serialize(&mut writer, &StoragePath::root()).unwrap();
        let err = encode(
            &mut writer,
            &StoragePath::root(),
            &PropertyRecordSet::new(),
            &PropertyHeader::Nested,
            &table,
        )
        .unwrap_err();
        assert!(matches!(err, MsgError::TableSealed));
    }
}
