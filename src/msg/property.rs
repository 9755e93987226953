//! Property identities, value types and typed values.
//!
//! A property is addressed either by a well-known 16-bit id below `0x8000`
//! or, for named properties, by a property-set GUID plus a numeric LID or a
//! string name. Named identities are mapped to file-local ids by the
//! [`NamedPropertyTable`](super::named::NamedPropertyTable).

use crate::common::Guid;
use bitflags::bitflags;
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::fmt;

/// Flag marking a multi-valued type code.
pub const MULTI_VALUED_FLAG: u16 = 0x1000;

/// First id handed out to named properties.
pub const NAMED_ID_BASE: u16 = 0x8000;

/// MAPI property value types (MS-OXCDATA 2.11.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum PropertyType {
    Integer16 = 0x0002,
    Integer32 = 0x0003,
    Floating32 = 0x0004,
    Floating64 = 0x0005,
    Currency = 0x0006,
    FloatingTime = 0x0007,
    ErrorCode = 0x000A,
    Boolean = 0x000B,
    Object = 0x000D,
    Integer64 = 0x0014,
    String8 = 0x001E,
    String = 0x001F,
    Time = 0x0040,
    Guid = 0x0048,
    Binary = 0x0102,
    MultipleInteger16 = 0x1002,
    MultipleInteger32 = 0x1003,
    MultipleFloating32 = 0x1004,
    MultipleFloating64 = 0x1005,
    MultipleCurrency = 0x1006,
    MultipleFloatingTime = 0x1007,
    MultipleInteger64 = 0x1014,
    MultipleString8 = 0x101E,
    MultipleString = 0x101F,
    MultipleTime = 0x1040,
    MultipleGuid = 0x1048,
    MultipleBinary = 0x1102,
}

impl PropertyType {
    /// Numeric type code.
    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Look up a type from its numeric code.
    pub fn from_code(code: u16) -> Option<Self> {
        use PropertyType::*;
        Some(match code {
            0x0002 => Integer16,
            0x0003 => Integer32,
            0x0004 => Floating32,
            0x0005 => Floating64,
            0x0006 => Currency,
            0x0007 => FloatingTime,
            0x000A => ErrorCode,
            0x000B => Boolean,
            0x000D => Object,
            0x0014 => Integer64,
            0x001E => String8,
            0x001F => String,
            0x0040 => Time,
            0x0048 => Guid,
            0x0102 => Binary,
            0x1002 => MultipleInteger16,
            0x1003 => MultipleInteger32,
            0x1004 => MultipleFloating32,
            0x1005 => MultipleFloating64,
            0x1006 => MultipleCurrency,
            0x1007 => MultipleFloatingTime,
            0x1014 => MultipleInteger64,
            0x101E => MultipleString8,
            0x101F => MultipleString,
            0x1040 => MultipleTime,
            0x1048 => MultipleGuid,
            0x1102 => MultipleBinary,
            _ => return None,
        })
    }

    #[inline]
    pub const fn is_multi_valued(self) -> bool {
        self.code() & MULTI_VALUED_FLAG != 0
    }

    /// Single-valued base of a multi-valued type; identity otherwise.
    pub fn base(self) -> Self {
        if self.is_multi_valued() {
            // Every multi-valued code has a single-valued counterpart
            Self::from_code(self.code() & !MULTI_VALUED_FLAG).unwrap_or(self)
        } else {
            self
        }
    }

    /// Multi-valued counterpart, if the type has one.
    pub fn multi(self) -> Option<Self> {
        if self.is_multi_valued() {
            return Some(self);
        }
        Self::from_code(self.code() | MULTI_VALUED_FLAG)
    }

    /// Size in bytes of one value of a fixed-length base type.
    ///
    /// `Guid` reports 16: it lives in a stream when single-valued but
    /// is packed like a fixed value inside multi-valued streams.
    pub const fn fixed_size(self) -> Option<usize> {
        use PropertyType::*;
        match self {
            Integer16 | MultipleInteger16 => Some(2),
            Integer32 | Floating32 | ErrorCode | Boolean | MultipleInteger32
            | MultipleFloating32 => Some(4),
            Floating64 | Currency | FloatingTime | Integer64 | Time | MultipleFloating64
            | MultipleCurrency | MultipleFloatingTime | MultipleInteger64 | MultipleTime => {
                Some(8)
            },
            Guid | MultipleGuid => Some(16),
            _ => None,
        }
    }

    /// Whether a single value is stored inline in the 16-byte record.
    pub const fn is_inline(self) -> bool {
        !self.is_multi_valued() && matches!(self.fixed_size(), Some(size) if size <= 8)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({:#06X})", self, self.code())
    }
}

bitflags! {
    /// Per-record flags stored next to the property tag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u32 {
        /// Property must be understood by the reader
        const MANDATORY = 0x0000_0001;
        /// Property is readable
        const READABLE = 0x0000_0002;
        /// Property is writable
        const WRITABLE = 0x0000_0004;
    }
}

impl Default for PropertyFlags {
    fn default() -> Self {
        PropertyFlags::READABLE | PropertyFlags::WRITABLE
    }
}

/// Name of a named property: a numeric LID or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NamedPropertyName {
    Id(u32),
    String(Cow<'static, str>),
}

impl NamedPropertyName {
    /// Owned string name.
    pub fn string(name: impl Into<String>) -> Self {
        NamedPropertyName::String(Cow::Owned(name.into()))
    }

    pub const fn is_string(&self) -> bool {
        matches!(self, NamedPropertyName::String(_))
    }
}

impl fmt::Display for NamedPropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamedPropertyName::Id(lid) => write!(f, "{:#06X}", lid),
            NamedPropertyName::String(name) => write!(f, "\"{}\"", name),
        }
    }
}

/// Key of a named property within a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamedKey {
    pub property_set: Guid,
    pub name: NamedPropertyName,
}

/// Identity part of a property, without its value type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyKey {
    /// Well-known id below `0x8000`
    Standard(u16),
    /// Resolved per file through the named-property table
    Named(NamedKey),
}

/// Full description of one property: key plus value type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyIdentity {
    pub key: PropertyKey,
    pub value_type: PropertyType,
}

impl PropertyIdentity {
    /// Standard property with a fixed id.
    pub const fn standard(id: u16, value_type: PropertyType) -> Self {
        Self {
            key: PropertyKey::Standard(id),
            value_type,
        }
    }

    /// Named property identified by a numeric LID.
    pub const fn named_id(property_set: Guid, lid: u32, value_type: PropertyType) -> Self {
        Self {
            key: PropertyKey::Named(NamedKey {
                property_set,
                name: NamedPropertyName::Id(lid),
            }),
            value_type,
        }
    }

    /// Named property identified by a static string name.
    pub const fn named_str(
        property_set: Guid,
        name: &'static str,
        value_type: PropertyType,
    ) -> Self {
        Self {
            key: PropertyKey::Named(NamedKey {
                property_set,
                name: NamedPropertyName::String(Cow::Borrowed(name)),
            }),
            value_type,
        }
    }

    /// Named property with a name only known at runtime.
    pub fn named(property_set: Guid, name: NamedPropertyName, value_type: PropertyType) -> Self {
        Self {
            key: PropertyKey::Named(NamedKey { property_set, name }),
            value_type,
        }
    }

    /// Same identity with a different value type.
    pub fn with_type(&self, value_type: PropertyType) -> Self {
        Self {
            key: self.key.clone(),
            value_type,
        }
    }

    pub const fn is_named(&self) -> bool {
        matches!(self.key, PropertyKey::Named(_))
    }

    /// 32-bit tag for a standard property; `None` for named ones.
    pub fn tag(&self) -> Option<u32> {
        match self.key {
            PropertyKey::Standard(id) => Some(property_tag(id, self.value_type)),
            PropertyKey::Named(_) => None,
        }
    }
}

impl fmt::Display for PropertyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            PropertyKey::Standard(id) => {
                write!(f, "{:08X}", property_tag(*id, self.value_type))
            },
            PropertyKey::Named(key) => write!(
                f,
                "{}:{}:{:04X}",
                key.property_set,
                key.name,
                self.value_type.code()
            ),
        }
    }
}

/// Combine an id and a type into a 32-bit property tag.
#[inline]
pub const fn property_tag(id: u16, value_type: PropertyType) -> u32 {
    ((id as u32) << 16) | value_type.code() as u32
}

/// A typed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Integer16(i16),
    Integer32(i32),
    Floating32(f32),
    Floating64(f64),
    /// Currency as a fixed-point integer scaled by 10,000
    Currency(i64),
    /// OLE automation date
    FloatingTime(f64),
    ErrorCode(u32),
    Boolean(bool),
    /// Marker for a property whose content is a sub-storage written by the caller
    Object,
    Integer64(i64),
    /// String in the message code page
    String8(String),
    /// UTF-16 string
    String(String),
    Time(DateTime<Utc>),
    Guid(Guid),
    Binary(Vec<u8>),
    MultipleInteger16(Vec<i16>),
    MultipleInteger32(Vec<i32>),
    MultipleFloating32(Vec<f32>),
    MultipleFloating64(Vec<f64>),
    MultipleCurrency(Vec<i64>),
    MultipleFloatingTime(Vec<f64>),
    MultipleInteger64(Vec<i64>),
    MultipleString8(Vec<String>),
    MultipleString(Vec<String>),
    MultipleTime(Vec<DateTime<Utc>>),
    MultipleGuid(Vec<Guid>),
    MultipleBinary(Vec<Vec<u8>>),
}

impl PropertyValue {
    /// Value type of this value.
    pub fn property_type(&self) -> PropertyType {
        use PropertyValue as V;
        match self {
            V::Integer16(_) => PropertyType::Integer16,
            V::Integer32(_) => PropertyType::Integer32,
            V::Floating32(_) => PropertyType::Floating32,
            V::Floating64(_) => PropertyType::Floating64,
            V::Currency(_) => PropertyType::Currency,
            V::FloatingTime(_) => PropertyType::FloatingTime,
            V::ErrorCode(_) => PropertyType::ErrorCode,
            V::Boolean(_) => PropertyType::Boolean,
            V::Object => PropertyType::Object,
            V::Integer64(_) => PropertyType::Integer64,
            V::String8(_) => PropertyType::String8,
            V::String(_) => PropertyType::String,
            V::Time(_) => PropertyType::Time,
            V::Guid(_) => PropertyType::Guid,
            V::Binary(_) => PropertyType::Binary,
            V::MultipleInteger16(_) => PropertyType::MultipleInteger16,
            V::MultipleInteger32(_) => PropertyType::MultipleInteger32,
            V::MultipleFloating32(_) => PropertyType::MultipleFloating32,
            V::MultipleFloating64(_) => PropertyType::MultipleFloating64,
            V::MultipleCurrency(_) => PropertyType::MultipleCurrency,
            V::MultipleFloatingTime(_) => PropertyType::MultipleFloatingTime,
            V::MultipleInteger64(_) => PropertyType::MultipleInteger64,
            V::MultipleString8(_) => PropertyType::MultipleString8,
            V::MultipleString(_) => PropertyType::MultipleString,
            V::MultipleTime(_) => PropertyType::MultipleTime,
            V::MultipleGuid(_) => PropertyType::MultipleGuid,
            V::MultipleBinary(_) => PropertyType::MultipleBinary,
        }
    }

    /// Number of elements of a multi-valued value, `None` otherwise.
    pub fn element_count(&self) -> Option<usize> {
        use PropertyValue as V;
        Some(match self {
            V::MultipleInteger16(v) => v.len(),
            V::MultipleInteger32(v) => v.len(),
            V::MultipleFloating32(v) => v.len(),
            V::MultipleFloating64(v) | V::MultipleFloatingTime(v) => v.len(),
            V::MultipleCurrency(v) | V::MultipleInteger64(v) => v.len(),
            V::MultipleString8(v) | V::MultipleString(v) => v.len(),
            V::MultipleTime(v) => v.len(),
            V::MultipleGuid(v) => v.len(),
            V::MultipleBinary(v) => v.len(),
            _ => return None,
        })
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Integer32(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer64(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Floating64(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<Vec<u8>> for PropertyValue {
    fn from(value: Vec<u8>) -> Self {
        PropertyValue::Binary(value)
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(value: DateTime<Utc>) -> Self {
        PropertyValue::Time(value)
    }
}

impl From<Guid> for PropertyValue {
    fn from(value: Guid) -> Self {
        PropertyValue::Guid(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(value: Vec<String>) -> Self {
        PropertyValue::MultipleString(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes_round_trip() {
        for code in 0u16..=0x1200 {
            if let Some(ty) = PropertyType::from_code(code) {
                assert_eq!(ty.code(), code);
            }
        }
        assert_eq!(PropertyType::from_code(0x0001), None);
    }

    #[test]
    fn test_multi_and_base() {
        assert_eq!(PropertyType::String.multi(), Some(PropertyType::MultipleString));
        assert_eq!(PropertyType::MultipleBinary.base(), PropertyType::Binary);
        assert_eq!(PropertyType::Object.multi(), None);
        assert_eq!(PropertyType::Boolean.multi(), None);
        assert!(PropertyType::MultipleGuid.is_multi_valued());
    }

    #[test]
    fn test_inline_types() {
        assert!(PropertyType::Boolean.is_inline());
        assert!(PropertyType::Time.is_inline());
        assert!(!PropertyType::Guid.is_inline());
        assert!(!PropertyType::String.is_inline());
        assert!(!PropertyType::MultipleInteger32.is_inline());
    }

    #[test]
    fn test_property_tag() {
        assert_eq!(property_tag(0x0037, PropertyType::String), 0x0037_001F);
        let subject = PropertyIdentity::standard(0x0037, PropertyType::String);
        assert_eq!(subject.tag(), Some(0x0037_001F));
        assert_eq!(subject.to_string(), "0037001F");
    }

    #[test]
    fn test_default_flags() {
        assert_eq!(PropertyFlags::default().bits(), 6);
    }

    #[test]
    fn test_value_types() {
        assert_eq!(PropertyValue::from("x").property_type(), PropertyType::String);
        assert_eq!(
            PropertyValue::MultipleBinary(vec![vec![1]]).property_type(),
            PropertyType::MultipleBinary
        );
        assert_eq!(PropertyValue::MultipleInteger32(vec![1, 2, 3]).element_count(), Some(3));
        assert_eq!(PropertyValue::Integer32(1).element_count(), None);
    }

    #[test]
    fn test_named_names_compare_by_content() {
        let a = NamedPropertyName::String(Cow::Borrowed("Location"));
        let b = NamedPropertyName::string("Location");
        assert_eq!(a, b);
    }
}
