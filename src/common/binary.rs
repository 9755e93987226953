//! Binary encoding utilities shared by the container and the property codec.
//!
//! Everything in a message file is little-endian. These helpers append
//! fixed-width integers and UTF-16LE strings to byte buffers and convert
//! sizes to the 32-bit fields the formats use without silently truncating.

use chrono::{DateTime, Utc};
use zerocopy::{F32, F64, I16, I32, I64, IntoBytes, LE, U16, U32, U64};

/// Binary encoding error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryError {
    /// A length or offset does not fit in the target field
    Overflow { value: u64, limit: u64 },
}

impl std::fmt::Display for BinaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryError::Overflow { value, limit } => {
                write!(f, "Value {} exceeds field limit {}", value, limit)
            },
        }
    }
}

impl std::error::Error for BinaryError {}

/// Result type for binary operations
pub type BinaryResult<T> = Result<T, BinaryError>;

/// Number of 100-nanosecond intervals between 1601-01-01 and 1970-01-01.
const FILETIME_UNIX_EPOCH: i64 = 116_444_736_000_000_000;

/// Convert a byte count to a 32-bit length field.
///
/// # Examples
///
/// ```
/// use oxmsg::common::binary::checked_u32;
/// assert_eq!(checked_u32(12).unwrap(), 12);
/// assert!(checked_u32(u32::MAX as usize + 1).is_err());
/// ```
#[inline]
pub fn checked_u32(len: usize) -> BinaryResult<u32> {
    u32::try_from(len).map_err(|_| BinaryError::Overflow {
        value: len as u64,
        limit: u32::MAX as u64,
    })
}

/// Append a little-endian u16.
#[inline]
pub fn write_u16_le(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(U16::<LE>::new(value).as_bytes());
}

/// Append a little-endian i16.
#[inline]
pub fn write_i16_le(buf: &mut Vec<u8>, value: i16) {
    buf.extend_from_slice(I16::<LE>::new(value).as_bytes());
}

/// Append a little-endian u32.
///
/// # Examples
///
/// ```
/// use oxmsg::common::binary::write_u32_le;
/// let mut buf = Vec::new();
/// write_u32_le(&mut buf, 0x12345678);
/// assert_eq!(buf, [0x78, 0x56, 0x34, 0x12]);
/// ```
#[inline]
pub fn write_u32_le(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(U32::<LE>::new(value).as_bytes());
}

/// Append a little-endian i32.
#[inline]
pub fn write_i32_le(buf: &mut Vec<u8>, value: i32) {
    buf.extend_from_slice(I32::<LE>::new(value).as_bytes());
}

/// Append a little-endian u64.
#[inline]
pub fn write_u64_le(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(U64::<LE>::new(value).as_bytes());
}

/// Append a little-endian i64.
#[inline]
pub fn write_i64_le(buf: &mut Vec<u8>, value: i64) {
    buf.extend_from_slice(I64::<LE>::new(value).as_bytes());
}

/// Append a little-endian IEEE-754 single.
#[inline]
pub fn write_f32_le(buf: &mut Vec<u8>, value: f32) {
    buf.extend_from_slice(F32::<LE>::new(value).as_bytes());
}

/// Append a little-endian IEEE-754 double.
#[inline]
pub fn write_f64_le(buf: &mut Vec<u8>, value: f64) {
    buf.extend_from_slice(F64::<LE>::new(value).as_bytes());
}

/// Zero-pad `buf` until its length is a multiple of `align`.
#[inline]
pub fn pad_to(buf: &mut Vec<u8>, align: usize) {
    let rem = buf.len() % align;
    if rem != 0 {
        buf.resize(buf.len() + (align - rem), 0);
    }
}

/// Encode a string as UTF-16LE without a terminator.
///
/// # Examples
///
/// ```
/// use oxmsg::common::binary::encode_utf16le;
/// assert_eq!(encode_utf16le("Hi"), vec![0x48, 0x00, 0x69, 0x00]);
/// ```
pub fn encode_utf16le(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len() * 2);
    for unit in s.encode_utf16() {
        write_u16_le(&mut out, unit);
    }
    out
}

/// Encode a string as UTF-16LE followed by a two-byte null terminator.
pub fn encode_utf16le_nul(s: &str) -> Vec<u8> {
    let mut out = encode_utf16le(s);
    out.extend_from_slice(&[0, 0]);
    out
}

/// Convert a UTC timestamp to a Windows FILETIME (100ns ticks since 1601).
///
/// Timestamps before 1601 clamp to zero.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use oxmsg::common::binary::filetime_from_datetime;
/// let epoch = Utc.timestamp_opt(0, 0).unwrap();
/// assert_eq!(filetime_from_datetime(&epoch), 116_444_736_000_000_000);
/// ```
pub fn filetime_from_datetime(dt: &DateTime<Utc>) -> u64 {
    let ticks = dt
        .timestamp()
        .saturating_mul(10_000_000)
        .saturating_add(i64::from(dt.timestamp_subsec_nanos() / 100))
        .saturating_add(FILETIME_UNIX_EPOCH);
    ticks.max(0) as u64
}
