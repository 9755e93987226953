//! Compressed RTF support.
//!
//! This module implements the LZFu format specified in MS-OXRTFCP, which
//! Outlook uses for `PidTagRtfCompressed`:
//!
//! ```text
//! +----------------+------------+-----------+-------+----------------------+
//! | COMPSIZE (u32) | RAWSIZE    | COMPTYPE  | CRC   | payload ...          |
//! | bytes after it | (u32)      | LZFu/MELA | (u32) |                      |
//! +----------------+------------+-----------+-------+----------------------+
//! ```
//!
//! The payload is a run of groups: one control byte whose bits (LSB first)
//! flag each of the following eight tokens as a literal byte (0) or a
//! big-endian 16-bit dictionary reference (1) holding a 12-bit offset and a
//! 4-bit length (match length - 2). The 4096-byte circular dictionary starts
//! out holding a fixed RTF prefix. A reference pointing at the current write
//! position ends the stream.

use super::error::{RtfError, RtfResult};
use crate::common::crc::crc32_raw;
use serde::{Deserialize, Serialize};
use zerocopy::{FromBytes, IntoBytes, LE, U32};
use zerocopy_derive::{
    FromBytes as DeriveFromBytes, Immutable, IntoBytes as DeriveIntoBytes, KnownLayout,
};

/// Magic signature for compressed RTF
const COMPRESSED_SIGNATURE: &[u8; 4] = b"LZFu";

/// Magic signature for uncompressed RTF (stored with compression header)
const UNCOMPRESSED_SIGNATURE: &[u8; 4] = b"MELA";

/// Initial dictionary contents
const INIT_DICT: &[u8; INIT_DICT_SIZE] = b"{\\rtf1\\ansi\\mac\\deff0\\deftab720{\\fonttbl;}\
{\\f0\\fnil \\froman \\fswiss \\fmodern \\fscript \\fdecor MS Sans SerifSymbolArial\
Times New RomanCourier{\\colortbl\\red0\\green0\\blue0\r\n\\par \\pard\\plain\\f0\\fs20\
\\b\\i\\u\\tab\\tx";

/// Size of initial dictionary
const INIT_DICT_SIZE: usize = 207;

/// Dictionary size
const DICT_SIZE: usize = 4096;

/// Shortest and longest encodable match
const MIN_MATCH: usize = 2;
const MAX_MATCH: usize = 17;

/// Header size in bytes
const HEADER_SIZE: usize = 16;

/// How the compressor chooses between LZFu and raw storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RtfCompression {
    /// LZFu unless the payload would not be smaller than the input
    #[default]
    Auto,
    /// Always LZFu
    Always,
    /// Always raw (`MELA`)
    Never,
}

/// Compressed RTF header (16 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, DeriveIntoBytes, DeriveFromBytes, Immutable, KnownLayout)]
struct CompressedRtfHeader {
    /// Size of everything after this field
    compressed_size: U32<LE>,
    /// Size of the uncompressed RTF
    raw_size: U32<LE>,
    /// Compression type signature
    compression_type: [u8; 4],
    /// CRC32 of the payload, zero for raw storage
    crc32: U32<LE>,
}

/// Detect if data carries a compressed RTF header
pub fn is_compressed_rtf(data: &[u8]) -> bool {
    if data.len() < HEADER_SIZE {
        return false;
    }
    let signature = &data[8..12];
    signature == COMPRESSED_SIGNATURE || signature == UNCOMPRESSED_SIGNATURE
}

/// Sliding dictionary shared by the encoder and the decoder
struct Dictionary {
    buf: [u8; DICT_SIZE],
    /// Next position to write
    write_pos: usize,
    /// Number of positions holding real data
    filled: usize,
}

impl Dictionary {
    fn new() -> Self {
        let mut buf = [0u8; DICT_SIZE];
        buf[..INIT_DICT_SIZE].copy_from_slice(INIT_DICT);
        Self {
            buf,
            write_pos: INIT_DICT_SIZE,
            filled: INIT_DICT_SIZE,
        }
    }

    #[inline]
    fn push(&mut self, byte: u8) {
        self.buf[self.write_pos] = byte;
        self.write_pos = (self.write_pos + 1) % DICT_SIZE;
        self.filled = (self.filled + 1).min(DICT_SIZE);
    }

    /// Length of the match starting at `offset` against `input`, as the
    /// decoder would reproduce it. Bytes copied by the reference itself
    /// become readable once written, so overlapping matches are measured by
    /// reading those positions back from `input`.
    fn match_len(&self, offset: usize, input: &[u8]) -> usize {
        let mut len = 0;
        while len < input.len() {
            let src = (offset + len) % DICT_SIZE;
            let ahead = (src + DICT_SIZE - self.write_pos) % DICT_SIZE;
            let byte = if ahead < len { input[ahead] } else { self.buf[src] };
            if byte != input[len] {
                break;
            }
            len += 1;
        }
        len
    }

    /// Longest match for the start of `input`; ties go to the most recent
    /// occurrence. Returns `(offset, length)` with `length == 0` when
    /// nothing of at least [`MIN_MATCH`] bytes matches.
    fn longest_match(&self, input: &[u8]) -> (usize, usize) {
        let window = &input[..input.len().min(MAX_MATCH)];
        if window.len() < MIN_MATCH {
            return (0, 0);
        }

        let (mut best_offset, mut best_len) = (0, 0);
        // The write position itself is the end-of-stream marker, never a source
        let candidates = if self.filled == DICT_SIZE {
            DICT_SIZE - 1
        } else {
            self.filled
        };
        for distance in 1..=candidates {
            let offset = (self.write_pos + DICT_SIZE - distance) % DICT_SIZE;
            if self.buf[offset] != window[0] {
                continue;
            }
            let len = self.match_len(offset, window);
            if len > best_len {
                best_offset = offset;
                best_len = len;
                if len == window.len() {
                    break;
                }
            }
        }

        if best_len >= MIN_MATCH {
            (best_offset, best_len)
        } else {
            (0, 0)
        }
    }
}

/// Collects tokens into control-byte groups
struct TokenWriter {
    out: Vec<u8>,
    /// Index of the pending control byte in `out`
    control_pos: usize,
    /// Tokens in the pending group
    count: u8,
}

impl TokenWriter {
    fn new(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
            control_pos: 0,
            count: 8,
        }
    }

    fn start_token(&mut self, is_reference: bool) {
        if self.count == 8 {
            self.control_pos = self.out.len();
            self.out.push(0);
            self.count = 0;
        }
        if is_reference {
            self.out[self.control_pos] |= 1 << self.count;
        }
        self.count += 1;
    }

    fn literal(&mut self, byte: u8) {
        self.start_token(false);
        self.out.push(byte);
    }

    fn reference(&mut self, offset: usize, len: usize) {
        self.start_token(true);
        let token = ((offset as u16) << 4) | ((len.saturating_sub(MIN_MATCH)) as u16 & 0x0F);
        self.out.extend_from_slice(&token.to_be_bytes());
    }
}

/// Encode `data` as an LZFu payload (without header).
fn lzfu_payload(data: &[u8]) -> Vec<u8> {
    let mut dict = Dictionary::new();
    let mut tokens = TokenWriter::new(data.len() / 2 + 3);

    let mut pos = 0;
    while pos < data.len() {
        let (offset, len) = dict.longest_match(&data[pos..]);
        if len >= MIN_MATCH {
            tokens.reference(offset, len);
            for &byte in &data[pos..pos + len] {
                dict.push(byte);
            }
            pos += len;
        } else {
            tokens.literal(data[pos]);
            dict.push(data[pos]);
            pos += 1;
        }
    }

    tokens.reference(dict.write_pos, MIN_MATCH);
    tokens.out
}

fn with_header(payload: &[u8], raw_size: usize, signature: &[u8; 4], crc32: u32) -> RtfResult<Vec<u8>> {
    let too_large = |_| RtfError::TooLarge(raw_size);
    let header = CompressedRtfHeader {
        compressed_size: U32::new(u32::try_from(payload.len() + 12).map_err(too_large)?),
        raw_size: U32::new(u32::try_from(raw_size).map_err(too_large)?),
        compression_type: *signature,
        crc32: U32::new(crc32),
    };
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

/// Compress RTF bytes, falling back to raw storage when LZFu does not help.
///
/// # Examples
///
/// ```
/// use oxmsg::rtf::{compress, decompress};
///
/// let rtf = b"{\\rtf1\\ansi\\ansicpg1252\\pard hello\\par hello\\par}";
/// let packed = compress(rtf)?;
/// assert_eq!(decompress(&packed)?, rtf);
/// # Ok::<(), oxmsg::rtf::RtfError>(())
/// ```
pub fn compress(data: &[u8]) -> RtfResult<Vec<u8>> {
    compress_with(data, RtfCompression::Auto)
}

/// Compress RTF bytes with an explicit mode.
pub fn compress_with(data: &[u8], mode: RtfCompression) -> RtfResult<Vec<u8>> {
    if mode == RtfCompression::Never {
        return with_header(data, data.len(), UNCOMPRESSED_SIGNATURE, 0);
    }

    let payload = lzfu_payload(data);
    if mode == RtfCompression::Auto && payload.len() >= data.len() {
        log::trace!(
            "rtf: LZFu payload {} >= raw {}, storing uncompressed",
            payload.len(),
            data.len()
        );
        return with_header(data, data.len(), UNCOMPRESSED_SIGNATURE, 0);
    }
    with_header(&payload, data.len(), COMPRESSED_SIGNATURE, crc32_raw(&payload))
}

/// Decompress compressed RTF (reference decoder).
///
/// # Errors
///
/// Returns an error if the header is short or unknown, the CRC does not
/// match, or the payload ends without an end-of-stream token.
pub fn decompress(data: &[u8]) -> RtfResult<Vec<u8>> {
    let (header, body) = CompressedRtfHeader::read_from_prefix(data).map_err(|_| {
        RtfError::InvalidStructure("header must be at least 16 bytes".to_string())
    })?;

    let declared = header.compressed_size.get() as usize;
    let payload_len = declared.checked_sub(12).ok_or_else(|| {
        RtfError::InvalidStructure(format!("compressed size {} below minimum", declared))
    })?;
    let payload = body.get(..payload_len).ok_or(RtfError::UnexpectedEof)?;
    let raw_size = header.raw_size.get() as usize;

    match &header.compression_type {
        sig if sig == COMPRESSED_SIGNATURE => {
            let actual = crc32_raw(payload);
            if actual != header.crc32.get() {
                return Err(RtfError::CrcMismatch {
                    expected: header.crc32.get(),
                    actual,
                });
            }
            decode_lzfu(payload, raw_size)
        },
        sig if sig == UNCOMPRESSED_SIGNATURE => Ok(payload[..raw_size.min(payload.len())].to_vec()),
        other => Err(RtfError::InvalidStructure(format!(
            "unknown compression type {:?}",
            other
        ))),
    }
}

fn decode_lzfu(payload: &[u8], raw_size: usize) -> RtfResult<Vec<u8>> {
    let mut dict = Dictionary::new();
    let mut out = Vec::with_capacity(raw_size);
    let mut input = payload.iter().copied();

    while let Some(control) = input.next() {
        for bit in 0..8 {
            if control & (1 << bit) == 0 {
                let byte = input.next().ok_or(RtfError::UnexpectedEof)?;
                out.push(byte);
                dict.push(byte);
                continue;
            }

            let hi = input.next().ok_or(RtfError::UnexpectedEof)?;
            let lo = input.next().ok_or(RtfError::UnexpectedEof)?;
            let token = u16::from_be_bytes([hi, lo]);
            let offset = (token >> 4) as usize;
            if offset == dict.write_pos {
                return Ok(out);
            }
            let len = (token & 0x0F) as usize + MIN_MATCH;
            for step in 0..len {
                let byte = dict.buf[(offset + step) % DICT_SIZE];
                out.push(byte);
                dict.push(byte);
            }
        }
    }

    Err(RtfError::UnexpectedEof)
}

/// Wrap plain text into a minimal RTF document.
///
/// Control characters of RTF are escaped, line breaks become `\par`, and
/// characters outside ASCII are written as `\uN?`.
pub fn rtf_from_text(text: &str) -> Vec<u8> {
    let mut rtf = String::with_capacity(text.len() + 128);
    rtf.push_str(
        "{\\rtf1\\ansi\\ansicpg1252\\deff0\\deftab720{\\fonttbl{\\f0\\fswiss Arial;}}\
         \\pard\\plain\\f0\\fs20 ",
    );
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' | '{' | '}' => {
                rtf.push('\\');
                rtf.push(ch);
            },
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                rtf.push_str("\\par\r\n");
            },
            '\n' => rtf.push_str("\\par\r\n"),
            '\t' => rtf.push_str("\\tab "),
            c if c.is_ascii() => rtf.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    rtf.push_str(&format!("\\u{}?", *unit as i16));
                }
            },
        }
    }
    rtf.push_str("\\par}");
    rtf.into_bytes()
}
