//! Windows code pages for 8-bit (`String8`) property values.
//!
//! `encoding_rs` does the conversion; this module maps the numeric code page
//! stored in `PidTagMessageCodepage` to an encoder.

use encoding_rs::Encoding;

/// Code page used when none is configured (Western European).
pub const DEFAULT_CODE_PAGE: u32 = 1252;

/// Map a Windows code page identifier to an `encoding_rs` encoding.
///
/// Only byte-oriented code pages are listed; `String8` never holds UTF-16.
///
/// # Examples
///
/// ```
/// use oxmsg::common::codepage::codepage_to_encoding;
/// assert_eq!(codepage_to_encoding(1252), Some(encoding_rs::WINDOWS_1252));
/// assert_eq!(codepage_to_encoding(1200), None);
/// ```
pub fn codepage_to_encoding(codepage: u32) -> Option<&'static Encoding> {
    match codepage {
        874 => Some(encoding_rs::WINDOWS_874),
        1250 => Some(encoding_rs::WINDOWS_1250),
        1251 => Some(encoding_rs::WINDOWS_1251),
        1252 => Some(encoding_rs::WINDOWS_1252),
        1253 => Some(encoding_rs::WINDOWS_1253),
        1254 => Some(encoding_rs::WINDOWS_1254),
        1255 => Some(encoding_rs::WINDOWS_1255),
        1256 => Some(encoding_rs::WINDOWS_1256),
        1257 => Some(encoding_rs::WINDOWS_1257),
        1258 => Some(encoding_rs::WINDOWS_1258),

        // East Asian
        932 => Some(encoding_rs::SHIFT_JIS),
        936 => Some(encoding_rs::GBK),
        949 => Some(encoding_rs::EUC_KR),
        950 => Some(encoding_rs::BIG5),
        20932 => Some(encoding_rs::EUC_JP),
        50220 => Some(encoding_rs::ISO_2022_JP),
        54936 => Some(encoding_rs::GB18030),

        // ISO 8859
        28592 => Some(encoding_rs::ISO_8859_2),
        28593 => Some(encoding_rs::ISO_8859_3),
        28594 => Some(encoding_rs::ISO_8859_4),
        28595 => Some(encoding_rs::ISO_8859_5),
        28596 => Some(encoding_rs::ISO_8859_6),
        28597 => Some(encoding_rs::ISO_8859_7),
        28598 => Some(encoding_rs::ISO_8859_8),
        28605 => Some(encoding_rs::ISO_8859_15),
        20866 => Some(encoding_rs::KOI8_R),

        10000 => Some(encoding_rs::MACINTOSH),
        65001 => Some(encoding_rs::UTF_8),
        _ => None,
    }
}

/// Encode `text` in `encoding` followed by a single NUL byte.
///
/// Characters the code page cannot represent are replaced by numeric
/// character references, and the replacement is logged.
pub fn encode_string8(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    let (bytes, _, had_unmappable) = encoding.encode(text);
    if had_unmappable {
        log::warn!(
            "codepage: {} cannot represent every character of a String8 value",
            encoding.name()
        );
    }
    let mut out = Vec::with_capacity(bytes.len() + 1);
    out.extend_from_slice(&bytes);
    out.push(0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codepage_to_encoding_common() {
        assert_eq!(codepage_to_encoding(1251), Some(encoding_rs::WINDOWS_1251));
        assert_eq!(codepage_to_encoding(932), Some(encoding_rs::SHIFT_JIS));
        assert_eq!(codepage_to_encoding(65001), Some(encoding_rs::UTF_8));
    }

    #[test]
    fn test_codepage_to_encoding_unsupported() {
        assert_eq!(codepage_to_encoding(99999), None);
        assert_eq!(codepage_to_encoding(1201), None);
    }

    #[test]
    fn test_encode_string8() {
        assert_eq!(encode_string8("Caf\u{e9}", encoding_rs::WINDOWS_1252), b"Caf\xE9\0".to_vec());
        assert_eq!(encode_string8("", encoding_rs::WINDOWS_1252), vec![0]);
    }
}
