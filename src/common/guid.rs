//! GUIDs in the Microsoft mixed-endian wire layout.
//!
//! `Data1`, `Data2` and `Data3` are stored little-endian, the trailing eight
//! bytes as-is. Property sets, CLSIDs and provider UIDs all use this layout.

use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// A 16-byte GUID stored in its on-disk byte order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Guid([u8; 16]);

/// Error returned when a GUID string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid GUID string: {0}")]
pub struct ParseGuidError(String);

impl Guid {
    /// The all-zero GUID.
    pub const NIL: Guid = Guid([0; 16]);

    /// Build a GUID from its textual fields.
    ///
    /// `Guid::from_fields(0x00020329, 0x0000, 0x0000, [0xC0, 0, 0, 0, 0, 0, 0, 0x46])`
    /// is `{00020329-0000-0000-C000-000000000046}`.
    pub const fn from_fields(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        let d1 = data1.to_le_bytes();
        let d2 = data2.to_le_bytes();
        let d3 = data3.to_le_bytes();
        Guid([
            d1[0], d1[1], d1[2], d1[3], d2[0], d2[1], d3[0], d3[1], data4[0], data4[1], data4[2],
            data4[3], data4[4], data4[5], data4[6], data4[7],
        ])
    }

    /// Wrap raw on-disk bytes.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Guid(bytes)
    }

    /// Generate a random RFC4122 v4 GUID.
    pub fn new_v4() -> Self {
        let mut bytes = [0u8; 16];
        let mut rng = rand::rng();
        rng.fill(&mut bytes);
        // Version and variant live in Data3 (little-endian) and Data4[0]
        bytes[7] = (bytes[7] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;
        Guid(bytes)
    }

    /// On-disk bytes.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Format as `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}`.
    pub fn to_braced_string(&self) -> String {
        format!("{{{}}}", self)
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        let data1 = u32::from_le_bytes([b[0], b[1], b[2], b[3]]);
        let data2 = u16::from_le_bytes([b[4], b[5]]);
        let data3 = u16::from_le_bytes([b[6], b[7]]);
        write!(f, "{:08X}-{:04X}-{:04X}-{:02X}{:02X}-", data1, data2, data3, b[8], b[9])?;
        for byte in &b[10..] {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guid({{{}}})", self)
    }
}

impl FromStr for Guid {
    type Err = ParseGuidError;

    /// Accepts the braced and bare hyphenated forms, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('{')
            .and_then(|t| t.strip_suffix('}'))
            .unwrap_or(trimmed);

        let parts: Vec<&str> = inner.split('-').collect();
        let widths = [8, 4, 4, 4, 12];
        if parts.len() != widths.len()
            || parts.iter().zip(widths).any(|(p, w)| p.len() != w)
            || !parts.iter().all(|p| p.bytes().all(|c| c.is_ascii_hexdigit()))
        {
            return Err(ParseGuidError(s.to_string()));
        }

        let err = |_| ParseGuidError(s.to_string());
        let data1 = u32::from_str_radix(parts[0], 16).map_err(err)?;
        let data2 = u16::from_str_radix(parts[1], 16).map_err(err)?;
        let data3 = u16::from_str_radix(parts[2], 16).map_err(err)?;
        let tail = format!("{}{}", parts[3], parts[4]);
        let mut data4 = [0u8; 8];
        for (i, slot) in data4.iter_mut().enumerate() {
            *slot = u8::from_str_radix(&tail[i * 2..i * 2 + 2], 16).map_err(err)?;
        }
        Ok(Guid::from_fields(data1, data2, data3, data4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_endian_layout() {
        let guid = Guid::from_fields(
            0x00020329,
            0x0000,
            0x0000,
            [0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x46],
        );
        assert_eq!(
            guid.as_bytes(),
            &[0x29, 0x03, 0x02, 0x00, 0, 0, 0, 0, 0xC0, 0, 0, 0, 0, 0, 0, 0x46]
        );
        assert_eq!(guid.to_string(), "00020329-0000-0000-C000-000000000046");
    }

    #[test]
    fn test_parse_braced_and_bare() {
        let braced: Guid = "{00062002-0000-0000-c000-000000000046}".parse().unwrap();
        let bare: Guid = "00062002-0000-0000-C000-000000000046".parse().unwrap();
        assert_eq!(braced, bare);
        assert_eq!(braced.to_braced_string(), "{00062002-0000-0000-C000-000000000046}");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not-a-guid".parse::<Guid>().is_err());
        assert!("{00062002-0000-0000-C000-00000000004}".parse::<Guid>().is_err());
        assert!("0006200G-0000-0000-C000-000000000046".parse::<Guid>().is_err());
    }

    #[test]
    fn test_new_v4_sets_version_bits() {
        let guid = Guid::new_v4();
        let s = guid.to_string();
        assert_eq!(&s[14..15], "4");
        assert_ne!(guid, Guid::new_v4());
    }
}
