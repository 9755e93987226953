//! CRC-32 as used by compressed RTF and the named-property hash streams.
//!
//! MS-OXRTFCP defines its checksum over the usual reflected CRC-32 table but
//! starts from zero and skips the final inversion. `crc32fast` always inverts
//! on entry and exit, so the raw variant is obtained by pre-inverting the
//! initial state and post-inverting the result.

/// Compute the MS-OXRTFCP CRC-32 (initial value 0, no final XOR).
///
/// # Examples
///
/// ```
/// use oxmsg::common::crc::crc32_raw;
/// assert_eq!(crc32_raw(b""), 0);
/// ```
pub fn crc32_raw(data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new_with_initial(!0u32);
    hasher.update(data);
    !hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bytewise reference straight from the MS-OXRTFCP pseudo code.
    fn reference(data: &[u8]) -> u32 {
        let mut crc = 0u32;
        for &b in data {
            let mut c = (crc ^ b as u32) & 0xFF;
            for _ in 0..8 {
                c = if c & 1 != 0 { 0xEDB8_8320 ^ (c >> 1) } else { c >> 1 };
            }
            crc = c ^ (crc >> 8);
        }
        crc
    }

    #[test]
    fn test_matches_reference() {
        for input in [&b"a"[..], b"{\\rtf1\\ansi}", b"The quick brown fox", &[0u8; 64]] {
            assert_eq!(crc32_raw(input), reference(input));
        }
    }

    #[test]
    fn test_differs_from_standard_crc32() {
        let data = b"123456789";
        assert_ne!(crc32_raw(data), crc32fast::hash(data));
    }
}
