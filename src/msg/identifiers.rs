//! MAPI identifier structures used as property values.
//!
//! All functions are stateless apart from the instance-key counter, which is
//! atomic, and may be called from any thread.

use crate::common::binary::{encode_utf16le_nul, write_u16_le};
use rand::Rng;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

/// Provider UID stamped into generated entry and record keys.
pub const PROVIDER_UID: [u8; 16] = [
    0x6F, 0x78, 0x6D, 0x73, 0x67, 0x2D, 0x70, 0x72, 0x6F, 0x76, 0x69, 0x64, 0x65, 0x72, 0x00, 0x01,
];

/// Provider UID of one-off entry ids (MS-OXCDATA 2.2.5.1).
pub const ONE_OFF_PROVIDER_UID: [u8; 16] = [
    0x81, 0x2B, 0x1F, 0xA4, 0xBE, 0xA3, 0x10, 0x19, 0x9D, 0x6E, 0x00, 0xDD, 0x01, 0x0F, 0x54, 0x02,
];

/// Length of a generated entry id or record key.
pub const ENTRY_ID_LEN: usize = 36;

const ONE_OFF_UNICODE: u16 = 0x8000;
const ONE_OFF_NO_RICH_INFO: u16 = 0x0001;

static INSTANCE_COUNTER: AtomicU32 = AtomicU32::new(0);
static INSTANCE_SEED: OnceLock<u32> = OnceLock::new();

fn provider_key() -> Vec<u8> {
    let mut id = Vec::with_capacity(ENTRY_ID_LEN);
    id.extend_from_slice(&[0u8; 4]);
    id.extend_from_slice(&PROVIDER_UID);
    let mut unique = [0u8; 16];
    rand::rng().fill(&mut unique);
    id.extend_from_slice(&unique);
    id
}

/// Generate an entry id: 4 flag bytes, the provider UID and 16 random bytes.
pub fn generate_entry_id() -> Vec<u8> {
    provider_key()
}

/// Generate a record key with the same shape as an entry id.
pub fn generate_record_key() -> Vec<u8> {
    provider_key()
}

/// Generate a 4-byte instance key, distinct on every call in this process.
pub fn generate_instance_key() -> Vec<u8> {
    let seed = *INSTANCE_SEED.get_or_init(|| rand::rng().random());
    let n = INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed);
    // Odd multiplier keeps the mapping a bijection on u32
    let key = n.wrapping_mul(0x9E37_79B1) ^ seed;
    key.to_le_bytes().to_vec()
}

/// Build a search key: `ADDRTYPE:EMAIL` upper-cased, with a trailing zero byte.
///
/// ```
/// use oxmsg::msg::identifiers::generate_search_key;
/// assert_eq!(generate_search_key("smtp", "a@b.c"), b"SMTP:A@B.C\0".to_vec());
/// ```
pub fn generate_search_key(address_type: &str, email: &str) -> Vec<u8> {
    let mut key = format!("{}:{}", address_type.to_uppercase(), email.to_uppercase()).into_bytes();
    key.push(0);
    key
}

/// Build a Unicode one-off entry id carrying the address inline.
pub fn generate_one_off_entry_id(display_name: &str, address_type: &str, email: &str) -> Vec<u8> {
    let mut id = Vec::with_capacity(24 + (display_name.len() + address_type.len() + email.len() + 3) * 2);
    id.extend_from_slice(&[0u8; 4]);
    id.extend_from_slice(&ONE_OFF_PROVIDER_UID);
    write_u16_le(&mut id, 0);
    write_u16_le(&mut id, ONE_OFF_UNICODE | ONE_OFF_NO_RICH_INFO);
    id.extend_from_slice(&encode_utf16le_nul(display_name));
    id.extend_from_slice(&encode_utf16le_nul(address_type));
    id.extend_from_slice(&encode_utf16le_nul(email));
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_entry_id_shape() {
        let a = generate_entry_id();
        let b = generate_entry_id();
        assert_eq!(a.len(), ENTRY_ID_LEN);
        assert_eq!(&a[..4], &[0, 0, 0, 0]);
        assert_eq!(&a[4..20], &PROVIDER_UID);
        assert_ne!(a, b);
        assert_eq!(generate_record_key().len(), ENTRY_ID_LEN);
    }

    #[test]
    fn test_instance_keys_unique() {
        let keys: HashSet<Vec<u8>> = (0..1000).map(|_| generate_instance_key()).collect();
        assert_eq!(keys.len(), 1000);
        assert!(keys.iter().all(|k| k.len() == 4));
    }

    #[test]
    fn test_instance_keys_unique_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| (0..250).map(|_| generate_instance_key()).collect::<Vec<_>>()))
            .collect();
        let mut all = HashSet::new();
        for handle in handles {
            for key in handle.join().unwrap() {
                assert!(all.insert(key));
            }
        }
    }

    #[test]
    fn test_search_key_deterministic() {
        let a = generate_search_key("SMTP", "user@example.com");
        let b = generate_search_key("SMTP", "user@example.com");
        assert_eq!(a, b);
        assert_eq!(a, b"SMTP:USER@EXAMPLE.COM\0".to_vec());
    }

    #[test]
    fn test_one_off_entry_id() {
        let id = generate_one_off_entry_id("Jo", "SMTP", "j@x");
        assert_eq!(&id[4..20], &ONE_OFF_PROVIDER_UID);
        assert_eq!(&id[20..24], &[0x00, 0x00, 0x01, 0x80]);
        assert_eq!(&id[24..30], &[b'J', 0, b'o', 0, 0, 0]);
        assert!(id.ends_with(&[b'x', 0, 0, 0]));
        assert_eq!(id.len(), 24 + 6 + 10 + 8);
    }
}
