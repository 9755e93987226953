//! Ordered, identity-unique collection of property values.

use super::error::{MsgError, MsgResult};
use super::named::NamedPropertyTable;
use super::property::{
    NAMED_ID_BASE, PropertyFlags, PropertyIdentity, PropertyKey, PropertyType, PropertyValue,
};
use std::collections::BTreeMap;

/// One stored property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry {
    pub value: PropertyValue,
    pub flags: PropertyFlags,
}

impl PropertyEntry {
    #[inline]
    pub fn value_type(&self) -> PropertyType {
        self.value.property_type()
    }
}

/// Property values of one storage.
///
/// Keys are unique and the last write wins. Iteration is ordered by key:
/// standard properties by id, then named properties by property set and
/// name. The encoder orders records by their final numeric tag.
#[derive(Debug, Clone, Default)]
pub struct PropertyRecordSet {
    entries: BTreeMap<PropertyKey, PropertyEntry>,
}

impl PropertyRecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `identity` with default flags.
    ///
    /// # Errors
    ///
    /// [`MsgError::TypeMismatch`] when the value type is not the declared one,
    /// [`MsgError::InvalidInput`] for a standard id at or above 0x8000.
    pub fn set(&mut self, identity: &PropertyIdentity, value: impl Into<PropertyValue>) -> MsgResult<()> {
        self.set_with_flags(identity, value, PropertyFlags::default())
    }

    /// Store `value` under `identity` with explicit record flags.
    pub fn set_with_flags(
        &mut self,
        identity: &PropertyIdentity,
        value: impl Into<PropertyValue>,
        flags: PropertyFlags,
    ) -> MsgResult<()> {
        if let PropertyKey::Standard(id) = &identity.key {
            if *id >= NAMED_ID_BASE {
                return Err(MsgError::InvalidInput(format!(
                    "standard property id {:#06X} is in the named range",
                    id
                )));
            }
        }
        let value = value.into();
        let actual = value.property_type();
        if actual != identity.value_type {
            return Err(MsgError::TypeMismatch {
                property: identity.to_string(),
                expected: identity.value_type,
                actual,
            });
        }
        self.entries
            .insert(identity.key.clone(), PropertyEntry { value, flags });
        Ok(())
    }

    /// Store `value` and resolve its named identity in `table` first.
    ///
    /// Returns the numeric id the property will be written under.
    pub fn set_resolved(
        &mut self,
        table: &mut NamedPropertyTable,
        identity: &PropertyIdentity,
        value: impl Into<PropertyValue>,
    ) -> MsgResult<u16> {
        let id = match &identity.key {
            PropertyKey::Standard(id) => *id,
            PropertyKey::Named(key) => table.resolve_key(key)?,
        };
        self.set(identity, value)?;
        Ok(id)
    }

    /// Store a string when it is present and non-empty.
    pub fn set_text(&mut self, identity: &PropertyIdentity, text: Option<&str>) -> MsgResult<()> {
        match text {
            Some(text) if !text.is_empty() => self.set(identity, text),
            _ => Ok(()),
        }
    }

    pub fn get(&self, key: &PropertyKey) -> Option<&PropertyEntry> {
        self.entries.get(key)
    }

    /// Value stored under `identity`'s key.
    pub fn value(&self, identity: &PropertyIdentity) -> Option<&PropertyValue> {
        self.entries.get(&identity.key).map(|entry| &entry.value)
    }

    pub fn contains(&self, identity: &PropertyIdentity) -> bool {
        self.entries.contains_key(&identity.key)
    }

    pub fn remove(&mut self, identity: &PropertyIdentity) -> Option<PropertyEntry> {
        self.entries.remove(&identity.key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PropertyKey, &PropertyEntry)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::tags;

    #[test]
    fn test_standard_id_in_named_range_rejected() {
        let mut set = PropertyRecordSet::new();
        let id = PropertyIdentity::standard(0x8001, PropertyType::Integer32);
        assert!(matches!(set.set(&id, 1), Err(MsgError::InvalidInput(_))));
        assert!(set.is_empty());
        let last_standard = PropertyIdentity::standard(0x7FFF, PropertyType::Integer32);
        set.set(&last_standard, 1).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let mut set = PropertyRecordSet::new();
        set.set(&tags::SUBJECT, "first").unwrap();
        set.set(&tags::SUBJECT, "second").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.value(&tags::SUBJECT),
            Some(&PropertyValue::String("second".into()))
        );
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let mut set = PropertyRecordSet::new();
        let err = set.set(&tags::SUBJECT, 5).unwrap_err();
        assert!(matches!(
            err,
            MsgError::TypeMismatch { expected: PropertyType::String, actual: PropertyType::Integer32, .. }
        ));
        let err = set
            .set(&tags::KEYWORDS, PropertyValue::MultipleInteger32(vec![1]))
            .unwrap_err();
        assert!(matches!(err, MsgError::TypeMismatch { .. }));
        assert!(set.is_empty());
    }

    #[test]
    fn test_deterministic_order() {
        let mut set = PropertyRecordSet::new();
        set.set(&tags::LOCATION, "Room").unwrap();
        set.set(&tags::SUBJECT, "s").unwrap();
        set.set(&tags::MESSAGE_CLASS, "IPM.Note").unwrap();
        let keys: Vec<_> = set.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(
            keys,
            vec![PropertyKey::Standard(0x001A), PropertyKey::Standard(0x0037), tags::LOCATION.key]
        );
    }

    #[test]
    fn test_set_resolved_allocates() {
        let mut table = NamedPropertyTable::new();
        let mut set = PropertyRecordSet::new();
        assert_eq!(set.set_resolved(&mut table, &tags::SUBJECT, "s").unwrap(), 0x0037);
        assert_eq!(set.set_resolved(&mut table, &tags::LOCATION, "Room").unwrap(), 0x8000);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_set_text_skips_empty() {
        let mut set = PropertyRecordSet::new();
        set.set_text(&tags::SUBJECT, Some("")).unwrap();
        set.set_text(&tags::BODY, None).unwrap();
        assert!(set.is_empty());
        set.set_text(&tags::BODY, Some("hi")).unwrap();
        assert!(set.contains(&tags::BODY));
    }

    #[test]
    fn test_flags_kept() {
        let mut set = PropertyRecordSet::new();
        set.set_with_flags(&tags::MESSAGE_FLAGS, 1, PropertyFlags::READABLE).unwrap();
        let entry = set.get(&tags::MESSAGE_FLAGS.key).unwrap();
        assert_eq!(entry.flags, PropertyFlags::READABLE);
        assert_eq!(entry.value_type(), PropertyType::Integer32);
    }
}
