//! Recipients and their `__recip_version1.0_#XXXXXXXX` storages.

use super::common::{Address, DEFAULT_ADDRESS_TYPE};
use crate::msg::error::MsgResult;
use crate::msg::identifiers::generate_instance_key;
use crate::msg::record_set::PropertyRecordSet;
use crate::msg::tags;

/// Prefix of recipient storage names.
pub const RECIPIENT_STORAGE_PREFIX: &str = "__recip_version1.0_#";

/// recipSendable
const RECIPIENT_SENDABLE: i32 = 0x0000_0001;
/// DT_MAILUSER
const DISPLAY_TYPE_MAILUSER: i32 = 0;

/// Name of the storage of the recipient at `index`.
pub fn recipient_storage_name(index: usize) -> String {
    format!("{}{:08X}", RECIPIENT_STORAGE_PREFIX, index)
}

/// PidTagRecipientType values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipientKind {
    #[default]
    To = 1,
    Cc = 2,
    Bcc = 3,
}

/// A message recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub email: String,
    pub display_name: Option<String>,
    pub address_type: String,
    pub kind: RecipientKind,
}

impl Recipient {
    /// SMTP recipient of the given kind.
    pub fn new(email: impl Into<String>, kind: RecipientKind) -> Self {
        Self {
            email: email.into(),
            display_name: None,
            address_type: DEFAULT_ADDRESS_TYPE.to_string(),
            kind,
        }
    }

    pub fn to(email: impl Into<String>) -> Self {
        Self::new(email, RecipientKind::To)
    }

    pub fn cc(email: impl Into<String>) -> Self {
        Self::new(email, RecipientKind::Cc)
    }

    pub fn bcc(email: impl Into<String>) -> Self {
        Self::new(email, RecipientKind::Bcc)
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_address_type(mut self, address_type: impl Into<String>) -> Self {
        self.address_type = address_type.into();
        self
    }

    fn address(&self) -> Address {
        Address {
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            address_type: self.address_type.clone(),
        }
    }

    /// Display name, falling back to the address.
    pub fn display(&self) -> &str {
        match &self.display_name {
            Some(name) if !name.is_empty() => name,
            _ => &self.email,
        }
    }

    /// Properties of the recipient storage; `row` is its position.
    pub fn properties(&self, row: u32) -> MsgResult<PropertyRecordSet> {
        let address = self.address();
        let mut set = PropertyRecordSet::new();
        set.set(&tags::ROW_ID, row as i32)?;
        set.set(&tags::RECIPIENT_TYPE, self.kind as i32)?;
        set.set(&tags::DISPLAY_NAME, self.display())?;
        set.set(&tags::RECIPIENT_DISPLAY_NAME, self.display())?;
        set.set(&tags::EMAIL_ADDRESS, self.email.as_str())?;
        set.set(&tags::ADDRESS_TYPE, self.address_type.as_str())?;
        if address.is_smtp() {
            set.set(&tags::SMTP_ADDRESS, self.email.as_str())?;
        }
        set.set(&tags::ENTRY_ID, address.entry_id())?;
        set.set(&tags::SEARCH_KEY, address.search_key())?;
        set.set(&tags::INSTANCE_KEY, generate_instance_key())?;
        set.set(&tags::OBJECT_TYPE, tags::MAPI_MAILUSER)?;
        set.set(&tags::DISPLAY_TYPE, DISPLAY_TYPE_MAILUSER)?;
        set.set(&tags::RESPONSIBILITY, false)?;
        set.set(&tags::SEND_RICH_INFO, false)?;
        set.set(&tags::RECIPIENT_FLAGS, RECIPIENT_SENDABLE)?;
        set.set(&tags::RECIPIENT_TRACK_STATUS, 0)?;
        Ok(set)
    }
}
