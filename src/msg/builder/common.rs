//! Fields and properties shared by every message kind.

use super::attachment::Attachment;
use super::recipient::{Recipient, RecipientKind};
use crate::msg::error::MsgResult;
use crate::msg::identifiers::{
    generate_one_off_entry_id, generate_record_key, generate_search_key,
};
use crate::msg::named::NamedPropertyTable;
use crate::msg::options::MsgOptions;
use crate::msg::property::{PropertyFlags, PropertyIdentity, PropertyValue};
use crate::msg::record_set::PropertyRecordSet;
use crate::msg::tags;
use chrono::{DateTime, Utc};

/// Address type used when none is given.
pub const DEFAULT_ADDRESS_TYPE: &str = "SMTP";

/// A mailbox: e-mail address, display name and address type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub email: String,
    pub display_name: Option<String>,
    pub address_type: String,
}

impl Address {
    /// SMTP address without a display name.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
            address_type: DEFAULT_ADDRESS_TYPE.to_string(),
        }
    }

    /// SMTP address with a display name.
    pub fn with_name(email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
            ..Self::new(email)
        }
    }

    /// Display name, falling back to the address.
    pub fn display(&self) -> &str {
        match &self.display_name {
            Some(name) if !name.is_empty() => name,
            _ => &self.email,
        }
    }

    pub fn is_smtp(&self) -> bool {
        self.address_type.eq_ignore_ascii_case(DEFAULT_ADDRESS_TYPE)
    }

    pub fn search_key(&self) -> Vec<u8> {
        generate_search_key(&self.address_type, &self.email)
    }

    pub fn entry_id(&self) -> Vec<u8> {
        generate_one_off_entry_id(self.display(), &self.address_type, &self.email)
    }
}

/// PidTagImportance values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Importance {
    Low = 0,
    #[default]
    Normal = 1,
    High = 2,
}

/// PidTagSensitivity values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sensitivity {
    #[default]
    Normal = 0,
    Personal = 1,
    Private = 2,
    Confidential = 3,
}

/// Content common to e-mails, appointments and tasks.
#[derive(Debug, Clone, Default)]
pub struct MessageCommon {
    pub subject: Option<String>,
    /// Plain-text body
    pub body: Option<String>,
    /// HTML body, stored as UTF-8
    pub html_body: Option<String>,
    /// RTF body, compressed on write
    pub rtf_body: Option<Vec<u8>>,
    pub sender: Option<Address>,
    /// Mailbox the message is sent on behalf of; defaults to the sender
    pub representing: Option<Address>,
    pub importance: Option<Importance>,
    pub sensitivity: Option<Sensitivity>,
    pub sent_on: Option<DateTime<Utc>>,
    pub received_on: Option<DateTime<Utc>>,
    pub internet_message_id: Option<String>,
    pub categories: Vec<String>,
    pub recipients: Vec<Recipient>,
    pub attachments: Vec<Attachment>,
    pub options: MsgOptions,
}

impl MessageCommon {
    fn display_list(&self, kind: RecipientKind) -> String {
        self.recipients
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.display())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn set_address(
    set: &mut PropertyRecordSet,
    address: &Address,
    props: [&PropertyIdentity; 6],
) -> MsgResult<()> {
    let [name, email, address_type, smtp, entry_id, search_key] = props;
    set.set(name, address.display())?;
    set.set(email, address.email.as_str())?;
    set.set(address_type, address.address_type.as_str())?;
    if address.is_smtp() {
        set.set(smtp, address.email.as_str())?;
    }
    set.set(entry_id, address.entry_id())?;
    set.set(search_key, address.search_key())?;
    Ok(())
}

/// Populate the properties every message kind shares.
///
/// `message_flags` carries the kind-specific PidTagMessageFlags bits; the
/// attachment bit is added here.
pub fn populate_common(
    set: &mut PropertyRecordSet,
    table: &mut NamedPropertyTable,
    common: &MessageCommon,
    message_class: &str,
    message_flags: i32,
) -> MsgResult<()> {
    set.set(&tags::MESSAGE_CLASS, message_class)?;

    if let Some(subject) = common.subject.as_deref() {
        set.set(&tags::SUBJECT, subject)?;
        set.set(&tags::NORMALIZED_SUBJECT, subject)?;
        set.set(&tags::CONVERSATION_TOPIC, subject)?;
    }

    set.set_text(&tags::BODY, common.body.as_deref())?;
    let mut native_body = common.body.as_ref().map(|_| tags::NATIVE_BODY_PLAIN);
    if let Some(html) = common.html_body.as_deref() {
        set.set(&tags::HTML, html.as_bytes().to_vec())?;
        set.set(&tags::INTERNET_CODEPAGE, 65001)?;
        native_body = Some(tags::NATIVE_BODY_HTML);
    }
    if populate_rtf(set, common)? && common.rtf_body.is_some() {
        native_body = Some(tags::NATIVE_BODY_RTF);
    }
    if let Some(native_body) = native_body {
        set.set(&tags::NATIVE_BODY, native_body)?;
    }

    if let Some(sender) = &common.sender {
        set_address(
            set,
            sender,
            [
                &tags::SENDER_NAME,
                &tags::SENDER_EMAIL_ADDRESS,
                &tags::SENDER_ADDRESS_TYPE,
                &tags::SENDER_SMTP_ADDRESS,
                &tags::SENDER_ENTRY_ID,
                &tags::SENDER_SEARCH_KEY,
            ],
        )?;
    }
    if let Some(representing) = common.representing.as_ref().or(common.sender.as_ref()) {
        set_address(
            set,
            representing,
            [
                &tags::SENT_REPRESENTING_NAME,
                &tags::SENT_REPRESENTING_EMAIL_ADDRESS,
                &tags::SENT_REPRESENTING_ADDRESS_TYPE,
                &tags::SENT_REPRESENTING_SMTP_ADDRESS,
                &tags::SENT_REPRESENTING_ENTRY_ID,
                &tags::SENT_REPRESENTING_SEARCH_KEY,
            ],
        )?;
    }

    let search_key = match &common.sender {
        Some(sender) => sender.search_key(),
        None => generate_record_key(),
    };
    set.set(&tags::SEARCH_KEY, search_key)?;

    set.set(&tags::IMPORTANCE, common.importance.unwrap_or_default() as i32)?;
    set.set(&tags::SENSITIVITY, common.sensitivity.unwrap_or_default() as i32)?;

    let now = Utc::now();
    if let Some(sent_on) = common.sent_on {
        set.set(&tags::CLIENT_SUBMIT_TIME, sent_on)?;
    }
    if let Some(received_on) = common.received_on {
        set.set(&tags::MESSAGE_DELIVERY_TIME, received_on)?;
    }
    set.set(&tags::CREATION_TIME, common.sent_on.unwrap_or(now))?;
    set.set(&tags::LAST_MODIFICATION_TIME, now)?;

    let mut flags = message_flags;
    if !common.attachments.is_empty() {
        flags |= tags::MSGFLAG_HASATTACH;
    }
    set.set(&tags::MESSAGE_FLAGS, flags)?;
    set.set(&tags::HAS_ATTACHMENTS, !common.attachments.is_empty())?;

    set.set_text(&tags::INTERNET_MESSAGE_ID, common.internet_message_id.as_deref())?;
    set.set_with_flags(
        &tags::STORE_SUPPORT_MASK,
        tags::STORE_UNICODE_OK,
        PropertyFlags::READABLE,
    )?;
    set.set(&tags::MESSAGE_CODEPAGE, common.options.code_page as i32)?;

    set.set(&tags::DISPLAY_TO, common.display_list(RecipientKind::To))?;
    set.set(&tags::DISPLAY_CC, common.display_list(RecipientKind::Cc))?;
    set.set(&tags::DISPLAY_BCC, common.display_list(RecipientKind::Bcc))?;

    if !common.categories.is_empty() {
        set.set_resolved(
            table,
            &tags::KEYWORDS,
            PropertyValue::MultipleString(common.categories.clone()),
        )?;
    }
    Ok(())
}

/// Add the compressed RTF body; returns whether one was written.
#[cfg(feature = "rtf")]
fn populate_rtf(set: &mut PropertyRecordSet, common: &MessageCommon) -> MsgResult<bool> {
    use crate::rtf::{compress_with, rtf_from_text};

    let rtf = match (&common.rtf_body, common.body.as_deref()) {
        (Some(rtf), _) => rtf.clone(),
        (None, Some(body)) if common.options.body_as_rtf => rtf_from_text(body),
        _ => return Ok(false),
    };
    let compressed = compress_with(&rtf, common.options.rtf_compression)?;
    set.set(&tags::RTF_COMPRESSED, compressed)?;
    set.set(&tags::RTF_IN_SYNC, true)?;
    Ok(true)
}

#[cfg(not(feature = "rtf"))]
fn populate_rtf(_set: &mut PropertyRecordSet, common: &MessageCommon) -> MsgResult<bool> {
    if common.rtf_body.is_some() {
        return Err(crate::msg::MsgError::FeatureDisabled("rtf"));
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_display_fallback() {
        assert_eq!(Address::new("a@b.c").display(), "a@b.c");
        assert_eq!(Address::with_name("a@b.c", "Ann").display(), "Ann");
        assert!(Address::new("a@b.c").is_smtp());
    }

    #[test]
    fn test_populate_common_minimal() {
        let mut set = PropertyRecordSet::new();
        let mut table = NamedPropertyTable::new();
        let common = MessageCommon {
            subject: Some("Hi".into()),
            ..MessageCommon::default()
        };
        populate_common(&mut set, &mut table, &common, "IPM.Note", tags::MSGFLAG_READ).unwrap();
        assert_eq!(
            set.value(&tags::MESSAGE_CLASS),
            Some(&PropertyValue::String("IPM.Note".into()))
        );
        assert_eq!(set.value(&tags::MESSAGE_FLAGS), Some(&PropertyValue::Integer32(1)));
        assert_eq!(set.value(&tags::HAS_ATTACHMENTS), Some(&PropertyValue::Boolean(false)));
        assert!(!set.contains(&tags::BODY));
        assert!(!set.contains(&tags::SENDER_NAME));
        assert!(table.is_empty());
    }

    #[test]
    fn test_sender_fills_representing() {
        let mut set = PropertyRecordSet::new();
        let mut table = NamedPropertyTable::new();
        let common = MessageCommon {
            sender: Some(Address::with_name("boss@example.com", "Boss")),
            ..MessageCommon::default()
        };
        populate_common(&mut set, &mut table, &common, "IPM.Note", 0).unwrap();
        assert_eq!(
            set.value(&tags::SENT_REPRESENTING_NAME),
            Some(&PropertyValue::String("Boss".into()))
        );
        assert_eq!(
            set.value(&tags::SEARCH_KEY),
            Some(&PropertyValue::Binary(b"SMTP:BOSS@EXAMPLE.COM\0".to_vec()))
        );
    }

    #[test]
    fn test_categories_use_named_property() {
        let mut set = PropertyRecordSet::new();
        let mut table = NamedPropertyTable::new();
        let common = MessageCommon {
            categories: vec!["Red".into(), "Blue".into()],
            ..MessageCommon::default()
        };
        populate_common(&mut set, &mut table, &common, "IPM.Note", 0).unwrap();
        assert_eq!(table.len(), 1);
        assert!(set.contains(&tags::KEYWORDS));
    }

    #[cfg(feature = "rtf")]
    #[test]
    fn test_body_as_rtf() {
        let mut set = PropertyRecordSet::new();
        let mut table = NamedPropertyTable::new();
        let mut common = MessageCommon {
            body: Some("Hello".into()),
            ..MessageCommon::default()
        };
        common.options.body_as_rtf = true;
        populate_common(&mut set, &mut table, &common, "IPM.Note", 0).unwrap();
        let Some(PropertyValue::Binary(rtf)) = set.value(&tags::RTF_COMPRESSED) else {
            panic!("missing compressed RTF");
        };
        let plain = crate::rtf::decompress(rtf).unwrap();
        assert!(String::from_utf8(plain).unwrap().contains("Hello"));
        assert_eq!(set.value(&tags::NATIVE_BODY), Some(&PropertyValue::Integer32(1)));
    }
}
