//! Message assembly.
//!
//! Each message kind decides which properties to set and hands its record
//! sets to the encoder. One call to [`MessageItem::save`] (or one of its
//! siblings) performs a complete build:
//!
//! 1. validate the request (nothing is written for a rejected message)
//! 2. populate and encode the message storage, one storage per recipient
//!    and attachment, and embedded messages recursively
//! 3. serialize the named-property table, which seals it
//!
//! Every build uses a fresh [`NamedPropertyTable`].
//!
//! # Example
//!
//! ```rust,no_run
//! use oxmsg::msg::{Address, Email, MessageItem, Recipient};
//!
//! Email::new()
//!     .sender(Address::with_name("jane@example.com", "Jane Doe"))
//!     .recipient(Recipient::to("john@example.com"))
//!     .subject("Quarterly numbers")
//!     .body("See attached.")
//!     .save("numbers.msg")?;
//! # Ok::<(), oxmsg::common::Error>(())
//! ```

mod appointment;
mod attachment;
mod common;
mod contact;
mod email;
mod recipient;
mod task;

pub use appointment::{Appointment, BusyStatus};
pub use attachment::{
    ATTACHMENT_STORAGE_PREFIX, Attachment, AttachmentContent, EMBEDDED_MESSAGE_STORAGE,
    attachment_storage_name,
};
pub use common::{Address, Importance, MessageCommon, Sensitivity, populate_common};
pub use contact::Contact;
pub use email::Email;
pub use recipient::{RECIPIENT_STORAGE_PREFIX, Recipient, RecipientKind, recipient_storage_name};
pub use task::{Task, TaskStatus};

use super::encoder::{MessageCounters, PropertyEncoder, PropertyHeader};
use super::error::{MsgError, MsgResult};
use super::named::NamedPropertyTable;
use super::options::MsgOptions;
use super::record_set::PropertyRecordSet;
use super::tags;
use crate::common::Result;
use crate::common::codepage::codepage_to_encoding;
use crate::ole::{OleWriter, Storage, StoragePath};
use chrono::{DateTime, Utc};
use std::io::{Seek, Write};
use std::path::Path;

/// A message kind that can be written as a message file.
///
/// Implementors provide their shared content and the properties of the
/// message storage; the provided methods offer fluent setters for the shared
/// content and the output entry points.
pub trait MessageItem {
    fn common(&self) -> &MessageCommon;

    fn common_mut(&mut self) -> &mut MessageCommon;

    /// Fill the record set of the message storage, resolving named
    /// properties in `table`.
    fn populate(&self, set: &mut PropertyRecordSet, table: &mut NamedPropertyTable) -> MsgResult<()>;

    /// Reject content this kind cannot write. Runs for the whole message
    /// tree before the first storage is created.
    fn validate(&self) -> MsgResult<()> {
        Ok(())
    }

    fn subject(mut self, subject: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.common_mut().subject = Some(subject.into());
        self
    }

    fn body(mut self, body: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.common_mut().body = Some(body.into());
        self
    }

    fn html_body(mut self, html: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.common_mut().html_body = Some(html.into());
        self
    }

    fn rtf_body(mut self, rtf: impl Into<Vec<u8>>) -> Self
    where
        Self: Sized,
    {
        self.common_mut().rtf_body = Some(rtf.into());
        self
    }

    fn sender(mut self, sender: Address) -> Self
    where
        Self: Sized,
    {
        self.common_mut().sender = Some(sender);
        self
    }

    fn representing(mut self, representing: Address) -> Self
    where
        Self: Sized,
    {
        self.common_mut().representing = Some(representing);
        self
    }

    fn importance(mut self, importance: Importance) -> Self
    where
        Self: Sized,
    {
        self.common_mut().importance = Some(importance);
        self
    }

    fn sensitivity(mut self, sensitivity: Sensitivity) -> Self
    where
        Self: Sized,
    {
        self.common_mut().sensitivity = Some(sensitivity);
        self
    }

    fn sent_on(mut self, sent_on: DateTime<Utc>) -> Self
    where
        Self: Sized,
    {
        self.common_mut().sent_on = Some(sent_on);
        self
    }

    fn received_on(mut self, received_on: DateTime<Utc>) -> Self
    where
        Self: Sized,
    {
        self.common_mut().received_on = Some(received_on);
        self
    }

    fn internet_message_id(mut self, id: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.common_mut().internet_message_id = Some(id.into());
        self
    }

    fn category(mut self, category: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.common_mut().categories.push(category.into());
        self
    }

    fn recipient(mut self, recipient: Recipient) -> Self
    where
        Self: Sized,
    {
        self.common_mut().recipients.push(recipient);
        self
    }

    fn attachment(mut self, attachment: Attachment) -> Self
    where
        Self: Sized,
    {
        self.common_mut().attachments.push(attachment);
        self
    }

    fn with_options(mut self, options: MsgOptions) -> Self
    where
        Self: Sized,
    {
        self.common_mut().options = options;
        self
    }

    /// Write the message into `storage` below `at`; returns the property
    /// bytes written.
    fn write_into<S: Storage>(&self, storage: &mut S, at: &StoragePath) -> Result<u64>
    where
        Self: Sized,
    {
        Ok(write_file(self, storage, at)?)
    }

    /// Build the complete compound file in memory.
    fn to_writer(&self) -> Result<OleWriter>
    where
        Self: Sized,
    {
        let mut writer = OleWriter::with_sector_size(self.common().options.sector_size);
        writer.set_root_clsid(*tags::CLSID_MESSAGE.as_bytes());
        write_file(self, &mut writer, &StoragePath::root())?;
        Ok(writer)
    }

    /// Serialize the message file to `sink`.
    fn write_to<W: Write + Seek>(&self, sink: &mut W) -> Result<()>
    where
        Self: Sized,
    {
        self.to_writer()?.write_to(sink)?;
        Ok(())
    }

    /// Serialize the message file into a byte vector.
    fn to_bytes(&self) -> Result<Vec<u8>>
    where
        Self: Sized,
    {
        Ok(self.to_writer()?.to_bytes()?)
    }

    /// Save the message file to `path`.
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>
    where
        Self: Sized,
    {
        let writer = self.to_writer()?;
        writer.save(path.as_ref())?;
        log::debug!("msg: saved {}", path.as_ref().display());
        Ok(())
    }
}

/// A message carried by an attachment.
#[derive(Debug, Clone)]
pub enum EmbeddedMessage {
    Email(Email),
    Appointment(Appointment),
    Task(Task),
    Contact(Contact),
}

impl From<Email> for EmbeddedMessage {
    fn from(message: Email) -> Self {
        EmbeddedMessage::Email(message)
    }
}

impl From<Appointment> for EmbeddedMessage {
    fn from(message: Appointment) -> Self {
        EmbeddedMessage::Appointment(message)
    }
}

impl From<Task> for EmbeddedMessage {
    fn from(message: Task) -> Self {
        EmbeddedMessage::Task(message)
    }
}

impl From<Contact> for EmbeddedMessage {
    fn from(message: Contact) -> Self {
        EmbeddedMessage::Contact(message)
    }
}

impl MessageItem for EmbeddedMessage {
    fn common(&self) -> &MessageCommon {
        match self {
            EmbeddedMessage::Email(m) => m.common(),
            EmbeddedMessage::Appointment(m) => m.common(),
            EmbeddedMessage::Task(m) => m.common(),
            EmbeddedMessage::Contact(m) => m.common(),
        }
    }

    fn common_mut(&mut self) -> &mut MessageCommon {
        match self {
            EmbeddedMessage::Email(m) => m.common_mut(),
            EmbeddedMessage::Appointment(m) => m.common_mut(),
            EmbeddedMessage::Task(m) => m.common_mut(),
            EmbeddedMessage::Contact(m) => m.common_mut(),
        }
    }

    fn populate(&self, set: &mut PropertyRecordSet, table: &mut NamedPropertyTable) -> MsgResult<()> {
        match self {
            EmbeddedMessage::Email(m) => m.populate(set, table),
            EmbeddedMessage::Appointment(m) => m.populate(set, table),
            EmbeddedMessage::Task(m) => m.populate(set, table),
            EmbeddedMessage::Contact(m) => m.populate(set, table),
        }
    }

    fn validate(&self) -> MsgResult<()> {
        match self {
            EmbeddedMessage::Email(m) => m.validate(),
            EmbeddedMessage::Appointment(m) => m.validate(),
            EmbeddedMessage::Task(m) => m.validate(),
            EmbeddedMessage::Contact(m) => m.validate(),
        }
    }
}

fn count_u32(count: usize) -> MsgResult<u32> {
    u32::try_from(count).map_err(|_| MsgError::ValueTooLarge {
        property: "child count".to_string(),
        len: count as u64,
    })
}

/// Check everything a build can reject up front.
fn validate<M: MessageItem>(message: &M) -> MsgResult<()> {
    message.validate()?;
    let common = message.common();
    if codepage_to_encoding(common.options.code_page).is_none() {
        return Err(MsgError::InvalidInput(format!(
            "unsupported code page {}",
            common.options.code_page
        )));
    }
    for attachment in &common.attachments {
        attachment.validate()?;
        if let Some(inner) = attachment.embedded() {
            validate(inner)?;
        }
    }
    Ok(())
}

/// Validate, encode every storage of `message` below `root`, then
/// serialize the named-property table.
fn write_file<M: MessageItem, S: Storage>(
    message: &M,
    storage: &mut S,
    root: &StoragePath,
) -> MsgResult<u64> {
    validate(message)?;
    let mut table = NamedPropertyTable::new();
    let mut written = write_message(storage, root, message, false, &mut table)?;
    written += table.serialize(storage, root)?;
    Ok(written)
}

fn write_message<M: MessageItem, S: Storage>(
    storage: &mut S,
    at: &StoragePath,
    message: &M,
    embedded: bool,
    table: &mut NamedPropertyTable,
) -> MsgResult<u64> {
    let common = message.common();
    let code_page = common.options.code_page;
    let mut set = PropertyRecordSet::new();
    message.populate(&mut set, table)?;

    let mut written = 0;
    for (index, recipient) in common.recipients.iter().enumerate() {
        let path = storage.create_sub_storage(at, &recipient_storage_name(index))?;
        let props = recipient.properties(count_u32(index)?)?;
        written += PropertyEncoder::with_code_page(table, code_page)?.encode(
            storage,
            &path,
            &props,
            &PropertyHeader::Nested,
        )?;
    }

    for (index, attachment) in common.attachments.iter().enumerate() {
        let path = storage.create_sub_storage(at, &attachment_storage_name(index))?;
        let props = attachment.properties(count_u32(index)?)?;
        if let Some(inner) = attachment.embedded() {
            let inner_at = storage.create_sub_storage(&path, EMBEDDED_MESSAGE_STORAGE)?;
            written += write_message(storage, &inner_at, inner, true, table)?;
        }
        written += PropertyEncoder::with_code_page(table, code_page)?.encode(
            storage,
            &path,
            &props,
            &PropertyHeader::Nested,
        )?;
    }

    let counters = MessageCounters::new(
        count_u32(common.recipients.len())?,
        count_u32(common.attachments.len())?,
    );
    let header = if embedded {
        PropertyHeader::EmbeddedMessage(counters)
    } else {
        PropertyHeader::Message(counters)
    };
    written += PropertyEncoder::with_code_page(table, code_page)?.encode(storage, at, &set, &header)?;

    log::debug!(
        "msg: {} with {} recipients, {} attachments",
        at,
        common.recipients.len(),
        common.attachments.len()
    );
    Ok(written)
}
