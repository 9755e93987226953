//! Outlook message (`.msg`) writing.
//!
//! A message file is a compound file whose storages each carry a
//! `__properties_version1.0` stream of fixed-size property records plus one
//! stream per variable-length value. Named properties are mapped to ids at
//! or above `0x8000` through the `__nameid_version1.0` storage.
//!
//! The layers, bottom-up:
//!
//! - [`property`] and [`tags`]: property types, identities and values
//! - [`record_set`]: the properties of one storage
//! - [`named`]: the named-property table
//! - [`encoder`]: record sets to streams
//! - [`builder`]: e-mails, appointments and tasks

pub mod builder;
pub mod encoder;
mod error;
pub mod identifiers;
pub mod named;
mod options;
pub mod property;
pub mod record_set;
pub mod tags;


pub use builder::{
    Address, Appointment, Attachment, AttachmentContent, BusyStatus, Contact, Email,
    EmbeddedMessage,
    Importance, MessageCommon, MessageItem, Recipient, RecipientKind, Sensitivity, Task,
    TaskStatus,
};
pub use encoder::{MessageCounters, PropertyEncoder, PropertyHeader};
pub use error::{MsgError, MsgResult};
pub use named::NamedPropertyTable;
pub use options::MsgOptions;
pub use property::{
    NamedPropertyName, PropertyFlags, PropertyIdentity, PropertyType, PropertyValue,
};
pub use record_set::PropertyRecordSet;
