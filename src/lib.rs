//! Oxmsg - A Rust library for writing Outlook message (`.msg`) files
//!
//! Message files are OLE2 compound documents holding MAPI properties. This
//! library provides every layer needed to produce them:
//!
//! # Features
//!
//! - **OLE2 Writer**: Build compound documents with 512- or 4096-byte sectors
//! - **Property Codec**: Encode MAPI property record sets (MS-OXMSG)
//! - **Named Properties**: Allocate and serialize the named-property table
//! - **Compressed RTF**: LZFu compression and decompression (MS-OXRTFCP)
//! - **Message Builders**: E-mails, appointments, tasks and contacts with recipients
//!   and attachments, including embedded messages
//!
//! # Example - Writing an e-mail
//!
//! ```no_run
//! use oxmsg::msg::{Address, Attachment, Email, MessageItem, Recipient};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! Email::new()
//!     .sender(Address::with_name("jane@example.com", "Jane Doe"))
//!     .recipient(Recipient::to("john@example.com").with_display_name("John"))
//!     .subject("Hello")
//!     .body("Report attached.")
//!     .attachment(Attachment::file("report.txt", b"numbers".to_vec()))
//!     .save("hello.msg")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Low-level property encoding
//!
//! ```
//! use oxmsg::msg::{tags, NamedPropertyTable, PropertyEncoder, PropertyHeader, PropertyRecordSet};
//! use oxmsg::ole::{OleWriter, StoragePath};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = NamedPropertyTable::new();
//! let mut set = PropertyRecordSet::new();
//! set.set(&tags::SUBJECT, "Hello")?;
//!
//! let mut writer = OleWriter::new();
//! PropertyEncoder::new(&table).encode(&mut writer, &StoragePath::root(), &set, &PropertyHeader::Nested)?;
//! assert!(writer.stream(&StoragePath::root().child("__substg1.0_0037001F")).is_some());
//! # Ok(())
//! # }
//! ```

/// Shared primitives: errors, GUIDs, CRC, byte helpers and code pages
pub mod common;

/// OLE2 compound file writer
///
/// Message files are compound files; this module builds the storage tree in
/// memory and serializes it.
pub mod ole;

/// Compressed RTF (MS-OXRTFCP)
#[cfg(feature = "rtf")]
pub mod rtf;

/// MAPI property encoding and message builders
pub mod msg;

// Re-export commonly used types for convenience
pub use common::{Error, Guid, Result};
pub use msg::{
    Appointment, Attachment, Contact, Email, MessageItem, MsgOptions, Recipient, Task,
};
