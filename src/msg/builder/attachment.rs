//! Attachments and their `__attach_version1.0_#XXXXXXXX` storages.

use super::EmbeddedMessage;
use crate::msg::error::{MsgError, MsgResult};
use crate::msg::identifiers::{generate_instance_key, generate_record_key};
use crate::msg::property::PropertyValue;
use crate::msg::record_set::PropertyRecordSet;
use crate::msg::tags;
use std::path::Path;

/// Prefix of attachment storage names.
pub const ATTACHMENT_STORAGE_PREFIX: &str = "__attach_version1.0_#";

/// Storage holding an embedded message inside an attachment storage.
pub const EMBEDDED_MESSAGE_STORAGE: &str = "__substg1.0_3701000D";

/// Name of the storage of the attachment at `index`.
pub fn attachment_storage_name(index: usize) -> String {
    format!("{}{:08X}", ATTACHMENT_STORAGE_PREFIX, index)
}

/// What an attachment carries.
#[derive(Debug, Clone)]
pub enum AttachmentContent {
    /// File data stored by value
    File(Vec<u8>),
    /// Message stored as a nested storage
    Message(Box<EmbeddedMessage>),
}

/// A message attachment.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub content: AttachmentContent,
    /// Content id referenced from the HTML body
    pub content_id: Option<String>,
    /// Rendered in the body rather than listed
    pub inline: bool,
    pub mime_type: Option<String>,
}

impl Attachment {
    /// File attachment.
    pub fn file(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content: AttachmentContent::File(data.into()),
            content_id: None,
            inline: false,
            mime_type: None,
        }
    }

    /// Attachment carrying another message.
    pub fn message(display_name: impl Into<String>, message: impl Into<EmbeddedMessage>) -> Self {
        Self {
            file_name: display_name.into(),
            content: AttachmentContent::Message(Box::new(message.into())),
            content_id: None,
            inline: false,
            mime_type: None,
        }
    }

    /// Inline attachment referenced as `cid:<content_id>`.
    pub fn inline_file(
        file_name: impl Into<String>,
        data: impl Into<Vec<u8>>,
        content_id: impl Into<String>,
    ) -> Self {
        Self::file(file_name, data)
            .with_content_id(content_id)
            .with_inline(true)
    }

    pub fn with_content_id(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = Some(content_id.into());
        self
    }

    pub fn with_inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Embedded message, if this attachment carries one.
    pub fn embedded(&self) -> Option<&EmbeddedMessage> {
        match &self.content {
            AttachmentContent::Message(message) => Some(message),
            AttachmentContent::File(_) => None,
        }
    }

    /// Reject attachments that cannot be written.
    pub fn validate(&self) -> MsgResult<()> {
        let has_content_id = self.content_id.as_deref().is_some_and(|cid| !cid.is_empty());
        if self.inline && !has_content_id {
            return Err(MsgError::InvalidInput(format!(
                "inline attachment '{}' has no content id",
                self.file_name
            )));
        }
        Ok(())
    }

    /// Properties of the attachment storage; `number` is its position.
    pub fn properties(&self, number: u32) -> MsgResult<PropertyRecordSet> {
        let mut set = PropertyRecordSet::new();
        set.set(&tags::ATTACH_NUMBER, number as i32)?;
        set.set(&tags::OBJECT_TYPE, tags::MAPI_ATTACH)?;
        set.set(&tags::RECORD_KEY, generate_record_key())?;
        set.set(&tags::INSTANCE_KEY, generate_instance_key())?;
        set.set(&tags::RENDERING_POSITION, -1)?;
        set.set(&tags::DISPLAY_NAME, self.file_name.as_str())?;

        match &self.content {
            AttachmentContent::File(data) => {
                set.set(&tags::ATTACH_METHOD, tags::ATTACH_BY_VALUE)?;
                set.set(&tags::ATTACH_FILENAME, self.file_name.as_str())?;
                set.set(&tags::ATTACH_LONG_FILENAME, self.file_name.as_str())?;
                if let Some(ext) = Path::new(&self.file_name).extension().and_then(|e| e.to_str()) {
                    set.set(&tags::ATTACH_EXTENSION, format!(".{}", ext))?;
                }
                let size = i32::try_from(data.len()).map_err(|_| MsgError::ValueTooLarge {
                    property: self.file_name.clone(),
                    len: data.len() as u64,
                })?;
                set.set(&tags::ATTACH_SIZE, size)?;
                set.set(&tags::ATTACH_DATA_BINARY, data.clone())?;
            },
            AttachmentContent::Message(_) => {
                set.set(&tags::ATTACH_METHOD, tags::ATTACH_EMBEDDED_MSG)?;
                set.set(&tags::ATTACH_DATA_OBJECT, PropertyValue::Object)?;
            },
        }

        if let Some(mime_type) = self.mime_type.as_deref() {
            set.set(&tags::ATTACH_MIME_TAG, mime_type)?;
        }
        if let Some(content_id) = self.content_id.as_deref() {
            set.set(&tags::ATTACH_CONTENT_ID, content_id)?;
        }
        if self.inline {
            set.set(&tags::ATTACH_FLAGS, tags::ATT_RENDERED_IN_BODY)?;
            set.set(&tags::ATTACHMENT_HIDDEN, true)?;
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_name() {
        assert_eq!(attachment_storage_name(1), "__attach_version1.0_#00000001");
    }

    #[test]
    fn test_inline_requires_content_id() {
        let bad = Attachment::file("logo.png", vec![1, 2]).with_inline(true);
        assert!(matches!(bad.validate(), Err(MsgError::InvalidInput(_))));
        let empty = bad.clone().with_content_id("");
        assert!(empty.validate().is_err());
        let good = Attachment::inline_file("logo.png", vec![1, 2], "logo@1");
        assert!(good.validate().is_ok());
    }

    #[test]
    fn test_file_properties() {
        let att = Attachment::file("report.pdf", vec![0u8; 10]).with_mime_type("application/pdf");
        let set = att.properties(0).unwrap();
        assert_eq!(set.value(&tags::ATTACH_SIZE), Some(&PropertyValue::Integer32(10)));
        assert_eq!(
            set.value(&tags::ATTACH_EXTENSION),
            Some(&PropertyValue::String(".pdf".into()))
        );
        assert_eq!(
            set.value(&tags::ATTACH_METHOD),
            Some(&PropertyValue::Integer32(tags::ATTACH_BY_VALUE))
        );
        assert!(!set.contains(&tags::ATTACH_FLAGS));
    }

    #[test]
    fn test_inline_properties() {
        let att = Attachment::inline_file("logo.png", vec![1], "logo@1");
        let set = att.properties(0).unwrap();
        assert_eq!(
            set.value(&tags::ATTACH_CONTENT_ID),
            Some(&PropertyValue::String("logo@1".into()))
        );
        assert_eq!(set.value(&tags::ATTACHMENT_HIDDEN), Some(&PropertyValue::Boolean(true)));
    }
}
