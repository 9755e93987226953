use super::MessageItem;
use super::common::{MessageCommon, populate_common};
use crate::msg::error::MsgResult;
use crate::msg::named::NamedPropertyTable;
use crate::msg::record_set::PropertyRecordSet;
use crate::msg::tags;

/// Message class of e-mails.
pub const EMAIL_MESSAGE_CLASS: &str = "IPM.Note";

/// An e-mail message (`IPM.Note`).
#[derive(Debug, Clone, Default)]
pub struct Email {
    pub common: MessageCommon,
    /// Unsent draft rather than a read message
    pub draft: bool,
}

impl Email {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the message as an unsent draft.
    pub fn draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }
}

impl MessageItem for Email {
    fn common(&self) -> &MessageCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut MessageCommon {
        &mut self.common
    }

    fn populate(&self, set: &mut PropertyRecordSet, table: &mut NamedPropertyTable) -> MsgResult<()> {
        let flags = if self.draft {
            tags::MSGFLAG_UNSENT
        } else {
            tags::MSGFLAG_READ
        };
        populate_common(set, table, &self.common, EMAIL_MESSAGE_CLASS, flags)?;
        set.set(&tags::ICON_INDEX, if self.draft { 0x0103 } else { 0x0100 })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::property::PropertyValue;

    #[test]
    fn test_draft_flags() {
        let mut set = PropertyRecordSet::new();
        let mut table = NamedPropertyTable::new();
        Email::new().draft(true).populate(&mut set, &mut table).unwrap();
        assert_eq!(
            set.value(&tags::MESSAGE_FLAGS),
            Some(&PropertyValue::Integer32(tags::MSGFLAG_UNSENT))
        );
        assert_eq!(
            set.value(&tags::MESSAGE_CLASS),
            Some(&PropertyValue::String("IPM.Note".into()))
        );
    }

    #[test]
    fn test_fluent_setters() {
        let email = Email::new().subject("Hello").category("Blue").body("Text");
        assert_eq!(email.common.subject.as_deref(), Some("Hello"));
        assert_eq!(email.common.categories, vec!["Blue".to_string()]);
        assert!(!email.draft);
    }
}
