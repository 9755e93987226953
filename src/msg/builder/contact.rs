use super::MessageItem;
use super::common::{Address, MessageCommon, populate_common};
use crate::msg::error::{MsgError, MsgResult};
use crate::msg::named::NamedPropertyTable;
use crate::msg::property::{PropertyIdentity, PropertyValue};
use crate::msg::record_set::PropertyRecordSet;
use crate::msg::tags;
use chrono::{DateTime, Utc};

/// Message class of contacts.
pub const CONTACT_MESSAGE_CLASS: &str = "IPM.Contact";

const CONTACT_ICON: i32 = 0x0200;

/// PidLidAddressBookProviderArrayType bit for the Email1 slot.
const PROVIDER_EMAIL1: i32 = 0x0000_0001;

/// A contact card (`IPM.Contact`).
#[derive(Debug, Clone, Default)]
pub struct Contact {
    pub common: MessageCommon,
    /// Full name; built from the name parts when absent
    pub display_name: Option<String>,
    pub prefix: Option<String>,
    pub given_name: Option<String>,
    pub middle_name: Option<String>,
    pub surname: Option<String>,
    pub generation: Option<String>,
    pub nickname: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    /// Address shown in the Email1 slot
    pub email: Option<Address>,
    pub business_phone: Option<String>,
    pub home_phone: Option<String>,
    pub mobile_phone: Option<String>,
    pub business_fax: Option<String>,
    pub birthday: Option<DateTime<Utc>>,
}

impl Contact {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn given_name(mut self, name: impl Into<String>) -> Self {
        self.given_name = Some(name.into());
        self
    }

    pub fn middle_name(mut self, name: impl Into<String>) -> Self {
        self.middle_name = Some(name.into());
        self
    }

    pub fn surname(mut self, name: impl Into<String>) -> Self {
        self.surname = Some(name.into());
        self
    }

    pub fn generation(mut self, generation: impl Into<String>) -> Self {
        self.generation = Some(generation.into());
        self
    }

    pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn job_title(mut self, title: impl Into<String>) -> Self {
        self.job_title = Some(title.into());
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn email(mut self, address: Address) -> Self {
        self.email = Some(address);
        self
    }

    pub fn business_phone(mut self, number: impl Into<String>) -> Self {
        self.business_phone = Some(number.into());
        self
    }

    pub fn home_phone(mut self, number: impl Into<String>) -> Self {
        self.home_phone = Some(number.into());
        self
    }

    pub fn mobile_phone(mut self, number: impl Into<String>) -> Self {
        self.mobile_phone = Some(number.into());
        self
    }

    pub fn business_fax(mut self, number: impl Into<String>) -> Self {
        self.business_fax = Some(number.into());
        self
    }

    pub fn birthday(mut self, birthday: DateTime<Utc>) -> Self {
        self.birthday = Some(birthday);
        self
    }

    /// Display name, or the non-empty name parts joined by spaces.
    pub fn full_name(&self) -> String {
        if let Some(name) = non_empty(&self.display_name) {
            return name.to_string();
        }
        [
            &self.prefix,
            &self.given_name,
            &self.middle_name,
            &self.surname,
            &self.generation,
        ]
        .into_iter()
        .filter_map(non_empty)
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// "Surname, Given" when both are known, otherwise the best single name.
    pub fn file_under(&self) -> String {
        match (non_empty(&self.surname), non_empty(&self.given_name)) {
            (Some(surname), Some(given)) => format!("{}, {}", surname, given),
            (Some(name), None) | (None, Some(name)) => name.to_string(),
            (None, None) => {
                let full = self.full_name();
                if full.is_empty() {
                    non_empty(&self.company).unwrap_or_default().to_string()
                } else {
                    full
                }
            },
        }
    }

    fn populate_email(
        &self,
        set: &mut PropertyRecordSet,
        table: &mut NamedPropertyTable,
        address: &Address,
    ) -> MsgResult<()> {
        let shown = match non_empty(&address.display_name) {
            Some(name) => format!("{} ({})", name, address.email),
            None => address.email.clone(),
        };
        set.set_resolved(table, &tags::EMAIL1_DISPLAY_NAME, shown)?;
        set.set_resolved(table, &tags::EMAIL1_ADDRESS_TYPE, address.address_type.as_str())?;
        set.set_resolved(table, &tags::EMAIL1_EMAIL_ADDRESS, address.email.as_str())?;
        set.set_resolved(table, &tags::EMAIL1_ORIGINAL_DISPLAY_NAME, address.email.as_str())?;
        set.set_resolved(table, &tags::EMAIL1_ORIGINAL_ENTRY_ID, address.entry_id())?;
        set.set_resolved(
            table,
            &tags::ADDRESS_BOOK_PROVIDER_EMAIL_LIST,
            PropertyValue::MultipleInteger32(vec![0]),
        )?;
        set.set_resolved(table, &tags::ADDRESS_BOOK_PROVIDER_ARRAY_TYPE, PROVIDER_EMAIL1)?;
        Ok(())
    }
}

impl MessageItem for Contact {
    fn common(&self) -> &MessageCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut MessageCommon {
        &mut self.common
    }

    fn validate(&self) -> MsgResult<()> {
        if self.email.as_ref().is_some_and(|a| a.email.is_empty()) {
            return Err(MsgError::InvalidInput("contact e-mail address is empty".into()));
        }
        if self.file_under().is_empty() && self.email.is_none() {
            return Err(MsgError::InvalidInput(
                "contact needs a name, a company or an e-mail address".into(),
            ));
        }
        Ok(())
    }

    fn populate(&self, set: &mut PropertyRecordSet, table: &mut NamedPropertyTable) -> MsgResult<()> {
        self.validate()?;
        populate_common(set, table, &self.common, CONTACT_MESSAGE_CLASS, tags::MSGFLAG_READ)?;
        set.set(&tags::ICON_INDEX, CONTACT_ICON)?;

        let full_name = self.full_name();
        set.set_text(&tags::DISPLAY_NAME, Some(full_name.as_str()))?;
        // The card title doubles as the subject unless one was given
        if self.common.subject.is_none() && !full_name.is_empty() {
            set.set(&tags::SUBJECT, full_name.as_str())?;
            set.set(&tags::NORMALIZED_SUBJECT, full_name.as_str())?;
        }

        let texts: [(&PropertyIdentity, &Option<String>); 13] = [
            (&tags::DISPLAY_NAME_PREFIX, &self.prefix),
            (&tags::GIVEN_NAME, &self.given_name),
            (&tags::MIDDLE_NAME, &self.middle_name),
            (&tags::SURNAME, &self.surname),
            (&tags::GENERATION, &self.generation),
            (&tags::NICKNAME, &self.nickname),
            (&tags::COMPANY_NAME, &self.company),
            (&tags::TITLE, &self.job_title),
            (&tags::DEPARTMENT_NAME, &self.department),
            (&tags::BUSINESS_TELEPHONE_NUMBER, &self.business_phone),
            (&tags::HOME_TELEPHONE_NUMBER, &self.home_phone),
            (&tags::MOBILE_TELEPHONE_NUMBER, &self.mobile_phone),
            (&tags::BUSINESS_FAX_NUMBER, &self.business_fax),
        ];
        for (identity, text) in texts {
            set.set_text(identity, text.as_deref())?;
        }
        if let Some(birthday) = self.birthday {
            set.set(&tags::BIRTHDAY, birthday)?;
        }

        let file_under = self.file_under();
        if !file_under.is_empty() {
            set.set_resolved(table, &tags::FILE_UNDER, file_under)?;
        }
        if let Some(address) = &self.email {
            self.populate_email(set, table, address)?;
        }
        Ok(())
    }
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::property::NamedPropertyName;
    use chrono::TimeZone;

    fn card() -> Contact {
        Contact::new()
            .given_name("Jane")
            .surname("Doe")
            .company("Example Ltd")
            .mobile_phone("+1 555 0100")
            .email(Address::with_name("jane@example.com", "Jane Doe"))
    }

    #[test]
    fn test_names_derived_from_parts() {
        let contact = card().prefix("Dr.");
        assert_eq!(contact.full_name(), "Dr. Jane Doe");
        assert_eq!(contact.file_under(), "Doe, Jane");
        assert_eq!(Contact::new().company("Acme").file_under(), "Acme");
        assert_eq!(card().display_name("J. Doe").full_name(), "J. Doe");
    }

    #[test]
    fn test_contact_properties() {
        let mut set = PropertyRecordSet::new();
        let mut table = NamedPropertyTable::new();
        let birthday = Utc.with_ymd_and_hms(1990, 5, 17, 0, 0, 0).unwrap();
        card().birthday(birthday).populate(&mut set, &mut table).unwrap();

        assert_eq!(
            set.value(&tags::MESSAGE_CLASS),
            Some(&PropertyValue::String("IPM.Contact".into()))
        );
        assert_eq!(
            set.value(&tags::DISPLAY_NAME),
            Some(&PropertyValue::String("Jane Doe".into()))
        );
        assert_eq!(
            set.value(&tags::SUBJECT),
            Some(&PropertyValue::String("Jane Doe".into()))
        );
        assert_eq!(
            set.value(&tags::MOBILE_TELEPHONE_NUMBER),
            Some(&PropertyValue::String("+1 555 0100".into()))
        );
        assert_eq!(set.value(&tags::BIRTHDAY), Some(&PropertyValue::Time(birthday)));
        assert!(!set.contains(&tags::HOME_TELEPHONE_NUMBER));

        assert_eq!(
            set.value(&tags::FILE_UNDER),
            Some(&PropertyValue::String("Doe, Jane".into()))
        );
        assert_eq!(
            set.value(&tags::EMAIL1_DISPLAY_NAME),
            Some(&PropertyValue::String("Jane Doe (jane@example.com)".into()))
        );
        assert_eq!(
            set.value(&tags::ADDRESS_BOOK_PROVIDER_EMAIL_LIST),
            Some(&PropertyValue::MultipleInteger32(vec![0]))
        );
        let email = NamedPropertyName::Id(0x8083);
        assert!(table.lookup(tags::PSETID_ADDRESS, &email).is_some());
        // file-under, five Email1 slots and the two provider entries
        assert_eq!(table.len(), 8);
    }

    #[test]
    fn test_explicit_subject_kept() {
        let mut set = PropertyRecordSet::new();
        let mut table = NamedPropertyTable::new();
        card().subject("Supplier").populate(&mut set, &mut table).unwrap();
        assert_eq!(
            set.value(&tags::SUBJECT),
            Some(&PropertyValue::String("Supplier".into()))
        );
    }

    #[test]
    fn test_empty_contact_rejected() {
        assert!(matches!(Contact::new().validate(), Err(MsgError::InvalidInput(_))));
        let blank_email = Contact::new().given_name("Jane").email(Address::new(""));
        assert!(matches!(blank_email.validate(), Err(MsgError::InvalidInput(_))));
        assert!(Contact::new().email(Address::new("jane@example.com")).validate().is_ok());
    }
}
