//! Property catalog: well-known property sets, standard tags and named
//! properties used when assembling messages.
//!
//! Names follow the MS-OXPROPS canonical names without the `PidTag` /
//! `PidLid` prefix. [`by_canonical_name`] looks a property up by its full
//! canonical name.

use super::property::{PropertyIdentity, PropertyType as T};
use crate::common::Guid;
use phf::phf_map;

const fn ms_guid(data1: u32) -> Guid {
    Guid::from_fields(data1, 0x0000, 0x0000, [0xC0, 0, 0, 0, 0, 0, 0, 0x46])
}

// Property sets (MS-OXPROPS 1.3.2)

/// PS_MAPI; GUID index 1 in the named-property table
pub const PS_MAPI: Guid = ms_guid(0x0002_0328);
/// PS_PUBLIC_STRINGS; GUID index 2 in the named-property table
pub const PS_PUBLIC_STRINGS: Guid = ms_guid(0x0002_0329);
pub const PS_INTERNET_HEADERS: Guid = ms_guid(0x0002_0386);
pub const PSETID_COMMON: Guid = ms_guid(0x0006_2008);
pub const PSETID_ADDRESS: Guid = ms_guid(0x0006_2004);
pub const PSETID_APPOINTMENT: Guid = ms_guid(0x0006_2002);
pub const PSETID_TASK: Guid = ms_guid(0x0006_2003);

/// CLSID of the root storage of a message file
pub const CLSID_MESSAGE: Guid = ms_guid(0x0002_0D0B);

// Message envelope

pub const MESSAGE_CLASS: PropertyIdentity = PropertyIdentity::standard(0x001A, T::String);
pub const IMPORTANCE: PropertyIdentity = PropertyIdentity::standard(0x0017, T::Integer32);
pub const PRIORITY: PropertyIdentity = PropertyIdentity::standard(0x0026, T::Integer32);
pub const SENSITIVITY: PropertyIdentity = PropertyIdentity::standard(0x0036, T::Integer32);
pub const SUBJECT: PropertyIdentity = PropertyIdentity::standard(0x0037, T::String);
pub const SUBJECT_PREFIX: PropertyIdentity = PropertyIdentity::standard(0x003D, T::String);
pub const NORMALIZED_SUBJECT: PropertyIdentity = PropertyIdentity::standard(0x0E1D, T::String);
pub const CONVERSATION_TOPIC: PropertyIdentity = PropertyIdentity::standard(0x0070, T::String);
pub const CLIENT_SUBMIT_TIME: PropertyIdentity = PropertyIdentity::standard(0x0039, T::Time);
pub const MESSAGE_DELIVERY_TIME: PropertyIdentity = PropertyIdentity::standard(0x0E06, T::Time);
pub const CREATION_TIME: PropertyIdentity = PropertyIdentity::standard(0x3007, T::Time);
pub const LAST_MODIFICATION_TIME: PropertyIdentity = PropertyIdentity::standard(0x3008, T::Time);
pub const MESSAGE_FLAGS: PropertyIdentity = PropertyIdentity::standard(0x0E07, T::Integer32);
pub const HAS_ATTACHMENTS: PropertyIdentity = PropertyIdentity::standard(0x0E1B, T::Boolean);
pub const DISPLAY_TO: PropertyIdentity = PropertyIdentity::standard(0x0E04, T::String);
pub const DISPLAY_CC: PropertyIdentity = PropertyIdentity::standard(0x0E03, T::String);
pub const DISPLAY_BCC: PropertyIdentity = PropertyIdentity::standard(0x0E02, T::String);
pub const INTERNET_MESSAGE_ID: PropertyIdentity = PropertyIdentity::standard(0x1035, T::String);
pub const SEARCH_KEY: PropertyIdentity = PropertyIdentity::standard(0x300B, T::Binary);
pub const STORE_SUPPORT_MASK: PropertyIdentity = PropertyIdentity::standard(0x340D, T::Integer32);
pub const MESSAGE_CODEPAGE: PropertyIdentity = PropertyIdentity::standard(0x3FFD, T::Integer32);
pub const INTERNET_CODEPAGE: PropertyIdentity = PropertyIdentity::standard(0x3FDE, T::Integer32);
pub const ICON_INDEX: PropertyIdentity = PropertyIdentity::standard(0x1080, T::Integer32);

// Bodies

pub const BODY: PropertyIdentity = PropertyIdentity::standard(0x1000, T::String);
pub const RTF_COMPRESSED: PropertyIdentity = PropertyIdentity::standard(0x1009, T::Binary);
pub const RTF_IN_SYNC: PropertyIdentity = PropertyIdentity::standard(0x0E1F, T::Boolean);
pub const HTML: PropertyIdentity = PropertyIdentity::standard(0x1013, T::Binary);
pub const NATIVE_BODY: PropertyIdentity = PropertyIdentity::standard(0x1016, T::Integer32);

// Sender and representing

pub const SENDER_ENTRY_ID: PropertyIdentity = PropertyIdentity::standard(0x0C19, T::Binary);
pub const SENDER_NAME: PropertyIdentity = PropertyIdentity::standard(0x0C1A, T::String);
pub const SENDER_SEARCH_KEY: PropertyIdentity = PropertyIdentity::standard(0x0C1D, T::Binary);
pub const SENDER_ADDRESS_TYPE: PropertyIdentity = PropertyIdentity::standard(0x0C1E, T::String);
pub const SENDER_EMAIL_ADDRESS: PropertyIdentity = PropertyIdentity::standard(0x0C1F, T::String);
pub const SENDER_SMTP_ADDRESS: PropertyIdentity = PropertyIdentity::standard(0x5D01, T::String);
pub const SENT_REPRESENTING_SEARCH_KEY: PropertyIdentity =
    PropertyIdentity::standard(0x003B, T::Binary);
pub const SENT_REPRESENTING_ENTRY_ID: PropertyIdentity =
    PropertyIdentity::standard(0x0041, T::Binary);
pub const SENT_REPRESENTING_NAME: PropertyIdentity = PropertyIdentity::standard(0x0042, T::String);
pub const SENT_REPRESENTING_ADDRESS_TYPE: PropertyIdentity =
    PropertyIdentity::standard(0x0064, T::String);
pub const SENT_REPRESENTING_EMAIL_ADDRESS: PropertyIdentity =
    PropertyIdentity::standard(0x0065, T::String);
pub const SENT_REPRESENTING_SMTP_ADDRESS: PropertyIdentity =
    PropertyIdentity::standard(0x5D02, T::String);

// Recipients and shared object properties

pub const RECIPIENT_TYPE: PropertyIdentity = PropertyIdentity::standard(0x0C15, T::Integer32);
pub const RESPONSIBILITY: PropertyIdentity = PropertyIdentity::standard(0x0E0F, T::Boolean);
pub const INSTANCE_KEY: PropertyIdentity = PropertyIdentity::standard(0x0FF6, T::Binary);
pub const RECORD_KEY: PropertyIdentity = PropertyIdentity::standard(0x0FF9, T::Binary);
pub const OBJECT_TYPE: PropertyIdentity = PropertyIdentity::standard(0x0FFE, T::Integer32);
pub const ENTRY_ID: PropertyIdentity = PropertyIdentity::standard(0x0FFF, T::Binary);
pub const ROW_ID: PropertyIdentity = PropertyIdentity::standard(0x3000, T::Integer32);
pub const DISPLAY_NAME: PropertyIdentity = PropertyIdentity::standard(0x3001, T::String);
pub const ADDRESS_TYPE: PropertyIdentity = PropertyIdentity::standard(0x3002, T::String);
pub const EMAIL_ADDRESS: PropertyIdentity = PropertyIdentity::standard(0x3003, T::String);
pub const DISPLAY_TYPE: PropertyIdentity = PropertyIdentity::standard(0x3900, T::Integer32);
pub const SMTP_ADDRESS: PropertyIdentity = PropertyIdentity::standard(0x39FE, T::String);
pub const SEND_RICH_INFO: PropertyIdentity = PropertyIdentity::standard(0x3A40, T::Boolean);
pub const RECIPIENT_DISPLAY_NAME: PropertyIdentity = PropertyIdentity::standard(0x5FF6, T::String);
pub const RECIPIENT_FLAGS: PropertyIdentity = PropertyIdentity::standard(0x5FFD, T::Integer32);
pub const RECIPIENT_TRACK_STATUS: PropertyIdentity =
    PropertyIdentity::standard(0x5FFF, T::Integer32);

// Contacts

pub const GENERATION: PropertyIdentity = PropertyIdentity::standard(0x3A05, T::String);
pub const GIVEN_NAME: PropertyIdentity = PropertyIdentity::standard(0x3A06, T::String);
pub const BUSINESS_TELEPHONE_NUMBER: PropertyIdentity =
    PropertyIdentity::standard(0x3A08, T::String);
pub const HOME_TELEPHONE_NUMBER: PropertyIdentity = PropertyIdentity::standard(0x3A09, T::String);
pub const SURNAME: PropertyIdentity = PropertyIdentity::standard(0x3A11, T::String);
pub const COMPANY_NAME: PropertyIdentity = PropertyIdentity::standard(0x3A16, T::String);
pub const TITLE: PropertyIdentity = PropertyIdentity::standard(0x3A17, T::String);
pub const DEPARTMENT_NAME: PropertyIdentity = PropertyIdentity::standard(0x3A18, T::String);
pub const MOBILE_TELEPHONE_NUMBER: PropertyIdentity =
    PropertyIdentity::standard(0x3A1C, T::String);
pub const BUSINESS_FAX_NUMBER: PropertyIdentity = PropertyIdentity::standard(0x3A24, T::String);
pub const BIRTHDAY: PropertyIdentity = PropertyIdentity::standard(0x3A42, T::Time);
pub const MIDDLE_NAME: PropertyIdentity = PropertyIdentity::standard(0x3A44, T::String);
pub const DISPLAY_NAME_PREFIX: PropertyIdentity = PropertyIdentity::standard(0x3A45, T::String);
pub const NICKNAME: PropertyIdentity = PropertyIdentity::standard(0x3A4F, T::String);

// Attachments

pub const ATTACH_SIZE: PropertyIdentity = PropertyIdentity::standard(0x0E20, T::Integer32);
pub const ATTACH_NUMBER: PropertyIdentity = PropertyIdentity::standard(0x0E21, T::Integer32);
pub const ATTACH_DATA_BINARY: PropertyIdentity = PropertyIdentity::standard(0x3701, T::Binary);
pub const ATTACH_DATA_OBJECT: PropertyIdentity = PropertyIdentity::standard(0x3701, T::Object);
pub const ATTACH_EXTENSION: PropertyIdentity = PropertyIdentity::standard(0x3703, T::String);
pub const ATTACH_FILENAME: PropertyIdentity = PropertyIdentity::standard(0x3704, T::String);
pub const ATTACH_METHOD: PropertyIdentity = PropertyIdentity::standard(0x3705, T::Integer32);
pub const ATTACH_LONG_FILENAME: PropertyIdentity = PropertyIdentity::standard(0x3707, T::String);
pub const RENDERING_POSITION: PropertyIdentity = PropertyIdentity::standard(0x370B, T::Integer32);
pub const ATTACH_MIME_TAG: PropertyIdentity = PropertyIdentity::standard(0x370E, T::String);
pub const ATTACH_CONTENT_ID: PropertyIdentity = PropertyIdentity::standard(0x3712, T::String);
pub const ATTACH_FLAGS: PropertyIdentity = PropertyIdentity::standard(0x3714, T::Integer32);
pub const ATTACHMENT_HIDDEN: PropertyIdentity = PropertyIdentity::standard(0x7FFE, T::Boolean);

// Named: common

pub const REMINDER_DELTA: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_COMMON, 0x8501, T::Integer32);
pub const REMINDER_SET: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_COMMON, 0x8503, T::Boolean);
pub const COMMON_START: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_COMMON, 0x8516, T::Time);
pub const COMMON_END: PropertyIdentity = PropertyIdentity::named_id(PSETID_COMMON, 0x8517, T::Time);
pub const KEYWORDS: PropertyIdentity =
    PropertyIdentity::named_str(PS_PUBLIC_STRINGS, "Keywords", T::MultipleString);

// Named: appointments

pub const BUSY_STATUS: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_APPOINTMENT, 0x8205, T::Integer32);
pub const LOCATION: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_APPOINTMENT, 0x8208, T::String);
pub const APPOINTMENT_START_WHOLE: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_APPOINTMENT, 0x820D, T::Time);
pub const APPOINTMENT_END_WHOLE: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_APPOINTMENT, 0x820E, T::Time);
pub const APPOINTMENT_DURATION: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_APPOINTMENT, 0x8213, T::Integer32);
pub const APPOINTMENT_SUB_TYPE: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_APPOINTMENT, 0x8215, T::Boolean);

// Named: contacts

pub const FILE_UNDER: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_ADDRESS, 0x8005, T::String);
pub const ADDRESS_BOOK_PROVIDER_EMAIL_LIST: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_ADDRESS, 0x8028, T::MultipleInteger32);
pub const ADDRESS_BOOK_PROVIDER_ARRAY_TYPE: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_ADDRESS, 0x8029, T::Integer32);
pub const EMAIL1_DISPLAY_NAME: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_ADDRESS, 0x8080, T::String);
pub const EMAIL1_ADDRESS_TYPE: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_ADDRESS, 0x8082, T::String);
pub const EMAIL1_EMAIL_ADDRESS: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_ADDRESS, 0x8083, T::String);
pub const EMAIL1_ORIGINAL_DISPLAY_NAME: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_ADDRESS, 0x8084, T::String);
pub const EMAIL1_ORIGINAL_ENTRY_ID: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_ADDRESS, 0x8085, T::Binary);

// Named: tasks

pub const TASK_STATUS: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_TASK, 0x8101, T::Integer32);
pub const PERCENT_COMPLETE: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_TASK, 0x8102, T::Floating64);
pub const TASK_START_DATE: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_TASK, 0x8104, T::Time);
pub const TASK_DUE_DATE: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_TASK, 0x8105, T::Time);
pub const TASK_DATE_COMPLETED: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_TASK, 0x810F, T::Time);
pub const TASK_COMPLETE: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_TASK, 0x811C, T::Boolean);
pub const TASK_OWNER: PropertyIdentity =
    PropertyIdentity::named_id(PSETID_TASK, 0x811F, T::String);

// Enumerated values

/// PidTagMessageFlags bits
pub const MSGFLAG_READ: i32 = 0x0001;
pub const MSGFLAG_UNMODIFIED: i32 = 0x0002;
pub const MSGFLAG_UNSENT: i32 = 0x0008;
pub const MSGFLAG_HASATTACH: i32 = 0x0010;

/// PidTagObjectType values
pub const MAPI_MESSAGE: i32 = 5;
pub const MAPI_MAILUSER: i32 = 6;
pub const MAPI_ATTACH: i32 = 7;

/// PidTagAttachMethod values
pub const ATTACH_BY_VALUE: i32 = 1;
pub const ATTACH_EMBEDDED_MSG: i32 = 5;

/// PidTagAttachFlags: attachment is referenced from the HTML body
pub const ATT_RENDERED_IN_BODY: i32 = 0x0004;

/// PidTagNativeBody values
pub const NATIVE_BODY_PLAIN: i32 = 1;
pub const NATIVE_BODY_RTF: i32 = 2;
pub const NATIVE_BODY_HTML: i32 = 3;

/// PidTagStoreSupportMask: store accepts Unicode strings
pub const STORE_UNICODE_OK: i32 = 0x0004_0000;

static CANONICAL_NAMES: phf::Map<&'static str, PropertyIdentity> = phf_map! {
    "PidTagMessageClass" => MESSAGE_CLASS,
    "PidTagImportance" => IMPORTANCE,
    "PidTagPriority" => PRIORITY,
    "PidTagSensitivity" => SENSITIVITY,
    "PidTagSubject" => SUBJECT,
    "PidTagSubjectPrefix" => SUBJECT_PREFIX,
    "PidTagNormalizedSubject" => NORMALIZED_SUBJECT,
    "PidTagConversationTopic" => CONVERSATION_TOPIC,
    "PidTagClientSubmitTime" => CLIENT_SUBMIT_TIME,
    "PidTagMessageDeliveryTime" => MESSAGE_DELIVERY_TIME,
    "PidTagCreationTime" => CREATION_TIME,
    "PidTagLastModificationTime" => LAST_MODIFICATION_TIME,
    "PidTagMessageFlags" => MESSAGE_FLAGS,
    "PidTagHasAttachments" => HAS_ATTACHMENTS,
    "PidTagDisplayTo" => DISPLAY_TO,
    "PidTagDisplayCc" => DISPLAY_CC,
    "PidTagDisplayBcc" => DISPLAY_BCC,
    "PidTagInternetMessageId" => INTERNET_MESSAGE_ID,
    "PidTagSearchKey" => SEARCH_KEY,
    "PidTagStoreSupportMask" => STORE_SUPPORT_MASK,
    "PidTagMessageCodepage" => MESSAGE_CODEPAGE,
    "PidTagInternetCodepage" => INTERNET_CODEPAGE,
    "PidTagIconIndex" => ICON_INDEX,
    "PidTagBody" => BODY,
    "PidTagRtfCompressed" => RTF_COMPRESSED,
    "PidTagRtfInSync" => RTF_IN_SYNC,
    "PidTagHtml" => HTML,
    "PidTagNativeBody" => NATIVE_BODY,
    "PidTagSenderEntryId" => SENDER_ENTRY_ID,
    "PidTagSenderName" => SENDER_NAME,
    "PidTagSenderSearchKey" => SENDER_SEARCH_KEY,
    "PidTagSenderAddressType" => SENDER_ADDRESS_TYPE,
    "PidTagSenderEmailAddress" => SENDER_EMAIL_ADDRESS,
    "PidTagSenderSmtpAddress" => SENDER_SMTP_ADDRESS,
    "PidTagSentRepresentingSearchKey" => SENT_REPRESENTING_SEARCH_KEY,
    "PidTagSentRepresentingEntryId" => SENT_REPRESENTING_ENTRY_ID,
    "PidTagSentRepresentingName" => SENT_REPRESENTING_NAME,
    "PidTagSentRepresentingAddressType" => SENT_REPRESENTING_ADDRESS_TYPE,
    "PidTagSentRepresentingEmailAddress" => SENT_REPRESENTING_EMAIL_ADDRESS,
    "PidTagSentRepresentingSmtpAddress" => SENT_REPRESENTING_SMTP_ADDRESS,
    "PidTagRecipientType" => RECIPIENT_TYPE,
    "PidTagResponsibility" => RESPONSIBILITY,
    "PidTagInstanceKey" => INSTANCE_KEY,
    "PidTagRecordKey" => RECORD_KEY,
    "PidTagObjectType" => OBJECT_TYPE,
    "PidTagEntryId" => ENTRY_ID,
    "PidTagRowid" => ROW_ID,
    "PidTagDisplayName" => DISPLAY_NAME,
    "PidTagAddressType" => ADDRESS_TYPE,
    "PidTagEmailAddress" => EMAIL_ADDRESS,
    "PidTagDisplayType" => DISPLAY_TYPE,
    "PidTagSmtpAddress" => SMTP_ADDRESS,
    "PidTagSendRichInfo" => SEND_RICH_INFO,
    "PidTagRecipientDisplayName" => RECIPIENT_DISPLAY_NAME,
    "PidTagRecipientFlags" => RECIPIENT_FLAGS,
    "PidTagRecipientTrackStatus" => RECIPIENT_TRACK_STATUS,
    "PidTagGeneration" => GENERATION,
    "PidTagGivenName" => GIVEN_NAME,
    "PidTagBusinessTelephoneNumber" => BUSINESS_TELEPHONE_NUMBER,
    "PidTagHomeTelephoneNumber" => HOME_TELEPHONE_NUMBER,
    "PidTagSurname" => SURNAME,
    "PidTagCompanyName" => COMPANY_NAME,
    "PidTagTitle" => TITLE,
    "PidTagDepartmentName" => DEPARTMENT_NAME,
    "PidTagMobileTelephoneNumber" => MOBILE_TELEPHONE_NUMBER,
    "PidTagBusinessFaxNumber" => BUSINESS_FAX_NUMBER,
    "PidTagBirthday" => BIRTHDAY,
    "PidTagMiddleName" => MIDDLE_NAME,
    "PidTagDisplayNamePrefix" => DISPLAY_NAME_PREFIX,
    "PidTagNickname" => NICKNAME,
    "PidTagAttachSize" => ATTACH_SIZE,
    "PidTagAttachNumber" => ATTACH_NUMBER,
    "PidTagAttachDataBinary" => ATTACH_DATA_BINARY,
    "PidTagAttachDataObject" => ATTACH_DATA_OBJECT,
    "PidTagAttachExtension" => ATTACH_EXTENSION,
    "PidTagAttachFilename" => ATTACH_FILENAME,
    "PidTagAttachMethod" => ATTACH_METHOD,
    "PidTagAttachLongFilename" => ATTACH_LONG_FILENAME,
    "PidTagRenderingPosition" => RENDERING_POSITION,
    "PidTagAttachMimeTag" => ATTACH_MIME_TAG,
    "PidTagAttachContentId" => ATTACH_CONTENT_ID,
    "PidTagAttachFlags" => ATTACH_FLAGS,
    "PidTagAttachmentHidden" => ATTACHMENT_HIDDEN,
    "PidLidReminderDelta" => REMINDER_DELTA,
    "PidLidReminderSet" => REMINDER_SET,
    "PidLidCommonStart" => COMMON_START,
    "PidLidCommonEnd" => COMMON_END,
    "PidNameKeywords" => KEYWORDS,
    "PidLidBusyStatus" => BUSY_STATUS,
    "PidLidLocation" => LOCATION,
    "PidLidAppointmentStartWhole" => APPOINTMENT_START_WHOLE,
    "PidLidAppointmentEndWhole" => APPOINTMENT_END_WHOLE,
    "PidLidAppointmentDuration" => APPOINTMENT_DURATION,
    "PidLidAppointmentSubType" => APPOINTMENT_SUB_TYPE,
    "PidLidFileUnder" => FILE_UNDER,
    "PidLidAddressBookProviderEmailList" => ADDRESS_BOOK_PROVIDER_EMAIL_LIST,
    "PidLidAddressBookProviderArrayType" => ADDRESS_BOOK_PROVIDER_ARRAY_TYPE,
    "PidLidEmail1DisplayName" => EMAIL1_DISPLAY_NAME,
    "PidLidEmail1AddressType" => EMAIL1_ADDRESS_TYPE,
    "PidLidEmail1EmailAddress" => EMAIL1_EMAIL_ADDRESS,
    "PidLidEmail1OriginalDisplayName" => EMAIL1_ORIGINAL_DISPLAY_NAME,
    "PidLidEmail1OriginalEntryId" => EMAIL1_ORIGINAL_ENTRY_ID,
    "PidLidTaskStatus" => TASK_STATUS,
    "PidLidPercentComplete" => PERCENT_COMPLETE,
    "PidLidTaskStartDate" => TASK_START_DATE,
    "PidLidTaskDueDate" => TASK_DUE_DATE,
    "PidLidTaskDateCompleted" => TASK_DATE_COMPLETED,
    "PidLidTaskComplete" => TASK_COMPLETE,
    "PidLidTaskOwner" => TASK_OWNER,
};

/// Look up a catalog entry by its MS-OXPROPS canonical name.
///
/// ```
/// use oxmsg::msg::tags::{self, by_canonical_name};
/// assert_eq!(by_canonical_name("PidTagSubject"), Some(&tags::SUBJECT));
/// assert!(by_canonical_name("PidTagNoSuchThing").is_none());
/// ```
pub fn by_canonical_name(name: &str) -> Option<&'static PropertyIdentity> {
    CANONICAL_NAMES.get(name)
}
