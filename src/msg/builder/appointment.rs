use super::MessageItem;
use super::common::{MessageCommon, populate_common};
use crate::msg::error::{MsgError, MsgResult};
use crate::msg::named::NamedPropertyTable;
use crate::msg::record_set::PropertyRecordSet;
use crate::msg::tags;
use chrono::{DateTime, Utc};

/// Message class of appointments.
pub const APPOINTMENT_MESSAGE_CLASS: &str = "IPM.Appointment";

/// Icon of a single-instance appointment.
const APPOINTMENT_ICON: i32 = 0x0400;

/// PidLidBusyStatus values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusyStatus {
    Free = 0,
    Tentative = 1,
    #[default]
    Busy = 2,
    OutOfOffice = 3,
    WorkingElsewhere = 4,
}

/// A calendar appointment (`IPM.Appointment`).
#[derive(Debug, Clone, Default)]
pub struct Appointment {
    pub common: MessageCommon,
    pub location: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub all_day: bool,
    pub busy_status: BusyStatus,
    /// Minutes before the start to remind; `None` disables the reminder
    pub reminder_minutes: Option<i32>,
}

impl Appointment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn starts(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn ends(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    pub fn busy_status(mut self, status: BusyStatus) -> Self {
        self.busy_status = status;
        self
    }

    pub fn reminder(mut self, minutes: i32) -> Self {
        self.reminder_minutes = Some(minutes);
        self
    }

    /// Length in minutes when both ends are known.
    fn duration_minutes(&self) -> MsgResult<Option<i32>> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Ok(None);
        };
        if end < start {
            return Err(MsgError::InvalidInput(format!(
                "appointment ends ({}) before it starts ({})",
                end, start
            )));
        }
        let minutes = (end - start).num_minutes();
        i32::try_from(minutes).map(Some).map_err(|_| MsgError::ValueTooLarge {
            property: tags::APPOINTMENT_DURATION.to_string(),
            len: minutes as u64,
        })
    }
}

impl MessageItem for Appointment {
    fn common(&self) -> &MessageCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut MessageCommon {
        &mut self.common
    }

    fn validate(&self) -> MsgResult<()> {
        self.duration_minutes().map(|_| ())
    }

    fn populate(&self, set: &mut PropertyRecordSet, table: &mut NamedPropertyTable) -> MsgResult<()> {
        populate_common(
            set,
            table,
            &self.common,
            APPOINTMENT_MESSAGE_CLASS,
            tags::MSGFLAG_READ,
        )?;
        set.set(&tags::ICON_INDEX, APPOINTMENT_ICON)?;

        if let Some(location) = self.location.as_deref().filter(|l| !l.is_empty()) {
            set.set_resolved(table, &tags::LOCATION, location)?;
        }
        if let Some(start) = self.start {
            set.set_resolved(table, &tags::APPOINTMENT_START_WHOLE, start)?;
            set.set_resolved(table, &tags::COMMON_START, start)?;
        }
        if let Some(end) = self.end {
            set.set_resolved(table, &tags::APPOINTMENT_END_WHOLE, end)?;
            set.set_resolved(table, &tags::COMMON_END, end)?;
        }
        if let Some(minutes) = self.duration_minutes()? {
            set.set_resolved(table, &tags::APPOINTMENT_DURATION, minutes)?;
        }
        set.set_resolved(table, &tags::APPOINTMENT_SUB_TYPE, self.all_day)?;
        set.set_resolved(table, &tags::BUSY_STATUS, self.busy_status as i32)?;

        set.set_resolved(table, &tags::REMINDER_SET, self.reminder_minutes.is_some())?;
        if let Some(minutes) = self.reminder_minutes {
            set.set_resolved(table, &tags::REMINDER_DELTA, minutes)?;
        }
        Ok(())
    }
}
