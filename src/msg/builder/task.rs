use super::MessageItem;
use super::common::{MessageCommon, populate_common};
use crate::msg::error::{MsgError, MsgResult};
use crate::msg::named::NamedPropertyTable;
use crate::msg::record_set::PropertyRecordSet;
use crate::msg::tags;
use chrono::{DateTime, Utc};

/// Message class of tasks.
pub const TASK_MESSAGE_CLASS: &str = "IPM.Task";

const TASK_ICON: i32 = 0x0500;

/// PidLidTaskStatus values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    NotStarted = 0,
    InProgress = 1,
    Complete = 2,
    Waiting = 3,
    Deferred = 4,
}

/// A task (`IPM.Task`).
#[derive(Debug, Clone, Default)]
pub struct Task {
    pub common: MessageCommon,
    pub status: TaskStatus,
    /// Progress between 0.0 and 1.0
    pub percent_complete: f64,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_on: Option<DateTime<Utc>>,
    pub owner: Option<String>,
}

impl Task {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn percent_complete(mut self, percent: f64) -> Self {
        self.percent_complete = percent;
        self
    }

    pub fn start_date(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn completed_on(mut self, completed: DateTime<Utc>) -> Self {
        self.completed_on = Some(completed);
        self
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    fn is_complete(&self) -> bool {
        self.status == TaskStatus::Complete
    }
}

impl MessageItem for Task {
    fn common(&self) -> &MessageCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut MessageCommon {
        &mut self.common
    }

    fn validate(&self) -> MsgResult<()> {
        if !(0.0..=1.0).contains(&self.percent_complete) {
            return Err(MsgError::InvalidInput(format!(
                "task progress {} is outside 0.0..=1.0",
                self.percent_complete
            )));
        }
        Ok(())
    }

    fn populate(&self, set: &mut PropertyRecordSet, table: &mut NamedPropertyTable) -> MsgResult<()> {
        self.validate()?;
        populate_common(set, table, &self.common, TASK_MESSAGE_CLASS, tags::MSGFLAG_READ)?;
        set.set(&tags::ICON_INDEX, TASK_ICON)?;

        // A complete task always reports full progress.
        let percent = if self.is_complete() {
            1.0
        } else {
            self.percent_complete
        };
        set.set_resolved(table, &tags::TASK_STATUS, self.status as i32)?;
        set.set_resolved(table, &tags::PERCENT_COMPLETE, percent)?;
        set.set_resolved(table, &tags::TASK_COMPLETE, self.is_complete())?;
        if let Some(start) = self.start_date {
            set.set_resolved(table, &tags::TASK_START_DATE, start)?;
        }
        if let Some(due) = self.due_date {
            set.set_resolved(table, &tags::TASK_DUE_DATE, due)?;
        }
        if let Some(completed) = self.completed_on {
            set.set_resolved(table, &tags::TASK_DATE_COMPLETED, completed)?;
        }
        if let Some(owner) = self.owner.as_deref().filter(|o| !o.is_empty()) {
            set.set_resolved(table, &tags::TASK_OWNER, owner)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::property::PropertyValue;

    #[test]
    fn test_complete_forces_full_progress() {
        let task = Task::new()
            .subject("Ship it")
            .status(TaskStatus::Complete)
            .percent_complete(0.25);
        let mut set = PropertyRecordSet::new();
        let mut table = NamedPropertyTable::new();
        task.populate(&mut set, &mut table).unwrap();
        assert_eq!(
            set.value(&tags::PERCENT_COMPLETE),
            Some(&PropertyValue::Floating64(1.0))
        );
        assert_eq!(set.value(&tags::TASK_COMPLETE), Some(&PropertyValue::Boolean(true)));
        assert_eq!(
            set.value(&tags::MESSAGE_CLASS),
            Some(&PropertyValue::String("IPM.Task".into()))
        );
    }

    #[test]
    fn test_in_progress() {
        let task = Task::new()
            .status(TaskStatus::InProgress)
            .percent_complete(0.5)
            .owner("Jane");
        let mut set = PropertyRecordSet::new();
        let mut table = NamedPropertyTable::new();
        task.populate(&mut set, &mut table).unwrap();
        assert_eq!(set.value(&tags::TASK_STATUS), Some(&PropertyValue::Integer32(1)));
        assert_eq!(
            set.value(&tags::TASK_OWNER),
            Some(&PropertyValue::String("Jane".into()))
        );
        assert!(!set.contains(&tags::TASK_DUE_DATE));
    }

    #[test]
    fn test_progress_out_of_range() {
        let task = Task::new().percent_complete(1.5);
        assert!(matches!(task.validate(), Err(MsgError::InvalidInput(_))));
        let mut set = PropertyRecordSet::new();
        let mut table = NamedPropertyTable::new();
        assert!(matches!(
            task.populate(&mut set, &mut table),
            Err(MsgError::InvalidInput(_))
        ));
        assert!(set.is_empty());
    }
}
