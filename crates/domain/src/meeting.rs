use crate::{
    date::local_datetime_to_millis,
    reminder::ReminderFlags,
    shared::entity::{Entity, ID},
    task::is_completed_status,
    user::Participant,
};
use chrono_tz::Tz;

/// A meeting created from the admin dashboard. Its start is stored as
/// separate wall clock date and time strings.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminMeeting {
    pub id: ID,
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub reminder_time: String,
    pub user_id: Option<ID>,
    pub email_notifications: bool,
    pub reminder_days: Option<f64>,
    pub status: Option<String>,
    pub reminders: ReminderFlags,
}

impl AdminMeeting {
    pub fn new(title: &str, date: &str, reminder_time: &str) -> Self {
        Self {
            id: Default::default(),
            title: title.to_string(),
            date: date.to_string(),
            reminder_time: reminder_time.to_string(),
            user_id: None,
            email_notifications: true,
            reminder_days: None,
            status: None,
            reminders: Default::default(),
        }
    }

    /// Start of the meeting in millis, interpreting the stored date and
    /// time in the portal timezone
    pub fn start_ts(&self, tz: &Tz) -> anyhow::Result<i64> {
        local_datetime_to_millis(&self.date, &self.reminder_time, tz)
    }

    pub fn is_completed(&self) -> bool {
        is_completed_status(self.status.as_deref())
    }
}

impl Entity for AdminMeeting {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// A meeting scheduled between employees
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeMeeting {
    pub id: ID,
    pub title: String,
    /// Start in millis. `None` when missing or malformed in the store.
    pub start: Option<i64>,
    pub assigned_to: Option<Participant>,
    pub created_by: Option<Participant>,
    pub link: Option<String>,
    pub reminder_days: Option<f64>,
    pub status: Option<String>,
    /// Single flag written before the 30 minute and custom reminders were
    /// split. Only read, never written.
    pub legacy_reminder_sent: bool,
    pub reminders: ReminderFlags,
}

impl EmployeeMeeting {
    pub fn new(title: &str, start: i64) -> Self {
        Self {
            id: Default::default(),
            title: title.to_string(),
            start: Some(start),
            assigned_to: None,
            created_by: None,
            link: None,
            reminder_days: None,
            status: None,
            legacy_reminder_sent: false,
            reminders: Default::default(),
        }
    }

    pub fn is_completed(&self) -> bool {
        is_completed_status(self.status.as_deref())
    }

    /// Flags as seen by the trigger evaluation. A legacy `reminderSent`
    /// counts as the 30 minute reminder having been sent.
    pub fn effective_reminders(&self) -> ReminderFlags {
        let mut flags = self.reminders;
        if self.legacy_reminder_sent {
            flags.sent_30min = true;
        }
        flags
    }
}

impl Entity for EmployeeMeeting {
    fn id(&self) -> &ID {
        &self.id
    }
}
