use crate::{
    meeting::{AdminMeeting, EmployeeMeeting},
    reminder::{due_reminders, DueWindow, ReminderFlags, ReminderKind},
    shared::entity::ID,
    task::Task,
};
use chrono_tz::Tz;
use thiserror::Error;

/// Any record that can receive reminders
#[derive(Debug, Clone, Copy)]
pub enum ReminderRecord<'a> {
    Task(&'a Task),
    AdminMeeting(&'a AdminMeeting),
    EmployeeMeeting(&'a EmployeeMeeting),
}

#[derive(Error, Debug, PartialEq)]
pub enum MalformedRecord {
    #[error("The {0} has no valid deadline")]
    MissingDeadline(&'static str),
    #[error("The meeting date `{date}` and time `{time}` are not a valid start")]
    InvalidStart { date: String, time: String },
}

impl<'a> ReminderRecord<'a> {
    pub fn id(&self) -> &'a ID {
        match *self {
            Self::Task(t) => &t.id,
            Self::AdminMeeting(m) => &m.id,
            Self::EmployeeMeeting(m) => &m.id,
        }
    }

    /// Human readable name of the record type, used in logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Task(_) => "task",
            Self::AdminMeeting(_) => "admin meeting",
            Self::EmployeeMeeting(_) => "employee meeting",
        }
    }

    pub fn is_completed(&self) -> bool {
        match self {
            Self::Task(t) => t.is_completed(),
            Self::AdminMeeting(m) => m.is_completed(),
            Self::EmployeeMeeting(m) => m.is_completed(),
        }
    }

    /// Admin meetings can opt out of email reminders
    pub fn wants_reminders(&self) -> bool {
        match self {
            Self::AdminMeeting(m) => m.email_notifications,
            _ => true,
        }
    }

    /// Deadline of a task or start of a meeting in millis
    pub fn deadline(&self, tz: &Tz) -> Result<i64, MalformedRecord> {
        match self {
            Self::Task(t) => t.deadline.ok_or(MalformedRecord::MissingDeadline("task")),
            Self::AdminMeeting(m) => m.start_ts(tz).map_err(|_| MalformedRecord::InvalidStart {
                date: m.date.clone(),
                time: m.reminder_time.clone(),
            }),
            Self::EmployeeMeeting(m) => m
                .start
                .ok_or(MalformedRecord::MissingDeadline("employee meeting")),
        }
    }

    pub fn reminder_days(&self) -> Option<f64> {
        match self {
            Self::Task(t) => t.reminder_days,
            Self::AdminMeeting(m) => m.reminder_days,
            Self::EmployeeMeeting(m) => m.reminder_days,
        }
    }

    pub fn flags(&self) -> ReminderFlags {
        match self {
            Self::Task(t) => t.reminders,
            Self::AdminMeeting(m) => m.reminders,
            Self::EmployeeMeeting(m) => m.effective_reminders(),
        }
    }

    /// Tasks stay due until their deadline, meetings only within the
    /// catch-up window
    pub fn window(&self) -> DueWindow {
        match self {
            Self::Task(_) => DueWindow::UntilDeadline,
            Self::AdminMeeting(_) | Self::EmployeeMeeting(_) => DueWindow::meeting(),
        }
    }

    /// Reminders of this record that should be sent at `now`.
    /// Completed records never have due reminders.
    pub fn due_reminders(&self, now: i64, tz: &Tz) -> Result<Vec<ReminderKind>, MalformedRecord> {
        if self.is_completed() {
            return Ok(Vec::new());
        }
        let deadline = self.deadline(tz)?;
        Ok(due_reminders(
            deadline,
            self.reminder_days(),
            self.flags(),
            self.window(),
            now,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        reminder::{DAY_MILLIS, MINUTE_MILLIS},
        task::TaskCollection,
    };

    const T: i64 = 1_748_768_400_000; // 2025-06-01T09:00:00Z

    #[test]
    fn completed_records_have_nothing_due() {
        let mut task = Task::new(TaskCollection::Employee, "Inventory", T);
        task.status = Some("completed".into());
        let due = ReminderRecord::Task(&task)
            .due_reminders(T - 10 * MINUTE_MILLIS, &Tz::UTC)
            .unwrap();
        assert!(due.is_empty());
    }

    #[test]
    fn completed_admin_meeting_is_not_reminded_at_trigger() {
        let mut meeting = AdminMeeting::new("Board", "2025-06-01", "09:00");
        meeting.reminder_days = Some(1.0);
        let trigger = T - 30 * MINUTE_MILLIS;
        assert_eq!(
            ReminderRecord::AdminMeeting(&meeting)
                .due_reminders(trigger, &Tz::UTC)
                .unwrap(),
            vec![ReminderKind::ThirtyMinutes]
        );

        meeting.status = Some("completed".into());
        let record = ReminderRecord::AdminMeeting(&meeting);
        assert!(record.due_reminders(trigger, &Tz::UTC).unwrap().is_empty());
        assert!(record
            .due_reminders(T - DAY_MILLIS, &Tz::UTC)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn completed_employee_meeting_is_not_reminded_at_trigger() {
        let mut meeting = EmployeeMeeting::new("1:1", T);
        let trigger = T - 30 * MINUTE_MILLIS;
        assert_eq!(
            ReminderRecord::EmployeeMeeting(&meeting)
                .due_reminders(trigger, &Tz::UTC)
                .unwrap(),
            vec![ReminderKind::ThirtyMinutes]
        );

        meeting.status = Some("completed".into());
        assert!(ReminderRecord::EmployeeMeeting(&meeting)
            .due_reminders(trigger, &Tz::UTC)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn missing_deadline_is_malformed() {
        let mut task = Task::new(TaskCollection::Personal, "Inventory", T);
        task.deadline = None;
        assert_eq!(
            ReminderRecord::Task(&task).due_reminders(T, &Tz::UTC),
            Err(MalformedRecord::MissingDeadline("task"))
        );

        let meeting = AdminMeeting::new("Board", "first of june", "09:00");
        assert!(matches!(
            ReminderRecord::AdminMeeting(&meeting).due_reminders(T, &Tz::UTC),
            Err(MalformedRecord::InvalidStart { .. })
        ));
    }

    #[test]
    fn task_fixed_reminder_is_due_within_last_thirty_minutes() {
        let task = Task::new(TaskCollection::Personal, "Inventory", T);
        let record = ReminderRecord::Task(&task);
        assert!(record
            .due_reminders(T - 31 * MINUTE_MILLIS, &Tz::UTC)
            .unwrap()
            .is_empty());
        assert_eq!(
            record.due_reminders(T - 20 * MINUTE_MILLIS, &Tz::UTC).unwrap(),
            vec![ReminderKind::ThirtyMinutes]
        );
        // tasks keep catching up until the deadline
        assert_eq!(
            record.due_reminders(T - MINUTE_MILLIS, &Tz::UTC).unwrap(),
            vec![ReminderKind::ThirtyMinutes]
        );
    }

    #[test]
    fn admin_meeting_custom_reminder_fires_at_trigger() {
        let mut meeting = AdminMeeting::new("Board", "2025-06-01", "09:00");
        meeting.reminder_days = Some(2.0);
        let record = ReminderRecord::AdminMeeting(&meeting);
        let trigger = T - 2 * DAY_MILLIS;

        assert_eq!(
            record.due_reminders(trigger, &Tz::UTC).unwrap(),
            vec![ReminderKind::Custom]
        );
        assert!(record
            .due_reminders(trigger - MINUTE_MILLIS, &Tz::UTC)
            .unwrap()
            .is_empty());
        assert!(record
            .due_reminders(trigger + 10 * MINUTE_MILLIS, &Tz::UTC)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn employee_meeting_fixed_reminder_has_bounded_catch_up() {
        let meeting = EmployeeMeeting::new("1:1", T);
        let record = ReminderRecord::EmployeeMeeting(&meeting);
        let trigger = T - 30 * MINUTE_MILLIS;
        assert_eq!(
            record
                .due_reminders(trigger + 4 * MINUTE_MILLIS, &Tz::UTC)
                .unwrap(),
            vec![ReminderKind::ThirtyMinutes]
        );
        assert!(record
            .due_reminders(trigger + 6 * MINUTE_MILLIS, &Tz::UTC)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn employee_meeting_legacy_flag_is_respected() {
        let mut meeting = EmployeeMeeting::new("1:1", T);
        meeting.legacy_reminder_sent = true;
        let record = ReminderRecord::EmployeeMeeting(&meeting);
        assert!(record
            .due_reminders(T - 30 * MINUTE_MILLIS, &Tz::UTC)
            .unwrap()
            .is_empty());
    }
}
