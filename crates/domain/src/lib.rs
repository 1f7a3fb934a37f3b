mod date;
mod meeting;
mod recipient;
mod record;
mod reminder;
mod shared;
mod summary;
mod task;
mod user;

pub use date::{format_timestamp, local_datetime_to_millis};
pub use meeting::{AdminMeeting, EmployeeMeeting};
pub use recipient::{resolve_push_token, resolve_recipient};
pub use record::{MalformedRecord, ReminderRecord};
pub use reminder::{
    due_reminders, DueWindow, ReminderFlags, ReminderKind, DAY_MILLIS,
    FIXED_REMINDER_OFFSET_MILLIS, MEETING_CATCH_UP_MILLIS, MINUTE_MILLIS,
};
pub use shared::entity::{Entity, ID};
pub use summary::DispatchSummary;
pub use task::{Task, TaskCollection};
pub use user::{Participant, User, UserDirectory};
