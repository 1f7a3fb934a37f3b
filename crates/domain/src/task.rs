use crate::{
    reminder::ReminderFlags,
    shared::entity::{Entity, ID},
    user::Participant,
};
use std::fmt::Display;

/// The three task collections of the portal. They share one document shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskCollection {
    /// Tasks a user created for themselves
    Personal,
    /// Tasks assigned to an employee
    Employee,
    /// Tasks owned by an admin
    Admin,
}

impl TaskCollection {
    pub const ALL: [TaskCollection; 3] = [
        TaskCollection::Personal,
        TaskCollection::Employee,
        TaskCollection::Admin,
    ];

    pub fn collection_name(&self) -> &'static str {
        match self {
            Self::Personal => "tasks",
            Self::Employee => "employeeTasks",
            Self::Admin => "adminTasks",
        }
    }
}

impl Display for TaskCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.collection_name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: ID,
    pub collection: TaskCollection,
    pub title: String,
    pub description: String,
    /// Deadline (or due date) in millis. `None` when missing or malformed
    /// in the store.
    pub deadline: Option<i64>,
    /// Owner of a personal task
    pub user_id: Option<ID>,
    pub assigned_to: Option<Participant>,
    pub created_by: Option<Participant>,
    /// Extra reminder this many days before the deadline
    pub reminder_days: Option<f64>,
    pub status: Option<String>,
    pub reminders: ReminderFlags,
}

impl Task {
    pub fn new(collection: TaskCollection, title: &str, deadline: i64) -> Self {
        Self {
            id: Default::default(),
            collection,
            title: title.to_string(),
            description: String::new(),
            deadline: Some(deadline),
            user_id: None,
            assigned_to: None,
            created_by: None,
            reminder_days: None,
            status: None,
            reminders: Default::default(),
        }
    }

    pub fn is_completed(&self) -> bool {
        is_completed_status(self.status.as_deref())
    }
}

impl Entity for Task {
    fn id(&self) -> &ID {
        &self.id
    }
}

pub(crate) fn is_completed_status(status: Option<&str>) -> bool {
    status
        .map(|s| s.trim().eq_ignore_ascii_case("completed"))
        .unwrap_or(false)
}
