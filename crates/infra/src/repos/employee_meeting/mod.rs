mod inmemory;
mod mongo;

pub use inmemory::InMemoryEmployeeMeetingRepo;
pub use mongo::MongoEmployeeMeetingRepo;

use coop_reminders_domain::{EmployeeMeeting, ReminderKind, ID};

#[async_trait::async_trait]
pub trait IEmployeeMeetingRepo: Send + Sync {
    async fn insert(&self, meeting: &EmployeeMeeting) -> anyhow::Result<()>;
    async fn find_all(&self) -> anyhow::Result<Vec<EmployeeMeeting>>;
    async fn claim_reminder(&self, meeting_id: &ID, kind: ReminderKind) -> anyhow::Result<bool>;
    async fn release_reminder(&self, meeting_id: &ID, kind: ReminderKind) -> anyhow::Result<()>;
}
