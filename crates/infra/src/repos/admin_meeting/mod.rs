mod inmemory;
mod mongo;

pub use inmemory::InMemoryAdminMeetingRepo;
pub use mongo::MongoAdminMeetingRepo;

use coop_reminders_domain::{AdminMeeting, ReminderKind, ID};

#[async_trait::async_trait]
pub trait IAdminMeetingRepo: Send + Sync {
    async fn insert(&self, meeting: &AdminMeeting) -> anyhow::Result<()>;
    async fn find_all(&self) -> anyhow::Result<Vec<AdminMeeting>>;
    async fn claim_reminder(&self, meeting_id: &ID, kind: ReminderKind) -> anyhow::Result<bool>;
    async fn release_reminder(&self, meeting_id: &ID, kind: ReminderKind) -> anyhow::Result<()>;
}
