mod inmemory;
mod mongo;

pub use inmemory::InMemoryTaskRepo;
pub use mongo::MongoTaskRepo;

use coop_reminders_domain::{ReminderKind, Task, TaskCollection, ID};

#[async_trait::async_trait]
pub trait ITaskRepo: Send + Sync {
    async fn insert(&self, task: &Task) -> anyhow::Result<()>;
    /// The full contents of one of the task collections
    async fn find_all(&self, collection: TaskCollection) -> anyhow::Result<Vec<Task>>;
    /// Sets the `kind` reminder flag on the task unless it is already set.
    /// Returns `true` only for the caller that actually set it.
    async fn claim_reminder(
        &self,
        collection: TaskCollection,
        task_id: &ID,
        kind: ReminderKind,
    ) -> anyhow::Result<bool>;
    /// Clears a flag set by `claim_reminder` whose reminder could not be sent
    async fn release_reminder(
        &self,
        collection: TaskCollection,
        task_id: &ID,
        kind: ReminderKind,
    ) -> anyhow::Result<()>;
}
