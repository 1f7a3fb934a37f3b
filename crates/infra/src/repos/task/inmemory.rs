use super::ITaskRepo;
use crate::repos::shared::inmemory_repo::*;
use coop_reminders_domain::{ReminderKind, Task, TaskCollection, ID};

pub struct InMemoryTaskRepo {
    tasks: std::sync::Mutex<Vec<Task>>,
}

impl InMemoryTaskRepo {
    pub fn new() -> Self {
        Self {
            tasks: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ITaskRepo for InMemoryTaskRepo {
    async fn insert(&self, task: &Task) -> anyhow::Result<()> {
        insert(task, &self.tasks);
        Ok(())
    }

    async fn find_all(&self, collection: TaskCollection) -> anyhow::Result<Vec<Task>> {
        Ok(find_by(&self.tasks, |t| t.collection == collection))
    }

    async fn claim_reminder(
        &self,
        collection: TaskCollection,
        task_id: &ID,
        kind: ReminderKind,
    ) -> anyhow::Result<bool> {
        Ok(update_one(
            task_id,
            &self.tasks,
            |t| t.collection == collection,
            |t| claim_flag(&mut t.reminders, kind),
        ))
    }

    async fn release_reminder(
        &self,
        collection: TaskCollection,
        task_id: &ID,
        kind: ReminderKind,
    ) -> anyhow::Result<()> {
        update_one(
            task_id,
            &self.tasks,
            |t| t.collection == collection,
            |t| release_flag(&mut t.reminders, kind),
        );
        Ok(())
    }
}
