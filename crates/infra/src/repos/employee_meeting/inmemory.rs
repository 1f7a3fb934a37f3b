use super::IEmployeeMeetingRepo;
use crate::repos::shared::inmemory_repo::*;
use coop_reminders_domain::{EmployeeMeeting, ReminderKind, ID};

pub struct InMemoryEmployeeMeetingRepo {
    meetings: std::sync::Mutex<Vec<EmployeeMeeting>>,
}

impl InMemoryEmployeeMeetingRepo {
    pub fn new() -> Self {
        Self {
            meetings: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IEmployeeMeetingRepo for InMemoryEmployeeMeetingRepo {
    async fn insert(&self, meeting: &EmployeeMeeting) -> anyhow::Result<()> {
        insert(meeting, &self.meetings);
        Ok(())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<EmployeeMeeting>> {
        Ok(find_all(&self.meetings))
    }

    async fn claim_reminder(&self, meeting_id: &ID, kind: ReminderKind) -> anyhow::Result<bool> {
        Ok(update_one(
            meeting_id,
            &self.meetings,
            |_| true,
            |m| claim_flag(&mut m.reminders, kind),
        ))
    }

    async fn release_reminder(&self, meeting_id: &ID, kind: ReminderKind) -> anyhow::Result<()> {
        update_one(
            meeting_id,
            &self.meetings,
            |_| true,
            |m| release_flag(&mut m.reminders, kind),
        );
        Ok(())
    }
}
