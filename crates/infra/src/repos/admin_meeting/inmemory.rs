use super::IAdminMeetingRepo;
use crate::repos::shared::inmemory_repo::*;
use coop_reminders_domain::{AdminMeeting, ReminderKind, ID};

pub struct InMemoryAdminMeetingRepo {
    meetings: std::sync::Mutex<Vec<AdminMeeting>>,
}

impl InMemoryAdminMeetingRepo {
    pub fn new() -> Self {
        Self {
            meetings: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IAdminMeetingRepo for InMemoryAdminMeetingRepo {
    async fn insert(&self, meeting: &AdminMeeting) -> anyhow::Result<()> {
        insert(meeting, &self.meetings);
        Ok(())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<AdminMeeting>> {
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
