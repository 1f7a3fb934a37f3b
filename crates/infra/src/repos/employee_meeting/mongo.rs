use super::IEmployeeMeetingRepo;
use crate::repos::shared::mongo_repo::{
    self, bson_to_f64, bson_to_timestamp_millis, MongoDocument, ParticipantMongo,
};
use coop_reminders_domain::{EmployeeMeeting, ReminderFlags, ReminderKind, ID};
use mongodb::{
    bson::{Bson, DateTime, Document},
    Collection, Database,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub struct MongoEmployeeMeetingRepo {
    collection: Collection<Document>,
}

impl MongoEmployeeMeetingRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("employeeMeetings"),
        }
    }
}

#[async_trait::async_trait]
impl IEmployeeMeetingRepo for MongoEmployeeMeetingRepo {
    async fn insert(&self, meeting: &EmployeeMeeting) -> anyhow::Result<()> {
        mongo_repo::insert::<_, EmployeeMeetingMongo>(&self.collection, meeting).await
    }

    async fn find_all(&self) -> anyhow::Result<Vec<EmployeeMeeting>> {
        mongo_repo::find_all::<_, EmployeeMeetingMongo>(&self.collection).await
    }

    async fn claim_reminder(&self, meeting_id: &ID, kind: ReminderKind) -> anyhow::Result<bool> {
        mongo_repo::claim_reminder_flag(&self.collection, meeting_id, kind).await
    }

    async fn release_reminder(&self, meeting_id: &ID, kind: ReminderKind) -> anyhow::Result<()> {
        mongo_repo::release_reminder_flag(&self.collection, meeting_id, kind).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeMeetingMongo {
    #[serde(rename = "_id", with = "mongo_repo::document_id")]
    id: ID,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assigned_to: Option<ParticipantMongo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_by: Option<ParticipantMongo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meeting_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reminder_days: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reminder_sent: Option<bool>,
    #[serde(default, rename = "reminderSent_30min")]
    reminder_sent_30min: Option<bool>,
    #[serde(default, rename = "reminderSent_custom")]
    reminder_sent_custom: Option<bool>,
}

impl MongoDocument<EmployeeMeeting> for EmployeeMeetingMongo {
    fn to_domain(self) -> EmployeeMeeting {
        let id = self.id;
        let start = self.start.as_ref().and_then(bson_to_timestamp_millis);
        if let (Some(raw), None) = (&self.start, start) {
            warn!("Employee meeting {} has an unreadable start: {}", id, raw);
        }
        let link = self
            .link
            .filter(|l| !l.trim().is_empty())
            .or(self.meeting_link);

        EmployeeMeeting {
            id,
            title: self.title.unwrap_or_default(),
            start,
            assigned_to: self.assigned_to.map(ParticipantMongo::to_domain),
            created_by: self.created_by.map(ParticipantMongo::to_domain),
            link,
            reminder_days: self.reminder_days.as_ref().and_then(bson_to_f64),
            status: self.status,
            legacy_reminder_sent: self.reminder_sent.unwrap_or(false),
            reminders: ReminderFlags {
                sent_30min: self.reminder_sent_30min.unwrap_or(false),
                sent_custom: self.reminder_sent_custom.unwrap_or(false),
            },
        }
    }

    fn from_domain(meeting: &EmployeeMeeting) -> Self {
        Self {
            id: meeting.id.clone(),
            title: Some(meeting.title.clone()),
            start: meeting
                .start
                .map(|ts| Bson::DateTime(DateTime::from_millis(ts))),
            assigned_to: meeting
                .assigned_to
                .as_ref()
                .map(ParticipantMongo::from_domain),
            created_by: meeting.created_by.as_ref().map(ParticipantMongo::from_domain),
            link: meeting.link.clone(),
            meeting_link: None,
            reminder_days: meeting.reminder_days.map(Bson::Double),
            status: meeting.status.clone(),
            reminder_sent: Some(meeting.legacy_reminder_sent),
            reminder_sent_30min: Some(meeting.reminders.sent_30min),
            reminder_sent_custom: Some(meeting.reminders.sent_custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, from_document, oid::ObjectId};

    #[test]
    fn reads_employee_meeting_document() {
        let document = doc! {
            "_id": ObjectId::new(),
            "title": "Weekly sync",
            "start": DateTime::from_millis(1_748_768_400_000),
            "createdBy": { "email": "lead@coop.test" },
            "meetingLink": "https://meet.example.org/abc",
            "reminderSent": true,
        };
        let meeting = from_document::<EmployeeMeetingMongo>(document)
            .unwrap()
            .to_domain();

        assert_eq!(meeting.start, Some(1_748_768_400_000));
        assert_eq!(meeting.link.as_deref(), Some("https://meet.example.org/abc"));
        assert!(meeting.legacy_reminder_sent);
        assert!(!meeting.reminders.sent_30min);
        assert_eq!(
            meeting.created_by.unwrap().email.as_deref(),
            Some("lead@coop.test")
        );
    }
}
