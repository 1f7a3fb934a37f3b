use super::IAdminMeetingRepo;
use crate::repos::shared::mongo_repo::{self, bson_to_f64, bson_to_id, MongoDocument};
use coop_reminders_domain::{AdminMeeting, ReminderFlags, ReminderKind, ID};
use mongodb::{
    bson::{Bson, Document},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

pub struct MongoAdminMeetingRepo {
    collection: Collection<Document>,
}

impl MongoAdminMeetingRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("meetings"),
        }
    }
}

#[async_trait::async_trait]
impl IAdminMeetingRepo for MongoAdminMeetingRepo {
    async fn insert(&self, meeting: &AdminMeeting) -> anyhow::Result<()> {
        mongo_repo::insert::<_, AdminMeetingMongo>(&self.collection, meeting).await
    }

    async fn find_all(&self) -> anyhow::Result<Vec<AdminMeeting>> {
        mongo_repo::find_all::<_, AdminMeetingMongo>(&self.collection).await
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
struct AdminMeetingMongo {
    #[serde(rename = "_id", with = "mongo_repo::document_id")]
    id: ID,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    reminder_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<Bson>,
    #[serde(default)]
    email_notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reminder_days: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(default, rename = "reminderSent_30min")]
    reminder_sent_30min: Option<bool>,
    #[serde(default, rename = "reminderSent_custom")]
    reminder_sent_custom: Option<bool>,
}

impl MongoDocument<AdminMeeting> for AdminMeetingMongo {
    fn to_domain(self) -> AdminMeeting {
        AdminMeeting {
            id: self.id,
            title: self.title.unwrap_or_default(),
            date: self.date.unwrap_or_default(),
            reminder_time: self.reminder_time.unwrap_or_default(),
            user_id: self.user_id.as_ref().and_then(bson_to_id),
            // Meetings created before the setting existed always got emails
            email_notifications: self.email_notifications.unwrap_or(true),
            reminder_days: self.reminder_days.as_ref().and_then(bson_to_f64),
            status: self.status,
            reminders: ReminderFlags {
                sent_30min: self.reminder_sent_30min.unwrap_or(false),
                sent_custom: self.reminder_sent_custom.unwrap_or(false),
            },
        }
    }

    fn from_domain(meeting: &AdminMeeting) -> Self {
        Self {
            id: meeting.id.clone(),
            title: Some(meeting.title.clone()),
            date: Some(meeting.date.clone()),
            reminder_time: Some(meeting.reminder_time.clone()),
            user_id: meeting
                .user_id
                .as_ref()
                .map(mongo_repo::id_to_bson),
            email_notifications: Some(meeting.email_notifications),
            reminder_days: meeting.reminder_days.map(Bson::Double),
            status: meeting.status.clone(),
            reminder_sent_30min: Some(meeting.reminders.sent_30min),
            reminder_sent_custom: Some(meeting.reminders.sent_custom),
        }
    }
}
