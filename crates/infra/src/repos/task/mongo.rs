use super::ITaskRepo;
use crate::repos::shared::mongo_repo::{
    self, bson_to_f64, bson_to_id, bson_to_timestamp_millis, MongoDocument, ParticipantMongo,
};
use coop_reminders_domain::{ReminderFlags, ReminderKind, Task, TaskCollection, ID};
use mongodb::{
    bson::{Bson, DateTime, Document},
    Collection, Database,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// All three task collections share the same document shape
pub struct MongoTaskRepo {
    personal: Collection<Document>,
    employee: Collection<Document>,
    admin: Collection<Document>,
}

impl MongoTaskRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            personal: db.collection(TaskCollection::Personal.collection_name()),
            employee: db.collection(TaskCollection::Employee.collection_name()),
            admin: db.collection(TaskCollection::Admin.collection_name()),
        }
    }

    fn collection(&self, collection: TaskCollection) -> &Collection<Document> {
        match collection {
            TaskCollection::Personal => &self.personal,
            TaskCollection::Employee => &self.employee,
            TaskCollection::Admin => &self.admin,
        }
    }
}

#[async_trait::async_trait]
impl ITaskRepo for MongoTaskRepo {
    async fn insert(&self, task: &Task) -> anyhow::Result<()> {
        mongo_repo::insert::<_, TaskMongo>(self.collection(task.collection), task).await
    }

    async fn find_all(&self, collection: TaskCollection) -> anyhow::Result<Vec<Task>> {
        let tasks =
            mongo_repo::find_all::<_, TaskMongo>(self.collection(collection)).await?;
        Ok(tasks
            .into_iter()
            .map(|mut task| {
                task.collection = collection;
                task
            })
            .collect())
    }

    async fn claim_reminder(
        &self,
        collection: TaskCollection,
        task_id: &ID,
        kind: ReminderKind,
    ) -> anyhow::Result<bool> {
        mongo_repo::claim_reminder_flag(self.collection(collection), task_id, kind).await
    }

    async fn release_reminder(
        &self,
        collection: TaskCollection,
        task_id: &ID,
        kind: ReminderKind,
    ) -> anyhow::Result<()> {
        mongo_repo::release_reminder_flag(self.collection(collection), task_id, kind).await
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskNotificationsMongo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reminder_days: Option<Bson>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskMongo {
    #[serde(rename = "_id", with = "mongo_repo::document_id")]
    id: ID,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deadline: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<Bson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assigned_to: Option<ParticipantMongo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_by: Option<ParticipantMongo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notifications: Option<TaskNotificationsMongo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(default, rename = "reminderSent_30min")]
    reminder_sent_30min: Option<bool>,
    #[serde(default, rename = "reminderSent_custom")]
    reminder_sent_custom: Option<bool>,
}

impl MongoDocument<Task> for TaskMongo {
    fn to_domain(self) -> Task {
        let id = self.id;
        let raw_deadline = self.deadline.or(self.due_date);
        let deadline = raw_deadline.as_ref().and_then(bson_to_timestamp_millis);
        if let (Some(raw), None) = (&raw_deadline, deadline) {
            warn!("Task {} has an unreadable deadline: {}", id, raw);
        }

        Task {
            id,
            // The repo knows which collection the document came from
            collection: TaskCollection::Personal,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            deadline,
            user_id: self.user_id.as_ref().and_then(bson_to_id),
            assigned_to: self.assigned_to.map(ParticipantMongo::to_domain),
            created_by: self.created_by.map(ParticipantMongo::to_domain),
            reminder_days: self
                .notifications
                .and_then(|n| n.reminder_days)
                .as_ref()
                .and_then(bson_to_f64),
            status: self.status,
            reminders: ReminderFlags {
                sent_30min: self.reminder_sent_30min.unwrap_or(false),
                sent_custom: self.reminder_sent_custom.unwrap_or(false),
            },
        }
    }

    fn from_domain(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: Some(task.title.clone()),
            description: Some(task.description.clone()),
            deadline: task
                .deadline
                .map(|ts| Bson::DateTime(DateTime::from_millis(ts))),
            due_date: None,
            user_id: task.user_id.as_ref().map(mongo_repo::id_to_bson),
            assigned_to: task.assigned_to.as_ref().map(ParticipantMongo::from_domain),
            created_by: task.created_by.as_ref().map(ParticipantMongo::from_domain),
            notifications: Some(TaskNotificationsMongo {
                reminder_days: task.reminder_days.map(Bson::Double),
            }),
            status: task.status.clone(),
            reminder_sent_30min: Some(task.reminders.sent_30min),
            reminder_sent_custom: Some(task.reminders.sent_custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, from_document, oid::ObjectId};

    #[test]
    fn reads_portal_task_document() {
        let assignee = ObjectId::new();
        let document = doc! {
            "_id": ObjectId::new(),
            "title": "Restock shelves",
            "dueDate": "2025-06-01T09:00:00Z",
            "assignedTo": { "email": "worker@coop.test", "id": assignee.to_hex() },
            "notifications": { "reminderDays": 2 },
            "status": "pending",
            "reminderSent_30min": true,
        };
        let task = from_document::<TaskMongo>(document).unwrap().to_domain();

        assert_eq!(task.title, "Restock shelves");
        assert_eq!(task.deadline, Some(1_748_768_400_000));
        assert_eq!(task.reminder_days, Some(2.0));
        assert_eq!(
            task.assigned_to.unwrap().id,
            Some(ID::from(assignee))
        );
        assert!(task.reminders.sent_30min);
        assert!(!task.reminders.sent_custom);
    }

    #[test]
    fn unreadable_deadline_maps_to_none() {
        let document = doc! {
            "_id": ObjectId::new(),
            "title": "Restock shelves",
            "deadline": "next friday",
            "reminderSent_custom": null,
        };
        let task = from_document::<TaskMongo>(document).unwrap().to_domain();
        assert_eq!(task.deadline, None);
        assert!(!task.reminders.sent_custom);
    }
}
