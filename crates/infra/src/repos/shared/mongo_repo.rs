use anyhow::Result;
use chrono::DateTime;
use coop_reminders_domain::{Participant, ReminderKind, ID};
use futures::stream::StreamExt;
use mongodb::{
    bson::{self, doc, to_document, Bson, Document},
    Collection, Cursor,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};
use tracing::{error, warn};

pub trait MongoDocument<E>: Serialize + DeserializeOwned {
    fn to_domain(self) -> E;
    fn from_domain(entity: &E) -> Self;
}

fn get_id_filter(id: &ID) -> Document {
    doc! {
        "_id": id_to_bson(id)
    }
}

/// Only matches the document while the reminder flag of `kind` is not set
pub(crate) fn claim_flag_filter(id: &ID, kind: ReminderKind) -> Document {
    let mut filter = get_id_filter(id);
    filter.insert(kind.flag_field(), doc! { "$ne": true });
    filter
}

fn set_flag_update(kind: ReminderKind, value: bool) -> Document {
    let mut set = Document::new();
    set.insert(kind.flag_field(), value);
    doc! { "$set": set }
}

pub(crate) fn claim_flag_update(kind: ReminderKind) -> Document {
    set_flag_update(kind, true)
}

pub(crate) fn release_flag_update(kind: ReminderKind) -> Document {
    set_flag_update(kind, false)
}

fn entity_to_persistence<E, D: MongoDocument<E>>(entity: &E) -> Result<Document> {
    let raw = D::from_domain(entity);
    Ok(to_document(&raw)?)
}

fn persistence_to_entity<E, D: MongoDocument<E>>(doc: Document) -> Result<E> {
    let raw: D = bson::from_document(doc)?;
    Ok(raw.to_domain())
}

pub async fn insert<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entity: &E,
) -> Result<()> {
    let doc = entity_to_persistence::<E, D>(entity)?;
    collection.insert_one(doc, None).await?;
    Ok(())
}

/// Every document in the collection. Documents that cannot be read are
/// logged and left out.
pub async fn find_all<E, D: MongoDocument<E>>(collection: &Collection<Document>) -> Result<Vec<E>> {
    let cursor = collection.find(None, None).await?;
    Ok(consume_cursor::<E, D>(cursor, collection.name()).await)
}

async fn consume_cursor<E, D: MongoDocument<E>>(
    mut cursor: Cursor<Document>,
    collection_name: &str,
) -> Vec<E> {
    let mut documents = vec![];
    while let Some(result) = cursor.next().await {
        match result {
            Ok(document) => {
                let id = document.get("_id").cloned();
                match persistence_to_entity::<E, D>(document) {
                    Ok(entity) => documents.push(entity),
                    Err(e) => {
                        warn!(
                            "Skipping unreadable document {:?} in {}: {:?}",
                            id, collection_name, e
                        );
                    }
                }
            }
            Err(e) => {
                error!("Error getting cursor for {}: {:?}", collection_name, e);
            }
        }
    }

    documents
}

/// Sets the reminder flag of `kind` to true only if it is not true already.
/// Returns whether this call was the one that set it.
pub async fn claim_reminder_flag(
    collection: &Collection<Document>,
    id: &ID,
    kind: ReminderKind,
) -> Result<bool> {
    let res = collection
        .update_one(claim_flag_filter(id, kind), claim_flag_update(kind), None)
        .await?;
    Ok(res.modified_count == 1)
}

pub async fn release_reminder_flag(
    collection: &Collection<Document>,
    id: &ID,
    kind: ReminderKind,
) -> Result<()> {
    collection
        .update_one(get_id_filter(id), release_flag_update(kind), None)
        .await?;
    Ok(())
}

/// Reads a timestamp stored either as a BSON date, as epoch millis or as
/// an RFC 3339 string
pub fn bson_to_timestamp_millis(value: &Bson) -> Option<i64> {
    match value {
        Bson::DateTime(dt) => Some(dt.timestamp_millis()),
        Bson::Int64(millis) => Some(*millis),
        Bson::Int32(millis) => Some(i64::from(*millis)),
        Bson::Double(millis) if millis.is_finite() => Some(*millis as i64),
        Bson::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.timestamp_millis()),
        _ => None,
    }
}

/// Reads a number that may have been stored as a string by a form
pub fn bson_to_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Double(v) => Some(*v),
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Reads an id stored as an `ObjectId`, as its hex string or as the uid
/// handed out by the identity provider
pub fn bson_to_id(value: &Bson) -> Option<ID> {
    match value {
        Bson::ObjectId(oid) => Some(ID::from(*oid)),
        Bson::String(s) => s.parse::<ID>().ok(),
        Bson::Int32(n) => n.to_string().parse::<ID>().ok(),
        Bson::Int64(n) => n.to_string().parse::<ID>().ok(),
        _ => None,
    }
}

/// Ids that look like an `ObjectId` are stored as one, anything else as a string
pub fn id_to_bson(id: &ID) -> Bson {
    match id.object_id() {
        Some(oid) => Bson::ObjectId(oid),
        None => Bson::String(id.as_string()),
    }
}

/// `serde(with)` adapter for the `_id` field of the collection documents
pub mod document_id {
    use super::*;

    pub fn serialize<S: Serializer>(id: &ID, serializer: S) -> Result<S::Ok, S::Error> {
        id_to_bson(id).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ID, D::Error> {
        let raw = Bson::deserialize(deserializer)?;
        bson_to_id(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("Unsupported document id: {}", raw)))
    }
}

/// Embedded `assignedTo` / `createdBy` sub-document
#[derive(Debug, Serialize, Deserialize)]
pub struct ParticipantMongo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Bson>,
}

impl ParticipantMongo {
    pub fn to_domain(self) -> Participant {
        Participant {
            email: self.email,
            id: self.id.as_ref().and_then(bson_to_id),
        }
    }

    pub fn from_domain(participant: &Participant) -> Self {
        Self {
            email: participant.email.clone(),
            id: participant
                .id
                .as_ref()
                .map(id_to_bson),
        }
    }
}
