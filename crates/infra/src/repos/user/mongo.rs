use super::IUserRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use coop_reminders_domain::{User, ID};
use mongodb::{
    bson::{Document},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

pub struct MongoUserRepo {
    collection: Collection<Document>,
}

impl MongoUserRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for MongoUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        mongo_repo::insert::<_, UserMongo>(&self.collection, user).await
    }

    async fn find_all(&self) -> anyhow::Result<Vec<User>> {
        mongo_repo::find_all::<_, UserMongo>(&self.collection).await
    }
}

/// Only the contact fields of a portal user document are read
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserMongo {
    #[serde(rename = "_id", with = "mongo_repo::document_id")]
    id: ID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fcm_token: Option<String>,
}

impl MongoDocument<User> for UserMongo {
    fn to_domain(self) -> User {
        User {
            id: self.id,
            email: self.email,
            push_token: self.fcm_token,
        }
    }

    fn from_domain(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            fcm_token: user.push_token.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, from_document, oid::ObjectId};

    #[test]
    fn ignores_unrelated_user_fields() {
        let document = doc! {
            "_id": ObjectId::new(),
            "email": "member@coop.test",
            "fcmToken": "device-token",
            "role": "employee",
            "name": "Member",
        };
        let user = from_document::<UserMongo>(document).unwrap().to_domain();
        assert_eq!(user.email(), Some("member@coop.test"));
        assert_eq!(user.push_token(), Some("device-token"));
    }

    #[test]
    fn reads_users_keyed_by_identity_provider_uid() {
        let document = doc! {
            "_id": "Xk3f9aQ2bUcZr7LmN0pQsT1vWx2",
            "email": "member@coop.test",
            "fcmToken": "device-token",
        };
        let user = from_document::<UserMongo>(document).unwrap().to_domain();
        assert_eq!(user.id.as_str(), "Xk3f9aQ2bUcZr7LmN0pQsT1vWx2");
        assert_eq!(user.email(), Some("member@coop.test"));

        let stored = mongodb::bson::to_document(&UserMongo::from_domain(&user)).unwrap();
        assert_eq!(stored.get_str("_id").unwrap(), "Xk3f9aQ2bUcZr7LmN0pQsT1vWx2");
    }

    #[test]
    fn rejects_documents_without_a_usable_id() {
        let document = doc! { "_id": true, "email": "member@coop.test" };
        assert!(from_document::<UserMongo>(document).is_err());
    }
}
