use mongodb::bson::oid::ObjectId;
use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Anything stored in one of the portal collections
pub trait Entity {
    fn id(&self) -> &ID;
}

/// Id of a stored document or of a user. Portal documents use `ObjectId`s
/// while users are keyed by the uid of the identity provider, so any
/// non-blank string is accepted.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct ID(String);
impl ID {
    /// A fresh `ObjectId` based id
    pub fn new() -> Self {
        Self(ObjectId::new().to_hex())
    }

    pub fn as_string(&self) -> String {
        self.0.clone()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `ObjectId` this id stands for, if it is one
    pub fn object_id(&self) -> Option<ObjectId> {
        ObjectId::parse_str(&self.0).ok()
    }
}

impl Default for ID {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for ID {
    fn from(oid: ObjectId) -> Self {
        Self(oid.to_hex())
    }
}

impl Display for ID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug)]
pub enum InvalidIDError {
    #[error("ID: {0} is malformed")]
    Malformed(String),
}

impl FromStr for ID {
    type Err = InvalidIDError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        if id.is_empty() {
            return Err(InvalidIDError::Malformed(s.to_string()));
        }
        Ok(Self(id.to_string()))
    }
}

impl Serialize for ID {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ID {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct IDVisitor;

        impl<'de> Visitor<'de> for IDVisitor {
            type Value = ID;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A valid string id representation")
            }

            fn visit_str<E>(self, value: &str) -> Result<ID, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<ID>()
                    .map_err(|_| E::custom(format!("Malformed id: {}", value)))
            }
        }

        deserializer.deserialize_str(IDVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_ids() {
        let id = ID::new();
        let parsed = id.as_string().parse::<ID>().expect("Valid id");
        assert_eq!(parsed, id);
        assert_eq!(format!("{}", parsed), id.as_string());
        assert!(parsed.object_id().is_some());
    }

    #[test]
    fn accepts_identity_provider_uids() {
        let id = " Xk3f9aQ2bUcZr7LmN0pQsT1vWx2 ".parse::<ID>().expect("Valid id");
        assert_eq!(id.as_str(), "Xk3f9aQ2bUcZr7LmN0pQsT1vWx2");
        assert_eq!(id.object_id(), None);
    }

    #[test]
    fn object_id_and_its_hex_are_the_same_id() {
        let oid = ObjectId::new();
        assert_eq!(ID::from(oid), oid.to_hex().parse::<ID>().unwrap());
        assert_eq!(ID::from(oid).object_id(), Some(oid));
    }

    #[test]
    fn rejects_blank_ids() {
        assert!("".parse::<ID>().is_err());
        assert!("   ".parse::<ID>().is_err());
    }
}
