use crate::shared::entity::{Entity, ID};
use std::collections::HashMap;

/// A portal `User` as known by the user directory. Only the fields needed
/// to reach the user are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub email: Option<String>,
    /// Device token registered by the mobile app for push notifications
    pub push_token: Option<String>,
}

impl User {
    pub fn new(email: Option<String>, push_token: Option<String>) -> Self {
        Self {
            id: Default::default(),
            email,
            push_token,
        }
    }

    pub fn email(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }

    pub fn push_token(&self) -> Option<&str> {
        non_blank(self.push_token.as_deref())
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Embedded reference to a user on a record, e.g. `assignedTo` or `createdBy`.
/// Either part can be missing on older documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Participant {
    pub email: Option<String>,
    pub id: Option<ID>,
}

impl Participant {
    pub fn email(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }
}

/// Lookup of every `User` by id, loaded once per reminder run
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<ID, User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
        }
    }

    pub fn get(&self, user_id: &ID) -> Option<&User> {
        self.users.get(user_id)
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
