use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use coop_reminders_domain::User;

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        insert(user, &self.users);
        Ok(())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<User>> {
        Ok(find_all(&self.users))
    }
}
