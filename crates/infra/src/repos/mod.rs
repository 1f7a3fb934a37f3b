mod admin_meeting;
mod employee_meeting;
mod shared;
mod task;
mod user;

pub use admin_meeting::{IAdminMeetingRepo, InMemoryAdminMeetingRepo, MongoAdminMeetingRepo};
pub use employee_meeting::{
    IEmployeeMeetingRepo, InMemoryEmployeeMeetingRepo, MongoEmployeeMeetingRepo,
};
use mongodb::{bson::doc, options::ClientOptions, Client};
use std::sync::Arc;
pub use task::{ITaskRepo, InMemoryTaskRepo, MongoTaskRepo};
use tracing::info;
pub use user::{IUserRepo, InMemoryUserRepo, MongoUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub tasks: Arc<dyn ITaskRepo>,
    pub admin_meetings: Arc<dyn IAdminMeetingRepo>,
    pub employee_meetings: Arc<dyn IEmployeeMeetingRepo>,
    pub users: Arc<dyn IUserRepo>,
}

impl Repos {
    pub async fn create_mongodb(connection_string: &str, db_name: &str) -> anyhow::Result<Self> {
        let client_options = ClientOptions::parse(connection_string).await?;
        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Make sure the database is reachable before the server starts
        info!("DB CHECKING CONNECTION ...");
        db.run_command(doc! { "ping": 1 }, None).await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            tasks: Arc::new(MongoTaskRepo::new(&db)),
            admin_meetings: Arc::new(MongoAdminMeetingRepo::new(&db)),
            employee_meetings: Arc::new(MongoEmployeeMeetingRepo::new(&db)),
            users: Arc::new(MongoUserRepo::new(&db)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            tasks: Arc::new(InMemoryTaskRepo::new()),
            admin_meetings: Arc::new(InMemoryAdminMeetingRepo::new()),
            employee_meetings: Arc::new(InMemoryEmployeeMeetingRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
        }
    }
}
