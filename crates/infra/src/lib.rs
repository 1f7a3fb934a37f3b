mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, FcmConfig, MongoConfig, SmtpConfig};
pub use repos::*;
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::{info, warn};

/// Everything a reminder run needs from the outside world
#[derive(Clone)]
pub struct CoopContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mailer: Arc<dyn IMailer>,
    /// Missing when push notifications are not configured
    pub push: Option<Arc<dyn IPushSender>>,
}

impl CoopContext {
    async fn create(config: Config) -> anyhow::Result<Self> {
        let repos = match &config.mongodb {
            Some(mongo) => Repos::create_mongodb(&mongo.connection_string, &mongo.db_name).await?,
            None => {
                warn!("MONGODB_CONNECTION_STRING is not set. Using an in-memory store.");
                Repos::create_inmemory()
            }
        };

        let mailer: Arc<dyn IMailer> = match &config.smtp {
            Some(smtp) => Arc::new(SmtpMailer::new(smtp)?),
            None => {
                warn!("SMTP_HOST is not set. Reminder emails will only be logged.");
                Arc::new(LoggingMailer {})
            }
        };

        let push: Option<Arc<dyn IPushSender>> = match &config.fcm {
            Some(fcm) => Some(Arc::new(FcmPushSender::new(fcm.clone())?)),
            None => {
                info!("FCM credentials are not set. Push notifications are disabled.");
                None
            }
        };

        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            mailer,
            push,
        })
    }

    /// Context backed only by memory, used by tests
    pub fn create_inmemory(
        config: Config,
        sys: Arc<dyn ISys>,
        mailer: Arc<dyn IMailer>,
        push: Option<Arc<dyn IPushSender>>,
    ) -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys,
            mailer,
            push,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<CoopContext> {
    CoopContext::create(Config::new()).await
}
