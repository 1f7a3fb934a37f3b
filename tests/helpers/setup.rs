use coop_reminders_api::Application;
use coop_reminders_infra::{
    Config, CoopContext, IPushSender, InMemoryMailer, InMemoryPushSender, StaticTimeSys,
};
use std::sync::Arc;

pub const CRON_SECRET: &str = "integration-cron-secret";

pub struct TestApp {
    pub address: String,
    /// Shares its repos with the running application
    pub ctx: CoopContext,
    pub mailer: Arc<InMemoryMailer>,
    pub push: Arc<InMemoryPushSender>,
}

// Launch the application as a background task, frozen at `now`
pub async fn spawn_app(now: i64) -> TestApp {
    let mut config = Config::new();
    config.port = 0; // Random port
    config.cron_secret = CRON_SECRET.into();
    config.reminders_job_enabled = false;
    config.timezone = chrono_tz::Tz::UTC;

    let mailer = Arc::new(InMemoryMailer::new());
    let push = Arc::new(InMemoryPushSender::new());
    let push_sender: Arc<dyn IPushSender> = push.clone();
    let ctx = CoopContext::create_inmemory(
        config,
        Arc::new(StaticTimeSys(now)),
        mailer.clone(),
        Some(push_sender),
    );

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp {
        address,
        ctx,
        mailer,
        push,
    }
}
