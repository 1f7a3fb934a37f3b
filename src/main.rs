mod telemetry;

use coop_reminders_api::Application;
use coop_reminders_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("coop_reminders".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context().await.map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Unable to set up the infrastructure: {:?}", e),
        )
    })?;

    let app = Application::new(context).await?;
    app.start().await
}
