mod error;
mod job_schedulers;
mod reminders;
mod shared;
mod status;

use actix_web::{dev::Server, middleware, web, App, HttpServer};
use coop_reminders_infra::CoopContext;
use job_schedulers::start_dispatch_reminders_job;
use std::net::TcpListener;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use shared::auth::CRON_SECRET_HEADER;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    reminders::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: CoopContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        Application::start_job_schedulers(context);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: CoopContext) {
        if context.config.reminders_job_enabled {
            start_dispatch_reminders_job(context);
        } else {
            info!("Reminder job is disabled. Runs must be triggered over http.");
        }
    }

    async fn configure_server(context: CoopContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
