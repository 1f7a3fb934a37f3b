use chrono_tz::Tz;
use coop_reminders_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret an external scheduler must present in the `coop-cron-secret`
    /// header to trigger a reminder run over http
    pub cron_secret: String,
    /// Timezone in which the wall clock dates and times stored on admin
    /// meetings are interpreted and in which reminder emails render times
    pub timezone: Tz,
    /// Whether the in-process job scheduler should dispatch reminders
    pub reminders_job_enabled: bool,
    /// Seconds between two reminder runs of the job scheduler
    pub reminders_interval_secs: u64,
    pub mongodb: Option<MongoConfig>,
    pub smtp: Option<SmtpConfig>,
    pub fcm: Option<FcmConfig>,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub connection_string: String,
    pub db_name: String,
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Mailbox reminders are sent from, e.g. `Coop Portal <noreply@coop.org>`
    pub from: String,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("from", &self.from)
            .finish()
    }
}

/// Service account used to authenticate against Firebase Cloud Messaging
#[derive(Clone)]
pub struct FcmConfig {
    pub project_id: String,
    pub client_email: String,
    /// PEM encoded RSA private key of the service account
    pub private_key: String,
}

impl std::fmt::Debug for FcmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FcmConfig")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .finish()
    }
}

const DEFAULT_PORT: usize = 5000;
const DEFAULT_REMINDERS_INTERVAL_SECS: u64 = 5 * 60;
const DEFAULT_SMTP_PORT: u16 = 587;

impl Config {
    pub fn new() -> Self {
        let cron_secret = match std::env::var("CRON_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                info!("Did not find CRON_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(24);
                info!(
                    "Secret for triggering reminder runs was generated and set to: {}",
                    secret
                );
                secret
            }
        };

        let port = parse_env("PORT", DEFAULT_PORT);
        let reminders_interval_secs =
            parse_env("REMINDERS_INTERVAL_SECS", DEFAULT_REMINDERS_INTERVAL_SECS).max(1);
        let reminders_job_enabled = parse_env("REMINDERS_JOB_ENABLED", true);

        let timezone = match std::env::var("PORTAL_TIMEZONE") {
            Ok(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given PORTAL_TIMEZONE: {} is not valid, falling back to UTC.",
                        tz
                    );
                    Tz::UTC
                }
            },
            Err(_) => Tz::UTC,
        };

        let mongodb = std::env::var("MONGODB_CONNECTION_STRING")
            .ok()
            .map(|connection_string| MongoConfig {
                connection_string,
                db_name: std::env::var("MONGODB_NAME").unwrap_or_else(|_| "coop".into()),
            });

        let smtp = match std::env::var("SMTP_HOST") {
            Ok(host) => Some(SmtpConfig {
                host,
                port: parse_env("SMTP_PORT", DEFAULT_SMTP_PORT),
                username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
                password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
                from: std::env::var("MAIL_FROM")
                    .unwrap_or_else(|_| "Coop Portal <noreply@localhost>".into()),
            }),
            Err(_) => None,
        };

        let fcm = match (
            std::env::var("FCM_PROJECT_ID"),
            std::env::var("FCM_CLIENT_EMAIL"),
            std::env::var("FCM_PRIVATE_KEY"),
        ) {
            (Ok(project_id), Ok(client_email), Ok(private_key)) => Some(FcmConfig {
                project_id,
                client_email,
                // Keys passed through env files usually have escaped newlines
                private_key: private_key.replace("\\n", "\n"),
            }),
            _ => None,
        };

        Self {
            port,
            cron_secret,
            timezone,
            reminders_job_enabled,
            reminders_interval_secs,
            mongodb,
            smtp,
            fcm,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_env<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_falls_back_on_invalid_values() {
        std::env::set_var("COOP_TEST_PARSE_ENV_PORT", "not-a-port");
        assert_eq!(parse_env("COOP_TEST_PARSE_ENV_PORT", 5000usize), 5000);

        std::env::set_var("COOP_TEST_PARSE_ENV_PORT", "8080");
        assert_eq!(parse_env("COOP_TEST_PARSE_ENV_PORT", 5000usize), 8080);

        assert!(parse_env("COOP_TEST_PARSE_ENV_MISSING", true));
    }
}
