mod inmemory;
mod smtp;

pub use inmemory::InMemoryMailer;
pub use smtp::SmtpMailer;

use thiserror::Error;
use tracing::info;

/// A plain text email
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Invalid email address `{0}`")]
    InvalidAddress(String),
    #[error("Unable to build email: {0}")]
    Build(String),
    #[error("Unable to deliver email: {0}")]
    Transport(String),
}

#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError>;
}

/// Used when no SMTP server is configured. Every email is only logged.
pub struct LoggingMailer {}

#[async_trait::async_trait]
impl IMailer for LoggingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        info!(
            "SMTP is not configured. Email to {} with subject {:?} was not delivered",
            message.to, message.subject
        );
        Ok(())
    }
}
