mod fcm;
mod inmemory;

pub use fcm::FcmPushSender;
pub use inmemory::InMemoryPushSender;

use std::collections::HashMap;
use thiserror::Error;

/// Notification for a single device
#[derive(Debug, Clone, PartialEq)]
pub struct PushMessage {
    pub token: String,
    pub title: String,
    pub body: String,
    /// Extra key value pairs the app uses to open the right screen
    pub data: HashMap<String, String>,
}

#[derive(Error, Debug)]
pub enum PushError {
    #[error("Unable to authenticate against the push provider: {0}")]
    Auth(String),
    #[error("Push provider rejected the notification with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Unable to reach the push provider: {0}")]
    Transport(String),
}

#[async_trait::async_trait]
pub trait IPushSender: Send + Sync {
    async fn send(&self, message: &PushMessage) -> Result<(), PushError>;
}
