use super::{EmailMessage, IMailer, MailError};
use std::{collections::HashSet, sync::Mutex};

/// Keeps every email it is asked to send. Recipients registered with
/// `fail_for` get a transport error instead.
#[derive(Default)]
pub struct InMemoryMailer {
    sent: Mutex<Vec<EmailMessage>>,
    failing: Mutex<HashSet<String>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_for(&self, recipient: &str) {
        self.failing.lock().unwrap().insert(recipient.to_string());
    }
}

#[async_trait::async_trait]
impl IMailer for InMemoryMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        if self.failing.lock().unwrap().contains(&message.to) {
            return Err(MailError::Transport(format!(
                "mailbox {} unavailable",
                message.to
            )));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
