use super::{IPushSender, PushError, PushMessage};
use std::sync::Mutex;

/// Keeps every notification it is asked to send, or rejects all of them
/// after `fail_all`
#[derive(Default)]
pub struct InMemoryPushSender {
    sent: Mutex<Vec<PushMessage>>,
    failing: Mutex<bool>,
}

impl InMemoryPushSender {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn sent(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_all(&self) {
        *self.failing.lock().unwrap() = true;
    }
}

#[async_trait::async_trait]
impl IPushSender for InMemoryPushSender {
    async fn send(&self, message: &PushMessage) -> Result<(), PushError> {
        if *self.failing.lock().unwrap() {
            return Err(PushError::Rejected {
                status: 404,
                body: "UNREGISTERED".into(),
            });
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
