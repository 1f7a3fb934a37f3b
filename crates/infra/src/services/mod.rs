mod mailer;
mod push;

pub use mailer::{EmailMessage, IMailer, InMemoryMailer, LoggingMailer, MailError, SmtpMailer};
pub use push::{FcmPushSender, IPushSender, InMemoryPushSender, PushError, PushMessage};
