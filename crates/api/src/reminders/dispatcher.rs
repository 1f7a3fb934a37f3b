use super::message::{reminder_email, reminder_push};
use coop_reminders_domain::{
    resolve_push_token, resolve_recipient, DispatchSummary, ReminderKind, ReminderRecord,
    UserDirectory,
};
use coop_reminders_infra::CoopContext;
use tracing::{debug, error, info, warn};

/// Sends the due reminders of one record after another and keeps count
/// of what happened
pub struct ReminderDispatcher<'a> {
    ctx: &'a CoopContext,
    directory: &'a UserDirectory,
    now: i64,
    summary: DispatchSummary,
}

impl<'a> ReminderDispatcher<'a> {
    pub fn new(ctx: &'a CoopContext, directory: &'a UserDirectory, now: i64) -> Self {
        Self {
            ctx,
            directory,
            now,
            summary: Default::default(),
        }
    }

    pub fn fetch_failed(&mut self) {
        self.summary.fetch_errors += 1;
    }

    pub fn into_summary(self) -> DispatchSummary {
        self.summary
    }

    pub async fn dispatch(&mut self, record: ReminderRecord<'_>) {
        self.summary.records_scanned += 1;
        let tz = self.ctx.config.timezone;

        if !record.wants_reminders() {
            debug!(
                "Email notifications are turned off for {} {}",
                record.kind_name(),
                record.id()
            );
            return;
        }

        let due = match record.due_reminders(self.now, &tz) {
            Ok(due) => due,
            Err(e) => {
                warn!("Skipping {} {}: {}", record.kind_name(), record.id(), e);
                self.summary.malformed += 1;
                return;
            }
        };
        if due.is_empty() {
            return;
        }
        // Records with due reminders always have a readable deadline
        let deadline = match record.deadline(&tz) {
            Ok(deadline) => deadline,
            Err(_) => return,
        };

        let recipient = match resolve_recipient(&record, self.directory) {
            Some(recipient) => recipient,
            None => {
                warn!(
                    "No recipient found for {} {}. Skipping {} reminder(s)",
                    record.kind_name(),
                    record.id(),
                    due.len()
                );
                self.summary.missing_recipient += due.len();
                return;
            }
        };

        for kind in due {
            self.send_reminder(record, kind, deadline, &recipient).await;
        }
    }

    async fn send_reminder(
        &mut self,
        record: ReminderRecord<'_>,
        kind: ReminderKind,
        deadline: i64,
        recipient: &str,
    ) {
        let tz = self.ctx.config.timezone;

        match claim_reminder(self.ctx, record, kind).await {
            Ok(true) => (),
            Ok(false) => {
                debug!(
                    "{} of {} {} was already claimed by another run",
                    kind.flag_field(),
                    record.kind_name(),
                    record.id()
                );
                self.summary.already_claimed += 1;
                return;
            }
            Err(e) => {
                error!(
                    "Unable to claim {} of {} {}: {:?}",
                    kind.flag_field(),
                    record.kind_name(),
                    record.id(),
                    e
                );
                self.summary.failed += 1;
                return;
            }
        }

        let email = reminder_email(&record, kind, deadline, recipient, &tz);
        if let Err(e) = self.ctx.mailer.send(&email).await {
            error!(
                "Unable to send {} email for {} {} to {}: {}",
                kind.flag_field(),
                record.kind_name(),
                record.id(),
                recipient,
                e
            );
            self.summary.failed += 1;
            if let Err(e) = release_reminder(self.ctx, record, kind).await {
                error!(
                    "Unable to release {} of {} {}. It will not be retried: {:?}",
                    kind.flag_field(),
                    record.kind_name(),
                    record.id(),
                    e
                );
            }
            return;
        }
        info!(
            "Sent {} reminder for {} {} to {}",
            kind.flag_field(),
            record.kind_name(),
            record.id(),
            recipient
        );
        self.summary.emails_sent += 1;

        let push = match &self.ctx.push {
            Some(push) => push,
            None => {
                debug!("Push notifications are not configured");
                return;
            }
        };
        let token = match resolve_push_token(&record, self.directory) {
            Some(token) => token,
            None => return,
        };
        let message = reminder_push(&record, kind, deadline, &token, &tz);
        match push.send(&message).await {
            Ok(_) => self.summary.pushes_sent += 1,
            Err(e) => {
                warn!(
                    "Unable to push {} reminder for {} {}: {}",
                    kind.flag_field(),
                    record.kind_name(),
                    record.id(),
                    e
                );
                self.summary.push_failures += 1;
            }
        }
    }
}

async fn claim_reminder(
    ctx: &CoopContext,
    record: ReminderRecord<'_>,
    kind: ReminderKind,
) -> anyhow::Result<bool> {
    match record {
        ReminderRecord::Task(t) => {
            ctx.repos
                .tasks
                .claim_reminder(t.collection, &t.id, kind)
                .await
        }
        ReminderRecord::AdminMeeting(m) => ctx.repos.admin_meetings.claim_reminder(&m.id, kind).await,
        ReminderRecord::EmployeeMeeting(m) => {
            ctx.repos.employee_meetings.claim_reminder(&m.id, kind).await
        }
    }
}

async fn release_reminder(
    ctx: &CoopContext,
    record: ReminderRecord<'_>,
    kind: ReminderKind,
) -> anyhow::Result<()> {
    match record {
        ReminderRecord::Task(t) => {
            ctx.repos
                .tasks
                .release_reminder(t.collection, &t.id, kind)
                .await
        }
        ReminderRecord::AdminMeeting(m) => {
            ctx.repos.admin_meetings.release_reminder(&m.id, kind).await
        }
        ReminderRecord::EmployeeMeeting(m) => {
            ctx.repos.employee_meetings.release_reminder(&m.id, kind).await
        }
    }
}
