use coop_reminders_domain::DispatchSummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchSummaryDTO {
    pub records_scanned: usize,
    pub emails_sent: usize,
    pub pushes_sent: usize,
    pub push_failures: usize,
    pub failed: usize,
    pub missing_recipient: usize,
    pub malformed: usize,
    pub fetch_errors: usize,
    pub already_claimed: usize,
}

impl DispatchSummaryDTO {
    pub fn new(summary: DispatchSummary) -> Self {
        Self {
            records_scanned: summary.records_scanned,
            emails_sent: summary.emails_sent,
            pushes_sent: summary.pushes_sent,
            push_failures: summary.push_failures,
            failed: summary.failed,
            missing_recipient: summary.missing_recipient,
            malformed: summary.malformed,
            fetch_errors: summary.fetch_errors,
            already_claimed: summary.already_claimed,
        }
    }
}
