use crate::dtos::DispatchSummaryDTO;
use coop_reminders_domain::DispatchSummary;
use serde::{Deserialize, Serialize};

pub mod dispatch_reminders {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// Timestamp in millis the run evaluated triggers against
        pub dispatched_at: i64,
        pub summary: DispatchSummaryDTO,
    }

    impl APIResponse {
        pub fn new(dispatched_at: i64, summary: DispatchSummary) -> Self {
            Self {
                dispatched_at,
                summary: DispatchSummaryDTO::new(summary),
            }
        }
    }
}
