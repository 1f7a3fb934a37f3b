/// Counters of one reminder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Records read from the store, completed ones included
    pub records_scanned: usize,
    pub emails_sent: usize,
    pub pushes_sent: usize,
    pub push_failures: usize,
    /// Triggers whose email could not be sent. Their flag stays unset.
    pub failed: usize,
    pub missing_recipient: usize,
    pub malformed: usize,
    /// Collections that could not be read
    pub fetch_errors: usize,
    /// Triggers another run claimed first
    pub already_claimed: usize,
}
