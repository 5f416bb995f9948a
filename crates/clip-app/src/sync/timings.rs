use std::time::Duration;

/// Fixed delays used by the pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncTimings {
    /// Wait after an outbound directory change before reading snapshots.
    pub outbound_settle: Duration,
    /// Wait after an inbound directory change before polling the remote.
    pub inbound_settle: Duration,
    /// Flat delay between upload attempts. No backoff, no attempt limit.
    pub retry_delay: Duration,
}

impl Default for SyncTimings {
    fn default() -> Self {
        Self {
            outbound_settle: Duration::from_millis(400),
            inbound_settle: Duration::from_secs(1),
            retry_delay: Duration::from_secs(5),
        }
    }
}
