//! Retry for transient hosted-database errors.
//!
//! The hosted primary occasionally rejects statements while a node is
//! recycled or a shared lock is held. Those errors clear on their own within
//! seconds. Local files never produce them, so the retry path only runs for
//! synced replicas (see `CronosDb::is_synced_replica`).

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Cap for the doubling backoff.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Detect transient hosted-primary errors.
///
/// Kept narrow so genuine SQL and constraint errors are never retried.
#[must_use]
pub fn is_transient_remote_error(e: &libsql::Error) -> bool {
    is_transient_message(&e.to_string())
}

fn is_transient_message(msg: &str) -> bool {
    msg.contains("unable to acquire shared lock")
        || msg.contains("deletion must be in progress")
        || msg.contains("stream not found")
}
