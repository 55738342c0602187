//! Throttle notifications

use std::time::Duration;
use tracing::warn;

/// Receives a notice whenever a caller is held back by a full window
pub trait ThrottleNotifier: Send + Sync {
    fn throttled(&self, service: &str, wait: Duration);
}

/// Default notifier, writes a warning to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl ThrottleNotifier for LogNotifier {
    fn throttled(&self, service: &str, wait: Duration) {
        warn!(
            "Rate limit reached for {}. Waiting {:.1}s before next request.",
            service,
            wait.as_secs_f64()
        );
    }
}
