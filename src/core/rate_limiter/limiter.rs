//! Core rate limiter implementation

use super::notifier::{LogNotifier, ThrottleNotifier};
use super::timeout::TimeoutRegistry;
use super::types::{RateLimitStatus, ServiceEntry, ServiceLimit, WindowState, default_limits};
use crate::utils::error::{GatewayError, Result};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info};

/// Per-service request window and timeout guard
///
/// Counts requests in a fixed window per service. When a window is full,
/// [`acquire`](Self::acquire) sleeps until the window would end and then
/// starts a fresh one. Cloning shares state.
#[derive(Clone)]
pub struct RateLimiter {
    /// Limits and windows by service name
    pub(super) services: Arc<RwLock<HashMap<String, ServiceEntry>>>,
    /// In-flight timeout guards
    pub(super) timeouts: Arc<TimeoutRegistry>,
    notifier: Arc<dyn ThrottleNotifier>,
}

impl RateLimiter {
    /// Create an empty rate limiter
    pub fn new() -> Self {
        Self::with_notifier(Arc::new(LogNotifier))
    }

    /// Create an empty rate limiter that reports throttling to `notifier`
    pub fn with_notifier(notifier: Arc<dyn ThrottleNotifier>) -> Self {
        Self {
            services: Arc::new(RwLock::new(HashMap::new())),
            timeouts: Arc::new(TimeoutRegistry::default()),
            notifier,
        }
    }

    /// Create a rate limiter with the built-in service limits registered
    pub fn with_defaults() -> Self {
        let limiter = Self::new();
        limiter.configure_defaults();
        limiter
    }

    /// Register the built-in service limits
    pub fn configure_defaults(&self) {
        let mut services = self.services.write();
        let now = Instant::now();
        for (service, limit) in default_limits() {
            Self::upsert(&mut services, service, limit, now);
        }
    }

    /// Register or update the limit for a service
    ///
    /// A new service starts with an empty window. Reconfiguring an existing
    /// service only replaces its limit; the current window is kept.
    pub fn configure(&self, service: &str, limit: ServiceLimit) -> Result<()> {
        limit.validate(service)?;
        let mut services = self.services.write();
        Self::upsert(&mut services, service, limit, Instant::now());
        Ok(())
    }

    fn upsert(
        services: &mut HashMap<String, ServiceEntry>,
        service: &str,
        limit: ServiceLimit,
        now: Instant,
    ) {
        match services.get_mut(service) {
            Some(entry) => {
                entry.limit = limit;
                debug!("Reconfigured rate limit for {}: {:?}", service, limit);
            }
            None => {
                services.insert(
                    service.to_string(),
                    ServiceEntry {
                        limit,
                        window: WindowState::fresh(now),
                    },
                );
                debug!("Configured rate limit for {}: {:?}", service, limit);
            }
        }
    }

    /// Wait until a request to `service` may be dispatched and count it
    ///
    /// Fails with [`GatewayError::Configuration`] if the service is unknown,
    /// or was cleared while this call was waiting.
    pub async fn acquire(&self, service: &str) -> Result<()> {
        loop {
            let (wait, observed_start) = {
                let mut services = self.services.write();
                let entry = services
                    .get_mut(service)
                    .ok_or_else(|| GatewayError::configuration(service))?;

                let now = Instant::now();
                let window = entry.limit.time_window();
                if now.duration_since(entry.window.window_start) >= window {
                    entry.window.reset(now);
                }

                if entry.window.requests_in_window < entry.limit.max_requests {
                    entry.window.requests_in_window += 1;
                    return Ok(());
                }

                let elapsed = now.duration_since(entry.window.window_start);
                (window.saturating_sub(elapsed), entry.window.window_start)
            };

            self.notifier.throttled(service, wait);
            tokio::time::sleep(wait).await;

            {
                let mut services = self.services.write();
                let entry = services
                    .get_mut(service)
                    .ok_or_else(|| GatewayError::configuration(service))?;

                // Only the first waiter to wake resets the window it waited on
                if entry.window.window_start == observed_start {
                    entry.window.reset(Instant::now());
                    debug!("Window for {} reset after overflow wait", service);
                }
            }
        }
    }

    /// Current limit for a service
    pub fn limit(&self, service: &str) -> Option<ServiceLimit> {
        self.services.read().get(service).map(|entry| entry.limit)
    }

    /// Snapshot of a service's window, `None` if unconfigured
    pub fn status(&self, service: &str) -> Option<RateLimitStatus> {
        let services = self.services.read();
        let entry = services.get(service)?;

        let elapsed = Instant::now().duration_since(entry.window.window_start);
        let elapsed =
            chrono::Duration::from_std(elapsed).unwrap_or_else(|_| chrono::Duration::zero());

        Some(RateLimitStatus {
            service: service.to_string(),
            requests_in_window: entry.window.requests_in_window,
            max_requests: entry.limit.max_requests,
            time_window_ms: entry.limit.time_window_ms,
            timeout_ms: entry.limit.timeout_ms,
            remaining_requests: entry
                .limit
                .max_requests
                .saturating_sub(entry.window.requests_in_window),
            window_started_at: Utc::now() - elapsed,
        })
    }

    /// Names of all configured services
    pub fn services(&self) -> Vec<String> {
        let mut names: Vec<String> = self.services.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Forget a service and disarm its pending timeouts
    pub fn clear(&self, service: &str) {
        let removed = self.services.write().remove(service).is_some();
        let disarmed = self.timeouts.disarm(service);
        if removed || disarmed > 0 {
            debug!(
                "Cleared rate limit state for {} ({} pending timeouts disarmed)",
                service, disarmed
            );
        }
    }

    /// Forget every service
    pub fn clear_all(&self) {
        let count = {
            let mut services = self.services.write();
            let count = services.len();
            services.clear();
            count
        };
        self.timeouts.disarm_all();
        info!("Cleared rate limit state for {} services", count);
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
