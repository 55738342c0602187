//! Rate limiter types and data structures

use crate::utils::error::{GatewayError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// Well-known service names
pub mod services {
    pub const OPENAI: &str = "openai";
    pub const GEMINI: &str = "gemini";
    pub const PINECONE: &str = "pinecone";
    pub const SEMRUSH: &str = "semrush";
    pub const DATAFORSEO: &str = "dataforseo";
}

/// Limiting parameters for one service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLimit {
    /// Maximum requests dispatched per window
    pub max_requests: u32,
    /// Window length in milliseconds
    pub time_window_ms: u64,
    /// Maximum wait for a single in-flight call in milliseconds
    pub timeout_ms: u64,
}

impl ServiceLimit {
    pub const fn new(max_requests: u32, time_window_ms: u64, timeout_ms: u64) -> Self {
        Self {
            max_requests,
            time_window_ms,
            timeout_ms,
        }
    }

    pub fn time_window(&self) -> Duration {
        Duration::from_millis(self.time_window_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// All three parameters must be positive
    pub fn validate(&self, service: &str) -> Result<()> {
        if self.max_requests == 0 {
            return Err(GatewayError::config(format!(
                "{}: max_requests must be at least 1",
                service
            )));
        }
        if self.time_window_ms == 0 {
            return Err(GatewayError::config(format!(
                "{}: time_window_ms must be at least 1",
                service
            )));
        }
        if self.timeout_ms == 0 {
            return Err(GatewayError::config(format!(
                "{}: timeout_ms must be at least 1",
                service
            )));
        }
        Ok(())
    }
}

/// Built-in limits registered by [`RateLimiter::with_defaults`](super::RateLimiter::with_defaults)
pub fn default_limits() -> Vec<(&'static str, ServiceLimit)> {
    vec![
        (services::OPENAI, ServiceLimit::new(60, 60_000, 30_000)),
        (services::PINECONE, ServiceLimit::new(100, 60_000, 10_000)),
        (services::SEMRUSH, ServiceLimit::new(50, 60_000, 15_000)),
        (services::DATAFORSEO, ServiceLimit::new(30, 60_000, 20_000)),
        (services::GEMINI, ServiceLimit::new(60, 60_000, 30_000)),
    ]
}

/// Read-only snapshot of one service's window
#[derive(Debug, Clone, Serialize)]
pub struct RateLimitStatus {
    pub service: String,
    pub requests_in_window: u32,
    pub max_requests: u32,
    pub time_window_ms: u64,
    pub timeout_ms: u64,
    pub remaining_requests: u32,
    pub window_started_at: DateTime<Utc>,
}

/// Request count for the current window
#[derive(Debug, Clone, Copy)]
pub(super) struct WindowState {
    pub(super) requests_in_window: u32,
    pub(super) window_start: Instant,
}

impl WindowState {
    pub(super) fn fresh(now: Instant) -> Self {
        Self {
            requests_in_window: 0,
            window_start: now,
        }
    }

    pub(super) fn reset(&mut self, now: Instant) {
        *self = Self::fresh(now);
    }
}

/// Limit and window for one configured service
#[derive(Debug, Clone)]
pub(super) struct ServiceEntry {
    pub(super) limit: ServiceLimit,
    pub(super) window: WindowState,
}
