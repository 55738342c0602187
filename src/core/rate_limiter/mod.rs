//! Per-service rate limiting and timeout guarding
//!
//! Every outbound vendor call passes through [`RateLimiter::acquire`] before
//! dispatch and [`RateLimiter::guard_with_timeout`] while in flight.

mod limiter;
mod notifier;
mod timeout;
mod types;


pub use limiter::RateLimiter;
pub use notifier::{LogNotifier, ThrottleNotifier};
pub use types::{RateLimitStatus, ServiceLimit, default_limits, services};
