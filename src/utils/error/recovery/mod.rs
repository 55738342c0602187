//! Error recovery utilities
//!
//! Retry with backoff, expressed as a policy value so the schedule can be
//! configured and tested on its own.

mod retry;
mod types;

pub use retry::RetryPolicy;
pub use types::{BackoffStrategy, RetryConfig, Retryable};
