//! Outbound-call core
//!
//! Leaf to root: rate limiting, response caching, vendor profiles, the
//! per-vendor client, and the [`Gateway`] that wires them together.

pub mod cache_manager;
pub mod client;
pub mod gateway;
pub mod providers;
pub mod rate_limiter;

pub use gateway::Gateway;
