//! # serpgate
//!
//! Outbound-call core for SEO tooling: every request to DataForSEO, OpenAI
//! or Gemini goes through one per-service rate limiter, one response cache,
//! a per-service timeout, and retry with backoff.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serpgate::{Gateway, GatewayConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GatewayConfig::from_file("config/serpgate.yaml").await?;
//!     let gateway = Gateway::new(config)?;
//!
//!     let volumes = gateway
//!         .seo()?
//!         .keyword_volume(&["seo tools".to_string()])
//!         .await?;
//!     for row in volumes {
//!         println!("{}: {:?}", row.keyword, row.search_volume);
//!     }
//!
//!     // A target without a backlink profile yields a zeroed summary
//!     let summary = gateway.seo()?.backlink_summary("example.com").await?;
//!     println!("{} backlinks", summary.backlinks_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Calling a vendor directly
//!
//! ```rust,no_run
//! use serpgate::core::cache_manager::{CacheConfig, RequestCache};
//! use serpgate::core::client::ApiClient;
//! use serpgate::core::providers::DataForSeo;
//! use serpgate::core::rate_limiter::RateLimiter;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn run() -> serpgate::Result<()> {
//! let limiter = Arc::new(RateLimiter::with_defaults());
//! let cache = Arc::new(RequestCache::new(CacheConfig::default())?);
//! let client = ApiClient::new(Arc::new(DataForSeo::new("login", "password")), limiter, cache);
//!
//! let body = client
//!     .call_service("backlinks/summary/live", &json!([{"target": "example.com"}]))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod services;
pub mod utils;

// Re-export main types
pub use config::GatewayConfig;
pub use core::Gateway;
pub use core::cache_manager::{RequestCache, RequestHash};
pub use core::client::ApiClient;
pub use core::rate_limiter::{RateLimiter, ServiceLimit};
pub use utils::error::{GatewayError, Result, RetryPolicy};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
