//! Domain services
//!
//! Thin call sites that build vendor payloads, go through
//! [`ApiClient::call_service`](crate::core::client::ApiClient::call_service)
//! and reshape vendor JSON into typed records.

pub mod content;
pub mod seo;
pub mod types;


pub use content::ContentService;
pub use seo::{SeoService, endpoints};
pub use types::*;
