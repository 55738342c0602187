//! Vendor profiles
//!
//! A [`Vendor`] knows how to reach one external API: where it lives, how to
//! authenticate, how to read its response envelope, and which endpoints may
//! legitimately answer 404 for a target that simply has no data.

mod dataforseo;
mod envelope;
mod gemini;
mod openai;


pub use dataforseo::{DATAFORSEO_NOT_FOUND, DATAFORSEO_SUCCESS, DataForSeo, empty_backlinks_envelope};
pub use envelope::Envelope;
pub use gemini::Gemini;
pub use openai::OpenAi;

use reqwest::RequestBuilder;
use serde_json::Value;
use std::fmt;

/// One external API behind an [`ApiClient`](crate::core::client::ApiClient)
pub trait Vendor: Send + Sync + fmt::Debug {
    /// Rate limiter key for this vendor
    fn service(&self) -> &str;

    fn base_url(&self) -> &str;

    /// Full URL for an endpoint path
    fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Attach credentials to an outgoing request
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder;

    /// Classify a 2xx JSON body
    fn parse_envelope(&self, body: Value) -> Envelope;

    /// Whether an envelope failure code means "not found" rather than an error
    fn is_not_found_code(&self, _code: i64) -> bool {
        false
    }

    /// Replacement body for a not-found answer on endpoints where it means
    /// "no data"
    fn not_found_fallback(&self, _endpoint: &str, _payload: &Value) -> Option<Value> {
        None
    }

    /// Human-readable message from a non-2xx JSON body
    fn error_message(&self, body: &Value) -> Option<String> {
        body.pointer("/error/message")
            .or_else(|| body.get("status_message"))
            .or_else(|| body.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

/// Redacts a secret for `Debug` output, keeping its last four characters
pub(crate) fn redact(secret: &str) -> String {
    match secret.char_indices().rev().nth(3) {
        Some((start, _)) if start > 0 => format!("****{}", &secret[start..]),
        _ => "****".to_string(),
    }
}
