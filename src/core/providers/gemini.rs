//! Gemini (Generative Language API) profile

use super::envelope::Envelope;
use super::{Vendor, redact};
use crate::core::rate_limiter::services;
use reqwest::RequestBuilder;
use serde_json::Value;
use std::fmt;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini, authenticated with an API key header
#[derive(Clone)]
pub struct Gemini {
    base_url: String,
    api_key: String,
}

impl Gemini {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

impl fmt::Debug for Gemini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gemini")
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

impl Vendor for Gemini {
    fn service(&self) -> &str {
        services::GEMINI
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("x-goog-api-key", &self.api_key)
    }

    fn parse_envelope(&self, body: Value) -> Envelope {
        if let Some(error) = body.get("error").filter(|e| e.is_object()) {
            return Envelope::Failure {
                code: error.get("code").and_then(Value::as_i64),
                message: error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown Gemini error")
                    .to_string(),
            };
        }

        if let Some(reason) = body
            .pointer("/promptFeedback/blockReason")
            .and_then(Value::as_str)
        {
            return Envelope::Failure {
                code: None,
                message: format!("Prompt blocked: {}", reason),
            };
        }

        Envelope::Success(body)
    }
}
