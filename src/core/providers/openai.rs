//! OpenAI profile

use super::envelope::Envelope;
use super::{Vendor, redact};
use crate::core::rate_limiter::services;
use reqwest::RequestBuilder;
use serde_json::Value;
use std::fmt;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI, authenticated with a Bearer token
#[derive(Clone)]
pub struct OpenAi {
    base_url: String,
    api_key: String,
}

impl OpenAi {
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

impl fmt::Debug for OpenAi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAi")
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

impl Vendor for OpenAi {
    fn service(&self) -> &str {
        services::OPENAI
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.api_key)
    }

    fn parse_envelope(&self, body: Value) -> Envelope {
        match body.get("error") {
            Some(error) if error.is_object() => Envelope::Failure {
                code: error.get("code").and_then(Value::as_i64),
                message: error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown OpenAI error")
                    .to_string(),
            },
            _ => Envelope::Success(body),
        }
    }
}
