//! Text generation through OpenAI or Gemini

use super::types::Completion;
use crate::core::client::ApiClient;
use crate::core::rate_limiter::services;
use crate::utils::error::{GatewayError, Result};
use serde_json::{Value, json};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    ChatCompletions,
    GenerateContent,
}

/// Completes a caller-built prompt
#[derive(Debug, Clone)]
pub struct ContentService {
    client: ApiClient,
    model: String,
    format: Format,
}

impl ContentService {
    /// Fails with a configuration error for clients of non-LLM vendors
    pub fn new(client: ApiClient, model: Option<String>) -> Result<Self> {
        let (format, default_model) = match client.service() {
            services::OPENAI => (Format::ChatCompletions, DEFAULT_OPENAI_MODEL),
            services::GEMINI => (Format::GenerateContent, DEFAULT_GEMINI_MODEL),
            other => return Err(GatewayError::configuration(other)),
        };

        Ok(Self {
            client,
            model: model.unwrap_or_else(|| default_model.to_string()),
            format,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn service(&self) -> &str {
        self.client.service()
    }

    pub async fn complete(&self, prompt: &str) -> Result<Completion> {
        let (endpoint, payload) = self.request(prompt);
        let body = self.client.call_service(&endpoint, &payload).await?;
        let text = self.extract_text(&body).ok_or_else(|| {
            GatewayError::vendor(self.service(), None, "Response contained no text")
        })?;

        Ok(Completion {
            service: self.service().to_string(),
            model: self.model.clone(),
            text,
        })
    }

    pub(crate) fn request(&self, prompt: &str) -> (String, Value) {
        match self.format {
            Format::ChatCompletions => (
                "chat/completions".to_string(),
                json!({
                    "model": self.model,
                    "messages": [{"role": "user", "content": prompt}],
                }),
            ),
            Format::GenerateContent => (
                format!("models/{}:generateContent", self.model),
                json!({
                    "contents": [{"role": "user", "parts": [{"text": prompt}]}],
                }),
            ),
        }
    }

    pub(crate) fn extract_text(&self, body: &Value) -> Option<String> {
        match self.format {
            Format::ChatCompletions => body
                .pointer("/choices/0/message/content")
                .and_then(Value::as_str)
                .map(str::to_string),
            Format::GenerateContent => {
                let parts = body
                    .pointer("/candidates/0/content/parts")
                    .and_then(Value::as_array)?;
                let text: String = parts
                    .iter()
                    .filter_map(|part| part.get("text").and_then(Value::as_str))
                    .collect();
                (!text.is_empty()).then_some(text)
            }
        }
    }
}
