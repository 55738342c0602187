//! DataForSEO v3 profile

use super::envelope::Envelope;
use super::{Vendor, redact};
use crate::core::rate_limiter::services;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::RequestBuilder;
use reqwest::header::AUTHORIZATION;
use serde_json::{Value, json};
use std::fmt;

/// Envelope and task status code meaning success
pub const DATAFORSEO_SUCCESS: i64 = 20000;

/// Envelope or task status code for a target the API has no data on
pub const DATAFORSEO_NOT_FOUND: i64 = 40400;

const DEFAULT_BASE_URL: &str = "https://api.dataforseo.com/v3";

/// Endpoint prefixes whose 404 or 40400 means "target has no data"
const EMPTY_ON_NOT_FOUND: &[&str] = &["backlinks/"];

/// DataForSEO, authenticated with HTTP Basic
#[derive(Clone)]
pub struct DataForSeo {
    base_url: String,
    login: String,
    authorization: String,
}

impl DataForSeo {
    pub fn new(login: &str, password: &str) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, login, password)
    }

    pub fn with_base_url(base_url: &str, login: &str, password: &str) -> Self {
        let credentials = STANDARD.encode(format!("{}:{}", login, password));
        Self {
            base_url: base_url.to_string(),
            login: login.to_string(),
            authorization: format!("Basic {}", credentials),
        }
    }
}

impl fmt::Debug for DataForSeo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataForSeo")
            .field("base_url", &self.base_url)
            .field("login", &self.login)
            .field("authorization", &redact(&self.authorization))
            .finish()
    }
}

impl Vendor for DataForSeo {
    fn service(&self) -> &str {
        services::DATAFORSEO
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, &self.authorization)
    }

    fn parse_envelope(&self, body: Value) -> Envelope {
        let status = body.get("status_code").and_then(Value::as_i64);
        if status != Some(DATAFORSEO_SUCCESS) {
            return Envelope::Failure {
                code: status,
                message: status_message(&body),
            };
        }

        // Batch endpoints report per-task failures inside a 20000 envelope
        if let Some(task) = body.pointer("/tasks/0") {
            let task_status = task.get("status_code").and_then(Value::as_i64);
            if task_status.is_some() && task_status != Some(DATAFORSEO_SUCCESS) {
                return Envelope::Failure {
                    code: task_status,
                    message: status_message(task),
                };
            }
        }

        Envelope::Success(body)
    }

    fn is_not_found_code(&self, code: i64) -> bool {
        code == DATAFORSEO_NOT_FOUND
    }

    fn not_found_fallback(&self, endpoint: &str, payload: &Value) -> Option<Value> {
        let endpoint = endpoint.trim_start_matches('/');
        if !EMPTY_ON_NOT_FOUND
            .iter()
            .any(|prefix| endpoint.starts_with(prefix))
        {
            return None;
        }

        let target = first_task(payload)
            .and_then(|task| task.get("target"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        Some(empty_backlinks_envelope(endpoint, target))
    }
}

fn status_message(value: &Value) -> String {
    value
        .get("status_message")
        .and_then(Value::as_str)
        .unwrap_or("Unknown DataForSEO error")
        .to_string()
}

/// Payloads are either a task array or a single task object
fn first_task(payload: &Value) -> Option<&Value> {
    match payload {
        Value::Array(tasks) => tasks.first(),
        Value::Object(_) => Some(payload),
        _ => None,
    }
}

/// Well-formed success envelope with a single zeroed backlink summary
pub fn empty_backlinks_envelope(endpoint: &str, target: &str) -> Value {
    json!({
        "status_code": DATAFORSEO_SUCCESS,
        "status_message": "Ok.",
        "cost": 0,
        "tasks_count": 1,
        "tasks_error": 0,
        "tasks": [{
            "status_code": DATAFORSEO_SUCCESS,
            "status_message": "Ok.",
            "path": endpoint.split('/').collect::<Vec<_>>(),
            "result_count": 1,
            "result": [{
                "target": target,
                "rank": 0,
                "backlinks_count": 0,
                "referring_domains_count": 0,
                "referring_main_domains": 0,
                "referring_ips": 0,
                "broken_backlinks": 0,
                "dofollow": 0,
                "nofollow": 0,
            }],
        }],
    })
}
