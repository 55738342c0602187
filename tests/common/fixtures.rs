//! Vendor response fixtures

use serde_json::{Value, json};
use serpgate::utils::error::{RetryConfig, RetryPolicy};

/// Successful DataForSEO envelope with one task holding `result`
pub fn dataforseo_envelope(result: Value) -> Value {
    json!({
        "version": "0.1.20240801",
        "status_code": 20000,
        "status_message": "Ok.",
        "cost": 0.0103,
        "tasks_count": 1,
        "tasks_error": 0,
        "tasks": [{
            "id": "08011234-1535-0066-0000-2d5d1b4e0b31",
            "status_code": 20000,
            "status_message": "Ok.",
            "result_count": 1,
            "result": result,
        }],
    })
}

/// Successful DataForSEO envelope whose single task failed
pub fn dataforseo_task_failure(code: i64, message: &str) -> Value {
    json!({
        "version": "0.1.20240801",
        "status_code": 20000,
        "status_message": "Ok.",
        "cost": 0,
        "tasks_count": 1,
        "tasks_error": 1,
        "tasks": [{
            "id": "08011234-1535-0066-0000-2d5d1b4e0b32",
            "status_code": code,
            "status_message": message,
            "result_count": 0,
            "result": null,
        }],
    })
}

/// DataForSEO envelope reporting an application failure
pub fn dataforseo_failure(code: i64, message: &str) -> Value {
    json!({
        "status_code": code,
        "status_message": message,
        "tasks_count": 0,
        "tasks_error": 1,
        "tasks": [],
    })
}

pub fn openai_completion(text: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop",
        }],
    })
}

pub fn gemini_completion(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP",
        }],
    })
}

/// Retry policy with millisecond-scale linear backoff
pub fn fast_retry(max_attempts: u32, base_delay_ms: u64) -> RetryPolicy {
    RetryPolicy::new(RetryConfig {
        max_attempts,
        base_delay_ms,
        ..RetryConfig::default()
    })
}
