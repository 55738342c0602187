//! Vendor API client

use crate::core::cache_manager::{RequestCache, RequestHash};
use crate::core::providers::{Envelope, Vendor};
use crate::core::rate_limiter::RateLimiter;
use crate::utils::error::{GatewayError, Result, RetryPolicy};
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Instrument, debug, info_span};
use uuid::Uuid;

/// Client for one vendor, sharing a limiter and cache with its siblings
#[derive(Clone)]
pub struct ApiClient {
    vendor: Arc<dyn Vendor>,
    http: reqwest::Client,
    limiter: Arc<RateLimiter>,
    cache: Arc<RequestCache>,
    retry: RetryPolicy,
    cache_ttl: Duration,
}

impl ApiClient {
    pub fn new(vendor: Arc<dyn Vendor>, limiter: Arc<RateLimiter>, cache: Arc<RequestCache>) -> Self {
        let cache_ttl = cache.default_ttl();
        Self {
            vendor,
            http: reqwest::Client::new(),
            limiter,
            cache,
            retry: RetryPolicy::default(),
            cache_ttl,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Rate limiter key of the underlying vendor
    pub fn service(&self) -> &str {
        self.vendor.service()
    }

    pub fn vendor(&self) -> &dyn Vendor {
        self.vendor.as_ref()
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Call `endpoint` with `payload` and return the validated response body
    ///
    /// A live cache entry for the same endpoint and payload is returned
    /// without touching the rate limiter or the network. Otherwise every
    /// attempt waits for a rate limit slot and runs under the service
    /// timeout; retryable failures are retried per the client's
    /// [`RetryPolicy`]. Only successful bodies are cached.
    pub async fn call_service(&self, endpoint: &str, payload: &Value) -> Result<Value> {
        let service = self.service();
        let span = info_span!(
            "call_service",
            service = service,
            endpoint = endpoint,
            request_id = %Uuid::new_v4()
        );

        async move {
            let hash = RequestHash::compute(endpoint, payload);
            if let Some(cached) = self.cache.get(&hash).await {
                debug!("Cache hit for {} {}", service, endpoint);
                return Ok(cached);
            }

            let label = format!("{} {}", service, endpoint);
            let body = self
                .retry
                .run(&label, |attempt| async move {
                    self.limiter.acquire(service).await?;
                    debug!("Dispatching attempt {}", attempt);
                    self.limiter
                        .guard_with_timeout(service, self.dispatch(endpoint, payload))
                        .await
                })
                .await?;

            self.cache.put(hash, body.clone(), self.cache_ttl).await;
            Ok(body)
        }
        .instrument(span)
        .await
    }

    /// One HTTP round trip, classified into a body or a typed error
    async fn dispatch(&self, endpoint: &str, payload: &Value) -> Result<Value> {
        let service = self.service();
        let url = self.vendor.url(endpoint);

        let request = if payload.is_null() {
            self.http.get(&url)
        } else {
            self.http.post(&url).json(payload)
        };

        let response = self
            .vendor
            .authorize(request)
            .send()
            .await
            .map_err(|e| GatewayError::network(service, e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(body) = self.vendor.not_found_fallback(endpoint, payload) {
                debug!("{} returned 404, using empty result", endpoint);
                return Ok(body);
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::network(service, e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|body| self.vendor.error_message(&body))
                .unwrap_or_else(|| {
                    format!(
                        "HTTP {}",
                        status.canonical_reason().unwrap_or(status.as_str())
                    )
                });
            return Err(GatewayError::vendor_http(service, status.as_u16(), message));
        }

        let body: Value = serde_json::from_slice(&bytes).map_err(|e| {
            GatewayError::vendor(service, None, format!("Invalid JSON response: {}", e))
        })?;

        let envelope = self.vendor.parse_envelope(body);
        if let Envelope::Failure {
            code: Some(code), ..
        } = &envelope
        {
            if self.vendor.is_not_found_code(*code) {
                if let Some(body) = self.vendor.not_found_fallback(endpoint, payload) {
                    debug!("{} reported status {}, using empty result", endpoint, code);
                    return Ok(body);
                }
            }
        }

        envelope.into_result(service)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("vendor", &self.vendor)
            .field("retry", &self.retry)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}
