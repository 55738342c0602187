//! DataForSEO mock server wrapper

use serpgate::config::{DataForSeoConfig, GatewayConfig};
use serpgate::core::cache_manager::{CacheConfig, RequestCache};
use serpgate::core::client::ApiClient;
use serpgate::core::providers::DataForSeo;
use serpgate::core::rate_limiter::{RateLimiter, ServiceLimit, services};
use serpgate::utils::error::RetryPolicy;
use std::sync::Arc;
use wiremock::MockServer;

pub const LOGIN: &str = "login";
pub const PASSWORD: &str = "password";
/// base64 of `login:password`
pub const BASIC_AUTH: &str = "Basic bG9naW46cGFzc3dvcmQ=";

/// A mock DataForSEO API with a limiter and cache to call it through
pub struct MockDataForSeo {
    pub server: MockServer,
    pub limiter: Arc<RateLimiter>,
    pub cache: Arc<RequestCache>,
}

impl MockDataForSeo {
    /// Generous window, two second timeout
    pub async fn start() -> Self {
        Self::start_with_limit(ServiceLimit::new(100, 60_000, 2_000)).await
    }

    pub async fn start_with_limit(limit: ServiceLimit) -> Self {
        // Start the server first so the window opens when the test begins
        let server = MockServer::start().await;

        let limiter = Arc::new(RateLimiter::with_defaults());
        limiter
            .configure(services::DATAFORSEO, limit)
            .expect("valid limit");
        let cache = Arc::new(RequestCache::new(CacheConfig::default()).expect("valid cache"));

        Self {
            server,
            limiter,
            cache,
        }
    }

    pub fn base_url(&self) -> String {
        format!("{}/v3", self.server.uri())
    }

    /// Path the mock server sees for an endpoint
    pub fn path(endpoint: &str) -> String {
        format!("/v3/{}", endpoint)
    }

    pub fn client(&self, retry: RetryPolicy) -> ApiClient {
        let vendor = Arc::new(DataForSeo::with_base_url(&self.base_url(), LOGIN, PASSWORD));
        ApiClient::new(vendor, self.limiter.clone(), self.cache.clone()).with_retry(retry)
    }
}

/// Gateway configuration pointing every vendor at `server`
pub fn gateway_config(server: &MockServer) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.vendors.dataforseo = Some(DataForSeoConfig {
        login: LOGIN.to_string(),
        password: PASSWORD.to_string(),
        base_url: Some(format!("{}/v3", server.uri())),
    });
    config.retry.max_attempts = 2;
    config.retry.base_delay_ms = 10;
    config
}
