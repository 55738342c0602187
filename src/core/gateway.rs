//! Composition root
//!
//! A [`Gateway`] owns the one rate limiter and the one request cache shared
//! by every vendor client of the process.

use crate::config::{ApiKeyVendorConfig, GatewayConfig};
use crate::core::cache_manager::{CacheStats, PersistentCache, RequestCache};
use crate::core::client::ApiClient;
use crate::core::providers::{DataForSeo, Gemini, OpenAi, Vendor};
use crate::core::rate_limiter::{RateLimitStatus, RateLimiter, services};
use crate::services::{ContentService, SeoService};
use crate::utils::error::{GatewayError, Result, RetryPolicy};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Shared limiter and cache plus one client per configured vendor
#[derive(Clone)]
pub struct Gateway {
    config: Arc<GatewayConfig>,
    limiter: Arc<RateLimiter>,
    cache: Arc<RequestCache>,
    clients: Arc<BTreeMap<String, ApiClient>>,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        Self::build(config, None)
    }

    /// Like [`new`](Self::new), with a persistent tier behind the cache
    pub fn with_persistent_cache(
        config: GatewayConfig,
        store: Arc<dyn PersistentCache>,
    ) -> Result<Self> {
        Self::build(config, Some(store))
    }

    fn build(config: GatewayConfig, store: Option<Arc<dyn PersistentCache>>) -> Result<Self> {
        info!("Initializing gateway");
        config.validate_all()?;

        let limiter = Arc::new(RateLimiter::new());
        Self::register_limits(&limiter, &config)?;

        let mut cache = RequestCache::new(config.cache.clone())?;
        if let Some(store) = store {
            debug!("Persistent cache tier enabled");
            cache = cache.with_persistent(store);
        }
        let cache = Arc::new(cache);

        let http = reqwest::Client::builder()
            .user_agent(concat!("serpgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::config(format!("Failed to build HTTP client: {}", e)))?;
        let retry = RetryPolicy::new(config.retry.clone());

        let mut vendors: Vec<Arc<dyn Vendor>> = Vec::new();
        if let Some(dataforseo) = &config.vendors.dataforseo {
            vendors.push(Arc::new(match &dataforseo.base_url {
                Some(base_url) => {
                    DataForSeo::with_base_url(base_url, &dataforseo.login, &dataforseo.password)
                }
                None => DataForSeo::new(&dataforseo.login, &dataforseo.password),
            }));
        }
        if let Some(openai) = &config.vendors.openai {
            vendors.push(Arc::new(match &openai.base_url {
                Some(base_url) => OpenAi::with_base_url(base_url, &openai.api_key),
                None => OpenAi::new(&openai.api_key),
            }));
        }
        if let Some(gemini) = &config.vendors.gemini {
            vendors.push(Arc::new(match &gemini.base_url {
                Some(base_url) => Gemini::with_base_url(base_url, &gemini.api_key),
                None => Gemini::new(&gemini.api_key),
            }));
        }

        let clients: BTreeMap<String, ApiClient> = vendors
            .into_iter()
            .map(|vendor| {
                let client = ApiClient::new(vendor, limiter.clone(), cache.clone())
                    .with_http_client(http.clone())
                    .with_retry(retry.clone());
                (client.service().to_string(), client)
            })
            .collect();

        info!(
            "Gateway initialized with clients for: {:?}",
            clients.keys().collect::<Vec<_>>()
        );

        Ok(Self {
            config: Arc::new(config),
            limiter,
            cache,
            clients: Arc::new(clients),
        })
    }

    /// Built-in limits overlaid with the configured ones
    fn register_limits(limiter: &RateLimiter, config: &GatewayConfig) -> Result<()> {
        limiter.configure_defaults();
        for (service, limit) in &config.services {
            limiter.configure(service, *limit)?;
        }
        Ok(())
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    pub fn cache(&self) -> &Arc<RequestCache> {
        &self.cache
    }

    /// Client for a vendor, a configuration error if it has no credentials
    pub fn client(&self, service: &str) -> Result<&ApiClient> {
        self.clients
            .get(service)
            .ok_or_else(|| GatewayError::configuration(service))
    }

    /// Services with a client, sorted
    pub fn vendors(&self) -> Vec<&str> {
        self.clients.keys().map(String::as_str).collect()
    }

    pub fn seo(&self) -> Result<SeoService> {
        Ok(SeoService::new(self.client(services::DATAFORSEO)?.clone()))
    }

    /// Content generation through `openai` or `gemini`
    pub fn content(&self, service: &str) -> Result<ContentService> {
        let client = self.client(service)?.clone();
        let model = self.vendor_config(service).and_then(|c| c.model.clone());
        ContentService::new(client, model)
    }

    fn vendor_config(&self, service: &str) -> Option<&ApiKeyVendorConfig> {
        match service {
            services::OPENAI => self.config.vendors.openai.as_ref(),
            services::GEMINI => self.config.vendors.gemini.as_ref(),
            _ => None,
        }
    }

    /// Window snapshot of every service with a limit
    pub fn status(&self) -> Vec<RateLimitStatus> {
        self.limiter
            .services()
            .iter()
            .filter_map(|service| self.limiter.status(service))
            .collect()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop all limiter state and cached responses, then restore the limits
    pub fn reset(&self) -> Result<()> {
        self.limiter.clear_all();
        self.cache.clear();
        Self::register_limits(&self.limiter, &self.config)?;
        info!("Gateway state reset");
        Ok(())
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("vendors", &self.vendors())
            .field("services", &self.limiter.services())
            .finish()
    }
}
