//! Validators for configuration structures

use super::Validate;
use crate::config::models::*;
use crate::core::cache_manager::CacheConfig;
use crate::utils::error::RetryConfig;
use url::Url;

/// Base URLs must be absolute http(s) URLs with a host
pub fn validate_base_url(url_str: &str, context: &str) -> Result<(), String> {
    let url =
        Url::parse(url_str).map_err(|e| format!("{} has invalid URL format: {}", context, e))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(format!(
                "{} must use http:// or https:// scheme, got: {}",
                context, scheme
            ));
        }
    }

    if url.host_str().is_none() {
        return Err(format!("{} URL must have a valid host", context));
    }

    Ok(())
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        for (service, limit) in &self.services {
            if service.trim().is_empty() {
                return Err("Service name cannot be empty".to_string());
            }
            limit.validate(service).map_err(|e| e.to_string())?;
        }

        self.cache
            .validate()
            .map_err(|e| format!("Cache config error: {}", e))?;
        self.retry
            .validate()
            .map_err(|e| format!("Retry config error: {}", e))?;
        self.vendors.validate()?;
        self.logging
            .validate()
            .map_err(|e| format!("Logging config error: {}", e))?;

        Ok(())
    }
}

impl Validate for CacheConfig {
    fn validate(&self) -> Result<(), String> {
        if self.ttl_ms == 0 {
            return Err("Cache TTL must be greater than 0".to_string());
        }
        if self.max_entries == 0 {
            return Err("Cache max entries must be greater than 0".to_string());
        }
        if self.sweep_interval == 0 {
            return Err("Cache sweep interval must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("Retry max attempts must be at least 1".to_string());
        }
        if self.max_delay_ms < self.base_delay_ms {
            return Err("Retry max delay must not be below the base delay".to_string());
        }
        if self.backoff_multiplier < 1.0 {
            return Err("Retry backoff multiplier must be at least 1.0".to_string());
        }
        Ok(())
    }
}

impl Validate for VendorsConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(dataforseo) = &self.dataforseo {
            dataforseo.validate()?;
        }
        if let Some(openai) = &self.openai {
            openai
                .validate()
                .map_err(|e| format!("OpenAI config error: {}", e))?;
        }
        if let Some(gemini) = &self.gemini {
            gemini
                .validate()
                .map_err(|e| format!("Gemini config error: {}", e))?;
        }
        Ok(())
    }
}

impl Validate for DataForSeoConfig {
    fn validate(&self) -> Result<(), String> {
        if self.login.is_empty() || self.password.is_empty() {
            return Err("DataForSEO login and password are required".to_string());
        }
        if let Some(base_url) = &self.base_url {
            validate_base_url(base_url, "DataForSEO base URL")?;
        }
        Ok(())
    }
}

impl Validate for ApiKeyVendorConfig {
    fn validate(&self) -> Result<(), String> {
        if self.api_key.is_empty() {
            return Err("API key is required".to_string());
        }
        if let Some(base_url) = &self.base_url {
            validate_base_url(base_url, "Base URL")?;
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }
}
