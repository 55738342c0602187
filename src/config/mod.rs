//! Configuration management
//!
//! Configuration is read from a YAML file, overlaid with environment
//! variables, and validated before any component is built from it.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable names
pub mod env {
    pub const DATAFORSEO_LOGIN: &str = "DATAFORSEO_LOGIN";
    pub const DATAFORSEO_PASSWORD: &str = "DATAFORSEO_PASSWORD";
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    pub const CACHE_TTL_MS: &str = "SERPGATE_CACHE_TTL_MS";
    pub const LOG_LEVEL: &str = "SERPGATE_LOG_LEVEL";
}

impl GatewayConfig {
    /// Load configuration from a YAML file, then apply the environment
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?.with_env_overrides(|key| std::env::var(key).ok())?;
        config.validate_all()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse configuration from YAML text without touching the environment
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Build configuration from defaults and environment variables alone
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self::default().with_env_overrides(|key| std::env::var(key).ok())?;
        config.validate_all()?;
        Ok(config)
    }

    /// Overlay values found through `lookup` on top of this configuration
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let login = lookup(env::DATAFORSEO_LOGIN);
        let password = lookup(env::DATAFORSEO_PASSWORD);
        if login.is_some() || password.is_some() {
            let vendor = self.vendors.dataforseo.get_or_insert_with(Default::default);
            if let Some(login) = login {
                vendor.login = login;
            }
            if let Some(password) = password {
                vendor.password = password;
            }
        }

        if let Some(api_key) = lookup(env::OPENAI_API_KEY) {
            self.vendors
                .openai
                .get_or_insert_with(Default::default)
                .api_key = api_key;
        }

        if let Some(api_key) = lookup(env::GEMINI_API_KEY) {
            self.vendors
                .gemini
                .get_or_insert_with(Default::default)
                .api_key = api_key;
        }

        if let Some(ttl) = lookup(env::CACHE_TTL_MS) {
            self.cache.ttl_ms = ttl.trim().parse().map_err(|e| {
                GatewayError::Config(format!("Invalid {}: {}", env::CACHE_TTL_MS, e))
            })?;
        }

        if let Some(level) = lookup(env::LOG_LEVEL) {
            self.logging.level = level;
        }

        Ok(self)
    }

    /// Validate the entire configuration
    pub fn validate_all(&self) -> Result<()> {
        debug!("Validating configuration");
        Validate::validate(self).map_err(GatewayError::Config)
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
