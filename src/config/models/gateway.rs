//! Top-level configuration

use super::{LoggingConfig, VendorsConfig};
use crate::core::cache_manager::CacheConfig;
use crate::core::rate_limiter::ServiceLimit;
use crate::utils::error::RetryConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Per-service limits, overlaid on the built-in defaults
    #[serde(default)]
    pub services: BTreeMap<String, ServiceLimit>,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    /// Vendor credentials; a vendor without an entry gets no client
    #[serde(default)]
    pub vendors: VendorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
