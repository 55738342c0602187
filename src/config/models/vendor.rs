//! Vendor credentials and endpoints

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VendorsConfig {
    #[serde(default)]
    pub dataforseo: Option<DataForSeoConfig>,
    #[serde(default)]
    pub openai: Option<ApiKeyVendorConfig>,
    #[serde(default)]
    pub gemini: Option<ApiKeyVendorConfig>,
}

/// DataForSEO account
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DataForSeoConfig {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
    /// Overrides the public API base URL
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Vendor authenticated by a single API key
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeyVendorConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
    /// Model used for completions
    #[serde(default)]
    pub model: Option<String>,
}
