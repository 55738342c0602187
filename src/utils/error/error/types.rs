//! Error types for serpgate

use thiserror::Error;

/// Result type alias for serpgate
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for serpgate
///
/// The first four variants form the failure surface of
/// [`ApiClient::call_service`](crate::core::client::ApiClient::call_service);
/// the rest come from loading configuration and decoding payloads.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// A service was used before it was configured on the rate limiter
    #[error("Service '{service}' is not configured")]
    Configuration { service: String },

    /// The per-service timeout elapsed before the call settled
    #[error("{service} timed out after {timeout_ms}ms")]
    Timeout { service: String, timeout_ms: u64 },

    /// The vendor answered but reported a failure
    #[error("{service} API error: {message}")]
    VendorApi {
        service: String,
        /// Status code from the response envelope, if any
        status_code: Option<i64>,
        /// HTTP status, if the failure was signalled at the HTTP level
        http_status: Option<u16>,
        message: String,
    },

    /// Transport-level failure (DNS, connect, reset, body read)
    #[error("Network error for {service}: {message}")]
    Network { service: String, message: String },

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
