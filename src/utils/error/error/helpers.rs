//! Helper functions for creating and classifying errors

use super::types::GatewayError;
use crate::utils::error::recovery::Retryable;
use std::time::Duration;

impl GatewayError {
    pub fn configuration<S: Into<String>>(service: S) -> Self {
        Self::Configuration {
            service: service.into(),
        }
    }

    pub fn timeout<S: Into<String>>(service: S, timeout: Duration) -> Self {
        Self::Timeout {
            service: service.into(),
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    pub fn network<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::Network {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Vendor failure reported inside a well-formed response envelope
    pub fn vendor<S: Into<String>, M: Into<String>>(
        service: S,
        status_code: Option<i64>,
        message: M,
    ) -> Self {
        Self::VendorApi {
            service: service.into(),
            status_code,
            http_status: None,
            message: message.into(),
        }
    }

    /// Vendor failure reported through a non-success HTTP status
    pub fn vendor_http<S: Into<String>, M: Into<String>>(
        service: S,
        http_status: u16,
        message: M,
    ) -> Self {
        Self::VendorApi {
            service: service.into(),
            status_code: None,
            http_status: Some(http_status),
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::VendorApi { .. } | Self::Network { .. }
        )
    }

    /// Service the error relates to, if any
    pub fn service(&self) -> Option<&str> {
        match self {
            Self::Configuration { service }
            | Self::Timeout { service, .. }
            | Self::VendorApi { service, .. }
            | Self::Network { service, .. } => Some(service.as_str()),
            _ => None,
        }
    }
}

impl Retryable for GatewayError {
    fn is_retryable(&self) -> bool {
        GatewayError::is_retryable(self)
    }
}
