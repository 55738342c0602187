//! Response envelope classification

use crate::utils::error::{GatewayError, Result};
use serde_json::Value;

/// Vendor response, classified right after parsing
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// The vendor reported success; holds the full body
    Success(Value),
    /// The vendor reported an application-level failure
    Failure { code: Option<i64>, message: String },
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn into_result(self, service: &str) -> Result<Value> {
        match self {
            Self::Success(body) => Ok(body),
            Self::Failure { code, message } => Err(GatewayError::vendor(service, code, message)),
        }
    }
}
