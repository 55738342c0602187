//! Error handling for serpgate
//!
//! This module defines all error types used throughout the crate.

mod helpers;
mod types;

pub use types::{GatewayError, Result};
