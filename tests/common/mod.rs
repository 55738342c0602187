//! Common test utilities

pub mod fixtures;
pub mod mock_vendor;

pub use fixtures::*;
pub use mock_vendor::{BASIC_AUTH, MockDataForSeo, gateway_config};
