//! Utility modules

pub mod error;
pub mod logging;

pub use logging::init_logging;
