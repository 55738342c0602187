//! Configuration data models

pub mod gateway;
pub mod logging;
pub mod vendor;

pub use gateway::*;
pub use logging::*;
pub use vendor::*;
