//! Configuration validation

mod validators;

pub use validators::validate_base_url;

/// Checked after loading, before any component is built
pub trait Validate {
    /// Describe the first problem found
    fn validate(&self) -> Result<(), String>;
}
