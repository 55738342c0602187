//! Request-level response caching
//!
//! Responses are keyed by a [`RequestHash`] of the endpoint and payload and
//! kept in a bounded in-memory tier with per-entry expiration. An optional
//! [`PersistentCache`] sits behind it for longer-lived reuse.

pub mod hashing;
pub mod manager;
pub mod persistent;
pub mod types;


pub use hashing::RequestHash;
pub use manager::RequestCache;
pub use persistent::{MemoryPersistentCache, PersistentCache};
pub use types::{CacheConfig, CacheEntry, CacheStats};
