//! Persistent cache tier
//!
//! The long-lived tier is an external key-value store keyed by the same
//! [`RequestHash`] as the in-memory tier, with an explicit expiration time.

use super::hashing::RequestHash;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde_json::Value;

/// Key-value store backing the persistent tier
#[async_trait]
pub trait PersistentCache: Send + Sync {
    /// Return the stored value if it has not expired
    async fn get(&self, hash: &RequestHash) -> Result<Option<Value>>;

    /// Store or overwrite a value
    async fn put(&self, hash: &RequestHash, value: &Value, expires_at: DateTime<Utc>) -> Result<()>;
}

/// In-process implementation of [`PersistentCache`]
#[derive(Debug, Default)]
pub struct MemoryPersistentCache {
    entries: DashMap<RequestHash, (Value, DateTime<Utc>)>,
}

impl MemoryPersistentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Expiration time of a stored entry
    pub fn expires_at(&self, hash: &RequestHash) -> Option<DateTime<Utc>> {
        self.entries.get(hash).map(|entry| entry.1)
    }
}

#[async_trait]
impl PersistentCache for MemoryPersistentCache {
    async fn get(&self, hash: &RequestHash) -> Result<Option<Value>> {
        let now = Utc::now();
        let value = match self.entries.get(hash) {
            Some(entry) if entry.1 > now => return Ok(Some(entry.0.clone())),
            Some(_) => None,
            None => return Ok(None),
        };
        self.entries.remove(hash);
        Ok(value)
    }

    async fn put(&self, hash: &RequestHash, value: &Value, expires_at: DateTime<Utc>) -> Result<()> {
        self.entries
            .insert(hash.clone(), (value.clone(), expires_at));
        Ok(())
    }
}
