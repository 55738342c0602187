//! Request cache implementation

use super::hashing::RequestHash;
use super::persistent::PersistentCache;
use super::types::{AtomicCacheStats, CacheConfig, CacheEntry, CacheStats};
use crate::utils::error::{GatewayError, Result};
use chrono::Utc;
use lru::LruCache;
use parking_lot::Mutex;
use serde_json::Value;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Two-tier response cache
///
/// The memory tier is an LRU bounded by `max_entries`. Expired entries are
/// hidden on read, dropped when touched, and swept every `sweep_interval`
/// puts. When a persistent tier is attached, memory misses fall through to
/// it and every put is written through.
pub struct RequestCache {
    entries: Mutex<LruCache<RequestHash, CacheEntry<Value>>>,
    persistent: Option<Arc<dyn PersistentCache>>,
    config: CacheConfig,
    stats: AtomicCacheStats,
    puts_since_sweep: AtomicUsize,
}

impl RequestCache {
    /// Create a new memory-only cache
    pub fn new(config: CacheConfig) -> Result<Self> {
        let capacity = NonZeroUsize::new(config.max_entries).ok_or_else(|| {
            GatewayError::config("Invalid cache configuration: max_entries must be greater than 0")
        })?;

        Ok(Self {
            entries: Mutex::new(LruCache::new(capacity)),
            persistent: None,
            config,
            stats: AtomicCacheStats::default(),
            puts_since_sweep: AtomicUsize::new(0),
        })
    }

    /// Attach a persistent tier
    pub fn with_persistent(mut self, store: Arc<dyn PersistentCache>) -> Self {
        self.persistent = Some(store);
        self
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// TTL applied by callers that have no endpoint-specific TTL
    pub fn default_ttl(&self) -> Duration {
        self.config.ttl()
    }

    /// Look up a live response
    pub async fn get(&self, hash: &RequestHash) -> Option<Value> {
        {
            let mut entries = self.entries.lock();
            if let Some(entry) = entries.get_mut(hash) {
                if !entry.is_expired() {
                    entry.mark_accessed();
                    self.stats.hits.fetch_add(1, Ordering::Relaxed);
                    debug!("Cache hit for {}", hash);
                    return Some(entry.value.clone());
                }
                entries.pop(hash);
                self.stats.expired.fetch_add(1, Ordering::Relaxed);
            }
        }

        if let Some(store) = &self.persistent {
            match store.get(hash).await {
                Ok(Some(value)) => {
                    self.stats.persistent_hits.fetch_add(1, Ordering::Relaxed);
                    debug!("Persistent cache hit for {}", hash);
                    self.insert(hash.clone(), value.clone(), self.config.ttl());
                    return Some(value);
                }
                Ok(None) => {}
                Err(e) => warn!("Persistent cache lookup failed for {}: {}", hash, e),
            }
        }

        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store a response, replacing any previous entry for the hash
    pub async fn put(&self, hash: RequestHash, value: Value, ttl: Duration) {
        if let Some(store) = &self.persistent {
            let persistent_ttl = chrono::Duration::from_std(self.config.persistent_ttl())
                .unwrap_or_else(|_| chrono::Duration::days(7));
            if let Err(e) = store.put(&hash, &value, Utc::now() + persistent_ttl).await {
                warn!("Persistent cache write failed for {}: {}", hash, e);
            }
        }

        self.insert(hash, value, ttl);

        let puts = self.puts_since_sweep.fetch_add(1, Ordering::Relaxed) + 1;
        if self.config.sweep_interval > 0 && puts >= self.config.sweep_interval {
            self.puts_since_sweep.store(0, Ordering::Relaxed);
            self.purge_expired();
        }
    }

    fn insert(&self, hash: RequestHash, value: Value, ttl: Duration) {
        let mut entries = self.entries.lock();
        if let Some((evicted, _)) = entries.push(hash.clone(), CacheEntry::new(value, ttl)) {
            if evicted != hash {
                self.stats.evictions.fetch_add(1, Ordering::Relaxed);
                debug!("Evicted least recently used entry {}", evicted);
            }
        }
    }

    /// Drop every expired in-memory entry, returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.lock();
        let expired: Vec<RequestHash> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(hash, _)| hash.clone())
            .collect();

        for hash in &expired {
            entries.pop(hash);
        }

        if !expired.is_empty() {
            self.stats
                .expired
                .fetch_add(expired.len() as u64, Ordering::Relaxed);
            debug!("Purged {} expired cache entries", expired.len());
        }
        expired.len()
    }

    /// Number of in-memory entries, live or not yet purged
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// Empty the in-memory tier and reset statistics
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.stats.reset();
        self.puts_since_sweep.store(0, Ordering::Relaxed);
        info!("Request cache cleared");
    }
}
