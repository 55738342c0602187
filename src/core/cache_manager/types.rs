//! Cache manager type definitions

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Default TTL for in-memory entries in milliseconds
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
    /// Maximum number of in-memory entries
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Sweep expired entries after this many puts
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval: usize,
    /// TTL for the persistent tier in seconds
    #[serde(default = "default_persistent_ttl_secs")]
    pub persistent_ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub fn persistent_ttl(&self) -> Duration {
        Duration::from_secs(self.persistent_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
            max_entries: default_max_entries(),
            sweep_interval: default_sweep_interval(),
            persistent_ttl_secs: default_persistent_ttl_secs(),
        }
    }
}

fn default_ttl_ms() -> u64 {
    5 * 60 * 1000
}

fn default_max_entries() -> usize {
    10_000
}

fn default_sweep_interval() -> usize {
    1000
}

fn default_persistent_ttl_secs() -> u64 {
    7 * 24 * 60 * 60
}

/// Cache entry with metadata
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached value
    pub value: T,
    /// When the entry was stored
    pub created_at: Instant,
    /// When the entry expires
    pub expires_at: Instant,
    /// Number of hits served
    pub access_count: u64,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            created_at: now,
            expires_at: now + ttl,
            access_count: 0,
        }
    }

    /// Entries are live strictly before `expires_at`
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    pub fn mark_accessed(&mut self) {
        self.access_count += 1;
    }

    pub fn age(&self) -> Duration {
        Instant::now().duration_since(self.created_at)
    }
}

/// Atomic cache statistics
#[derive(Debug, Default)]
pub(super) struct AtomicCacheStats {
    pub(super) hits: AtomicU64,
    pub(super) misses: AtomicU64,
    pub(super) persistent_hits: AtomicU64,
    pub(super) evictions: AtomicU64,
    pub(super) expired: AtomicU64,
}

impl AtomicCacheStats {
    pub(super) fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            persistent_hits: self.persistent_hits.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
        }
    }

    pub(super) fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.persistent_hits.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        self.expired.store(0, Ordering::Relaxed);
    }
}

/// Cache statistics snapshot
#[derive(Debug, Default, Clone, Serialize)]
pub struct CacheStats {
    /// In-memory hits
    pub hits: u64,
    /// Lookups that found nothing live in either tier
    pub misses: u64,
    /// Hits served from the persistent tier
    pub persistent_hits: u64,
    /// Entries dropped to stay within `max_entries`
    pub evictions: u64,
    /// Entries dropped because they expired
    pub expired: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits + self.persistent_hits;
        let total = hits + self.misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}
