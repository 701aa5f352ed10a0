//! Cache backend abstraction.
//!
//! The shared key-value store lives behind this trait; it is reached over a
//! network call that can fail or time out independently of the content
//! store. [`MemoryBackend`] is the in-process implementation used by tests
//! and single-node deployments.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;

use super::error::CacheError;
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::backend";

/// Number of writes between sweeps of expired entries.
const SWEEP_INTERVAL: usize = 64;

/// A shared key-value store with per-key TTL.
///
/// Every operation may fail independently; callers run them under the
/// fail-open policy and never let a backend fault surface to a request.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError>;

    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> Result<(), CacheError>;

    async fn delete_key(&self, key: &str) -> Result<(), CacheError>;

    /// Delete every key starting with `prefix`.
    async fn delete_prefix(&self, prefix: &str) -> Result<(), CacheError>;
}

struct MemoryEntry {
    value: Bytes,
    expires_at: Instant,
}

/// In-process TTL key-value store.
///
/// Expired entries are reclaimed lazily on read and swept every
/// [`SWEEP_INTERVAL`] writes. Search regions are keyed by caller-supplied
/// query text that may never repeat, so without the sweep those entries
/// would be held past expiry for the life of the process.
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, MemoryEntry>>,
    sets_since_sweep: AtomicUsize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            sets_since_sweep: AtomicUsize::new(0),
        }
    }

    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        rw_read(&self.entries, SOURCE, "len")
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError> {
        {
            let entries = rw_read(&self.entries, SOURCE, "get");
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Ok(Some(entry.value.clone()));
                }
                None => return Ok(None),
                Some(_) => {}
            }
        }
        // Lazily drop the expired entry.
        rw_write(&self.entries, SOURCE, "get.purge").remove(key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> Result<(), CacheError> {
        let entry = MemoryEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        let mut entries = rw_write(&self.entries, SOURCE, "set");
        entries.insert(key.to_string(), entry);
        if self.sets_since_sweep.fetch_add(1, Ordering::Relaxed) + 1 >= SWEEP_INTERVAL {
            self.sets_since_sweep.store(0, Ordering::Relaxed);
            let now = Instant::now();
            entries.retain(|_, entry| entry.expires_at > now);
        }
        Ok(())
    }

    async fn delete_key(&self, key: &str) -> Result<(), CacheError> {
        rw_write(&self.entries, SOURCE, "delete_key").remove(key);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<(), CacheError> {
        rw_write(&self.entries, SOURCE, "delete_prefix")
            .retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }
}
