//! The get-or-populate read path and the fail-open policy.
//!
//! Every backend verb runs under a bounded timeout and funnels through one
//! fail-open decision point: a failed get behaves as a miss, a failed set or
//! delete as a no-op. Callers always fall through to the content store; no
//! cache fault ever surfaces to a request.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use metrics::counter;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::backend::CacheBackend;
use super::codec;
use super::config::CacheConfig;
use super::error::CacheError;
use super::region::{CacheRegion, RegionRegistry};

pub(crate) const METRIC_CACHE_HIT: &str = "gazette_cache_hit_total";
pub(crate) const METRIC_CACHE_MISS: &str = "gazette_cache_miss_total";
pub(crate) const METRIC_CACHE_FAIL_OPEN: &str = "gazette_cache_fail_open_total";

/// Cache layer: key/TTL-aware reads and evictions over a [`CacheBackend`].
///
/// Immutable after construction; safe to share across concurrent readers and
/// writers.
pub struct CacheLayer {
    backend: Arc<dyn CacheBackend>,
    regions: RegionRegistry,
    op_timeout: Duration,
    enabled: bool,
}

impl CacheLayer {
    pub fn new(backend: Arc<dyn CacheBackend>, config: &CacheConfig) -> Self {
        Self {
            backend,
            regions: RegionRegistry::from_config(config),
            op_timeout: config.op_timeout(),
            enabled: config.enabled,
        }
    }

    /// Serve `key` from the cache, or load it, populate and return it.
    ///
    /// Loader failures propagate unchanged and are never cached as negative
    /// results; a later create must not be masked by a stale "not found".
    /// The loaded value is returned whether or not the populate succeeded.
    pub async fn get_or_load<T, E, F, Fut>(
        &self,
        region: CacheRegion,
        key: &str,
        loader: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(bytes) = self.backend_get(region, key).await {
            match codec::decode::<T>(&bytes) {
                Ok(value) => {
                    counter!(METRIC_CACHE_HIT, "region" => region.name()).increment(1);
                    debug!(region = region.name(), key, "Cache hit");
                    return Ok(value);
                }
                Err(err) => {
                    // A corrupt entry must never fail a read.
                    warn!(
                        region = region.name(),
                        key,
                        error = %err,
                        "Corrupt cache entry treated as miss"
                    );
                    self.evict_key(region, key).await;
                }
            }
        }

        // A pass-through read on a disabled layer is not a miss.
        if self.enabled {
            counter!(METRIC_CACHE_MISS, "region" => region.name()).increment(1);
            debug!(region = region.name(), key, "Cache miss, loading from content store");
        }

        let value = loader().await?;

        match codec::encode(&value) {
            Ok(bytes) => self.backend_set(region, key, bytes).await,
            Err(err) => {
                warn!(
                    region = region.name(),
                    key,
                    error = %err,
                    "Skipping cache population, value failed to encode"
                );
            }
        }

        Ok(value)
    }

    /// Evict a single key. Best-effort under the fail-open policy.
    pub async fn evict_key(&self, region: CacheRegion, key: &str) {
        if !self.enabled {
            return;
        }
        self.fail_open(region, key, "delete_key", self.backend.delete_key(key))
            .await;
    }

    /// Evict every entry in a region. Best-effort under the fail-open policy.
    pub async fn evict_region(&self, region: CacheRegion) {
        if !self.enabled {
            return;
        }
        let prefix = region.key_prefix();
        self.fail_open(region, &prefix, "delete_prefix", self.backend.delete_prefix(&prefix))
            .await;
    }

    async fn backend_get(&self, region: CacheRegion, key: &str) -> Option<Bytes> {
        if !self.enabled {
            return None;
        }
        self.fail_open(region, key, "get", self.backend.get(key))
            .await
            .flatten()
    }

    async fn backend_set(&self, region: CacheRegion, key: &str, bytes: Bytes) {
        if !self.enabled {
            return;
        }
        let ttl = self.regions.ttl(region);
        self.fail_open(region, key, "set", self.backend.set(key, bytes, ttl))
            .await;
    }

    /// The single fail-open decision point: run a backend call under the
    /// operation timeout and degrade any failure to `None`.
    async fn fail_open<T>(
        &self,
        region: CacheRegion,
        key: &str,
        op: &'static str,
        call: impl Future<Output = Result<T, CacheError>>,
    ) -> Option<T> {
        let outcome = match tokio::time::timeout(self.op_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(CacheError::Timeout(self.op_timeout)),
        };
        match outcome {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    region = region.name(),
                    key,
                    op,
                    error = %err,
                    "Cache backend call failed, failing open"
                );
                counter!(
                    METRIC_CACHE_FAIL_OPEN,
                    "region" => region.name(),
                    "op" => op
                )
                .increment(1);
                None
            }
        }
    }
}
