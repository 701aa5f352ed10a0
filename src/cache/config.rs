//! Cache configuration.
//!
//! Region TTLs and the backend operation timeout, loaded from `gazette.toml`.

use std::time::Duration;

use serde::Deserialize;

const DEFAULT_POST_TTL_SECS: u64 = 30 * 60;
const DEFAULT_PAGE_TTL_SECS: u64 = 5 * 60;
const DEFAULT_SEARCH_TTL_SECS: u64 = 5 * 60;
const DEFAULT_COUNT_TTL_SECS: u64 = 5 * 60;
const DEFAULT_OP_TIMEOUT_MS: u64 = 250;

/// Cache configuration from `gazette.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the cache. When off, every read is a store pass-through and
    /// eviction is a no-op.
    pub enabled: bool,
    /// TTL for single-record entries.
    pub post_ttl_secs: u64,
    /// TTL for paginated-list entries.
    pub page_ttl_secs: u64,
    /// TTL for search-result entries.
    pub search_ttl_secs: u64,
    /// TTL for count/aggregate entries.
    pub count_ttl_secs: u64,
    /// Bound on every backend call; expiry is treated as a backend failure.
    pub op_timeout_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            post_ttl_secs: DEFAULT_POST_TTL_SECS,
            page_ttl_secs: DEFAULT_PAGE_TTL_SECS,
            search_ttl_secs: DEFAULT_SEARCH_TTL_SECS,
            count_ttl_secs: DEFAULT_COUNT_TTL_SECS,
            op_timeout_ms: DEFAULT_OP_TIMEOUT_MS,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            post_ttl_secs: settings.post_ttl_secs,
            page_ttl_secs: settings.page_ttl_secs,
            search_ttl_secs: settings.search_ttl_secs,
            count_ttl_secs: settings.count_ttl_secs,
            op_timeout_ms: settings.op_timeout_ms,
        }
    }
}

impl CacheConfig {
    pub fn post_ttl(&self) -> Duration {
        Duration::from_secs(self.post_ttl_secs)
    }

    pub fn page_ttl(&self) -> Duration {
        Duration::from_secs(self.page_ttl_secs)
    }

    pub fn search_ttl(&self) -> Duration {
        Duration::from_secs(self.search_ttl_secs)
    }

    pub fn count_ttl(&self) -> Duration {
        Duration::from_secs(self.count_ttl_secs)
    }

    pub fn op_timeout(&self) -> Duration {
        Duration::from_millis(self.op_timeout_ms)
    }
}
