//! Cache-internal fault taxonomy.

use std::time::Duration;

use thiserror::Error;

/// Failures on the cache path. Always recovered locally via the fail-open
/// policy; never surfaced to a request.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),
    #[error("cache backend timed out after {0:?}")]
    Timeout(Duration),
    #[error("cache codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

impl CacheError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}
