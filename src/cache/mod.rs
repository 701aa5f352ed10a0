//! Gazette cache system.
//!
//! The derived cache in front of the content store. Owns:
//!
//! - **Regions** ([`CacheRegion`], [`RegionRegistry`]): the static set of
//!   named TTL policies every key belongs to.
//! - **Keys** ([`keys`]): deterministic key construction per region.
//! - **Layer** ([`CacheLayer`]): the get-or-populate read path.
//! - **Invalidation** ([`InvalidationCoordinator`]): the declarative
//!   mutation → eviction table executed after every store write.
//! - **Fail-open policy**: every backend call is wrapped so a backend fault
//!   degrades to a miss or no-op, never to a request failure.
//!
//! ## Configuration
//!
//! Behavior is controlled via `gazette.toml`:
//!
//! ```toml
//! [cache]
//! enabled = true
//! post_ttl_secs = 1800
//! page_ttl_secs = 300
//! # ... see config.rs for all options
//! ```

mod backend;
mod codec;
mod config;
mod error;
mod invalidation;
pub mod keys;
mod layer;
mod lock;
mod region;

pub use backend::{CacheBackend, MemoryBackend};
pub use config::CacheConfig;
pub use error::CacheError;
pub use invalidation::{Eviction, InvalidationCoordinator, MutationKind, invalidation_set};
pub use layer::CacheLayer;
pub use region::{CacheRegion, RegionRegistry};
