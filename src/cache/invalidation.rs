//! Mutation-driven cache invalidation.
//!
//! One declarative table maps each mutation kind to its eviction set, so
//! every mutation path reads from the same source of truth instead of
//! re-enumerating region names inline. After `on_mutation` returns, no prior
//! entry in an affected region is observable (barring a fail-open skip,
//! which is bounded by the region's TTL).

use std::sync::Arc;

use metrics::counter;
use tracing::info;
use uuid::Uuid;

use super::keys;
use super::layer::CacheLayer;
use super::region::CacheRegion;

pub(crate) const METRIC_CACHE_INVALIDATION: &str = "gazette_cache_invalidation_total";

/// Kind of content-store mutation that just committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn name(self) -> &'static str {
        match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        }
    }
}

/// One eviction within an invalidation set.
///
/// `RecordKey` evicts the mutated record's entry in the region; `AllEntries`
/// evicts the whole region. Region-wide eviction is deliberate for
/// parameter-keyed regions (page number, query text are unknown at mutation
/// time): it trades post-write misses for invalidation completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eviction {
    RecordKey(CacheRegion),
    AllEntries(CacheRegion),
}

impl Eviction {
    pub fn region(self) -> CacheRegion {
        match self {
            Eviction::RecordKey(region) | Eviction::AllEntries(region) => region,
        }
    }
}

/// The invalidation table.
///
/// - Create: any aggregate could now include the new record. The record key
///   is evicted too: creates may carry a caller-supplied id and `save` is an
///   upsert, so a cached entry under that id would otherwise survive. For a
///   freshly generated id the eviction is a no-op.
/// - Update: the record entry plus every aggregate whose excerpts or
///   ordering may be stale; the count is unchanged.
/// - Delete: everything the record could appear in, count included.
pub fn invalidation_set(kind: MutationKind) -> &'static [Eviction] {
    use CacheRegion::{PostCount, PostPage, TextSearch, TitleSearch};
    use Eviction::{AllEntries, RecordKey};

    match kind {
        MutationKind::Create => &[
            RecordKey(CacheRegion::Post),
            AllEntries(PostPage),
            AllEntries(TitleSearch),
            AllEntries(TextSearch),
            AllEntries(PostCount),
        ],
        MutationKind::Update => &[
            RecordKey(CacheRegion::Post),
            AllEntries(PostPage),
            AllEntries(TitleSearch),
            AllEntries(TextSearch),
        ],
        MutationKind::Delete => &[
            RecordKey(CacheRegion::Post),
            AllEntries(PostPage),
            AllEntries(TitleSearch),
            AllEntries(TextSearch),
            AllEntries(PostCount),
        ],
    }
}

/// Executes the invalidation set for each mutation.
///
/// Invoked synchronously after the content-store write commits and before
/// the write response is returned. Eviction is best-effort under the
/// fail-open policy.
pub struct InvalidationCoordinator {
    layer: Arc<CacheLayer>,
}

impl InvalidationCoordinator {
    pub fn new(layer: Arc<CacheLayer>) -> Self {
        Self { layer }
    }

    pub async fn on_mutation(&self, kind: MutationKind, record_id: Uuid) {
        let set = invalidation_set(kind);
        for eviction in set {
            match eviction {
                Eviction::RecordKey(region) => {
                    self.layer.evict_key(*region, &keys::post_key(record_id)).await;
                }
                Eviction::AllEntries(region) => {
                    self.layer.evict_region(*region).await;
                }
            }
        }

        info!(
            mutation = kind.name(),
            record_id = %record_id,
            evicted_regions = set.len(),
            "Cache invalidation complete"
        );
        counter!(METRIC_CACHE_INVALIDATION, "mutation" => kind.name()).increment(1);
    }
}
