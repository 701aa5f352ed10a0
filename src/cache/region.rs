//! Cache regions and their TTL policy.
//!
//! Every cache key belongs to exactly one region; a region is a named TTL
//! policy. The set is static and the registry is built once at startup, then
//! passed by reference to every component that needs it.

use std::time::Duration;

use super::config::CacheConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheRegion {
    /// Single-record entries, keyed by post id.
    Post,
    /// Paginated-list entries, keyed by page index, size and sort.
    PostPage,
    /// Title-search results, keyed by normalized query.
    TitleSearch,
    /// Full-text-search results, keyed by normalized query.
    TextSearch,
    /// Count/aggregate entries.
    PostCount,
}

impl CacheRegion {
    pub const ALL: [CacheRegion; 5] = [
        CacheRegion::Post,
        CacheRegion::PostPage,
        CacheRegion::TitleSearch,
        CacheRegion::TextSearch,
        CacheRegion::PostCount,
    ];

    /// Region name, used as the key namespace.
    pub fn name(self) -> &'static str {
        match self {
            CacheRegion::Post => "post",
            CacheRegion::PostPage => "post-page",
            CacheRegion::TitleSearch => "post-search-title",
            CacheRegion::TextSearch => "post-search-text",
            CacheRegion::PostCount => "post-count",
        }
    }

    /// Prefix matching every key in this region and no key of any other.
    pub fn key_prefix(self) -> String {
        format!("{}:", self.name())
    }
}

/// Static region → TTL table, built once from configuration.
#[derive(Debug, Clone)]
pub struct RegionRegistry {
    post_ttl: Duration,
    page_ttl: Duration,
    search_ttl: Duration,
    count_ttl: Duration,
}

impl RegionRegistry {
    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            post_ttl: config.post_ttl(),
            page_ttl: config.page_ttl(),
            search_ttl: config.search_ttl(),
            count_ttl: config.count_ttl(),
        }
    }

    pub fn ttl(&self, region: CacheRegion) -> Duration {
        match region {
            CacheRegion::Post => self.post_ttl,
            CacheRegion::PostPage => self.page_ttl,
            CacheRegion::TitleSearch | CacheRegion::TextSearch => self.search_ttl,
            CacheRegion::PostCount => self.count_ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_names_are_distinct() {
        for (i, a) in CacheRegion::ALL.iter().enumerate() {
            for b in &CacheRegion::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn no_region_prefix_shadows_another() {
        // `post:` must not match `post-page:...` keys, and so on.
        for a in CacheRegion::ALL {
            for b in CacheRegion::ALL {
                if a != b {
                    assert!(!b.key_prefix().starts_with(&a.key_prefix()));
                }
            }
        }
    }

    #[test]
    fn registry_maps_regions_to_configured_ttls() {
        let config = CacheConfig::default();
        let registry = RegionRegistry::from_config(&config);
        assert_eq!(registry.ttl(CacheRegion::Post), Duration::from_secs(1800));
        assert_eq!(registry.ttl(CacheRegion::PostPage), Duration::from_secs(300));
        assert_eq!(registry.ttl(CacheRegion::TitleSearch), Duration::from_secs(300));
        assert_eq!(registry.ttl(CacheRegion::TextSearch), Duration::from_secs(300));
        assert_eq!(registry.ttl(CacheRegion::PostCount), Duration::from_secs(300));
    }
}
