//! Deterministic cache key construction.
//!
//! Two requests with identical logical parameters must produce byte-identical
//! keys; parameter order is fixed here, never caller-supplied.

use uuid::Uuid;

use crate::application::pagination::PageRequest;

use super::region::CacheRegion;

/// Key for a single post: `post:{id}`.
pub fn post_key(id: Uuid) -> String {
    format!("{}:{id}", CacheRegion::Post.name())
}

/// Key for one page of posts: `post-page:{page}:{size}:{sort}`.
pub fn page_key(request: &PageRequest) -> String {
    format!(
        "{}:{}:{}:{}",
        CacheRegion::PostPage.name(),
        request.page(),
        request.size(),
        request.sort().as_key()
    )
}

/// Key for a title search: `post-search-title:{normalized query}`.
pub fn title_search_key(query: &str) -> String {
    format!(
        "{}:{}",
        CacheRegion::TitleSearch.name(),
        normalize_query(query)
    )
}

/// Key for a full-text search: `post-search-text:{normalized query}`.
pub fn text_search_key(query: &str) -> String {
    format!(
        "{}:{}",
        CacheRegion::TextSearch.name(),
        normalize_query(query)
    )
}

/// Key for the post count: `post-count:all`.
pub fn count_key() -> String {
    format!("{}:all", CacheRegion::PostCount.name())
}

/// Normalize a query for key construction: trim, lowercase, collapse
/// internal whitespace runs to a single space.
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use crate::application::pagination::{SortDirection, SortField, SortSpec};

    use super::*;

    #[test]
    fn post_key_is_deterministic() {
        let id = Uuid::nil();
        assert_eq!(post_key(id), post_key(id));
        assert_eq!(post_key(id), format!("post:{id}"));
    }

    #[test]
    fn page_key_encodes_all_parameters() {
        let request = PageRequest::new(2, 20, SortSpec::created_desc());
        assert_eq!(page_key(&request), "post-page:2:20:created_at.desc");

        let other = PageRequest::new(2, 20, SortSpec::new(SortField::Title, SortDirection::Asc));
        assert_ne!(page_key(&request), page_key(&other));
    }

    #[test]
    fn equivalent_queries_share_a_key() {
        assert_eq!(title_search_key("  Rust Caching "), title_search_key("rust   caching"));
        assert_eq!(text_search_key("HELLO"), text_search_key("hello"));
    }

    #[test]
    fn distinct_queries_get_distinct_keys() {
        assert_ne!(title_search_key("rust"), title_search_key("tokio"));
        // Same query in different search regions must not collide.
        assert_ne!(title_search_key("rust"), text_search_key("rust"));
    }

    #[test]
    fn keys_carry_their_region_prefix() {
        assert!(post_key(Uuid::nil()).starts_with(&CacheRegion::Post.key_prefix()));
        assert!(count_key().starts_with(&CacheRegion::PostCount.key_prefix()));
        let request = PageRequest::default();
        assert!(page_key(&request).starts_with(&CacheRegion::PostPage.key_prefix()));
    }

    #[test]
    fn normalization_rules() {
        assert_eq!(normalize_query("  Foo\t Bar  "), "foo bar");
        assert_eq!(normalize_query(""), "");
    }
}
