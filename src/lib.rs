//! Gazette content service.
//!
//! Serves single blog posts, paginated lists, searches and counts through a
//! TTL'd cache backend while keeping that cache coherent with the
//! authoritative content store on every mutation. The store and the cache
//! backend are external collaborators behind the [`application::repos::PostsRepo`]
//! and [`cache::CacheBackend`] traits; this crate owns key construction,
//! region TTL policy, serialization, invalidation and the fail-open policy.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
