#![allow(dead_code)]

//! Shared fixtures for the integration suites: a call-counting content
//! store, an always-failing cache backend, and service builders.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use gazette::application::pagination::{Page, PageRequest};
use gazette::application::posts::PostService;
use gazette::application::repos::{CreatePostParams, PostsRepo, RepoError};
use gazette::cache::{CacheBackend, CacheConfig, CacheError, CacheLayer, MemoryBackend};
use gazette::domain::posts::{AuthorRef, PostRecord};
use gazette::infra::memstore::MemoryPostsRepo;

/// Content store wrapper that counts how often each read hits the store.
pub struct CountingRepo {
    inner: MemoryPostsRepo,
    pub find_by_id_calls: AtomicUsize,
    pub find_page_calls: AtomicUsize,
    pub search_title_calls: AtomicUsize,
    pub search_text_calls: AtomicUsize,
    pub count_calls: AtomicUsize,
}

impl CountingRepo {
    pub fn new() -> Self {
        Self {
            inner: MemoryPostsRepo::new(),
            find_by_id_calls: AtomicUsize::new(0),
            find_page_calls: AtomicUsize::new(0),
            search_title_calls: AtomicUsize::new(0),
            search_text_calls: AtomicUsize::new(0),
            count_calls: AtomicUsize::new(0),
        }
    }

    pub fn find_by_id_count(&self) -> usize {
        self.find_by_id_calls.load(Ordering::SeqCst)
    }

    pub fn find_page_count(&self) -> usize {
        self.find_page_calls.load(Ordering::SeqCst)
    }

    pub fn search_title_count(&self) -> usize {
        self.search_title_calls.load(Ordering::SeqCst)
    }

    pub fn count_all_count(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostsRepo for CountingRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<PostRecord, RepoError> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<PostRecord>, RepoError> {
        self.find_page_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_page(request).await
    }

    async fn find_by_title_contains(&self, text: &str) -> Result<Vec<PostRecord>, RepoError> {
        self.search_title_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_title_contains(text).await
    }

    async fn find_by_text_contains(&self, text: &str) -> Result<Vec<PostRecord>, RepoError> {
        self.search_text_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_text_contains(text).await
    }

    async fn count_all(&self) -> Result<u64, RepoError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.count_all().await
    }

    async fn save(&self, record: PostRecord) -> Result<PostRecord, RepoError> {
        self.inner.save(record).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), RepoError> {
        self.inner.delete_by_id(id).await
    }
}

/// Backend that errors on every call, exercising the fail-open policy.
pub struct FailingBackend;

#[async_trait]
impl CacheBackend for FailingBackend {
    async fn get(&self, _key: &str) -> Result<Option<Bytes>, CacheError> {
        Err(CacheError::backend("connection refused"))
    }

    async fn set(&self, _key: &str, _value: Bytes, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::backend("connection refused"))
    }

    async fn delete_key(&self, _key: &str) -> Result<(), CacheError> {
        Err(CacheError::backend("connection refused"))
    }

    async fn delete_prefix(&self, _prefix: &str) -> Result<(), CacheError> {
        Err(CacheError::backend("connection refused"))
    }
}

pub fn author() -> AuthorRef {
    AuthorRef {
        id: Uuid::new_v4(),
        username: "ada".to_string(),
        email: "ada@example.com".to_string(),
    }
}

pub fn create_params(title: &str, body: &str) -> CreatePostParams {
    CreatePostParams {
        id: None,
        title: title.to_string(),
        body: body.to_string(),
        image_file: None,
        author: author(),
    }
}

/// Build a service over the given backend, returning the pieces the tests
/// need to observe: the store call counters and the cache layer itself.
pub fn service_over(
    backend: Arc<dyn CacheBackend>,
) -> (PostService, Arc<CountingRepo>, Arc<CacheLayer>) {
    let repo = Arc::new(CountingRepo::new());
    let layer = Arc::new(CacheLayer::new(backend, &CacheConfig::default()));
    let service = PostService::new(repo.clone(), layer.clone());
    (service, repo, layer)
}

pub fn cached_service() -> (PostService, Arc<CountingRepo>, Arc<CacheLayer>) {
    service_over(Arc::new(MemoryBackend::new()))
}
