//! Post service: the surface exposed to the HTTP layer.
//!
//! Reads go through [`CacheLayer::get_or_load`]; writes commit to the
//! content store first and only then run the invalidation coordinator, so a
//! concurrent reader can never repopulate the cache with a state older than
//! the committed write.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::application::error::ServiceError;
use crate::application::pagination::{Page, PageRequest};
use crate::application::repos::{CreatePostParams, PostsRepo, UpdatePostPatch};
use crate::cache::{CacheLayer, CacheRegion, InvalidationCoordinator, MutationKind, keys};
use crate::domain::posts::{PostDetail, PostRecord, PostSummary};

pub struct PostService {
    repo: Arc<dyn PostsRepo>,
    cache: Arc<CacheLayer>,
    invalidation: InvalidationCoordinator,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostsRepo>, cache: Arc<CacheLayer>) -> Self {
        let invalidation = InvalidationCoordinator::new(cache.clone());
        Self {
            repo,
            cache,
            invalidation,
        }
    }

    /// Fetch one post by id.
    ///
    /// `NotFound` propagates uncached, so a subsequent create under the same
    /// id is immediately visible.
    pub async fn get_post(&self, id: Uuid) -> Result<PostDetail, ServiceError> {
        let key = keys::post_key(id);
        let repo = &self.repo;
        self.cache
            .get_or_load(CacheRegion::Post, &key, || async move {
                let record = repo.find_by_id(id).await?;
                Ok(PostDetail::from_record(&record))
            })
            .await
    }

    /// Fetch one page of post summaries.
    pub async fn get_page(&self, request: PageRequest) -> Result<Page<PostSummary>, ServiceError> {
        let key = keys::page_key(&request);
        let repo = &self.repo;
        self.cache
            .get_or_load(CacheRegion::PostPage, &key, || async move {
                let page = repo.find_page(&request).await?;
                Ok(page.map(|record| PostSummary::from_record(&record)))
            })
            .await
    }

    /// Search posts whose title contains `query`.
    pub async fn search_by_title(&self, query: &str) -> Result<Vec<PostDetail>, ServiceError> {
        let key = keys::title_search_key(query);
        let repo = &self.repo;
        self.cache
            .get_or_load(CacheRegion::TitleSearch, &key, || async move {
                let records = repo.find_by_title_contains(query).await?;
                Ok(records.iter().map(PostDetail::from_record).collect())
            })
            .await
    }

    /// Search posts whose title or body contains `query`.
    pub async fn search_by_text(&self, query: &str) -> Result<Vec<PostDetail>, ServiceError> {
        let key = keys::text_search_key(query);
        let repo = &self.repo;
        self.cache
            .get_or_load(CacheRegion::TextSearch, &key, || async move {
                let records = repo.find_by_text_contains(query).await?;
                Ok(records.iter().map(PostDetail::from_record).collect())
            })
            .await
    }

    /// Total number of posts.
    pub async fn count_posts(&self) -> Result<u64, ServiceError> {
        let key = keys::count_key();
        let repo = &self.repo;
        self.cache
            .get_or_load(CacheRegion::PostCount, &key, || async move {
                Ok(repo.count_all().await?)
            })
            .await
    }

    pub async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, ServiceError> {
        let now = OffsetDateTime::now_utc();
        let record = PostRecord {
            id: params.id.unwrap_or_else(Uuid::new_v4),
            title: params.title,
            body: params.body,
            image_file: params.image_file,
            author: params.author,
            created_at: now,
            updated_at: now,
            deleted: false,
        };

        let saved = self.repo.save(record).await?;
        self.invalidation
            .on_mutation(MutationKind::Create, saved.id)
            .await;
        info!(post_id = %saved.id, "Post created");
        Ok(saved)
    }

    pub async fn update_post(
        &self,
        id: Uuid,
        patch: UpdatePostPatch,
    ) -> Result<PostRecord, ServiceError> {
        let mut record = self.repo.find_by_id(id).await?;
        patch.apply(&mut record);
        record.updated_at = OffsetDateTime::now_utc();

        let saved = self.repo.save(record).await?;
        self.invalidation
            .on_mutation(MutationKind::Update, saved.id)
            .await;
        info!(post_id = %saved.id, "Post updated");
        Ok(saved)
    }

    pub async fn delete_post(&self, id: Uuid) -> Result<(), ServiceError> {
        // Surface NotFound before touching the store or the cache.
        self.repo.find_by_id(id).await?;
        self.repo.delete_by_id(id).await?;
        self.invalidation
            .on_mutation(MutationKind::Delete, id)
            .await;
        info!(post_id = %id, "Post deleted");
        Ok(())
    }
}
