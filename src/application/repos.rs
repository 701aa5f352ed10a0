//! Repository trait describing the content store adapter.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::application::pagination::{Page, PageRequest};
use crate::domain::posts::{AuthorRef, PostRecord};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("resource not found")]
    NotFound,
    #[error("content store timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Parameters for creating a post.
///
/// `id` is normally generated; callers that already own an identity (imports,
/// replication) may supply one.
#[derive(Debug, Clone)]
pub struct CreatePostParams {
    pub id: Option<Uuid>,
    pub title: String,
    pub body: String,
    pub image_file: Option<String>,
    pub author: AuthorRef,
}

/// Partial update of a post. A field is applied only when present and
/// non-empty; untouched fields keep their stored values.
#[derive(Debug, Clone, Default)]
pub struct UpdatePostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub image_file: Option<String>,
}

impl UpdatePostPatch {
    /// Apply the patch to a stored record, skipping absent or empty fields.
    pub fn apply(&self, record: &mut PostRecord) {
        if let Some(title) = self.title.as_deref()
            && !title.is_empty()
        {
            record.title = title.to_string();
        }
        if let Some(body) = self.body.as_deref()
            && !body.is_empty()
        {
            record.body = body.to_string();
        }
        if let Some(image_file) = self.image_file.as_deref()
            && !image_file.is_empty()
        {
            record.image_file = Some(image_file.to_string());
        }
    }
}

/// The durable, authoritative content store.
///
/// The cache layer treats this as the single source of truth; every cache
/// entry is reconstructable from it at any time.
#[async_trait]
pub trait PostsRepo: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<PostRecord, RepoError>;

    async fn find_page(&self, request: &PageRequest) -> Result<Page<PostRecord>, RepoError>;

    async fn find_by_title_contains(&self, text: &str) -> Result<Vec<PostRecord>, RepoError>;

    async fn find_by_text_contains(&self, text: &str) -> Result<Vec<PostRecord>, RepoError>;

    async fn count_all(&self) -> Result<u64, RepoError>;

    /// Insert or replace a record, returning the stored state.
    async fn save(&self, record: PostRecord) -> Result<PostRecord, RepoError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<(), RepoError>;
}
