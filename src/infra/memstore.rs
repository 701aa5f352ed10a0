//! In-memory content store adapter.
//!
//! Implements [`PostsRepo`] over a `RwLock`ed map. Used by the test suites
//! and by single-node deployments that do not need durable storage; the
//! query semantics (substring search, offset pagination) mirror what a SQL
//! adapter would provide.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::pagination::{Page, PageRequest, SortDirection, SortField};
use crate::application::repos::{PostsRepo, RepoError};
use crate::domain::posts::PostRecord;

const SOURCE: &str = "infra::memstore";

pub struct MemoryPostsRepo {
    posts: RwLock<HashMap<Uuid, PostRecord>>,
}

impl MemoryPostsRepo {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self, op: &'static str) -> std::sync::RwLockReadGuard<'_, HashMap<Uuid, PostRecord>> {
        match self.posts.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!(
                    op,
                    target_module = SOURCE,
                    result = "poisoned_recovered",
                    "Recovered from poisoned store lock"
                );
                poisoned.into_inner()
            }
        }
    }

    fn write(&self, op: &'static str) -> std::sync::RwLockWriteGuard<'_, HashMap<Uuid, PostRecord>> {
        match self.posts.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!(
                    op,
                    target_module = SOURCE,
                    result = "poisoned_recovered",
                    "Recovered from poisoned store lock"
                );
                poisoned.into_inner()
            }
        }
    }

    fn sorted(&self, request: &PageRequest) -> Vec<PostRecord> {
        let mut records: Vec<PostRecord> = self.read("sorted").values().cloned().collect();
        records.sort_by(|a, b| {
            let ordering = match request.sort().field {
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                SortField::Title => a.title.cmp(&b.title),
            };
            // Tie-break on id so pagination is stable under equal sort keys.
            let ordering = ordering.then_with(|| a.id.cmp(&b.id));
            match request.sort().direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        records
    }
}

impl Default for MemoryPostsRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostsRepo for MemoryPostsRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<PostRecord, RepoError> {
        self.read("find_by_id")
            .get(&id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<PostRecord>, RepoError> {
        let records = self.sorted(request);
        let total_elements = records.len() as u64;
        let items: Vec<PostRecord> = records
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size() as usize)
            .collect();
        Ok(Page::new(items, request.page(), request.size(), total_elements))
    }

    async fn find_by_title_contains(&self, text: &str) -> Result<Vec<PostRecord>, RepoError> {
        let needle = text.trim().to_lowercase();
        Ok(self
            .read("find_by_title_contains")
            .values()
            .filter(|record| record.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_by_text_contains(&self, text: &str) -> Result<Vec<PostRecord>, RepoError> {
        let needle = text.trim().to_lowercase();
        Ok(self
            .read("find_by_text_contains")
            .values()
            .filter(|record| {
                record.title.to_lowercase().contains(&needle)
                    || record.body.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn count_all(&self) -> Result<u64, RepoError> {
        Ok(self.read("count_all").len() as u64)
    }

    async fn save(&self, record: PostRecord) -> Result<PostRecord, RepoError> {
        self.write("save").insert(record.id, record.clone());
        Ok(record)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), RepoError> {
        match self.write("delete_by_id").remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}
