//! Domain records mirrored from persistent storage, plus the read-optimized
//! projections served to callers.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Maximum number of characters kept in a list-view excerpt.
const EXCERPT_MAX_CHARS: usize = 150;

const UPLOADS_PREFIX: &str = "/uploads/";

/// Owning author of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

/// A blog post as stored by the content store.
///
/// The cache layer only reads and serializes snapshots of this record; it is
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    /// Stored image file name, not a public URL.
    pub image_file: Option<String>,
    pub author: AuthorRef,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub deleted: bool,
}

/// Full read projection of a post, derived deterministically from
/// [`PostRecord`] at serialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetail {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub deleted: bool,
}

impl PostDetail {
    pub fn from_record(record: &PostRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            body: record.body.clone(),
            image_url: public_image_url(record.image_file.as_deref()),
            author_id: record.author.id,
            author_name: record.author.username.clone(),
            author_email: record.author.email.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
            deleted: record.deleted,
        }
    }
}

/// Reduced projection for list views: truncated body, author display name,
/// resolved public image URL. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub image_url: Option<String>,
    pub author_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl PostSummary {
    pub fn from_record(record: &PostRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            excerpt: excerpt_of(&record.body),
            image_url: public_image_url(record.image_file.as_deref()),
            author_name: record.author.username.clone(),
            created_at: record.created_at,
        }
    }
}

/// Truncate a body to the excerpt length on a character boundary.
fn excerpt_of(body: &str) -> String {
    if body.chars().count() <= EXCERPT_MAX_CHARS {
        return body.to_string();
    }
    let truncated: String = body.chars().take(EXCERPT_MAX_CHARS).collect();
    format!("{truncated}...")
}

/// Resolve a stored image file name into a public URL.
///
/// Blank values resolve to `None`; values already under the uploads prefix
/// pass through unchanged.
fn public_image_url(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    if value.starts_with(UPLOADS_PREFIX) {
        Some(value.to_string())
    } else {
        Some(format!("{UPLOADS_PREFIX}{value}"))
    }
}
