//! User-visible service errors.
//!
//! Only `NotFound` and `StoreUnavailable` ever reach callers; cache faults
//! are recovered inside the cache layer and never cross this boundary.

use thiserror::Error;

use crate::application::repos::RepoError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("resource not found")]
    NotFound,
    #[error("content store unavailable")]
    StoreUnavailable(#[source] RepoError),
}

impl From<RepoError> for ServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound,
            other => Self::StoreUnavailable(other),
        }
    }
}
