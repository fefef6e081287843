use async_trait::async_trait;
use thiserror::Error;

use crate::catalog::{AgeGroup, Course};

/// Errors from a course store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid connection string: {0}")]
    InvalidUrl(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

/// Persistence seam for the course catalog and user progress.
///
/// Every read is best effort from the caller's point of view: the retrieval
/// flow treats any `Err` as "store unavailable" and falls back to sample data.
#[async_trait]
pub trait CourseStore: Send + Sync + 'static {
    /// Round-trip liveness probe
    async fn ping(&self) -> Result<(), StoreError>;

    /// Active courses for one age group, oldest first
    async fn active_courses(&self, age_group: AgeGroup) -> Result<Vec<Course>, StoreError>;

    /// One active course by its public id
    async fn find_course(&self, course_id: &str) -> Result<Option<Course>, StoreError>;

    async fn count_courses(&self) -> Result<u64, StoreError>;

    /// Insert courses, returning how many were written
    async fn insert_courses(&self, courses: &[Course]) -> Result<usize, StoreError>;

    /// Course ids the user has completed; empty when no progress is recorded
    async fn completed_course_ids(&self, user_id: &str) -> Result<Vec<String>, StoreError>;

    /// Release connections. Called once at shutdown.
    async fn close(&self) {}
}
