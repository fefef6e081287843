use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::ClientOptions,
    Client, Collection, Database,
};
use tracing::{info, warn};

use super::models::{CourseDocument, UserProgress};
use super::store::{CourseStore, StoreError};
use crate::catalog::{AgeGroup, Course};
use crate::config::DatabaseConfig;

pub const COURSES_COLLECTION: &str = "courses";
pub const PROGRESS_COLLECTION: &str = "user_progress";

const APP_NAME: &str = "edusign-api";

/// MongoDB-backed course store.
///
/// The driver connects lazily, so construction only fails on a malformed
/// connection string; reachability is discovered by `ping` or the first query.
#[derive(Clone)]
pub struct MongoCourseStore {
    client: Client,
    database: Database,
}

impl MongoCourseStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(config.mongodb_url.as_str())
            .await
            .map_err(|e| StoreError::InvalidUrl(e.to_string()))?;

        let timeout = Duration::from_millis(config.server_selection_timeout_ms);
        options.app_name = Some(APP_NAME.to_string());
        options.server_selection_timeout = Some(timeout);
        options.connect_timeout = Some(timeout);

        let client = Client::with_options(options)?;
        let database = client.database(&config.database_name);

        info!("Created MongoDB client for database: {}", config.database_name);
        Ok(Self { client, database })
    }

    fn courses(&self) -> Collection<CourseDocument> {
        self.database.collection(COURSES_COLLECTION)
    }

    /// Untyped view of the courses collection, so one unreadable document
    /// does not fail a whole query
    fn raw_courses(&self) -> Collection<Document> {
        self.database.collection(COURSES_COLLECTION)
    }

    fn progress(&self) -> Collection<UserProgress> {
        self.database.collection(PROGRESS_COLLECTION)
    }
}

#[async_trait]
impl CourseStore for MongoCourseStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    async fn active_courses(&self, age_group: AgeGroup) -> Result<Vec<Course>, StoreError> {
        let mut cursor = self
            .raw_courses()
            .find(doc! { "age_group": age_group.as_str(), "is_active": true })
            .sort(doc! { "created_at": 1 })
            .await?;

        let mut courses = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            if let Some(course) = decode_course(document) {
                courses.push(course);
            }
        }
        // Mixed date representations do not sort chronologically in MongoDB
        courses.sort_by_key(|c| c.created_at);
        Ok(courses)
    }

    async fn find_course(&self, course_id: &str) -> Result<Option<Course>, StoreError> {
        let document = self
            .raw_courses()
            .find_one(doc! { "id": course_id, "is_active": true })
            .await?;

        Ok(document.and_then(decode_course))
    }

    async fn count_courses(&self) -> Result<u64, StoreError> {
        Ok(self.courses().count_documents(doc! {}).await?)
    }

    async fn insert_courses(&self, courses: &[Course]) -> Result<usize, StoreError> {
        if courses.is_empty() {
            return Ok(0);
        }
        let documents: Vec<CourseDocument> = courses.iter().map(CourseDocument::from).collect();
        let result = self.courses().insert_many(documents).await?;
        Ok(result.inserted_ids.len())
    }

    async fn completed_course_ids(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        let record = self
            .progress()
            .find_one(doc! { "user_id": user_id })
            .await?;

        Ok(record.map(|p| p.courses_completed).unwrap_or_default())
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        info!("Closed MongoDB client");
    }
}

/// Decode one stored course, logging and skipping documents that do not fit
fn decode_course(document: Document) -> Option<Course> {
    let id = document.get_str("id").unwrap_or("<missing id>").to_string();
    match mongodb::bson::from_document::<CourseDocument>(document) {
        Ok(stored) => Some(stored.into()),
        Err(e) => {
            warn!("Skipping unreadable course document {}: {}", id, e);
            None
        }
    }
}
