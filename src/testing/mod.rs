use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::catalog::{AgeGroup, Course};
use crate::database::{CourseStore, StoreError};

/// In-memory `CourseStore` for unit tests. Applies the same filter and
/// ordering as the MongoDB store and can be switched offline.
#[derive(Default)]
pub struct MemoryCourseStore {
    courses: Mutex<Vec<Course>>,
    progress: Mutex<HashMap<String, Vec<String>>>,
    offline: AtomicBool,
}

impl MemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_courses(courses: Vec<Course>) -> Self {
        let store = Self::new();
        *store.courses.lock().unwrap() = courses;
        store
    }

    /// A store whose every call fails as if the server were down
    pub fn unavailable() -> Self {
        let store = Self::new();
        store.set_available(false);
        store
    }

    pub fn with_progress(self, user_id: &str, completed: &[&str]) -> Self {
        self.progress.lock().unwrap().insert(
            user_id.to_string(),
            completed.iter().map(|id| id.to_string()).collect(),
        );
        self
    }

    pub fn set_available(&self, available: bool) {
        self.offline.store(!available, Ordering::SeqCst);
    }

    pub fn course_count(&self) -> usize {
        self.courses.lock().unwrap().len()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CourseStore for MemoryCourseStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }

    async fn active_courses(&self, age_group: AgeGroup) -> Result<Vec<Course>, StoreError> {
        self.check_online()?;
        let mut matching: Vec<Course> = self
            .courses
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.age_group == age_group && c.is_active)
            .cloned()
            .collect();
        matching.sort_by_key(|c| c.created_at);
        Ok(matching)
    }

    async fn find_course(&self, course_id: &str) -> Result<Option<Course>, StoreError> {
        self.check_online()?;
        Ok(self
            .courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == course_id && c.is_active)
            .cloned())
    }

    async fn count_courses(&self) -> Result<u64, StoreError> {
        self.check_online()?;
        Ok(self.course_count() as u64)
    }

    async fn insert_courses(&self, courses: &[Course]) -> Result<usize, StoreError> {
        self.check_online()?;
        self.courses.lock().unwrap().extend_from_slice(courses);
        Ok(courses.len())
    }

    async fn completed_course_ids(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        self.check_online()?;
        Ok(self
            .progress
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_store_fails_every_call() {
        let store = MemoryCourseStore::new();
        assert!(store.ping().await.is_ok());

        store.set_available(false);
        assert!(store.ping().await.is_err());
        assert!(store.count_courses().await.is_err());
        assert!(store.find_course("basic-hands-2-5").await.is_err());
        assert!(store.completed_course_ids("anyone").await.is_err());
    }
}
