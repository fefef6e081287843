use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::{
    find_sample_course, sample_courses, AgeGroup, Course, CourseListing, CourseView,
};
use crate::config::ApiConfig;
use crate::database::CourseStore;

#[derive(Debug, thiserror::Error)]
pub enum CourseError {
    #[error("Age must be between {min} and {max}")]
    AgeOutOfRange { age: i64, min: u32, max: u32 },

    #[error("age {0} does not map to an age group")]
    Unclassifiable(u32),

    #[error("Course not found")]
    NotFound(String),
}

/// Answers "which courses should this user see".
///
/// Store trouble never reaches the caller: a failed or empty query falls back
/// to the sample catalog, and a failed progress lookup marks nothing completed.
pub struct CourseService {
    store: Option<Arc<dyn CourseStore>>,
    min_age: u32,
    max_age: u32,
}

impl CourseService {
    pub fn new(store: Option<Arc<dyn CourseStore>>, api: &ApiConfig) -> Self {
        Self {
            store,
            min_age: api.min_age,
            max_age: api.max_age,
        }
    }

    pub async fn get_courses(
        &self,
        age: i64,
        user_id: Option<&str>,
    ) -> Result<CourseListing, CourseError> {
        let age = self.validate_age(age)?;
        let age_group = AgeGroup::for_age(age).ok_or(CourseError::Unclassifiable(age))?;

        let courses = match self.stored_courses(age_group).await {
            Some(courses) => courses,
            None => {
                info!("Using sample data for age group {}", age_group);
                sample_courses(age_group)
            }
        };

        let completed = match user_id {
            Some(user_id) => self.completed_ids(user_id).await,
            None => HashSet::new(),
        };

        let views = courses
            .into_iter()
            .map(|course| CourseView {
                is_completed: completed.contains(&course.id),
                course,
            })
            .collect();

        Ok(CourseListing::new(age_group, views))
    }

    /// One course by id, from the store when it has it, else from the
    /// sample catalog
    pub async fn get_course(
        &self,
        course_id: &str,
        user_id: Option<&str>,
    ) -> Result<CourseView, CourseError> {
        let course = match self.stored_course(course_id).await {
            Some(course) => course,
            None => find_sample_course(course_id)
                .ok_or_else(|| CourseError::NotFound(course_id.to_string()))?,
        };

        let is_completed = match user_id {
            Some(user_id) => self.completed_ids(user_id).await.contains(&course.id),
            None => false,
        };

        Ok(CourseView { course, is_completed })
    }

    fn validate_age(&self, age: i64) -> Result<u32, CourseError> {
        let out_of_range = || CourseError::AgeOutOfRange {
            age,
            min: self.min_age,
            max: self.max_age,
        };
        let age = u32::try_from(age).map_err(|_| out_of_range())?;
        if age < self.min_age || age > self.max_age {
            return Err(out_of_range());
        }
        Ok(age)
    }

    /// Presentable active courses from the store, or `None` to fall back
    async fn stored_courses(&self, age_group: AgeGroup) -> Option<Vec<Course>> {
        let store = self.store.as_ref()?;

        let courses = match store.active_courses(age_group).await {
            Ok(courses) => courses,
            Err(e) => {
                warn!("Course store query failed: {}", e);
                return None;
            }
        };

        let total = courses.len();
        let courses: Vec<Course> = courses
            .into_iter()
            .filter(|c| c.is_active && c.age_group == age_group && c.is_presentable())
            .collect();
        if courses.len() < total {
            warn!(
                "Dropped {} malformed course records for age group {}",
                total - courses.len(),
                age_group
            );
        }

        (!courses.is_empty()).then_some(courses)
    }

    async fn stored_course(&self, course_id: &str) -> Option<Course> {
        let store = self.store.as_ref()?;
        match store.find_course(course_id).await {
            Ok(course) => course.filter(Course::is_presentable),
            Err(e) => {
                warn!("Course store lookup failed: {}", e);
                None
            }
        }
    }

    async fn completed_ids(&self, user_id: &str) -> HashSet<String> {
        let Some(store) = self.store.as_ref() else {
            return HashSet::new();
        };
        match store.completed_course_ids(user_id).await {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                debug!("No progress available for user {}: {}", user_id, e);
                HashSet::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Difficulty, MIN_CLASSIFIED_AGE};
    use crate::testing::MemoryCourseStore;
    use chrono::{Duration, Utc};

    fn api_config() -> ApiConfig {
        ApiConfig {
            port: 0,
            min_age: 2,
            max_age: 120,
            enable_request_logging: false,
        }
    }

    fn service(store: MemoryCourseStore) -> CourseService {
        CourseService::new(Some(Arc::new(store)), &api_config())
    }

    fn stored(id: &str, age_group: AgeGroup, minutes_ago: i64) -> Course {
        let created = Utc::now() - Duration::minutes(minutes_ago);
        Course {
            id: id.to_string(),
            title: format!("Stored {}", id),
            description: "From the store".to_string(),
            thumbnail: "https://cdn.example.com/t.png".to_string(),
            age_group,
            difficulty: Difficulty::Intermediate,
            duration: "10 min".to_string(),
            lessons_count: 4,
            is_active: true,
            created_at: created,
            updated_at: created,
        }
    }

    fn ids(listing: &CourseListing) -> Vec<&str> {
        listing.courses.iter().map(|v| v.course.id.as_str()).collect()
    }

    #[tokio::test]
    async fn empty_store_falls_back_to_sample() {
        let listing = service(MemoryCourseStore::new()).get_courses(3, None).await.unwrap();

        assert_eq!(listing.age_group, AgeGroup::Preschool);
        assert_eq!(listing.total_courses, 3);
        assert_eq!(ids(&listing), vec!["basic-hands-2-5", "family-signs-2-5", "colors-shapes-2-5"]);
        assert!(listing.courses.iter().all(|v| !v.is_completed));
    }

    #[tokio::test]
    async fn unavailable_store_falls_back_to_sample() {
        let listing = service(MemoryCourseStore::unavailable())
            .get_courses(3, Some("demo-user-id"))
            .await
            .unwrap();

        assert_eq!(listing.total_courses, 3);
        assert!(listing.courses.iter().all(|v| !v.is_completed));
    }

    #[tokio::test]
    async fn missing_store_falls_back_to_sample() {
        let service = CourseService::new(None, &api_config());
        let listing = service.get_courses(40, None).await.unwrap();

        assert_eq!(listing.age_group, AgeGroup::Adult);
        assert_eq!(ids(&listing), vec!["professional-asl-16", "interpreter-prep-16"]);
    }

    #[tokio::test]
    async fn stored_courses_win_and_are_ordered_oldest_first() {
        let store = MemoryCourseStore::with_courses(vec![
            stored("newer", AgeGroup::Primary, 1),
            stored("older", AgeGroup::Primary, 30),
            stored("other-group", AgeGroup::Teen, 60),
        ]);
        let listing = service(store).get_courses(8, None).await.unwrap();

        assert_eq!(listing.age_group, AgeGroup::Primary);
        assert_eq!(ids(&listing), vec!["older", "newer"]);
        assert_eq!(listing.total_courses, 2);
    }

    #[tokio::test]
    async fn inactive_and_malformed_records_are_ignored() {
        let mut inactive = stored("inactive", AgeGroup::Teen, 5);
        inactive.is_active = false;
        let mut untitled = stored("untitled", AgeGroup::Teen, 5);
        untitled.title = String::new();

        let store = MemoryCourseStore::with_courses(vec![inactive, untitled]);
        let listing = service(store).get_courses(12, None).await.unwrap();

        // nothing usable in the store, so the sample list is served
        assert_eq!(listing.total_courses, 3);
        assert!(ids(&listing).contains(&"advanced-grammar-11-15"));
    }

    #[tokio::test]
    async fn rejects_out_of_range_ages() {
        let service = service(MemoryCourseStore::new());

        for age in [200, 121, 1, 0, -4] {
            let result = service.get_courses(age, None).await;
            assert!(
                matches!(result, Err(CourseError::AgeOutOfRange { .. })),
                "age {} should be rejected",
                age
            );
        }
    }

    #[tokio::test]
    async fn ages_below_classifier_floor_are_unexpected() {
        let config = ApiConfig { min_age: 0, ..api_config() };
        let service = CourseService::new(None, &config);

        let result = service.get_courses(i64::from(MIN_CLASSIFIED_AGE) - 1, None).await;
        assert!(matches!(result, Err(CourseError::Unclassifiable(1))));
    }

    #[tokio::test]
    async fn progress_marks_completed_courses() {
        let store = MemoryCourseStore::new()
            .with_progress("user-42", &["family-signs-2-5", "unknown-course"]);
        let listing = service(store).get_courses(4, Some("user-42")).await.unwrap();

        let completed: Vec<&str> = listing
            .courses
            .iter()
            .filter(|v| v.is_completed)
            .map(|v| v.course.id.as_str())
            .collect();
        assert_eq!(completed, vec!["family-signs-2-5"]);
    }

    #[tokio::test]
    async fn single_course_prefers_the_store() {
        let store = MemoryCourseStore::with_courses(vec![stored("custom", AgeGroup::Teen, 2)])
            .with_progress("user-42", &["custom"]);
        let view = service(store).get_course("custom", Some("user-42")).await.unwrap();

        assert_eq!(view.course.title, "Stored custom");
        assert!(view.is_completed);
    }

    #[tokio::test]
    async fn single_course_falls_back_to_sample() {
        let view = service(MemoryCourseStore::unavailable())
            .get_course("interpreter-prep-16", Some("user-42"))
            .await
            .unwrap();

        assert_eq!(view.course.age_group, AgeGroup::Adult);
        assert!(!view.is_completed);
    }

    #[tokio::test]
    async fn unknown_course_is_not_found() {
        let result = service(MemoryCourseStore::new()).get_course("nope", None).await;
        assert!(matches!(result, Err(CourseError::NotFound(id)) if id == "nope"));
    }

    #[tokio::test]
    async fn every_course_is_presentable() {
        let service = service(MemoryCourseStore::with_courses(vec![stored(
            "stored",
            AgeGroup::Adult,
            3,
        )]));

        for age in [2, 5, 6, 10, 11, 15, 16, 120] {
            let listing = service.get_courses(age, None).await.unwrap();
            assert!(listing.total_courses > 0);
            for view in &listing.courses {
                assert!(view.course.is_presentable());
                assert_eq!(view.course.age_group, listing.age_group);
            }
        }
    }
}
