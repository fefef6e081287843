use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AgeGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// A catalog entry as served to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub age_group: AgeGroup,
    pub difficulty: Difficulty,
    pub duration: String,
    pub lessons_count: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Whether the record is fit to hand to a client
    pub fn is_presentable(&self) -> bool {
        !self.id.trim().is_empty() && !self.title.trim().is_empty()
    }
}

/// A course annotated with the requesting user's completion state
#[derive(Debug, Clone, Serialize)]
pub struct CourseView {
    #[serde(flatten)]
    pub course: Course,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
}

/// Response body of `GET /courses`
#[derive(Debug, Clone, Serialize)]
pub struct CourseListing {
    pub courses: Vec<CourseView>,
    pub age_group: AgeGroup,
    pub total_courses: usize,
}

impl CourseListing {
    pub fn new(age_group: AgeGroup, courses: Vec<CourseView>) -> Self {
        Self {
            total_courses: courses.len(),
            courses,
            age_group,
        }
    }
}
