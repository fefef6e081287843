use axum::{
    extract::{rejection::JsonRejection, Extension, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{CourseListing, CourseView};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CoursesQuery {
    /// Kept as text so a non-numeric value gets a JSON validation error
    pub age: Option<String>,
    #[serde(alias = "userId")]
    pub user_id: Option<String>,
}

/// GET /courses?age=<int>&user_id=<optional> - Courses for the user's age group
///
/// Progress is read for `user_id` when given, otherwise for the authenticated
/// user.
pub async fn courses_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<CoursesQuery>,
) -> Result<Json<CourseListing>, ApiError> {
    let age = parse_age(query.age.as_deref())?;

    let user_id = query
        .user_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or(&user.user_id);

    tracing::debug!(age, user_id, source = ?user.source, "fetching courses");

    let listing = state.courses.get_courses(age, Some(user_id)).await?;
    Ok(Json(listing))
}

#[derive(Debug, Default, Deserialize)]
pub struct CourseLookup {
    #[serde(rename = "courseId", alias = "course_id")]
    pub course_id: Option<String>,
    #[serde(rename = "userId", alias = "user_id")]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CourseDetail {
    pub message: &'static str,
    pub course: CourseView,
}

/// POST /courses {"courseId", "userId"} - One course with its completion flag
pub async fn course_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CourseLookup>, JsonRejection>,
) -> Result<Json<CourseDetail>, ApiError> {
    let Json(lookup) = payload.map_err(|e| ApiError::validation_error(e.body_text(), None))?;

    let course_id = lookup
        .course_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::field_error("courseId", "Course ID is required"))?;

    let user_id = lookup
        .user_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or(&user.user_id);

    tracing::debug!(course_id, user_id, source = ?user.source, "fetching course");

    let course = state.courses.get_course(course_id, Some(user_id)).await?;
    Ok(Json(CourseDetail {
        message: "Course fetched successfully",
        course,
    }))
}

fn parse_age(raw: Option<&str>) -> Result<i64, ApiError> {
    raw.map(str::trim)
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| ApiError::field_error("age", "Valid age parameter is required"))
}
