use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{AgeGroup, Course, Difficulty};

/// Stored shape of a course in the `courses` collection.
///
/// Timestamps are written as BSON dates. On read they may also be ISO 8601
/// strings, with or without an offset (offset-less values are taken as UTC).
/// Store-specific fields such as `_id` are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDocument {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: String,
    pub age_group: AgeGroup,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub lessons_count: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(with = "stored_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "stored_timestamp")]
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl From<&Course> for CourseDocument {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.clone(),
            title: course.title.clone(),
            description: course.description.clone(),
            thumbnail: course.thumbnail.clone(),
            age_group: course.age_group,
            difficulty: course.difficulty,
            duration: course.duration.clone(),
            lessons_count: course.lessons_count,
            is_active: course.is_active,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

impl From<CourseDocument> for Course {
    fn from(doc: CourseDocument) -> Self {
        Self {
            id: doc.id,
            title: doc.title,
            description: doc.description,
            thumbnail: doc.thumbnail,
            age_group: doc.age_group,
            difficulty: doc.difficulty,
            duration: doc.duration,
            lessons_count: doc.lessons_count,
            is_active: doc.is_active,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

mod stored_timestamp {
    use bson::{serde_helpers::chrono_datetime_as_bson_datetime, Bson};
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        chrono_datetime_as_bson_datetime::serialize(value, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Bson::deserialize(deserializer)? {
            Bson::DateTime(value) => Ok(value.to_chrono()),
            Bson::String(value) => parse_iso(&value)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", value))),
            other => Err(de::Error::custom(format!(
                "expected a date or ISO 8601 string, found {:?}",
                other.element_type()
            ))),
        }
    }

    pub(super) fn parse_iso(value: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
            return Some(parsed.with_timezone(&Utc));
        }
        value
            .parse::<NaiveDateTime>()
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive))
    }
}
