use serde::{Deserialize, Serialize};
use std::fmt;

/// Audience bucket a course is written for. Serialized as the display label
/// (`"2-5"`, `"6-10"`, `"11-15"`, `"16+"`), which is also the stored form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "2-5")]
    Preschool,
    #[serde(rename = "6-10")]
    Primary,
    #[serde(rename = "11-15")]
    Teen,
    #[serde(rename = "16+")]
    Adult,
}

/// Youngest age that maps to any group
pub const MIN_CLASSIFIED_AGE: u32 = 2;

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Preschool,
        AgeGroup::Primary,
        AgeGroup::Teen,
        AgeGroup::Adult,
    ];

    /// Classify an age using the inclusive ranges 2-5, 6-10, 11-15 and 16+.
    ///
    /// Ages below 2 have no group and yield `None` rather than falling
    /// through to the adult bucket.
    pub fn for_age(age: u32) -> Option<Self> {
        match age {
            0..=1 => None,
            2..=5 => Some(AgeGroup::Preschool),
            6..=10 => Some(AgeGroup::Primary),
            11..=15 => Some(AgeGroup::Teen),
            _ => Some(AgeGroup::Adult),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Preschool => "2-5",
            AgeGroup::Primary => "6-10",
            AgeGroup::Teen => "11-15",
            AgeGroup::Adult => "16+",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
