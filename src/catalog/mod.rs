pub mod age_group;
pub mod course;
pub mod sample;

pub use age_group::{AgeGroup, MIN_CLASSIFIED_AGE};
pub use course::{Course, CourseListing, CourseView, Difficulty};
pub use sample::{
    all_sample_courses, find_sample_course, sample_courses, seed_catalog, SeedOutcome,
};
