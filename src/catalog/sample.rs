use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::{AgeGroup, Course, Difficulty};
use crate::database::CourseStore;

const THUMBNAIL_BASE_URL: &str = "https://images.unsplash.com";

struct SampleCourse {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    keywords: &'static str,
    difficulty: Difficulty,
    duration: &'static str,
    lessons_count: u32,
}

const PRESCHOOL: &[SampleCourse] = &[
    SampleCourse {
        id: "basic-hands-2-5",
        title: "Basic Hand Shapes",
        description: "Learn simple hand shapes and finger movements with fun games and colorful visuals.",
        keywords: "baby,hands,learning",
        difficulty: Difficulty::Beginner,
        duration: "15 min",
        lessons_count: 8,
    },
    SampleCourse {
        id: "family-signs-2-5",
        title: "Family Signs",
        description: "Learn to sign family members like mommy, daddy, and grandma with interactive stories.",
        keywords: "family,children,love",
        difficulty: Difficulty::Beginner,
        duration: "20 min",
        lessons_count: 12,
    },
    SampleCourse {
        id: "colors-shapes-2-5",
        title: "Colors & Shapes",
        description: "Discover signs for colors and basic shapes through playful activities.",
        keywords: "colors,shapes,kids",
        difficulty: Difficulty::Beginner,
        duration: "18 min",
        lessons_count: 10,
    },
];

const PRIMARY: &[SampleCourse] = &[
    SampleCourse {
        id: "school-vocab-6-10",
        title: "School Vocabulary",
        description: "Essential signs for school subjects, classroom items, and daily school activities.",
        keywords: "school,children,classroom",
        difficulty: Difficulty::Beginner,
        duration: "25 min",
        lessons_count: 15,
    },
    SampleCourse {
        id: "animals-nature-6-10",
        title: "Animals & Nature",
        description: "Learn signs for farm animals, wild animals, and elements of nature.",
        keywords: "animals,nature,wildlife",
        difficulty: Difficulty::Intermediate,
        duration: "30 min",
        lessons_count: 18,
    },
    SampleCourse {
        id: "sports-hobbies-6-10",
        title: "Sports & Hobbies",
        description: "Sign language for sports activities, games, and popular hobbies.",
        keywords: "sports,games,children",
        difficulty: Difficulty::Intermediate,
        duration: "28 min",
        lessons_count: 16,
    },
];

const TEEN: &[SampleCourse] = &[
    SampleCourse {
        id: "conversation-skills-11-15",
        title: "Conversational Skills",
        description: "Build fluency in everyday conversations and social interactions.",
        keywords: "conversation,teenagers,communication",
        difficulty: Difficulty::Intermediate,
        duration: "40 min",
        lessons_count: 22,
    },
    SampleCourse {
        id: "advanced-grammar-11-15",
        title: "Advanced Grammar",
        description: "Master complex grammar structures and advanced ASL concepts.",
        keywords: "study,grammar,learning",
        difficulty: Difficulty::Advanced,
        duration: "45 min",
        lessons_count: 25,
    },
    SampleCourse {
        id: "culture-community-11-15",
        title: "Deaf Culture & Community",
        description: "Learn about Deaf culture, history, and community values.",
        keywords: "community,culture,diversity",
        difficulty: Difficulty::Intermediate,
        duration: "35 min",
        lessons_count: 20,
    },
];

const ADULT: &[SampleCourse] = &[
    SampleCourse {
        id: "professional-asl-16",
        title: "Professional ASL",
        description: "Advanced sign language for workplace and professional settings.",
        keywords: "professional,workplace,communication",
        difficulty: Difficulty::Advanced,
        duration: "50 min",
        lessons_count: 30,
    },
    SampleCourse {
        id: "interpreter-prep-16",
        title: "Interpreter Preparation",
        description: "Intensive training for aspiring ASL interpreters.",
        keywords: "interpreter,professional,certification",
        difficulty: Difficulty::Expert,
        duration: "60 min",
        lessons_count: 35,
    },
];

fn table(age_group: AgeGroup) -> &'static [SampleCourse] {
    match age_group {
        AgeGroup::Preschool => PRESCHOOL,
        AgeGroup::Primary => PRIMARY,
        AgeGroup::Teen => TEEN,
        AgeGroup::Adult => ADULT,
    }
}

fn build(sample: &SampleCourse, age_group: AgeGroup, now: DateTime<Utc>) -> Course {
    Course {
        id: sample.id.to_string(),
        title: sample.title.to_string(),
        description: sample.description.to_string(),
        thumbnail: format!("{}/400x300/?{}", THUMBNAIL_BASE_URL, sample.keywords),
        age_group,
        difficulty: sample.difficulty,
        duration: sample.duration.to_string(),
        lessons_count: sample.lessons_count,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Fixed fallback course list for one age group, in display order
pub fn sample_courses(age_group: AgeGroup) -> Vec<Course> {
    let now = Utc::now();
    table(age_group)
        .iter()
        .map(|sample| build(sample, age_group, now))
        .collect()
}

/// The whole sample catalog across every age group
pub fn all_sample_courses() -> Vec<Course> {
    AgeGroup::ALL.into_iter().flat_map(sample_courses).collect()
}

/// Look up one sample course by id
pub fn find_sample_course(course_id: &str) -> Option<Course> {
    AgeGroup::ALL.into_iter().find_map(|group| {
        table(group)
            .iter()
            .find(|sample| sample.id == course_id)
            .map(|sample| build(sample, group, Utc::now()))
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store was empty and received this many courses
    Seeded(usize),
    /// The store already held this many courses; nothing was written
    AlreadyPopulated(u64),
    /// The store could not be reached
    Skipped(String),
}

/// Seed the store with the sample catalog if it holds no courses yet.
///
/// Store failures are logged and reported as `Skipped`; nothing is retried.
pub async fn seed_catalog(store: &dyn CourseStore) -> SeedOutcome {
    let existing = match store.count_courses().await {
        Ok(count) => count,
        Err(e) => {
            warn!("Course store unavailable, skipping sample course creation: {}", e);
            return SeedOutcome::Skipped(e.to_string());
        }
    };

    if existing > 0 {
        info!("Found {} existing courses in store", existing);
        return SeedOutcome::AlreadyPopulated(existing);
    }

    let courses = all_sample_courses();
    match store.insert_courses(&courses).await {
        Ok(inserted) => {
            info!("Created {} sample courses in store", inserted);
            SeedOutcome::Seeded(inserted)
        }
        Err(e) => {
            warn!("Failed to create sample courses: {}", e);
            SeedOutcome::Skipped(e.to_string())
        }
    }
}
