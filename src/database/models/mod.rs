pub mod course;
pub mod progress;

pub use course::CourseDocument;
pub use progress::UserProgress;
