pub mod models;
pub mod mongo;
pub mod store;

pub use mongo::MongoCourseStore;
pub use store::{CourseStore, StoreError};
