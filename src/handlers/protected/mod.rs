// handlers/protected/mod.rs - Protected handlers (bearer credential required)
//
// Every route here sits behind `bearer_auth_middleware`, so handlers can take
// `Extension<AuthUser>` for granted.

pub mod courses;

pub use courses::{course_post, courses_get};
