use serde::{Deserialize, Serialize};

/// One user's record in the `user_progress` collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProgress {
    pub user_id: String,
    #[serde(default)]
    pub courses_completed: Vec<String>,
}
