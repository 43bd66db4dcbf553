use chrono::{DateTime, Utc};

use crate::shared::core::primitives::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFeedback {
    pub user_id: UserId,
    pub content: String,
    pub posted_at: DateTime<Utc>,
}
