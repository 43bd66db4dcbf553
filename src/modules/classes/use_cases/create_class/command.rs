use chrono::{DateTime, Utc};

use crate::shared::core::primitives::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateClass {
    pub user_id: UserId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
