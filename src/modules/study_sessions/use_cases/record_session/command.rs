use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::core::primitives::{ClassId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStudySession {
    pub session_id: Uuid,
    pub user_id: UserId,
    pub class_id: ClassId,
    pub seconds: i64,
    /// Raw `YYYY-MM-DD`; any day of the week is accepted.
    pub week_start: Option<String>,
    pub recorded_at: DateTime<Utc>,
}
