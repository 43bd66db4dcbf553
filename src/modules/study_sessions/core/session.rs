use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::core::primitives::{ClassId, UserId};
use crate::shared::core::week::WeekStart;

/// One saved block of study time. Append-only, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: Uuid,
    pub user_id: UserId,
    pub class_id: ClassId,
    pub seconds: u64,
    pub week_start: WeekStart,
    pub created_at: DateTime<Utc>,
}
