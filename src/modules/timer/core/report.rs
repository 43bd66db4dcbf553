use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::study_sessions::use_cases::record_session::command::RecordStudySession;
use crate::shared::core::primitives::{ClassId, UserId};

/// Emitted by a save; the only thing the timer tells the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub class_id: ClassId,
    pub seconds: u64,
}

impl SessionReport {
    /// The week is left to the recording instant.
    pub fn into_command(
        self,
        user_id: UserId,
        session_id: Uuid,
        recorded_at: DateTime<Utc>,
    ) -> RecordStudySession {
        RecordStudySession {
            session_id,
            user_id,
            class_id: self.class_id,
            seconds: i64::try_from(self.seconds).unwrap_or(i64::MAX),
            week_start: None,
            recorded_at,
        }
    }
}
