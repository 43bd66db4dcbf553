// Builder for RecordStudySession, seeded from json/record_study_session.json.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::modules::study_sessions::use_cases::record_session::command::RecordStudySession;
use crate::shared::core::primitives::{ClassId, UserId};
use crate::tests::fixtures::fixed_now;

#[derive(Debug, Clone, Deserialize)]
pub struct RecordStudySessionDto {
    pub session_id: Uuid,
    pub user_id: UserId,
    pub class_id: ClassId,
    pub seconds: i64,
    #[serde(default)]
    pub week_start: Option<String>,
}

pub struct RecordStudySessionBuilder {
    inner: RecordStudySession,
}

impl Default for RecordStudySessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl RecordStudySessionBuilder {
    pub fn new() -> Self {
        let dto: RecordStudySessionDto =
            serde_json::from_str(include_str!("json/record_study_session.json")).unwrap();
        Self {
            inner: RecordStudySession {
                session_id: dto.session_id,
                user_id: dto.user_id,
                class_id: dto.class_id,
                seconds: dto.seconds,
                week_start: dto.week_start,
                recorded_at: fixed_now(),
            },
        }
    }

    pub fn session_id(mut self, v: Uuid) -> Self {
        self.inner.session_id = v;
        self
    }

    pub fn user_id(mut self, v: UserId) -> Self {
        self.inner.user_id = v;
        self
    }

    pub fn class_id(mut self, v: ClassId) -> Self {
        self.inner.class_id = v;
        self
    }

    pub fn seconds(mut self, v: i64) -> Self {
        self.inner.seconds = v;
        self
    }

    pub fn week_start(mut self, v: impl Into<String>) -> Self {
        self.inner.week_start = Some(v.into());
        self
    }

    pub fn recorded_at(mut self, v: DateTime<Utc>) -> Self {
        self.inner.recorded_at = v;
        self
    }

    pub fn build(self) -> RecordStudySession {
        self.inner
    }
}

#[cfg(test)]
mod record_study_session_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = RecordStudySessionBuilder::default().build();
        assert_eq!(built.session_id.to_string(), "01976b6e-2c3a-7d40-9a51-0c5f3e2b8a11");
        assert_eq!(built.user_id, 1);
        assert_eq!(built.class_id, 5);
        assert_eq!(built.seconds, 120);
        assert_eq!(built.week_start, None);
        assert_eq!(built.recorded_at, fixed_now());
    }

    #[rstest]
    fn setters_override_the_defaults() {
        let built = RecordStudySessionBuilder::new()
            .user_id(9)
            .class_id(8)
            .seconds(-1)
            .week_start("2025-01-01")
            .build();
        assert_eq!((built.user_id, built.class_id, built.seconds), (9, 8, -1));
        assert_eq!(built.week_start.as_deref(), Some("2025-01-01"));
    }
}
