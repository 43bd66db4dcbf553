use async_graphql::{Context, ID, Object, Result as GqlResult, SimpleObject};
use uuid::Uuid;

use crate::shared::application::errors::ApplicationError;
use crate::modules::study_sessions::core::session::StudySession;
use crate::modules::study_sessions::use_cases::record_session::command::RecordStudySession;
use crate::shared::core::primitives::{ClassId, UserId};
use crate::shell::auth::require_user;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlStudySession {
    pub id: ID,
    pub user_id: UserId,
    pub class_id: ClassId,
    pub seconds: u64,
    pub week_start: String,
    pub created_at: String,
}

impl From<StudySession> for GqlStudySession {
    fn from(s: StudySession) -> Self {
        Self {
            id: ID(s.id.to_string()),
            user_id: s.user_id,
            class_id: s.class_id,
            seconds: s.seconds,
            week_start: s.week_start.to_string(),
            created_at: s.created_at.to_rfc3339(),
        }
    }
}

#[derive(Default)]
pub struct RecordSessionMutation;

#[Object]
impl RecordSessionMutation {
    async fn record_session(
        &self,
        context: &Context<'_>,
        class_id: ClassId,
        seconds: i64,
        week_start: Option<String>,
    ) -> GqlResult<GqlStudySession> {
        let user_id = require_user(context)?;
        let state = context.data_unchecked::<AppState>();

        let command = RecordStudySession {
            session_id: Uuid::now_v7(),
            user_id,
            class_id,
            seconds,
            week_start,
            recorded_at: state.clock.now(),
        };

        let session = state
            .record_session_handler
            .handle(command)
            .await
            .map_err(ApplicationError::into_graphql)?;
        Ok(session.into())
    }
}
