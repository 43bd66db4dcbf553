use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::study_sessions::core::session::StudySession;
use crate::modules::study_sessions::use_cases::record_session::command::RecordStudySession;
use crate::shared::application::errors::{ApplicationError, invalid_body};
use crate::shared::core::primitives::ClassId;
use crate::shell::auth::AuthenticatedUser;
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSessionBody {
    pub class_id: Option<ClassId>,
    pub seconds: Option<i64>,
    pub week_start: Option<String>,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub session: StudySession,
}

pub async fn handle(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    body: Result<Json<RecordSessionBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return invalid_body(rejection),
    };
    let (Some(class_id), Some(seconds)) = (body.class_id, body.seconds) else {
        return ApplicationError::Validation("classId and seconds (>= 0) are required".to_string())
            .into_response();
    };

    let command = RecordStudySession {
        session_id: Uuid::now_v7(),
        user_id,
        class_id,
        seconds,
        week_start: body.week_start,
        recorded_at: state.clock.now(),
    };

    match state.record_session_handler.handle(command).await {
        Ok(session) => (StatusCode::CREATED, Json(SessionResponse { session })).into_response(),
        Err(err) => err.into_response(),
    }
}
