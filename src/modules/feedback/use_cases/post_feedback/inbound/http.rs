use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::modules::feedback::core::feedback::Feedback;
use crate::modules::feedback::use_cases::post_feedback::command::PostFeedback;
use crate::shell::auth::AuthenticatedUser;
use crate::shared::application::errors::invalid_body;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct PostFeedbackBody {
    #[serde(default)]
    pub content: String,
}

#[derive(Serialize)]
pub struct FeedbackResponse {
    pub feedback: Feedback,
}

pub async fn handle(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    body: Result<Json<PostFeedbackBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return invalid_body(rejection),
    };

    let command = PostFeedback {
        user_id,
        content: body.content,
        posted_at: state.clock.now(),
    };

    match state.post_feedback_handler.handle(command).await {
        Ok(feedback) => (StatusCode::CREATED, Json(FeedbackResponse { feedback })).into_response(),
        Err(err) => err.into_response(),
    }
}
