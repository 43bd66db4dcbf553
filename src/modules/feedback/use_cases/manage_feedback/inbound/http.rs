use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::modules::feedback::core::feedback::Feedback;
use crate::shared::core::primitives::FeedbackId;
use crate::shell::auth::AuthenticatedUser;
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct FeedbackListResponse {
    pub feedback: Vec<Feedback>,
}

#[derive(Serialize)]
pub struct UpvoteResponse {
    pub upvoted: bool,
    pub message: &'static str,
}

pub async fn handle_list(State(state): State<AppState>) -> Response {
    match state.feedback_board_handler.list().await {
        Ok(feedback) => Json(FeedbackListResponse { feedback }).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn handle_upvote(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(feedback_id): Path<FeedbackId>,
) -> Response {
    match state.feedback_board_handler.toggle_upvote(feedback_id, user_id).await {
        Ok(upvoted) => Json(UpvoteResponse {
            upvoted,
            message: if upvoted { "Upvote added" } else { "Upvote removed" },
        })
        .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn handle_delete(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(feedback_id): Path<FeedbackId>,
) -> Response {
    match state.feedback_board_handler.delete(feedback_id, user_id).await {
        Ok(()) => Json(json!({ "message": "Feedback deleted successfully" })).into_response(),
        Err(err) => err.into_response(),
    }
}
