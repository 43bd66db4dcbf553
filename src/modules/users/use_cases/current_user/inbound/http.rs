use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::modules::users::use_cases::register_user::inbound::http::UserResponse;
use crate::shared::application::errors::ApplicationError;
use crate::shell::auth::AuthenticatedUser;
use crate::shell::state::AppState;

pub async fn handle(State(state): State<AppState>, AuthenticatedUser(user_id): AuthenticatedUser) -> Response {
    match state.users.get_user(user_id).await {
        Ok(Some(user)) => Json(UserResponse { user }).into_response(),
        Ok(None) => ApplicationError::NotFound("user not found".to_string()).into_response(),
        Err(err) => ApplicationError::from(err).into_response(),
    }
}
