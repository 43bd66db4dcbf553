use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::modules::users::core::user::User;
use crate::modules::users::use_cases::register_user::command::RegisterUser;
use crate::shared::application::errors::invalid_body;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct RegisterUserBody {
    pub username: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub user: User,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<RegisterUserBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return invalid_body(rejection),
    };

    let command = RegisterUser {
        username: body.username,
        email: body.email,
        registered_at: state.clock.now(),
    };

    match state.register_user_handler.handle(command).await {
        Ok(user) => (StatusCode::CREATED, Json(UserResponse { user })).into_response(),
        Err(err) => err.into_response(),
    }
}
