use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::modules::classes::core::class::Class;
use crate::modules::classes::use_cases::create_class::command::CreateClass;
use crate::shell::auth::AuthenticatedUser;
use crate::shared::application::errors::invalid_body;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct CreateClassBody {
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize)]
pub struct ClassResponse {
    pub class: Class,
}

pub async fn handle(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    body: Result<Json<CreateClassBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return invalid_body(rejection),
    };

    let command = CreateClass {
        user_id,
        name: body.name,
        created_at: state.clock.now(),
    };

    match state.create_class_handler.handle(command).await {
        Ok(class) => (StatusCode::CREATED, Json(ClassResponse { class })).into_response(),
        Err(err) => err.into_response(),
    }
}
