use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::modules::classes::core::class::Class;
use crate::modules::classes::use_cases::create_class::inbound::http::ClassResponse;
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::primitives::ClassId;
use crate::shell::auth::AuthenticatedUser;
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct ClassesResponse {
    pub classes: Vec<Class>,
}

pub async fn handle(State(state): State<AppState>, AuthenticatedUser(user_id): AuthenticatedUser) -> Response {
    match state.classes.list_classes(user_id).await {
        Ok(classes) => Json(ClassesResponse { classes }).into_response(),
        Err(err) => ApplicationError::from(err).into_response(),
    }
}

pub async fn handle_get(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(class_id): Path<ClassId>,
) -> Response {
    match state.classes.find_owned_class(class_id, user_id).await {
        Ok(Some(class)) => Json(ClassResponse { class }).into_response(),
        Ok(None) => ApplicationError::NotFound("class not found".to_string()).into_response(),
        Err(err) => ApplicationError::from(err).into_response(),
    }
}
