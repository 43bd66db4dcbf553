// Application level error taxonomy and its HTTP mapping.
//
// - Validation and NotFound carry user-facing messages.
// - Store failures are logged and answered with a generic message.

use async_graphql::ErrorExtensions;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::shared::core::week::WeekStartError;
use crate::shared::infrastructure::store::StoreError;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApplicationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApplicationError::Validation(_) => StatusCode::BAD_REQUEST,
            ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
            ApplicationError::Conflict(_) => StatusCode::CONFLICT,
            ApplicationError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the caller.
    pub fn public_message(&self) -> String {
        match self {
            ApplicationError::Store(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<WeekStartError> for ApplicationError {
    fn from(err: WeekStartError) -> Self {
        ApplicationError::Validation(err.to_string())
    }
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        if let ApplicationError::Store(ref err) = self {
            tracing::error!(error = %err, "store failure");
        }
        (self.status_code(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// 422 answer for a body that does not deserialize, with the parser's reason.
pub fn invalid_body(rejection: JsonRejection) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": rejection.body_text() })),
    )
        .into_response()
}

impl ApplicationError {
    /// GraphQL error carrying the public message and the HTTP status as `code`.
    pub fn into_graphql(self) -> async_graphql::Error {
        if let ApplicationError::Store(ref inner) = self {
            tracing::error!(error = %inner, "store failure");
        }
        let code = i32::from(self.status_code().as_u16());
        async_graphql::Error::new(self.public_message()).extend_with(|_, ext| ext.set("code", code))
    }
}
