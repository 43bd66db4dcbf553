// Caller identification.
//
// An upstream gateway authenticates the caller and forwards its numeric id in
// the `x-user-id` header. Handlers that need a caller take `AuthenticatedUser`.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::shared::core::primitives::UserId;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("authentication required")]
    Missing,

    #[error("invalid user id")]
    Invalid,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AuthError> {
        let raw = headers.get(USER_ID_HEADER).ok_or(AuthError::Missing)?;
        let id = raw
            .to_str()
            .map_err(|_| AuthError::Invalid)?
            .trim()
            .parse::<UserId>()
            .map_err(|_| AuthError::Invalid)?;
        if id <= 0 {
            return Err(AuthError::Invalid);
        }
        Ok(Self(id))
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers)
    }
}

/// Caller id for GraphQL resolvers; the `/gql` handler puts it in the request data.
pub fn require_user(context: &async_graphql::Context<'_>) -> async_graphql::Result<UserId> {
    context
        .data_opt::<AuthenticatedUser>()
        .map(|user| user.0)
        .ok_or_else(|| async_graphql::Error::new(AuthError::Missing.to_string()))
}

#[cfg(test)]
mod authenticated_user_tests {
    use super::*;
    use axum::http::HeaderValue;
    use rstest::rstest;

    fn headers(value: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = value {
            headers.insert(USER_ID_HEADER, HeaderValue::from_static(value));
        }
        headers
    }

    #[rstest]
    fn it_should_read_the_caller_id() {
        assert_eq!(AuthenticatedUser::from_headers(&headers(Some("7"))), Ok(AuthenticatedUser(7)));
        assert_eq!(AuthenticatedUser::from_headers(&headers(Some(" 7 "))), Ok(AuthenticatedUser(7)));
    }

    #[rstest]
    fn it_should_reject_a_missing_header() {
        assert_eq!(AuthenticatedUser::from_headers(&headers(None)), Err(AuthError::Missing));
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("0")]
    #[case("-3")]
    #[case("1.5")]
    fn it_should_reject_a_malformed_id(#[case] raw: &'static str) {
        assert_eq!(AuthenticatedUser::from_headers(&headers(Some(raw))), Err(AuthError::Invalid));
    }
}
