//! Authentication extractors.
//!
//! Provides extractors for requiring a bearer token in route handlers.
//! The acting user is identified solely by the token claims; handlers
//! never take a user id from the request body on authenticated routes.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use matchday_core::UserRole;

use crate::services::auth::Claims;
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(claims): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", claims.email)
/// }
/// ```
pub struct RequireAuth(pub Claims);

/// Extractor that additionally requires the admin role.
pub struct RequireAdmin(pub Claims);

/// Error returned when authentication fails.
///
/// A missing header is a 401; a token that is present but invalid,
/// expired or lacks the required role is a 403.
#[derive(Debug)]
pub enum AuthRejection {
    /// No `Authorization: Bearer` header was supplied.
    MissingToken,
    /// The supplied token failed verification.
    InvalidToken,
    /// The token is valid but the role is insufficient.
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "Authentication token required"),
            Self::InvalidToken => (StatusCode::FORBIDDEN, "Invalid or expired token"),
            Self::Forbidden => (StatusCode::FORBIDDEN, "Admin access required"),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Pull the bearer token out of the `Authorization` header.
fn bearer_token(parts: &Parts) -> Result<&str, AuthRejection> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthRejection::MissingToken)
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state
            .tokens()
            .verify(token)
            .map_err(|_| AuthRejection::InvalidToken)?;

        Ok(Self(claims))
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAuth(claims) = RequireAuth::from_request_parts(parts, state).await?;

        if claims.role != UserRole::Admin {
            return Err(AuthRejection::Forbidden);
        }

        Ok(Self(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_status_codes() {
        assert_eq!(
            AuthRejection::MissingToken.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthRejection::InvalidToken.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthRejection::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }
}
