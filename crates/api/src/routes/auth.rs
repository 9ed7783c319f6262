//! Account registration and login.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, Result};
use crate::services::auth::AuthService;
use crate::state::AppState;

use super::require;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsRequest {
    email: Option<String>,
    password: Option<String>,
}

/// Register a new account.
async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<impl IntoResponse> {
    let email = require(body.email, "email")?;
    let password = require(body.password, "password")?;

    let user = AuthService::new(state.pool())
        .register(&email, &password)
        .await?;

    tracing::info!(user_id = %user.id, "account registered");
    Ok((StatusCode::CREATED, Json(json!({ "user": user }))))
}

/// Login and receive a bearer token.
async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Result<impl IntoResponse> {
    let email = require(body.email, "email")?;
    let password = require(body.password, "password")?;

    let user = AuthService::new(state.pool())
        .login(&email, &password)
        .await?;

    let token = state
        .tokens()
        .issue(&user)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({ "token": token, "user": user })))
}
