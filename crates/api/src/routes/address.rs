//! Profile address route handlers.
//!
//! One address per user, upserted in place. Distinct from the per-order
//! snapshots written by checkout.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::put,
};
use serde_json::json;

use crate::db::addresses::AddressRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

use super::AddressBody;

/// Build the address router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/address", put(upsert).get(get_address).delete(delete))
}

/// Create or overwrite the caller's profile address.
async fn upsert(
    RequireAuth(claims): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<AddressBody>,
) -> Result<impl IntoResponse> {
    let fields = body.into_fields()?;

    let address = AddressRepository::new(state.pool())
        .upsert(claims.id, &fields)
        .await?;

    Ok(Json(json!({ "address": address })))
}

/// The caller's profile address.
async fn get_address(
    RequireAuth(claims): RequireAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let address = AddressRepository::new(state.pool())
        .get(claims.id)
        .await?
        .ok_or_else(|| AppError::NotFound("address".to_string()))?;

    Ok(Json(json!({ "address": address })))
}

/// Delete the caller's profile address.
async fn delete(
    RequireAuth(claims): RequireAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let deleted = AddressRepository::new(state.pool())
        .delete(claims.id)
        .await?;

    if !deleted {
        return Err(AppError::NotFound("address".to_string()));
    }

    Ok(Json(json!({ "message": "Address deleted" })))
}
