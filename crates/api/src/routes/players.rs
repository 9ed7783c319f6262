//! Community player route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use matchday_core::PlayerId;

use crate::db::RepositoryError;
use crate::db::players::PlayerRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{PlayerReview, PlayerSummary};
use crate::state::AppState;

use super::require_some;

/// Build the players router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/players", get(list))
        .route("/api/players/popular", get(popular))
        .route("/api/players/{id}", get(get_one))
        .route("/api/players/{id}/reviews", post(add_review))
}

/// A player with its reviews attached, for the detail view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayerDetail {
    #[serde(flatten)]
    summary: PlayerSummary,
    reviews: Vec<PlayerReview>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewRequest {
    rating: Option<i32>,
    comment: Option<String>,
}

/// All players, alphabetical.
async fn list(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let players = PlayerRepository::new(state.pool()).list().await?;
    Ok(Json(json!({ "players": players })))
}

/// Players sorted by average review rating.
async fn popular(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let players = PlayerRepository::new(state.pool()).popular().await?;
    Ok(Json(json!({ "players": players })))
}

/// One player with its reviews.
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let (summary, reviews) = PlayerRepository::new(state.pool())
        .get(PlayerId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("player {id}")))?;

    Ok(Json(json!({ "player": PlayerDetail { summary, reviews } })))
}

/// Rate a player. Re-reviewing replaces the caller's previous rating.
async fn add_review(
    RequireAuth(claims): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ReviewRequest>,
) -> Result<impl IntoResponse> {
    let rating = require_some(body.rating, "rating")?;
    if !(1..=5).contains(&rating) {
        return Err(AppError::Validation(
            "rating must be between 1 and 5".to_string(),
        ));
    }
    let comment = body.comment.unwrap_or_default();

    let player_id = PlayerId::new(id);
    let repo = PlayerRepository::new(state.pool());

    repo.upsert_review(player_id, claims.id, rating, &comment)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("player {id}")),
            other => other.into(),
        })?;

    let (summary, reviews) = repo
        .get(player_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("player {id}")))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "player": PlayerDetail { summary, reviews } })),
    ))
}
