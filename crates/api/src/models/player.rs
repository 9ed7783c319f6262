//! Community player and review models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use matchday_core::{PlayerId, UserId};

/// A player profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user's rating of a player.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReview {
    pub user_id: UserId,
    /// 1-5 inclusive.
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// A player with its review aggregate, as listed by the popular sort.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    #[serde(flatten)]
    pub player: Player,
    /// Average of all ratings; `None` when the player has no reviews yet.
    pub average_rating: Option<f64>,
    pub review_count: i64,
}
