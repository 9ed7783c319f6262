//! Player and review repository.
//!
//! "Popular" is a sort by the average review rating, computed in SQL.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use matchday_core::{PlayerId, UserId};

use super::RepositoryError;
use crate::models::{Player, PlayerReview, PlayerSummary};

#[derive(sqlx::FromRow)]
struct PlayerSummaryRow {
    id: i32,
    name: String,
    position: String,
    image_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    average_rating: Option<f64>,
    review_count: i64,
}

impl From<PlayerSummaryRow> for PlayerSummary {
    fn from(row: PlayerSummaryRow) -> Self {
        Self {
            player: Player {
                id: PlayerId::new(row.id),
                name: row.name,
                position: row.position,
                image_url: row.image_url,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            average_rating: row.average_rating,
            review_count: row.review_count,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    user_id: i32,
    rating: i32,
    comment: String,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for PlayerReview {
    fn from(row: ReviewRow) -> Self {
        Self {
            user_id: UserId::new(row.user_id),
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
        }
    }
}

const SELECT_SUMMARY: &str = r"
    SELECT p.id, p.name, p.position, p.image_url, p.created_at, p.updated_at,
           AVG(r.rating)::float8 AS average_rating,
           COUNT(r.id) AS review_count
    FROM players p
    LEFT JOIN player_reviews r ON r.player_id = p.id
";

/// Repository for the community player feature.
pub struct PlayerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PlayerRepository<'a> {
    /// Create a new player repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All players with their review aggregates, alphabetical.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<PlayerSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, PlayerSummaryRow>(&format!(
            "{SELECT_SUMMARY} GROUP BY p.id ORDER BY p.name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(PlayerSummary::from).collect())
    }

    /// Players sorted by average rating, best first; unreviewed players last.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn popular(&self) -> Result<Vec<PlayerSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, PlayerSummaryRow>(&format!(
            "{SELECT_SUMMARY} GROUP BY p.id ORDER BY AVG(r.rating) DESC NULLS LAST, p.name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(PlayerSummary::from).collect())
    }

    /// One player with its aggregate and all of its reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get(
        &self,
        id: PlayerId,
    ) -> Result<Option<(PlayerSummary, Vec<PlayerReview>)>, RepositoryError> {
        let row = sqlx::query_as::<_, PlayerSummaryRow>(&format!(
            "{SELECT_SUMMARY} WHERE p.id = $1 GROUP BY p.id"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let reviews = sqlx::query_as::<_, ReviewRow>(
            r"
            SELECT user_id, rating, comment, created_at
            FROM player_reviews
            WHERE player_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(Some((
            row.into(),
            reviews.into_iter().map(PlayerReview::from).collect(),
        )))
    }

    /// Insert a player profile (used by seeding).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        position: &str,
        image_url: &str,
    ) -> Result<PlayerId, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO players (name, position, image_url)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(name)
        .bind(position)
        .bind(image_url)
        .fetch_one(self.pool)
        .await?;

        Ok(PlayerId::new(id))
    }

    /// Record a user's rating of a player; re-reviewing replaces the
    /// previous rating and comment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the player does not exist.
    pub async fn upsert_review(
        &self,
        player_id: PlayerId,
        user_id: UserId,
        rating: i32,
        comment: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO player_reviews (player_id, user_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (player_id, user_id)
            DO UPDATE SET rating = EXCLUDED.rating, comment = EXCLUDED.comment
            ",
        )
        .bind(player_id.as_i32())
        .bind(user_id.as_i32())
        .bind(rating)
        .bind(comment)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }
}
