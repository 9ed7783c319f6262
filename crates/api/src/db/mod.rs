//! Database operations for the Matchday `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `users` - Accounts and password hashes
//! - `products` - Sellable catalog items
//! - `carts` / `cart_items` - Per-user cart with add-time snapshots
//! - `addresses` - Profile shipping address (one per user, upserted)
//! - `order_addresses` - Per-order address snapshots (never updated)
//! - `orders` / `order_items` - Orders with value-copied item snapshots
//! - `wishlist_items` - Per-user product references
//! - `players` / `player_reviews` - Community player ratings
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p matchday-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod addresses;
pub mod carts;
pub mod orders;
pub mod players;
pub mod products;
pub mod users;
pub mod wishlists;

/// Error type for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
