//! Wishlist repository.
//!
//! A wishlist is a set of live product references, not snapshots: the
//! listing always shows current catalog data, and a deleted product
//! simply disappears from every wishlist.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use matchday_core::{Price, ProductCategory, ProductId, UserId};

use super::RepositoryError;
use crate::models::Product;

#[derive(sqlx::FromRow)]
struct WishlistRow {
    id: i32,
    name: String,
    price: Price,
    images: Vec<String>,
    category: String,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WishlistRow {
    fn into_product(self) -> Result<Product, RepositoryError> {
        let category: ProductCategory = self.category.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid category in database: {e}"))
        })?;

        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name,
            price: self.price,
            images: self.images,
            category,
            quantity: self.quantity,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for wishlist operations.
pub struct WishlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WishlistRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The user's wishlisted products, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, WishlistRow>(
            r"
            SELECT p.id, p.name, p.price, p.images, p.category, p.quantity,
                   p.created_at, p.updated_at
            FROM wishlist_items w
            JOIN products p ON p.id = w.product_id
            WHERE w.user_id = $1
            ORDER BY w.id
            ",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(WishlistRow::into_product).collect()
    }

    /// Add a product to the user's wishlist. Adding twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO wishlist_items (user_id, product_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, product_id) DO NOTHING
            ",
        )
        .bind(user_id.as_i32())
        .bind(product_id.as_i32())
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Remove a product from the user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product was not wishlisted.
    pub async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM wishlist_items WHERE user_id = $1 AND product_id = $2",
        )
        .bind(user_id.as_i32())
        .bind(product_id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
