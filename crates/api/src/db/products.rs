//! Product catalog repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use matchday_core::{Price, ProductCategory, ProductId};

use super::RepositoryError;
use crate::models::Product;

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    price: Price,
    images: Vec<String>,
    category: String,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
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

/// Repository for catalog operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the whole catalog, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price, images, category, quantity, created_at, updated_at
            FROM products
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price, images, category, quantity, created_at, updated_at
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        price: Price,
        images: &[String],
        category: ProductCategory,
        quantity: i32,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO products (name, price, images, category, quantity)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, price, images, category, quantity, created_at, updated_at
            ",
        )
        .bind(name)
        .bind(price)
        .bind(images)
        .bind(category.as_str())
        .bind(quantity)
        .fetch_one(self.pool)
        .await?;

        row.into_product()
    }

    /// Overwrite a product in place.
    ///
    /// Existing cart and order snapshots keep their add-time values.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: ProductId,
        name: &str,
        price: Price,
        images: &[String],
        category: ProductCategory,
        quantity: i32,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            UPDATE products
            SET name = $2, price = $3, images = $4, category = $5, quantity = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, price, images, category, quantity, created_at, updated_at
            ",
        )
        .bind(id.as_i32())
        .bind(name)
        .bind(price)
        .bind(images)
        .bind(category.as_str())
        .bind(quantity)
        .fetch_optional(self.pool)
        .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// Delete a product. Returns `false` if no such product existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
