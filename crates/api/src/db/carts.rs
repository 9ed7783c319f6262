//! Cart repository.
//!
//! One cart row per user, created lazily on first add. Line increments
//! are a single atomic upsert, so two concurrent adds for the same
//! user/product cannot lose an update, and an existing line keeps its
//! add-time snapshot because the conflict arm only touches quantity.

use sqlx::PgPool;

use matchday_core::{Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::{CartItem, Product};

#[derive(sqlx::FromRow)]
pub(crate) struct CartItemRow {
    product_id: i32,
    product_name: String,
    product_image: String,
    price: Price,
    quantity: i32,
}

impl CartItemRow {
    pub(crate) fn into_item(self) -> Result<CartItem, RepositoryError> {
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "negative quantity in cart line for product {}",
                self.product_id
            ))
        })?;

        Ok(CartItem {
            product_id: ProductId::new(self.product_id),
            product_name: self.product_name,
            product_image: self.product_image,
            price: self.price,
            quantity,
        })
    }
}

const SELECT_ITEMS: &str = r"
    SELECT ci.product_id, ci.product_name, ci.product_image, ci.price, ci.quantity
    FROM cart_items ci
    JOIN carts c ON c.id = ci.cart_id
    WHERE c.user_id = $1
    ORDER BY ci.id
";

/// Repository for cart operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All lines of the user's cart, in insertion order.
    ///
    /// A user with no cart yet gets an empty sequence, never an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemRow>(SELECT_ITEMS)
            .bind(user_id.as_i32())
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(CartItemRow::into_item).collect()
    }

    /// Add `quantity` units of a product to the user's cart.
    ///
    /// Creates the cart if this is the user's first add. If a line for
    /// this product already exists its quantity is incremented and its
    /// name/image/price snapshot is kept; otherwise a new line snapshots
    /// the product's current name, display image and price.
    ///
    /// Returns the full updated line sequence.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn add_item(
        &self,
        user_id: UserId,
        product: &Product,
        quantity: u32,
    ) -> Result<Vec<CartItem>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let cart_id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO carts (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET updated_at = NOW()
            RETURNING id
            ",
        )
        .bind(user_id.as_i32())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r"
            INSERT INTO cart_items (cart_id, product_id, product_name, product_image, price, quantity)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
            ",
        )
        .bind(cart_id)
        .bind(product.id.as_i32())
        .bind(&product.name)
        .bind(product.display_image())
        .bind(product.price)
        .bind(i32::try_from(quantity).unwrap_or(i32::MAX))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.items(user_id).await
    }

    /// Remove a product's line from the user's cart.
    ///
    /// Returns the full updated line sequence.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user has no cart or no
    /// line for this product.
    pub async fn remove_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Vec<CartItem>, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM cart_items ci
            USING carts c
            WHERE ci.cart_id = c.id AND c.user_id = $1 AND ci.product_id = $2
            ",
        )
        .bind(user_id.as_i32())
        .bind(product_id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.items(user_id).await
    }

    /// Set a line's quantity. A quantity below 1 is equivalent to removal.
    ///
    /// Returns the full updated line sequence.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user has no cart or no
    /// line for this product.
    pub async fn set_quantity(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<Vec<CartItem>, RepositoryError> {
        if quantity < 1 {
            return self.remove_item(user_id, product_id).await;
        }

        let result = sqlx::query(
            r"
            UPDATE cart_items ci
            SET quantity = $3
            FROM carts c
            WHERE ci.cart_id = c.id AND c.user_id = $1 AND ci.product_id = $2
            ",
        )
        .bind(user_id.as_i32())
        .bind(product_id.as_i32())
        .bind(quantity)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.items(user_id).await
    }

    /// Empty the user's cart. Idempotent: clearing a missing or already
    /// empty cart succeeds.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn clear(&self, user_id: UserId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM cart_items ci
            USING carts c
            WHERE ci.cart_id = c.id AND c.user_id = $1
            ",
        )
        .bind(user_id.as_i32())
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
