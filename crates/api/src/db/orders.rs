//! Order workflow repository.
//!
//! Order creation converts the user's current cart into an immutable
//! order: an address snapshot row, an order row, and value copies of
//! every cart line, all inside one transaction so a failure at any
//! point leaves no orphaned snapshot. The item copies and the address
//! snapshot are never updated after commit; the only mutable order
//! field is `status`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use matchday_core::{AddressId, OrderId, OrderStatus, Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::{
    AddressFields, Order, OrderDetail, OrderItem, cart::CartItem, order_total,
};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    order_address_id: i32,
    payment: String,
    total_price: Price,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, RepositoryError> {
        let status: OrderStatus = self.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(Order {
            id: OrderId::new(self.id),
            user_id: UserId::new(self.user_id),
            address_id: AddressId::new(self.order_address_id),
            payment: self.payment,
            total_price: self.total_price,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct OrderWithAddressRow {
    id: i32,
    user_id: i32,
    order_address_id: i32,
    payment: String,
    total_price: Price,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    full_name: String,
    phone_number: String,
    street_address: String,
    landmark: String,
    city: String,
    state: String,
    country: String,
}

impl OrderWithAddressRow {
    fn into_detail(self) -> Result<OrderDetail, RepositoryError> {
        let address = AddressFields {
            full_name: self.full_name,
            phone_number: self.phone_number,
            street_address: self.street_address,
            landmark: self.landmark,
            city: self.city,
            state: self.state,
            country: self.country,
        };
        let order = OrderRow {
            id: self.id,
            user_id: self.user_id,
            order_address_id: self.order_address_id,
            payment: self.payment,
            total_price: self.total_price,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_order()?;

        Ok(OrderDetail {
            order,
            cart_items: Vec::new(),
            address,
        })
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    order_id: i32,
    product_id: i32,
    product_name: String,
    quantity: i32,
    price: Price,
}

impl OrderItemRow {
    fn into_item(self) -> Result<(OrderId, OrderItem), RepositoryError> {
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "negative quantity in order {} item",
                self.order_id
            ))
        })?;

        Ok((
            OrderId::new(self.order_id),
            OrderItem {
                product_id: ProductId::new(self.product_id),
                product_name: self.product_name,
                quantity,
                price: self.price,
            },
        ))
    }
}

const SELECT_DETAIL: &str = r"
    SELECT o.id, o.user_id, o.order_address_id, o.payment, o.total_price, o.status,
           o.created_at, o.updated_at,
           a.full_name, a.phone_number, a.street_address, a.landmark,
           a.city, a.state, a.country
    FROM orders o
    JOIN order_addresses a ON a.id = o.order_address_id
";

/// Repository for the order workflow.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Convert the user's current cart into a new `Pending` order.
    ///
    /// Reads the cart, snapshots the supplied address into a fresh
    /// `order_addresses` row, and copies every cart line by value into
    /// `order_items`, computing `total_price` from the snapshot - all in
    /// one transaction. The cart itself is left untouched; clearing it
    /// after the client acknowledges the order is the caller's business.
    ///
    /// Returns `Ok(None)` when the cart has no lines; nothing is written
    /// in that case.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails (the
    /// transaction rolls back).
    pub async fn create(
        &self,
        user_id: UserId,
        payment: &str,
        address: &AddressFields,
    ) -> Result<Option<OrderDetail>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let lines = sqlx::query_as::<_, super::carts::CartItemRow>(
            r"
            SELECT ci.product_id, ci.product_name, ci.product_image, ci.price, ci.quantity
            FROM cart_items ci
            JOIN carts c ON c.id = ci.cart_id
            WHERE c.user_id = $1
            ORDER BY ci.id
            ",
        )
        .bind(user_id.as_i32())
        .fetch_all(&mut *tx)
        .await?;

        let lines: Vec<CartItem> = lines
            .into_iter()
            .map(super::carts::CartItemRow::into_item)
            .collect::<Result<_, _>>()?;

        if lines.is_empty() {
            return Ok(None);
        }

        let items: Vec<OrderItem> = lines.iter().map(OrderItem::from).collect();
        let total = order_total(&items);

        let address_id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO order_addresses
                (user_id, full_name, phone_number, street_address, landmark, city, state, country)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            ",
        )
        .bind(user_id.as_i32())
        .bind(&address.full_name)
        .bind(&address.phone_number)
        .bind(&address.street_address)
        .bind(&address.landmark)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.country)
        .fetch_one(&mut *tx)
        .await?;

        let order_row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (user_id, order_address_id, payment, total_price, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, order_address_id, payment, total_price, status,
                      created_at, updated_at
            ",
        )
        .bind(user_id.as_i32())
        .bind(address_id)
        .bind(payment)
        .bind(total)
        .bind(OrderStatus::Pending.as_str())
        .fetch_one(&mut *tx)
        .await?;

        for item in &items {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, product_id, product_name, quantity, price)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(order_row.id)
            .bind(item.product_id.as_i32())
            .bind(&item.product_name)
            .bind(i32::try_from(item.quantity).unwrap_or(i32::MAX))
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let order = order_row.into_order()?;
        Ok(Some(OrderDetail {
            order,
            cart_items: items,
            address: address.clone(),
        }))
    }

    /// All orders of one user, newest first, with items and address resolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderDetail>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderWithAddressRow>(&format!(
            "{SELECT_DETAIL} WHERE o.user_id = $1 ORDER BY o.created_at DESC, o.id DESC"
        ))
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        self.attach_items(rows).await
    }

    /// Every order in the store, newest first, with items and address resolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_all(&self) -> Result<Vec<OrderDetail>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderWithAddressRow>(&format!(
            "{SELECT_DETAIL} ORDER BY o.created_at DESC, o.id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        self.attach_items(rows).await
    }

    /// Set an order's status. Any of the five recognized values is
    /// accepted regardless of the current status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            UPDATE orders
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, order_address_id, payment, total_price, status,
                      created_at, updated_at
            ",
        )
        .bind(order_id.as_i32())
        .bind(status.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(OrderRow::into_order).transpose()
    }

    /// Hard-delete an order, its items and its address snapshot.
    /// Returns `false` if no such order existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a statement fails.
    pub async fn delete(&self, order_id: OrderId) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let address_id: Option<i32> = sqlx::query_scalar(
            "DELETE FROM orders WHERE id = $1 RETURNING order_address_id",
        )
        .bind(order_id.as_i32())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(address_id) = address_id else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM order_addresses WHERE id = $1")
            .bind(address_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Fetch the items of the given orders and group them onto the details.
    async fn attach_items(
        &self,
        rows: Vec<OrderWithAddressRow>,
    ) -> Result<Vec<OrderDetail>, RepositoryError> {
        let mut details: Vec<OrderDetail> = rows
            .into_iter()
            .map(OrderWithAddressRow::into_detail)
            .collect::<Result<_, _>>()?;

        if details.is_empty() {
            return Ok(details);
        }

        let ids: Vec<i32> = details.iter().map(|d| d.order.id.as_i32()).collect();

        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT order_id, product_id, product_name, quantity, price
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY id
            ",
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        for row in item_rows {
            let (order_id, item) = row.into_item()?;
            if let Some(detail) = details.iter_mut().find(|d| d.order.id == order_id) {
                detail.cart_items.push(item);
            }
        }

        Ok(details)
    }
}
