//! Profile address repository.
//!
//! Holds the user's *current* shipping address, one row per user with
//! upsert semantics. The order workflow never reads or writes this
//! table; it snapshots addresses into `order_addresses` instead.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use matchday_core::{AddressId, UserId};

use super::RepositoryError;
use crate::models::{Address, AddressFields};

#[derive(sqlx::FromRow)]
struct AddressRow {
    id: i32,
    user_id: i32,
    full_name: String,
    phone_number: String,
    street_address: String,
    landmark: String,
    city: String,
    state: String,
    country: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: AddressId::new(row.id),
            user_id: UserId::new(row.user_id),
            fields: AddressFields {
                full_name: row.full_name,
                phone_number: row.phone_number,
                street_address: row.street_address,
                landmark: row.landmark,
                city: row.city,
                state: row.state,
                country: row.country,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const RETURNING: &str = "id, user_id, full_name, phone_number, street_address, landmark, \
                         city, state, country, created_at, updated_at";

/// Repository for the profile address store.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create or overwrite the user's profile address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn upsert(
        &self,
        user_id: UserId,
        fields: &AddressFields,
    ) -> Result<Address, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(&format!(
            r"
            INSERT INTO addresses
                (user_id, full_name, phone_number, street_address, landmark, city, state, country)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                phone_number = EXCLUDED.phone_number,
                street_address = EXCLUDED.street_address,
                landmark = EXCLUDED.landmark,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                country = EXCLUDED.country,
                updated_at = NOW()
            RETURNING {RETURNING}
            "
        ))
        .bind(user_id.as_i32())
        .bind(&fields.full_name)
        .bind(&fields.phone_number)
        .bind(&fields.street_address)
        .bind(&fields.landmark)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.country)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Get the user's profile address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, user_id: UserId) -> Result<Option<Address>, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(&format!(
            "SELECT {RETURNING} FROM addresses WHERE user_id = $1"
        ))
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Address::from))
    }

    /// Delete the user's profile address. Returns `false` if none existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, user_id: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM addresses WHERE user_id = $1")
            .bind(user_id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
