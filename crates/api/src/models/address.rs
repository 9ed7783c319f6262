//! Shipping address models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use matchday_core::{AddressId, UserId};

/// The seven required shipping fields.
///
/// Used both for the profile address (upserted in place) and for the
/// per-order snapshot rows written by the order workflow.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressFields {
    pub full_name: String,
    pub phone_number: String,
    pub street_address: String,
    pub landmark: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

/// A stored address row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    #[serde(flatten)]
    pub fields: AddressFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
