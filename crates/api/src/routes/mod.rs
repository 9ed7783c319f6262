//! Route handlers for the public JSON API.
//!
//! Request bodies deserialize into structs of `Option` fields and are
//! validated by hand, so a missing field is always a 400 with a
//! `{"message"}` body naming the field, never a framework-shaped 422.

use axum::Router;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::AddressFields;
use crate::state::AppState;

pub mod address;
pub mod auth;
pub mod cart;
pub mod orders;
pub mod players;
pub mod products;
pub mod wishlist;

/// Build the complete API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(products::router())
        .merge(cart::router())
        .merge(address::router())
        .merge(orders::router())
        .merge(wishlist::router())
        .merge(players::router())
}

/// Require a non-blank string field.
pub(crate) fn require(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!(
            "missing required field: {field}"
        ))),
    }
}

/// Require any field to be present.
pub(crate) fn require_some<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("missing required field: {field}")))
}

/// The seven shipping fields as they arrive on the wire.
///
/// Shared by the profile address endpoints and order creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddressBody {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub street_address: Option<String>,
    pub landmark: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl AddressBody {
    /// Validate that all seven fields are present and non-blank.
    pub(crate) fn into_fields(self) -> Result<AddressFields, AppError> {
        Ok(AddressFields {
            full_name: require(self.full_name, "fullName")?,
            phone_number: require(self.phone_number, "phoneNumber")?,
            street_address: require(self.street_address, "streetAddress")?,
            landmark: require(self.landmark, "landmark")?,
            city: require(self.city, "city")?,
            state: require(self.state, "state")?,
            country: require(self.country, "country")?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn full_body() -> AddressBody {
        AddressBody {
            full_name: Some("Asha Rai".to_string()),
            phone_number: Some("9800000000".to_string()),
            street_address: Some("Baneshwor 12".to_string()),
            landmark: Some("Near the stadium".to_string()),
            city: Some("Kathmandu".to_string()),
            state: Some("Bagmati".to_string()),
            country: Some("Nepal".to_string()),
        }
    }

    #[test]
    fn test_require_rejects_missing_and_blank() {
        assert!(require(None, "city").is_err());
        assert!(require(Some("   ".to_string()), "city").is_err());
        assert_eq!(require(Some("Kathmandu".to_string()), "city").unwrap(), "Kathmandu");
    }

    #[test]
    fn test_address_body_complete() {
        let fields = full_body().into_fields().unwrap();
        assert_eq!(fields.full_name, "Asha Rai");
        assert_eq!(fields.country, "Nepal");
    }

    #[test]
    fn test_address_body_missing_field_names_it() {
        let mut body = full_body();
        body.landmark = None;
        let err = body.into_fields().unwrap_err();
        assert!(err.to_string().contains("landmark"));
    }
}
