//! Status and category enums for catalog and order entities.

use serde::{Deserialize, Serialize};

/// Error returned when parsing an enum from its wire representation fails.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized {kind}: {value}")]
pub struct ParseEnumError {
    /// What was being parsed (e.g. "order status").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Order lifecycle status.
///
/// `Pending` is the initial state; `Processing`, `Shipped` and `Delivered`
/// follow in fulfilment order, with `Cancelled` reachable from any
/// non-terminal state. Transitions are a direct set: any of the five
/// values may be assigned at any time, including "backwards". Callers
/// that care about fulfilment order can consult [`Self::is_terminal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All recognized statuses, in fulfilment order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Whether no further transitions are expected from this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Wire/storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Processing" => Ok(Self::Processing),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            other => Err(ParseEnumError {
                kind: "order status",
                value: other.to_owned(),
            }),
        }
    }
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Boots,
    Jersey,
    Accessories,
}

impl ProductCategory {
    /// Wire/storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Boots => "boots",
            Self::Jersey => "jersey",
            Self::Accessories => "accessories",
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boots" => Ok(Self::Boots),
            "jersey" => Ok(Self::Jersey),
            "accessories" => Ok(Self::Accessories),
            other => Err(ParseEnumError {
                kind: "product category",
                value: other.to_owned(),
            }),
        }
    }
}

/// Account role carried in the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular shopper.
    #[default]
    User,
    /// Catalog and order management access.
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(ParseEnumError {
                kind: "user role",
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_order_status_roundtrip() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::from_str(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_order_status_rejects_unknown() {
        let err = OrderStatus::from_str("Refunded").unwrap_err();
        assert_eq!(err.kind, "order status");
        assert_eq!(err.value, "Refunded");
        // Case matters on the wire
        assert!(OrderStatus::from_str("pending").is_err());
    }

    #[test]
    fn test_order_status_terminal() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Processing.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
    }

    #[test]
    fn test_order_status_default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_category_roundtrip() {
        for category in [
            ProductCategory::Boots,
            ProductCategory::Jersey,
            ProductCategory::Accessories,
        ] {
            assert_eq!(
                ProductCategory::from_str(category.as_str()).unwrap(),
                category
            );
        }
        assert!(ProductCategory::from_str("gloves").is_err());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(UserRole::from_str("admin").unwrap(), UserRole::Admin);
        assert_eq!(UserRole::from_str("user").unwrap(), UserRole::User);
        assert!(UserRole::from_str("root").is_err());
    }

    #[test]
    fn test_status_serde_uses_variant_names() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap();
        assert_eq!(json, "\"Shipped\"");
    }
}
