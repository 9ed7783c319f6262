//! Non-negative price representation using decimal arithmetic.
//!
//! The shop trades in a single currency, so a [`Price`] is just a
//! validated `Decimal`. Cart lines and order items snapshot a `Price`
//! at add-time; order totals are computed with [`Price::line_total`]
//! and [`Price::sum`].

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative monetary amount.
///
/// Stored and transmitted as a decimal string to avoid floating-point
/// rounding in totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The total for a line of `quantity` units at this unit price.
    #[must_use]
    pub fn line_total(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Sum an iterator of prices.
    ///
    /// Non-negativity is closed under addition, so no re-validation is needed.
    #[must_use]
    pub fn sum<I: IntoIterator<Item = Self>>(prices: I) -> Self {
        Self(prices.into_iter().map(|p| p.0).sum())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

// SQLx support (with postgres feature): stored as NUMERIC
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::new(amount)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_rejects_negative() {
        assert!(matches!(
            Price::new(dec("-1")),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn test_new_accepts_zero() {
        assert_eq!(Price::new(Decimal::ZERO).unwrap(), Price::ZERO);
    }

    #[test]
    fn test_new_accepts_negative_zero() {
        // Decimal distinguishes -0; a zero amount is never an error
        assert!(Price::new(dec("-0")).is_ok());
    }

    #[test]
    fn test_line_total() {
        let unit = Price::new(dec("500")).unwrap();
        assert_eq!(unit.line_total(2).amount(), dec("1000"));
        assert_eq!(unit.line_total(0).amount(), Decimal::ZERO);
    }

    #[test]
    fn test_sum() {
        let prices = [
            Price::new(dec("500")).unwrap().line_total(2),
            Price::new(dec("1500")).unwrap().line_total(1),
        ];
        assert_eq!(Price::sum(prices).amount(), dec("2500"));
    }

    #[test]
    fn test_display_two_decimals() {
        let price = Price::new(dec("19.9")).unwrap();
        assert_eq!(price.to_string(), "19.90");
    }

    #[test]
    fn test_serde_is_transparent() {
        let price = Price::new(dec("1500")).unwrap();
        let json = serde_json::to_string(&price).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }
}
