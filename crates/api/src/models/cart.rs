//! Cart line model and total arithmetic.

use serde::Serialize;

use matchday_core::{Price, ProductId};

/// One line of a user's cart.
///
/// `product_name`, `product_image` and `price` are denormalized copies
/// captured when the line was first added; a later product edit does not
/// retroactively change them. Quantity is always at least 1 - dropping
/// below 1 removes the line instead.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_image: String,
    pub price: Price,
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line (`price` x `quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.line_total(self.quantity)
    }
}

/// Sum of all line totals.
#[must_use]
pub fn cart_total(items: &[CartItem]) -> Price {
    Price::sum(items.iter().map(CartItem::line_total))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn item(product_id: i32, price: &str, quantity: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new(product_id),
            product_name: format!("product {product_id}"),
            product_image: "https://cdn.example/img.jpg".to_string(),
            price: Price::new(price.parse().unwrap()).unwrap(),
            quantity,
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(
            item(1, "500", 2).line_total().amount(),
            Decimal::from(1000)
        );
    }

    #[test]
    fn test_cart_total_two_lines() {
        // 2 x 500 + 1 x 1500 = 2500
        let items = [item(1, "500", 2), item(2, "1500", 1)];
        assert_eq!(cart_total(&items).amount(), Decimal::from(2500));
    }

    #[test]
    fn test_cart_total_empty_is_zero() {
        assert_eq!(cart_total(&[]), Price::ZERO);
    }

    #[test]
    fn test_cart_total_fractional_prices() {
        let items = [item(1, "19.99", 3)];
        assert_eq!(
            cart_total(&items).amount(),
            "59.97".parse::<Decimal>().unwrap()
        );
    }
}
