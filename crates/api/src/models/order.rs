//! Order models and total arithmetic.

use chrono::{DateTime, Utc};
use serde::Serialize;

use matchday_core::{AddressId, OrderId, OrderStatus, Price, ProductId, UserId};

use super::address::AddressFields;
use super::cart::CartItem;

/// One item of an order: a value copy of a cart line at checkout time.
///
/// Never re-synced with the catalog or the source cart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub price: Price,
}

impl From<&CartItem> for OrderItem {
    fn from(line: &CartItem) -> Self {
        Self {
            product_id: line.product_id,
            product_name: line.product_name.clone(),
            quantity: line.quantity,
            price: line.price,
        }
    }
}

/// An order row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// References the order-specific address snapshot, not the profile address.
    pub address_id: AddressId,
    /// Free-form payment label (e.g. "COD", "Khalti").
    pub payment: String,
    pub total_price: Price,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An order with its items and address snapshot resolved for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub cart_items: Vec<OrderItem>,
    pub address: AddressFields,
}

/// Sum of `price x quantity` over the items.
#[must_use]
pub fn order_total(items: &[OrderItem]) -> Price {
    Price::sum(items.iter().map(|item| item.price.line_total(item.quantity)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn cart_item(product_id: i32, price: &str, quantity: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new(product_id),
            product_name: format!("product {product_id}"),
            product_image: "https://cdn.example/img.jpg".to_string(),
            price: Price::new(price.parse().unwrap()).unwrap(),
            quantity,
        }
    }

    #[test]
    fn test_order_item_copies_cart_line_by_value() {
        let mut line = cart_item(7, "999.50", 2);
        let item = OrderItem::from(&line);

        // Mutating the source line afterwards must not affect the copy
        line.quantity = 99;
        line.product_name.clear();

        assert_eq!(item.product_id, ProductId::new(7));
        assert_eq!(item.product_name, "product 7");
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_order_total_checkout_scenario() {
        // 2 x 500 + 1 x 1500 = 2500
        let items: Vec<OrderItem> = [cart_item(1, "500", 2), cart_item(2, "1500", 1)]
            .iter()
            .map(OrderItem::from)
            .collect();
        assert_eq!(order_total(&items).amount(), Decimal::from(2500));
    }

    #[test]
    fn test_order_total_empty_is_zero() {
        assert_eq!(order_total(&[]), Price::ZERO);
    }
}
