//! Catalog product model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use matchday_core::{Price, ProductCategory, ProductId};

/// A sellable item.
///
/// Cart lines snapshot `name`, the first image, and `price` at add-time;
/// editing a product never rewrites existing snapshots.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Ordered, non-empty; the first entry is the display image.
    pub images: Vec<String>,
    pub category: ProductCategory,
    /// Stock count.
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The image snapshotted onto new cart lines.
    #[must_use]
    pub fn display_image(&self) -> &str {
        self.images.first().map_or("", String::as_str)
    }
}
