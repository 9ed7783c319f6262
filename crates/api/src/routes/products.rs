//! Catalog route handlers.
//!
//! Listing and lookup are public; mutations require the admin role.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use matchday_core::{Price, ProductCategory, ProductId};

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

use super::{require, require_some};

/// Build the catalog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list).post(create))
        .route(
            "/api/products/{id}",
            get(get_one).put(update).delete(delete),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductBody {
    name: Option<String>,
    /// Decimal string, e.g. "1500.00".
    price: Option<Decimal>,
    images: Option<Vec<String>>,
    category: Option<String>,
    quantity: Option<i32>,
}

struct ValidatedProduct {
    name: String,
    price: Price,
    images: Vec<String>,
    category: ProductCategory,
    quantity: i32,
}

impl ProductBody {
    fn validate(self) -> Result<ValidatedProduct> {
        let name = require(self.name, "name")?;
        let price = Price::new(require_some(self.price, "price")?)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let images = require_some(self.images, "images")?;
        if images.is_empty() || images.iter().any(|url| url.trim().is_empty()) {
            return Err(AppError::Validation(
                "images must contain at least one non-empty URL".to_string(),
            ));
        }

        let category: ProductCategory = require(self.category, "category")?
            .parse()
            .map_err(|_| {
                AppError::Validation(
                    "category must be one of: boots, jersey, accessories".to_string(),
                )
            })?;

        let quantity = self.quantity.unwrap_or(0);
        if quantity < 0 {
            return Err(AppError::Validation(
                "quantity cannot be negative".to_string(),
            ));
        }

        Ok(ValidatedProduct {
            name,
            price,
            images,
            category,
            quantity,
        })
    }
}

/// List the whole catalog.
async fn list(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(json!({ "products": products })))
}

/// Get one product.
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let product = ProductRepository::new(state.pool())
        .get(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(json!({ "product": product })))
}

/// Add a product to the catalog.
async fn create(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<ProductBody>,
) -> Result<impl IntoResponse> {
    let p = body.validate()?;

    let product = ProductRepository::new(state.pool())
        .create(&p.name, p.price, &p.images, p.category, p.quantity)
        .await?;

    tracing::info!(product_id = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(json!({ "product": product }))))
}

/// Overwrite a product.
async fn update(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ProductBody>,
) -> Result<impl IntoResponse> {
    let p = body.validate()?;

    let product = ProductRepository::new(state.pool())
        .update(
            ProductId::new(id),
            &p.name,
            p.price,
            &p.images,
            p.category,
            p.quantity,
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(json!({ "product": product })))
}

/// Remove a product from the catalog.
async fn delete(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let deleted = ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    Ok(Json(json!({ "message": "Product deleted" })))
}
