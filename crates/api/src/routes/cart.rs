//! Cart route handlers.
//!
//! The cart endpoints identify the user by an explicit `userId` in the
//! body rather than a bearer token; carts exist before login in the
//! client flow.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;

use matchday_core::{ProductId, UserId};

use crate::db::RepositoryError;
use crate::db::carts::CartRepository;
use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

use super::require_some;

/// Build the cart router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/cart/add", post(add))
        .route("/api/cart/{user_id}", get(get_cart))
        .route("/api/cart/remove", post(remove))
        .route("/api/cart/update", post(update_quantity))
        .route("/api/cart/clear", post(clear))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuantityRequest {
    user_id: Option<i32>,
    product_id: Option<i32>,
    quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineRequest {
    user_id: Option<i32>,
    product_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClearRequest {
    user_id: Option<i32>,
}

/// Treat a repository miss as a 404 on the cart line.
fn map_line_error(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::NotFound => AppError::NotFound("cart item".to_string()),
        other => other.into(),
    }
}

/// Add a product to the cart, creating the cart on first use.
async fn add(
    State(state): State<AppState>,
    Json(body): Json<QuantityRequest>,
) -> Result<impl IntoResponse> {
    let user_id = UserId::new(require_some(body.user_id, "userId")?);
    let product_id = ProductId::new(require_some(body.product_id, "productId")?);
    let quantity = require_some(body.quantity, "quantity")?;

    if quantity < 1 {
        return Err(AppError::Validation(
            "quantity must be at least 1".to_string(),
        ));
    }
    let quantity = u32::try_from(quantity)
        .map_err(|_| AppError::Validation("quantity is too large".to_string()))?;

    let product = ProductRepository::new(state.pool())
        .get(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let cart = CartRepository::new(state.pool())
        .add_item(user_id, &product, quantity)
        .await?;

    Ok(Json(json!({ "cart": cart })))
}

/// The user's cart; an empty sequence if none exists yet.
async fn get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse> {
    let cart = CartRepository::new(state.pool())
        .items(UserId::new(user_id))
        .await?;

    Ok(Json(json!({ "cart": cart })))
}

/// Remove one product's line from the cart.
async fn remove(
    State(state): State<AppState>,
    Json(body): Json<LineRequest>,
) -> Result<impl IntoResponse> {
    let user_id = UserId::new(require_some(body.user_id, "userId")?);
    let product_id = ProductId::new(require_some(body.product_id, "productId")?);

    let cart = CartRepository::new(state.pool())
        .remove_item(user_id, product_id)
        .await
        .map_err(map_line_error)?;

    Ok(Json(json!({ "cart": cart })))
}

/// Set a line's quantity; a quantity below 1 removes the line.
async fn update_quantity(
    State(state): State<AppState>,
    Json(body): Json<QuantityRequest>,
) -> Result<impl IntoResponse> {
    let user_id = UserId::new(require_some(body.user_id, "userId")?);
    let product_id = ProductId::new(require_some(body.product_id, "productId")?);
    let quantity = require_some(body.quantity, "quantity")?;
    let quantity = i32::try_from(quantity)
        .map_err(|_| AppError::Validation("quantity is out of range".to_string()))?;

    let cart = CartRepository::new(state.pool())
        .set_quantity(user_id, product_id, quantity)
        .await
        .map_err(map_line_error)?;

    Ok(Json(json!({ "cart": cart })))
}

/// Empty the cart. Idempotent.
async fn clear(
    State(state): State<AppState>,
    Json(body): Json<ClearRequest>,
) -> Result<impl IntoResponse> {
    let user_id = UserId::new(require_some(body.user_id, "userId")?);

    CartRepository::new(state.pool()).clear(user_id).await?;

    Ok(Json(json!({ "cart": [] })))
}
