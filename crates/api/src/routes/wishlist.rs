//! Wishlist route handlers.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;

use matchday_core::ProductId;

use crate::db::RepositoryError;
use crate::db::products::ProductRepository;
use crate::db::wishlists::WishlistRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

use super::require_some;

/// Build the wishlist router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/wishlist", get(list))
        .route("/api/wishlist/add", post(add))
        .route("/api/wishlist/remove", post(remove))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WishlistRequest {
    product_id: Option<i32>,
}

/// The caller's wishlisted products.
async fn list(
    RequireAuth(claims): RequireAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let wishlist = WishlistRepository::new(state.pool()).list(claims.id).await?;

    Ok(Json(json!({ "wishlist": wishlist })))
}

/// Add a product to the caller's wishlist. Adding twice is a no-op.
async fn add(
    RequireAuth(claims): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<WishlistRequest>,
) -> Result<impl IntoResponse> {
    let product_id = ProductId::new(require_some(body.product_id, "productId")?);

    // The wishlist stores live references, so the product must exist
    ProductRepository::new(state.pool())
        .get(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let repo = WishlistRepository::new(state.pool());
    repo.add(claims.id, product_id).await?;
    let wishlist = repo.list(claims.id).await?;

    Ok(Json(json!({ "wishlist": wishlist })))
}

/// Remove a product from the caller's wishlist.
async fn remove(
    RequireAuth(claims): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<WishlistRequest>,
) -> Result<impl IntoResponse> {
    let product_id = ProductId::new(require_some(body.product_id, "productId")?);

    let repo = WishlistRepository::new(state.pool());
    repo.remove(claims.id, product_id).await.map_err(|e| match e {
        RepositoryError::NotFound => AppError::NotFound("wishlist item".to_string()),
        other => other.into(),
    })?;
    let wishlist = repo.list(claims.id).await?;

    Ok(Json(json!({ "wishlist": wishlist })))
}
