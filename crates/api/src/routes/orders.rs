//! Order workflow route handlers.
//!
//! Checkout reads the caller's cart and materializes an order; the cart
//! is deliberately left in place until the client confirms the order to
//! the user and clears it (see the cart routes).

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete as delete_route, get, post, put},
};
use serde::Deserialize;
use serde_json::json;

use matchday_core::{OrderId, OrderStatus};

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::state::AppState;

use super::{AddressBody, require};

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders/create", post(create))
        .route("/api/orders", get(list_mine))
        .route("/api/orders/all", get(list_all))
        .route("/api/orders/update/{id}", put(update_status))
        .route("/api/orders/delete/{id}", delete_route(delete))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderRequest {
    payment: Option<String>,
    #[serde(flatten)]
    address: AddressBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateStatusRequest {
    status: Option<String>,
}

/// Convert the caller's cart into a new `Pending` order.
async fn create(
    RequireAuth(claims): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse> {
    let payment = require(body.payment, "payment")?;
    let address = body.address.into_fields()?;

    let order = OrderRepository::new(state.pool())
        .create(claims.id, &payment, &address)
        .await?
        .ok_or(AppError::EmptyCart)?;

    tracing::info!(
        order_id = %order.order.id,
        user_id = %claims.id,
        total = %order.order.total_price,
        "order created"
    );

    Ok((StatusCode::CREATED, Json(json!({ "order": order }))))
}

/// The caller's orders, newest first.
async fn list_mine(
    RequireAuth(claims): RequireAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(claims.id)
        .await?;

    Ok(Json(json!({ "orders": orders })))
}

/// Every order in the store. Admin only.
async fn list_all(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;

    Ok(Json(json!({ "orders": orders })))
}

/// Set an order's status.
///
/// Any of the five recognized values is accepted regardless of the
/// current status; anything else is a 400.
async fn update_status(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse> {
    let status: OrderStatus = require(body.status, "status")?
        .parse()
        .map_err(|_| AppError::Validation("Invalid order status".to_string()))?;

    let order = OrderRepository::new(state.pool())
        .update_status(OrderId::new(id), status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    Ok(Json(json!({ "order": order })))
}

/// Hard-delete an order.
async fn delete(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    let deleted = OrderRepository::new(state.pool())
        .delete(OrderId::new(id))
        .await?;

    if !deleted {
        return Err(AppError::NotFound(format!("order {id}")));
    }

    Ok(Json(json!({ "message": "Order deleted" })))
}
