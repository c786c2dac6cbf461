//! HTTP handlers for ingredient order endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::order::{CreateOrderInput, OrderListResponse, OrderResponse, OrderService};
use crate::AppState;

/// Place an order for an inventory item
pub async fn create_order(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
    Json(input): Json<CreateOrderInput>,
) -> AppResult<(StatusCode, Json<OrderResponse>)> {
    let service = OrderService::new(state.db);
    let order = service.create(restaurant_id, input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// List all orders for a restaurant
pub async fn list_restaurant_orders(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> AppResult<Json<OrderListResponse>> {
    let service = OrderService::new(state.db);
    let orders = service.list(restaurant_id).await?;
    Ok(Json(orders))
}
