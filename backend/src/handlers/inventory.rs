//! HTTP handlers for inventory endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::inventory::{InventoryService, RestaurantInventoryResponse};
use crate::AppState;

/// Get inventory for a restaurant
pub async fn get_restaurant_inventory(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> AppResult<Json<RestaurantInventoryResponse>> {
    let service = InventoryService::new(state.db);
    let inventory = service.list_for_restaurant(restaurant_id).await?;
    Ok(Json(inventory))
}
