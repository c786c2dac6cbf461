//! HTTP handlers for restaurant endpoints

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::AppResult;
use crate::models::Restaurant;
use crate::services::RestaurantService;
use crate::AppState;

/// Response for the restaurant listing
#[derive(Debug, Serialize)]
pub struct RestaurantListResponse {
    pub restaurants: Vec<Restaurant>,
}

/// List all restaurants
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> AppResult<Json<RestaurantListResponse>> {
    let service = RestaurantService::new(state.db);
    let restaurants = service.list().await?;
    Ok(Json(RestaurantListResponse { restaurants }))
}
