//! HTTP handlers for campaign and promotion endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::campaign::{
    RestaurantCampaignResponse, StartCampaignInput, StartCampaignResponse,
};
use crate::AppState;

/// Create a campaign and send promotional messages to all customers.
///
/// The body is optional; an empty request starts an unnamed campaign
/// without a dedup key.
pub async fn start_campaign(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
    input: Option<Json<StartCampaignInput>>,
) -> AppResult<Json<StartCampaignResponse>> {
    let input = input.map(|Json(input)| input).unwrap_or_default();
    let service = state.campaign_service();
    let response = service.start_campaign(restaurant_id, input).await?;
    Ok(Json(response))
}

/// Get campaigns, conversations and customers for a restaurant
pub async fn get_restaurant_campaigns(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> AppResult<Json<RestaurantCampaignResponse>> {
    let service = state.campaign_service();
    let response = service.restaurant_campaigns(restaurant_id).await?;
    Ok(Json(response))
}
