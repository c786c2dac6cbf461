//! HTTP handler for the inventory-forecast reconciliation endpoint

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::reconciliation::{InventoryForecastResponse, ReconciliationService};
use crate::AppState;

/// Compare inventory with forecasted sales to determine shortages or
/// excesses, and derive promotion recommendations from the surplus.
pub async fn get_inventory_forecast(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> AppResult<Json<InventoryForecastResponse>> {
    let catalog = state.recipe_catalog()?;
    let forecast_service = state.forecast_service(state.config.forecast.horizon_days)?;

    let forecast = forecast_service.get_forecast().await?;
    let today = Utc::now().date_naive();

    let report = ReconciliationService::new(state.db.clone())
        .inventory_forecast(restaurant_id, &forecast, catalog, today)
        .await?;

    Ok(Json(report))
}
