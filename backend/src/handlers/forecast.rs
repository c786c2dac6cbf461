//! HTTP handlers for the sales forecast endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::MenuItemKey;
use crate::AppState;

/// Query parameters for the forecast endpoint
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub days: Option<u16>,
}

/// One predicted quantity for one menu item on one day
#[derive(Debug, Serialize)]
pub struct ForecastItemView {
    pub date: NaiveDate,
    pub item: &'static str,
    pub item_name: String,
    pub predicted_quantity: i64,
}

/// Response for the forecast endpoint
#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub items: Vec<ForecastItemView>,
}

/// Get the sales forecast for the next days
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<ForecastResponse>> {
    let horizon = query.days.unwrap_or(state.config.forecast.horizon_days);
    let service = state.forecast_service(horizon)?;
    let forecast = service.get_forecast().await?;

    let mut items = Vec::new();
    for day in &forecast.days {
        for key in MenuItemKey::ALL {
            let item_name = state
                .catalog
                .as_ref()
                .and_then(|catalog| catalog.get(key))
                .map(|recipe| recipe.name.clone())
                .unwrap_or_else(|| key.fallback_name().to_string());

            items.push(ForecastItemView {
                date: day.date,
                item: key.as_str(),
                item_name,
                predicted_quantity: day.quantity(key),
            });
        }
    }

    Ok(Json(ForecastResponse { items }))
}
