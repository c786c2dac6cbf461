//! Sales forecast service
//!
//! The forecasting oracle: fetches a daily weather forecast and runs each
//! menu item's regression model over it to predict sales quantities for
//! the configured horizon. Callers only ever see whole-unit, non-negative
//! predictions per day, or a "forecast unavailable" error — never a
//! partial result.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::{DailySalesForecast, MenuItemKey, SalesForecast};

use crate::error::{AppError, AppResult};
use crate::external::weather::{DailyWeather, WeatherClient};

/// Regression coefficients for one menu item
///
/// Predicted quantity = base + temp_coefficient * (temp_max - reference_temp),
/// plus weekend_boost on Saturdays and Sundays.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemModel {
    pub base: Decimal,
    pub temp_coefficient: Decimal,
    pub reference_temp: Decimal,
    pub weekend_boost: Decimal,
}

/// Per-item sales regression models
#[derive(Debug, Clone)]
pub struct SalesModel {
    items: HashMap<MenuItemKey, ItemModel>,
}

impl SalesModel {
    /// Load model coefficients from a JSON file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!(
                "Could not read sales model from {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::parse(&raw)
    }

    /// Parse model coefficients from JSON
    pub fn parse(raw: &str) -> AppResult<Self> {
        let items: HashMap<MenuItemKey, ItemModel> = serde_json::from_str(raw)
            .map_err(|e| AppError::Configuration(format!("Malformed sales model: {}", e)))?;

        if items.is_empty() {
            return Err(AppError::Configuration(
                "Sales model contains no menu items".to_string(),
            ));
        }

        Ok(Self { items })
    }

    /// Predict sales for one menu item on one day, rounded to whole units
    /// and clamped at zero. Items without a model predict zero.
    pub fn predict(&self, key: MenuItemKey, date: NaiveDate, temp_max_celsius: Decimal) -> i64 {
        let Some(model) = self.items.get(&key) else {
            return 0;
        };

        let mut quantity =
            model.base + model.temp_coefficient * (temp_max_celsius - model.reference_temp);
        if is_weekend(date) {
            quantity += model.weekend_boost;
        }

        quantity.round().to_i64().unwrap_or(0).max(0)
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Sales forecast service combining weather data with the regression models
#[derive(Clone)]
pub struct ForecastService {
    weather_client: WeatherClient,
    model: Arc<SalesModel>,
    latitude: f64,
    longitude: f64,
    horizon_days: u16,
}

impl ForecastService {
    /// Create a new ForecastService instance
    pub fn new(
        weather_client: WeatherClient,
        model: Arc<SalesModel>,
        latitude: f64,
        longitude: f64,
        horizon_days: u16,
    ) -> Self {
        Self {
            weather_client,
            model,
            latitude,
            longitude,
            horizon_days,
        }
    }

    /// Produce the sales forecast for the configured horizon.
    ///
    /// A failing or empty weather upstream surfaces as `ForecastUnavailable`;
    /// the core never computes against a partial forecast.
    pub async fn get_forecast(&self) -> AppResult<SalesForecast> {
        let daily = match self
            .weather_client
            .get_daily_forecast(self.latitude, self.longitude)
            .await
        {
            Ok(daily) => daily,
            Err(e) => {
                tracing::warn!("Weather upstream failed: {}", e);
                return Err(AppError::ForecastUnavailable);
            }
        };

        if daily.is_empty() {
            return Err(AppError::ForecastUnavailable);
        }

        let days = daily
            .into_iter()
            .take(self.horizon_days as usize)
            .map(|weather| self.predict_day(&weather))
            .collect();

        Ok(SalesForecast { days })
    }

    fn predict_day(&self, weather: &DailyWeather) -> DailySalesForecast {
        let quantities = MenuItemKey::ALL
            .iter()
            .map(|key| {
                (
                    *key,
                    self.model
                        .predict(*key, weather.date, weather.temp_max_celsius),
                )
            })
            .collect();

        DailySalesForecast {
            date: weather.date,
            quantities,
        }
    }
}
