//! Weather API client for fetching forecast data
//!
//! Integrates with the OpenWeatherMap forecast API. The 3-hourly entries
//! are folded into one record per day; the sales models only consume the
//! daily maximum temperature.

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Aggregated weather for a single forecast day
#[derive(Debug, Clone)]
pub struct DailyWeather {
    pub date: NaiveDate,
    pub temp_max_celsius: Decimal,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp_max: f64,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Fetch the forecast and fold it into one entry per calendar day
    ///
    /// Days come back in chronological order. An empty response is returned
    /// as-is; classifying that as "no forecast" is the caller's business.
    pub async fn get_daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<Vec<DailyWeather>> {
        let url = format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=metric",
            self.base_url, latitude, longitude, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Weather API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let data: OwmForecastResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse forecast response: {}", e))
        })?;

        Ok(fold_to_daily(data))
    }
}

/// Collapse 3-hourly forecast entries into per-day maxima
fn fold_to_daily(data: OwmForecastResponse) -> Vec<DailyWeather> {
    let mut daily: Vec<DailyWeather> = Vec::new();

    for item in data.list {
        let Some(timestamp) = DateTime::<Utc>::from_timestamp(item.dt, 0) else {
            continue;
        };
        let date = timestamp.date_naive();
        let temp = Decimal::from_f64_retain(item.main.temp_max).unwrap_or_default();

        match daily.iter_mut().find(|d| d.date == date) {
            Some(day) => {
                if temp > day.temp_max_celsius {
                    day.temp_max_celsius = temp;
                }
            }
            None => daily.push(DailyWeather {
                date,
                temp_max_celsius: temp,
            }),
        }
    }

    daily
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_hourly_entries_into_daily_maxima() {
        let data = OwmForecastResponse {
            list: vec![
                OwmForecastItem {
                    dt: 1_743_850_800, // 2025-04-05 11:00 UTC
                    main: OwmMain { temp_max: 14.2 },
                },
                OwmForecastItem {
                    dt: 1_743_861_600, // 2025-04-05 14:00 UTC
                    main: OwmMain { temp_max: 17.8 },
                },
                OwmForecastItem {
                    dt: 1_743_937_200, // 2025-04-06 11:00 UTC
                    main: OwmMain { temp_max: 12.0 },
                },
            ],
        };

        let daily = fold_to_daily(data);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2025, 4, 5).unwrap());
        assert_eq!(daily[0].temp_max_celsius, Decimal::from_f64_retain(17.8).unwrap());
        assert_eq!(daily[1].date, NaiveDate::from_ymd_opt(2025, 4, 6).unwrap());
    }

    #[test]
    fn empty_response_folds_to_empty() {
        let daily = fold_to_daily(OwmForecastResponse { list: vec![] });
        assert!(daily.is_empty());
    }
}
