//! Configuration management for the Restaurant Operations Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with ROPS_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Weather API configuration (feeds the sales forecast models)
    pub weather: WeatherConfig,

    /// Sales forecast configuration
    pub forecast: ForecastConfig,

    /// Promotional message gateway configuration
    pub promo: PromoConfig,

    /// Recipe catalog configuration
    pub recipes: RecipesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: String,

    /// Restaurant latitude used for forecasts
    pub latitude: f64,

    /// Restaurant longitude used for forecasts
    pub longitude: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    /// Number of days to forecast ahead
    pub horizon_days: u16,

    /// Path to the per-item sales model coefficients
    pub model_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PromoConfig {
    /// Webhook that generates promotional message copy per customer
    pub webhook_url: String,

    /// Maximum concurrent message dispatches per campaign
    pub max_concurrent_dispatches: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecipesConfig {
    /// Path to the recipe catalog JSON
    pub path: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("ROPS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default(
                "weather.api_endpoint",
                "https://api.openweathermap.org/data/2.5",
            )?
            .set_default("weather.api_key", "")?
            .set_default("weather.latitude", 52.52)?
            .set_default("weather.longitude", 13.405)?
            .set_default("forecast.horizon_days", 5)?
            .set_default("forecast.model_path", "data/sales_model.json")?
            .set_default("promo.max_concurrent_dispatches", 8)?
            .set_default("recipes.path", "data/recipes.json")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (ROPS_ prefix)
            .add_source(
                Environment::with_prefix("ROPS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
        }
    }
}
