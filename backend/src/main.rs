//! Restaurant Operations Platform - Backend Server
//!
//! REST backend for restaurant inventory tracking, weather-driven sales
//! forecasting, inventory-forecast reconciliation and promotional campaign
//! messaging.

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shared::models::RecipeCatalog;

mod config;
mod db;
mod error;
mod external;
mod handlers;
mod models;
mod routes;
mod services;

pub use config::Config;

use error::{AppError, AppResult};
use external::{PromoGatewayClient, WeatherClient};
use services::forecast::SalesModel;
use services::{CampaignService, ForecastService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    /// Recipe catalog, absent when the resource failed to load
    pub catalog: Option<Arc<RecipeCatalog>>,
    /// Sales model coefficients, absent when the resource failed to load
    pub sales_model: Option<Arc<SalesModel>>,
}

impl AppState {
    /// Recipe catalog, or a configuration error when it failed to load
    pub fn recipe_catalog(&self) -> AppResult<&RecipeCatalog> {
        self.catalog
            .as_deref()
            .ok_or_else(|| AppError::Configuration("Recipe catalog unavailable".to_string()))
    }

    /// Build the forecast service for a horizon
    pub fn forecast_service(&self, horizon_days: u16) -> AppResult<ForecastService> {
        let model = self
            .sales_model
            .clone()
            .ok_or_else(|| AppError::Configuration("Sales model unavailable".to_string()))?;

        let client = WeatherClient::new(
            self.config.weather.api_key.clone(),
            self.config.weather.api_endpoint.clone(),
        );

        Ok(ForecastService::new(
            client,
            model,
            self.config.weather.latitude,
            self.config.weather.longitude,
            horizon_days,
        ))
    }

    /// Build the campaign service
    pub fn campaign_service(&self) -> CampaignService {
        let gateway = PromoGatewayClient::new(self.config.promo.webhook_url.clone());
        CampaignService::new(
            self.db.clone(),
            gateway,
            self.config.promo.max_concurrent_dispatches,
        )
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rops_server=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Restaurant Operations Server");
    tracing::info!("Environment: {}", config.environment);

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations and seed the demo dataset in development
    if config.environment == "development" {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");

        if db::seed::seed_if_empty(&db_pool, "data/seed_data.json").await? {
            tracing::info!("Demo dataset seeded");
        }
    }

    // Load the recipe catalog; the server still starts without it, but
    // catalog-dependent endpoints answer with a configuration error
    let catalog = match services::catalog::load_recipe_catalog(&config.recipes.path) {
        Ok(catalog) => {
            tracing::info!("Loaded {} recipes", catalog.len());
            Some(Arc::new(catalog))
        }
        Err(e) => {
            tracing::warn!("Recipe catalog unavailable: {}", e);
            None
        }
    };

    // Same policy for the sales model coefficients
    let sales_model = match SalesModel::load(&config.forecast.model_path) {
        Ok(model) => Some(Arc::new(model)),
        Err(e) => {
            tracing::warn!("Sales model unavailable: {}", e);
            None
        }
    };

    // Create application state
    let state = AppState {
        db: db_pool,
        config: Arc::new(config.clone()),
        catalog,
        sales_model,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Restaurant Operations Platform API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
