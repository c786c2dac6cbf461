//! Route definitions for the Restaurant Operations Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Restaurant directory
        .nest("/restaurants", restaurant_routes())
        // Inventory per restaurant
        .nest("/inventory", inventory_routes())
        // Ingredient orders
        .nest("/orders", order_routes())
        // Sales forecast
        .nest("/forecast", forecast_routes())
        // Inventory-forecast reconciliation
        .nest("/inventory-forecast", inventory_forecast_routes())
        // Campaign creation and messaging
        .nest("/campaigns", campaign_routes())
        // Promotion management data
        .nest("/promotions", promotion_routes())
}

/// Restaurant directory routes
fn restaurant_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::list_restaurants))
}

/// Inventory routes
fn inventory_routes() -> Router<AppState> {
    Router::new().route(
        "/restaurant/:restaurant_id",
        get(handlers::get_restaurant_inventory),
    )
}

/// Ingredient order routes
fn order_routes() -> Router<AppState> {
    Router::new().route(
        "/restaurant/:restaurant_id",
        get(handlers::list_restaurant_orders).post(handlers::create_order),
    )
}

/// Sales forecast routes
fn forecast_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::get_forecast))
}

/// Inventory-forecast reconciliation routes
fn inventory_forecast_routes() -> Router<AppState> {
    Router::new().route(
        "/restaurant/:restaurant_id",
        get(handlers::get_inventory_forecast),
    )
}

/// Campaign routes
fn campaign_routes() -> Router<AppState> {
    Router::new().route("/:restaurant_id", post(handlers::start_campaign))
}

/// Promotion management routes
fn promotion_routes() -> Router<AppState> {
    Router::new().route(
        "/restaurant/:restaurant_id",
        get(handlers::get_restaurant_campaigns),
    )
}
