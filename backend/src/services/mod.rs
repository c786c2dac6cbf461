//! Business logic services for the Restaurant Operations Platform

pub mod campaign;
pub mod catalog;
pub mod forecast;
pub mod inventory;
pub mod order;
pub mod promotion;
pub mod reconciliation;
pub mod restaurant;

pub use campaign::CampaignService;
pub use forecast::ForecastService;
pub use inventory::InventoryService;
pub use order::OrderService;
pub use reconciliation::ReconciliationService;
pub use restaurant::RestaurantService;
