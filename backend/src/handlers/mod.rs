//! HTTP handlers for the Restaurant Operations Platform

pub mod campaign;
pub mod forecast;
pub mod health;
pub mod inventory;
pub mod inventory_forecast;
pub mod order;
pub mod restaurant;

pub use campaign::*;
pub use forecast::*;
pub use health::*;
pub use inventory::*;
pub use inventory_forecast::*;
pub use order::*;
pub use restaurant::*;
