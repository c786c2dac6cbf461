//! Shared types and models for the Restaurant Operations Platform
//!
//! This crate contains domain types shared between the backend server and
//! other components of the system (seeding tools, future clients).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
