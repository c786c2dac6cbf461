//! Domain models for the Restaurant Operations Platform
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
