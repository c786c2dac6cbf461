//! Database utilities

pub mod seed;
