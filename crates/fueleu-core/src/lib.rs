//! Core types and compliance-balance logic for the FuelEU engine.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod banking;
pub mod comparison;
pub mod compliance;
pub mod engine;
pub mod error;
pub mod pooling;
pub mod route;
pub mod store;

pub use error::{Error, Result};
