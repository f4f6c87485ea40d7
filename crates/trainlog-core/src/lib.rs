//! Shared HTTP and persistence glue for Trainlog services.

pub mod envelope;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
