//! Shared foundation for the marketplace services: error taxonomy, layered
//! configuration, logging setup and common HTTP middleware.

pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;

// Re-exports so downstream services stay on the same framework versions.
pub use axum;
pub use tower;
