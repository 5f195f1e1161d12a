//! HTTP handlers for lease-service.

pub mod payments;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Lease payment routes.
pub fn lease_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/leases/:lease_id/payment-history",
            get(payments::get_payment_history),
        )
        .route(
            "/leases/:lease_id/generate-rent-payments",
            post(payments::generate_rent_payments),
        )
        .route(
            "/leases/:lease_id/rent-payments",
            get(payments::get_rent_payments),
        )
}
