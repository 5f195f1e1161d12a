//! Metrics module for lease-service.
//! Provides Prometheus metrics for lease operations and payment generation.

use once_cell::sync::Lazy;
use prometheus::{
    histogram_opts, opts, register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec,
    IntCounterVec, TextEncoder,
};
use std::sync::OnceLock;

/// Database query duration histogram
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        histogram_opts!("lease_db_query_duration_seconds", "Database query duration"),
        &["operation"]
    )
    .expect("Failed to register DB_QUERY_DURATION")
});

/// Rent payments created counter
pub static RENT_PAYMENTS_GENERATED_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Lease read operations counter
pub static LEASE_READS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Error counter for alerting
pub static ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Call once at startup.
pub fn init_metrics() {
    RENT_PAYMENTS_GENERATED_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "lease_rent_payments_generated_total",
                "Total rent payments created by the schedule generator"
            ),
            &["outcome"]
        )
        .expect("Failed to register RENT_PAYMENTS_GENERATED_TOTAL")
    });

    LEASE_READS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!(
                "lease_reads_total",
                "Total lease read operations by view type"
            ),
            &["view"]
        )
        .expect("Failed to register LEASE_READS_TOTAL")
    });

    ERRORS_TOTAL.get_or_init(|| {
        register_int_counter_vec!(
            opts!("lease_errors_total", "Total errors by type for alerting"),
            &["error_type", "operation"]
        )
        .expect("Failed to register ERRORS_TOTAL")
    });

    // Force initialization of lazy statics
    let _ = &*DB_QUERY_DURATION;
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");
    String::from_utf8(buffer).expect("Failed to convert metrics to string")
}

/// Record rent payments created by a generation run.
pub fn record_rent_payments_generated(outcome: &str, count: u64) {
    if let Some(counter) = RENT_PAYMENTS_GENERATED_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc_by(count);
    }
}

/// Record a lease read operation.
pub fn record_lease_read(view: &str) {
    if let Some(counter) = LEASE_READS_TOTAL.get() {
        counter.with_label_values(&[view]).inc();
    }
}

/// Record an error for alerting.
pub fn record_error(error_type: &str, operation: &str) {
    if let Some(counter) = ERRORS_TOTAL.get() {
        counter.with_label_values(&[error_type, operation]).inc();
    }
}
