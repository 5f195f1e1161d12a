//! Test helper module for lease-service integration tests.
//!
//! Provides common setup utilities for PostgreSQL-based tests. The whole
//! harness is gated on `TEST_DATABASE_URL`: when it is not set, tests skip
//! instead of failing, so the suite stays runnable without a database.

#![allow(dead_code)]

use chrono::NaiveDate;
use lease_service::config::{DatabaseConfig, LeaseConfig};
use lease_service::services::init_metrics;
use lease_service::startup::Application;
use rust_decimal::Decimal;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use sqlx::PgPool;
use std::sync::atomic::{AtomicU32, Ordering};
use uuid::Uuid;

// Counter for unique schema names
static SCHEMA_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Get the database URL for testing, or None when no database is provisioned.
pub fn get_test_database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL").ok()
}

/// Generate a unique schema name for test isolation.
fn unique_schema_name() -> String {
    let counter = SCHEMA_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("test_lease_{}_{}", std::process::id(), counter)
}

/// A lease row seeded directly into the store, with the ids needed to act as
/// its participants.
pub struct SeededLease {
    pub lease_id: Uuid,
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
}

/// Test application wrapper for integration tests.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub pool: PgPool,
    schema_name: String,
}

impl TestApp {
    /// Spawn a new test application on a random port, or None when no test
    /// database is configured.
    pub async fn try_spawn() -> Option<Self> {
        let base_url = match get_test_database_url() {
            Some(url) => url,
            None => {
                eprintln!("TEST_DATABASE_URL not set; skipping database-backed test");
                return None;
            }
        };

        // Initialize metrics (required for the metrics endpoint)
        init_metrics();

        let schema_name = unique_schema_name();

        // Create schema for test isolation
        let setup_pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(2)
            .connect(&base_url)
            .await
            .expect("Failed to connect to test database");

        sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", schema_name))
            .execute(&setup_pool)
            .await
            .ok();
        sqlx::query(&format!("CREATE SCHEMA {}", schema_name))
            .execute(&setup_pool)
            .await
            .expect("Failed to create test schema");

        setup_pool.close().await;

        // Scope all connections (and migrations) to the test schema
        let separator = if base_url.contains('?') { "&" } else { "?" };
        let db_url_with_schema = format!(
            "{}{}options=-c search_path%3D{}",
            base_url, separator, schema_name
        );

        let config = LeaseConfig {
            common: CoreConfig { port: 0 }, // Random port
            database: DatabaseConfig {
                url: Secret::new(db_url_with_schema),
                max_connections: 5,
                min_connections: 1,
            },
            service_name: "lease-service-test".to_string(),
            log_level: "warn".to_string(),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let pool = app.db().pool().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        Some(TestApp {
            address,
            port,
            pool,
            schema_name,
        })
    }

    /// Seed a lease row and return the ids of its participants.
    pub async fn seed_lease(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        rent_due_day: i16,
        monthly_rent: Decimal,
    ) -> SeededLease {
        let lease = SeededLease {
            lease_id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            landlord_id: Uuid::new_v4(),
        };

        sqlx::query(
            r#"
            INSERT INTO leases (
                lease_id, property_id, tenant_id, landlord_id, monthly_rent,
                rent_due_day, lease_start_date, lease_end_date, security_deposit_amount
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(lease.lease_id)
        .bind(Uuid::new_v4())
        .bind(lease.tenant_id)
        .bind(lease.landlord_id)
        .bind(monthly_rent)
        .bind(rent_due_day)
        .bind(start)
        .bind(end)
        .bind(Decimal::new(300000, 2))
        .execute(&self.pool)
        .await
        .expect("Failed to seed lease");

        lease
    }

    /// Count the payment rows recorded for a lease.
    pub async fn payment_count(&self, lease_id: Uuid) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM payments WHERE lease_id = $1")
            .bind(lease_id)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count payments")
    }

    /// Cleanup test resources (schema).
    pub async fn cleanup(&self) {
        if let Some(base_url) = get_test_database_url() {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(1)
                .connect(&base_url)
                .await
                .ok();

            if let Some(pool) = pool {
                let _ = sqlx::query(&format!(
                    "DROP SCHEMA IF EXISTS {} CASCADE",
                    self.schema_name
                ))
                .execute(&pool)
                .await;
                pool.close().await;
            }
        }
    }
}

/// Attach the identity headers the gateway would set after token validation.
pub fn with_identity(
    request: reqwest::RequestBuilder,
    user_id: Uuid,
    role: &str,
) -> reqwest::RequestBuilder {
    request
        .header("X-User-ID", user_id.to_string())
        .header("X-User-Role", role)
}
