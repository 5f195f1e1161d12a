//! Database service for lease-service.

use crate::models::{Lease, NewRentPayment, Payment, PaymentType};
use crate::services::metrics::DB_QUERY_DURATION;
use chrono::NaiveDate;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "lease-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["health_check"])
            .start_timer();

        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;

        timer.observe_duration();
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    // =========================================================================
    // Lease Operations
    // =========================================================================

    /// Get a lease by ID.
    #[instrument(skip(self), fields(lease_id = %lease_id))]
    pub async fn get_lease(&self, lease_id: Uuid) -> Result<Option<Lease>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_lease"])
            .start_timer();

        let lease = sqlx::query_as::<_, Lease>(
            r#"
            SELECT lease_id, property_id, tenant_id, landlord_id, monthly_rent, rent_due_day, lease_start_date, lease_end_date, security_deposit_amount, created_utc, updated_utc
            FROM leases
            WHERE lease_id = $1
            "#,
        )
        .bind(lease_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get lease: {}", e)))?;

        timer.observe_duration();

        Ok(lease)
    }

    // =========================================================================
    // Payment Operations
    // =========================================================================

    /// Get all payments for a lease, oldest due date first.
    #[instrument(skip(self), fields(lease_id = %lease_id))]
    pub async fn get_payments_for_lease(&self, lease_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_payments_for_lease"])
            .start_timer();

        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT payment_id, lease_id, tenant_id, amount, payment_type, status, due_date, verified_by, created_utc, updated_utc
            FROM payments
            WHERE lease_id = $1
            ORDER BY due_date, created_utc
            "#,
        )
        .bind(lease_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get payments: {}", e)))?;

        timer.observe_duration();

        Ok(payments)
    }

    /// Get rent-type payments for a lease, oldest due date first.
    #[instrument(skip(self), fields(lease_id = %lease_id))]
    pub async fn get_rent_payments_for_lease(
        &self,
        lease_id: Uuid,
    ) -> Result<Vec<Payment>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_rent_payments_for_lease"])
            .start_timer();

        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT payment_id, lease_id, tenant_id, amount, payment_type, status, due_date, verified_by, created_utc, updated_utc
            FROM payments
            WHERE lease_id = $1 AND payment_type = $2
            ORDER BY due_date, created_utc
            "#,
        )
        .bind(lease_id)
        .bind(PaymentType::Rent.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to get rent payments: {}", e))
        })?;

        timer.observe_duration();

        Ok(payments)
    }

    /// Insert pending rent payments for a lease as one atomic batch.
    ///
    /// The whole sequence runs in a transaction holding a per-lease advisory
    /// lock, and candidates are re-checked against the recorded due dates
    /// inside that transaction. Together with the partial unique index on
    /// (lease_id, due_date) for rent rows this makes concurrent generation
    /// runs for the same lease safe: the second run inserts nothing.
    #[instrument(skip(self, candidates), fields(lease_id = %lease_id, candidates = candidates.len()))]
    pub async fn create_rent_payments(
        &self,
        lease_id: Uuid,
        candidates: &[NewRentPayment],
    ) -> Result<Vec<Payment>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_rent_payments"])
            .start_timer();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        // Serialize generation runs per lease for the transaction's lifetime.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text, 0))")
            .bind(lease_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to take lease lock: {}", e))
            })?;

        let existing: Vec<NaiveDate> = sqlx::query_scalar(
            r#"
            SELECT due_date
            FROM payments
            WHERE lease_id = $1 AND payment_type = $2
            "#,
        )
        .bind(lease_id)
        .bind(PaymentType::Rent.as_str())
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to read existing due dates: {}", e))
        })?;

        let mut created = Vec::new();
        for candidate in candidates {
            if existing.contains(&candidate.due_date) {
                continue;
            }

            // ON CONFLICT is a second line of defense under the unique index;
            // a skipped row simply returns no record.
            let inserted = sqlx::query_as::<_, Payment>(
                r#"
                INSERT INTO payments (payment_id, lease_id, tenant_id, amount, payment_type, status, due_date)
                VALUES ($1, $2, $3, $4, 'rent', 'pending', $5)
                ON CONFLICT (lease_id, due_date) WHERE payment_type = 'rent' DO NOTHING
                RETURNING payment_id, lease_id, tenant_id, amount, payment_type, status, due_date, verified_by, created_utc, updated_utc
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(candidate.lease_id)
            .bind(candidate.tenant_id)
            .bind(candidate.amount)
            .bind(candidate.due_date)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to insert rent payment: {}", e))
            })?;

            if let Some(payment) = inserted {
                created.push(payment);
            }
        }

        tx.commit().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to commit rent payments: {}", e))
        })?;

        timer.observe_duration();
        info!(
            lease_id = %lease_id,
            created = created.len(),
            "Rent payments inserted"
        );

        Ok(created)
    }
}
