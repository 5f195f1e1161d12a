//! Lease payment handlers.
//!
//! All three operations share the same gate: the caller must be the lease's
//! tenant, the lease's landlord, or an admin.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use service_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{
        ApiResponse, GenerateRentPaymentsData, GenerateRentPaymentsRequest, PaymentHistoryData,
        PaymentResponse, RentPaymentsData,
    },
    middleware::AuthContext,
    models::{AuditEvent, AuditEventType, Lease},
    services::{
        authz::{authorize_lease_access, LeaseRole},
        history, metrics, schedule,
    },
    AppState,
};

/// Load a lease and gate access to it in one step.
async fn load_authorized_lease(
    state: &AppState,
    lease_id: Uuid,
    auth: &AuthContext,
    action: &str,
) -> Result<(Lease, LeaseRole), AppError> {
    let lease = state.db.get_lease(lease_id).await?.ok_or_else(|| {
        metrics::record_error("lease_not_found", action);
        AppError::NotFound(anyhow::anyhow!("Lease not found"))
    })?;
    let role = authorize_lease_access(&lease, auth, action).map_err(|e| {
        metrics::record_error("forbidden", action);
        e
    })?;
    Ok((lease, role))
}

fn emit_audit(event: AuditEvent) {
    // The audit sink is external; the structured-log pipeline ships events
    // recorded under the `audit` target.
    tracing::info!(
        target: "audit",
        event_id = %event.event_id,
        actor_user_id = %event.actor_user_id,
        event_type = %event.event_type_code,
        lease_id = %event.lease_id,
        event_data = %serde_json::to_string(&event.event_data).unwrap_or_default(),
        "Audit event"
    );
}

/// Get the full payment history for a lease, with view-time overdue
/// derivation and summary totals.
pub async fn get_payment_history(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(lease_id): Path<Uuid>,
) -> Result<Json<ApiResponse<PaymentHistoryData>>, AppError> {
    let (lease, role) =
        load_authorized_lease(&state, lease_id, &auth, "view payment history").await?;

    tracing::info!(
        lease_id = %lease_id,
        user_id = %auth.user_id,
        lease_role = role.as_str(),
        "Fetching payment history"
    );

    let payments = state.db.get_payments_for_lease(lease_id).await?;
    let today = Utc::now().date_naive();
    let enriched = history::enrich(payments, today);
    let summary = history::summarize(&enriched);

    metrics::record_lease_read("payment_history");
    emit_audit(AuditEvent::user_action(
        auth.user_id,
        AuditEventType::PaymentHistoryViewed,
        lease_id,
        None,
    ));

    Ok(Json(ApiResponse::ok(
        PaymentHistoryData {
            lease: (&lease).into(),
            payments: enriched.iter().map(PaymentResponse::from).collect(),
            summary: summary.into(),
        },
        "Payment history retrieved",
    )))
}

/// Generate the pending rent payments still missing for a lease period.
pub async fn generate_rent_payments(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(lease_id): Path<Uuid>,
    payload: Option<Json<GenerateRentPaymentsRequest>>,
) -> Result<Json<ApiResponse<GenerateRentPaymentsData>>, AppError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    payload.validate()?;
    if let Some(grace) = payload.grace_period_days {
        tracing::debug!(
            lease_id = %lease_id,
            grace_period_days = grace,
            "Grace period accepted but not applied by the generator"
        );
    }

    let (lease, role) =
        load_authorized_lease(&state, lease_id, &auth, "generate rent payments").await?;

    tracing::info!(
        lease_id = %lease_id,
        user_id = %auth.user_id,
        lease_role = role.as_str(),
        "Generating rent payments"
    );

    // The schedule is pure; the store call re-checks recorded due dates under
    // a per-lease lock, so a concurrent run cannot double-insert.
    let candidates = schedule::new_rent_payments(&lease, &[]);
    if candidates.is_empty() {
        return Ok(Json(ApiResponse::ok(
            GenerateRentPaymentsData {
                created: 0,
                payments: vec![],
            },
            "No rent payments to create for lease period",
        )));
    }

    let created = state.db.create_rent_payments(lease_id, &candidates).await?;
    if created.is_empty() {
        return Ok(Json(ApiResponse::ok(
            GenerateRentPaymentsData {
                created: 0,
                payments: vec![],
            },
            "All rent payments already exist",
        )));
    }

    metrics::record_rent_payments_generated("created", created.len() as u64);
    emit_audit(AuditEvent::user_action(
        auth.user_id,
        AuditEventType::RentPaymentsGenerated,
        lease_id,
        Some(serde_json::json!({
            "created": created.len(),
            "payment_type": "rent",
        })),
    ));

    let message = format!("Created {} rent payments", created.len());
    Ok(Json(ApiResponse::ok(
        GenerateRentPaymentsData {
            created: created.len(),
            payments: created.iter().map(PaymentResponse::from).collect(),
        },
        message,
    )))
}

/// Get rent payments grouped by stored status with per-group sums.
pub async fn get_rent_payments(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(lease_id): Path<Uuid>,
) -> Result<Json<ApiResponse<RentPaymentsData>>, AppError> {
    let (_lease, role) =
        load_authorized_lease(&state, lease_id, &auth, "view rent payments").await?;

    tracing::info!(
        lease_id = %lease_id,
        user_id = %auth.user_id,
        lease_role = role.as_str(),
        "Fetching rent payments"
    );

    let payments = state.db.get_rent_payments_for_lease(lease_id).await?;
    let (groups, stats) = history::group_by_stored_status(payments);

    metrics::record_lease_read("rent_payments");

    Ok(Json(ApiResponse::ok(
        RentPaymentsData {
            payments: (&groups).into(),
            stats: stats.into(),
        },
        "Rent payments retrieved",
    )))
}
