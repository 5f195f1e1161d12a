//! Audit event payloads for lease operations.
//!
//! The audit sink lives outside this service; we only construct the event
//! payload and hand it to the structured-log pipeline under the `audit`
//! target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Audit event types emitted by lease operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    RentPaymentsGenerated,
    PaymentHistoryViewed,
}

impl AuditEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEventType::RentPaymentsGenerated => "rent_payments_generated",
            AuditEventType::PaymentHistoryViewed => "payment_history_viewed",
        }
    }
}

/// Audit event entity.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub event_id: Uuid,
    pub actor_user_id: Uuid,
    pub event_type_code: String,
    pub lease_id: Uuid,
    pub event_data: Option<serde_json::Value>,
    pub created_utc: DateTime<Utc>,
}

impl AuditEvent {
    /// Create a new audit event for a user action on a lease.
    pub fn user_action(
        actor_user_id: Uuid,
        event_type: AuditEventType,
        lease_id: Uuid,
        event_data: Option<serde_json::Value>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            actor_user_id,
            event_type_code: event_type.as_str().to_string(),
            lease_id,
            event_data,
            created_utc: Utc::now(),
        }
    }
}
