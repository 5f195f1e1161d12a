//! Request/response shapes for the lease API.
//!
//! The frontend speaks camelCase; rows are snake_case. All success responses
//! use the `{ success, data, message }` envelope; errors use `{ error }` (see
//! `service_core::error`).

use crate::models::{Lease, Payment, PaymentStatus};
use crate::services::history::{
    EnrichedPayment, PaymentSummary, RentPaymentGroups, RentPaymentStats,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Success envelope shared by all endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseSummaryResponse {
    pub id: Uuid,
    pub property: Uuid,
    pub monthly_rent: Decimal,
    pub security_deposit_amount: Decimal,
}

impl From<&Lease> for LeaseSummaryResponse {
    fn from(lease: &Lease) -> Self {
        Self {
            id: lease.lease_id,
            property: lease.property_id,
            monthly_rent: lease.monthly_rent,
            security_deposit_amount: lease.security_deposit_amount,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: Uuid,
    pub lease_id: Uuid,
    pub tenant_id: Uuid,
    pub amount: Decimal,
    pub payment_type: String,
    pub status: String,
    pub due_date: NaiveDate,
    pub verified_by: Option<Uuid>,
    pub created_utc: DateTime<Utc>,
}

impl PaymentResponse {
    fn with_status(payment: &Payment, status: PaymentStatus) -> Self {
        Self {
            id: payment.payment_id,
            lease_id: payment.lease_id,
            tenant_id: payment.tenant_id,
            amount: payment.amount,
            payment_type: payment.payment_type.clone(),
            status: status.as_str().to_string(),
            due_date: payment.due_date,
            verified_by: payment.verified_by,
            created_utc: payment.created_utc,
        }
    }
}

impl From<&Payment> for PaymentResponse {
    fn from(payment: &Payment) -> Self {
        Self::with_status(payment, payment.status())
    }
}

impl From<&EnrichedPayment> for PaymentResponse {
    fn from(entry: &EnrichedPayment) -> Self {
        Self::with_status(&entry.payment, entry.display_status)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummaryResponse {
    pub total_count: usize,
    pub verified_count: usize,
    pub paid_count: usize,
    pub pending_count: usize,
    pub overdue_count: usize,
    pub total_verified_amount: Decimal,
    pub total_outstanding_amount: Decimal,
}

impl From<PaymentSummary> for PaymentSummaryResponse {
    fn from(s: PaymentSummary) -> Self {
        Self {
            total_count: s.total_count,
            verified_count: s.verified_count,
            paid_count: s.paid_count,
            pending_count: s.pending_count,
            overdue_count: s.overdue_count,
            total_verified_amount: s.total_verified_amount,
            total_outstanding_amount: s.total_outstanding_amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentHistoryData {
    pub lease: LeaseSummaryResponse,
    pub payments: Vec<PaymentResponse>,
    pub summary: PaymentSummaryResponse,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRentPaymentsRequest {
    /// Accepted for forward compatibility; the generation algorithm does not
    /// currently apply it.
    #[validate(range(min = 0))]
    pub grace_period_days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct GenerateRentPaymentsData {
    pub created: usize,
    pub payments: Vec<PaymentResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentPaymentGroupsResponse {
    pub pending: Vec<PaymentResponse>,
    pub paid: Vec<PaymentResponse>,
    pub verified: Vec<PaymentResponse>,
    pub overdue: Vec<PaymentResponse>,
}

impl From<&RentPaymentGroups> for RentPaymentGroupsResponse {
    fn from(groups: &RentPaymentGroups) -> Self {
        let to_responses = |payments: &[Payment]| payments.iter().map(PaymentResponse::from).collect();
        Self {
            pending: to_responses(&groups.pending),
            paid: to_responses(&groups.paid),
            verified: to_responses(&groups.verified),
            overdue: to_responses(&groups.overdue),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentPaymentStatsResponse {
    pub total_count: usize,
    pub pending_amount: Decimal,
    pub paid_amount: Decimal,
    pub verified_amount: Decimal,
    pub overdue_amount: Decimal,
}

impl From<RentPaymentStats> for RentPaymentStatsResponse {
    fn from(s: RentPaymentStats) -> Self {
        Self {
            total_count: s.total_count,
            pending_amount: s.pending_amount,
            paid_amount: s.paid_amount,
            verified_amount: s.verified_amount,
            overdue_amount: s.overdue_amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RentPaymentsData {
    pub payments: RentPaymentGroupsResponse,
    pub stats: RentPaymentStatsResponse,
}
