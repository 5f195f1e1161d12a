//! Payment history aggregation.
//!
//! Read-side only: derives a display status for each payment and computes
//! decimal-accurate summary totals. Stored statuses are never mutated here.

use crate::models::{Payment, PaymentStatus};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A payment paired with the status it should be presented with.
#[derive(Debug, Clone)]
pub struct EnrichedPayment {
    pub payment: Payment,
    pub display_status: PaymentStatus,
}

/// View-time status: a stored "pending" payment whose due date is strictly
/// before today presents as "overdue". Everything else presents as stored.
pub fn display_status(payment: &Payment, today: NaiveDate) -> PaymentStatus {
    match payment.status() {
        PaymentStatus::Pending if payment.due_date < today => PaymentStatus::Overdue,
        other => other,
    }
}

pub fn enrich(payments: Vec<Payment>, today: NaiveDate) -> Vec<EnrichedPayment> {
    payments
        .into_iter()
        .map(|payment| {
            let display_status = display_status(&payment, today);
            EnrichedPayment {
                payment,
                display_status,
            }
        })
        .collect()
}

/// Summary totals over an enriched payment set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentSummary {
    pub total_count: usize,
    pub verified_count: usize,
    pub paid_count: usize,
    pub pending_count: usize,
    pub overdue_count: usize,
    pub total_verified_amount: Decimal,
    pub total_outstanding_amount: Decimal,
}

pub fn summarize(enriched: &[EnrichedPayment]) -> PaymentSummary {
    let mut summary = PaymentSummary {
        total_count: enriched.len(),
        ..Default::default()
    };

    for entry in enriched {
        match entry.display_status {
            PaymentStatus::Verified => {
                summary.verified_count += 1;
                summary.total_verified_amount += entry.payment.amount;
            }
            PaymentStatus::Paid => {
                summary.paid_count += 1;
            }
            PaymentStatus::Pending => {
                summary.pending_count += 1;
                summary.total_outstanding_amount += entry.payment.amount;
            }
            PaymentStatus::Overdue => {
                summary.overdue_count += 1;
                summary.total_outstanding_amount += entry.payment.amount;
            }
        }
    }

    summary
}

/// Rent payments bucketed by their stored status.
///
/// Unlike the history view, no overdue derivation happens here: the stored
/// status is trusted as-is. The two reads are intentionally distinct.
#[derive(Debug, Clone, Default)]
pub struct RentPaymentGroups {
    pub pending: Vec<Payment>,
    pub paid: Vec<Payment>,
    pub verified: Vec<Payment>,
    pub overdue: Vec<Payment>,
}

/// Per-group counts and sums for the grouped rent-payment view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentPaymentStats {
    pub total_count: usize,
    pub pending_amount: Decimal,
    pub paid_amount: Decimal,
    pub verified_amount: Decimal,
    pub overdue_amount: Decimal,
}

pub fn group_by_stored_status(payments: Vec<Payment>) -> (RentPaymentGroups, RentPaymentStats) {
    let mut groups = RentPaymentGroups::default();
    let mut stats = RentPaymentStats {
        total_count: payments.len(),
        ..Default::default()
    };

    for payment in payments {
        match payment.status() {
            PaymentStatus::Pending => {
                stats.pending_amount += payment.amount;
                groups.pending.push(payment);
            }
            PaymentStatus::Paid => {
                stats.paid_amount += payment.amount;
                groups.paid.push(payment);
            }
            PaymentStatus::Verified => {
                stats.verified_amount += payment.amount;
                groups.verified.push(payment);
            }
            PaymentStatus::Overdue => {
                stats.overdue_amount += payment.amount;
                groups.overdue.push(payment);
            }
        }
    }

    (groups, stats)
}
