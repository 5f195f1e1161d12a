//! Payment model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Payment status lifecycle: pending -> paid -> verified, or pending -> overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Verified,
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Verified => "verified",
            PaymentStatus::Overdue => "overdue",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "paid" => PaymentStatus::Paid,
            "verified" => PaymentStatus::Verified,
            "overdue" => PaymentStatus::Overdue,
            _ => PaymentStatus::Pending,
        }
    }
}

/// Payment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Rent,
    Deposit,
    Fee,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Rent => "rent",
            PaymentType::Deposit => "deposit",
            PaymentType::Fee => "fee",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "deposit" => PaymentType::Deposit,
            "fee" => PaymentType::Fee,
            _ => PaymentType::Rent,
        }
    }
}

/// Payment row owned by a lease.
///
/// Status transitions (paid, verified) happen in the payment-processing flow;
/// this service only creates pending rent payments and reads them back.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub payment_id: Uuid,
    pub lease_id: Uuid,
    pub tenant_id: Uuid,
    pub amount: Decimal,
    pub payment_type: String,
    pub status: String,
    pub due_date: NaiveDate,
    pub verified_by: Option<Uuid>,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl Payment {
    pub fn status(&self) -> PaymentStatus {
        PaymentStatus::from_string(&self.status)
    }

    pub fn payment_type(&self) -> PaymentType {
        PaymentType::from_string(&self.payment_type)
    }
}

/// Input for a pending rent payment produced by the schedule generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRentPayment {
    pub lease_id: Uuid,
    pub tenant_id: Uuid,
    pub amount: Decimal,
    pub due_date: NaiveDate,
}
