//! Lease model.
//!
//! Leases are created by the application-conversion flow and are read-only
//! for this service.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lease agreement between a landlord and a tenant for a property.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lease {
    pub lease_id: Uuid,
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
    pub monthly_rent: Decimal,
    /// Calendar day of the month rent is due (1-31). Days past the end of a
    /// short month clamp to that month's last day.
    pub rent_due_day: i16,
    pub lease_start_date: NaiveDate,
    pub lease_end_date: NaiveDate,
    pub security_deposit_amount: Decimal,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}
