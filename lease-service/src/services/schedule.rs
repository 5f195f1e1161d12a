//! Rent schedule generation.
//!
//! Pure calendar arithmetic: given a lease's date range and billing day,
//! derive the monthly due dates and the pending payment records to insert.

use crate::models::{Lease, NewRentPayment};
use chrono::{Datelike, Months, NaiveDate};
use std::collections::HashSet;

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("first of month is a valid date")
        .pred_opt()
        .expect("first of month has a predecessor")
}

/// Due date for a billing month, clamped to the month's last day when the
/// billing day exceeds it (e.g. day 31 in a 30-day month).
fn due_date_in_month(year: i32, month: u32, rent_due_day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, rent_due_day)
        .unwrap_or_else(|| last_day_of_month(year, month))
}

/// Compute the monthly rent due dates for a lease period.
///
/// Walks the lease month by month. A billing day that falls before the lease
/// actually starts within the first month rolls forward one month. Each
/// emitted due date falls within `[start, end]`, and the walk resumes from
/// the month after the last considered due date.
pub fn rent_due_dates(start: NaiveDate, end: NaiveDate, rent_due_day: u32) -> Vec<NaiveDate> {
    let mut due_dates = Vec::new();
    let mut current = start;

    while current < end {
        let mut candidate = due_date_in_month(current.year(), current.month(), rent_due_day);
        if candidate < start {
            candidate = candidate + Months::new(1);
        }
        if candidate <= end {
            due_dates.push(candidate);
        }
        current = candidate + Months::new(1);
    }

    due_dates
}

/// Produce the pending rent payments still missing for a lease, given the
/// due dates already recorded for it.
pub fn new_rent_payments(lease: &Lease, existing_due_dates: &[NaiveDate]) -> Vec<NewRentPayment> {
    let mut seen: HashSet<NaiveDate> = existing_due_dates.iter().copied().collect();

    rent_due_dates(
        lease.lease_start_date,
        lease.lease_end_date,
        lease.rent_due_day.clamp(1, 31) as u32,
    )
    .into_iter()
    .filter(|due_date| seen.insert(*due_date))
    .map(|due_date| NewRentPayment {
        lease_id: lease.lease_id,
        tenant_id: lease.tenant_id,
        amount: lease.monthly_rent,
        due_date,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lease(start: NaiveDate, end: NaiveDate, rent_due_day: i16) -> Lease {
        Lease {
            lease_id: Uuid::new_v4(),
            property_id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            landlord_id: Uuid::new_v4(),
            monthly_rent: "1500.00".parse::<Decimal>().unwrap(),
            rent_due_day,
            lease_start_date: start,
            lease_end_date: end,
            security_deposit_amount: "3000.00".parse::<Decimal>().unwrap(),
            created_utc: Utc::now(),
            updated_utc: Utc::now(),
        }
    }

    #[test]
    fn mid_month_start_rolls_first_due_date_forward() {
        // Lease 2025-01-15 .. 2025-06-15, rent due on the 1st: 2025-01-01
        // precedes the start and rolls to February; five payments total.
        let dates = rent_due_dates(date(2025, 1, 15), date(2025, 6, 15), 1);
        assert_eq!(
            dates,
            vec![
                date(2025, 2, 1),
                date(2025, 3, 1),
                date(2025, 4, 1),
                date(2025, 5, 1),
                date(2025, 6, 1),
            ]
        );
    }

    #[test]
    fn full_months_emit_one_due_date_per_month() {
        let dates = rent_due_dates(date(2025, 1, 1), date(2025, 6, 15), 1);
        assert_eq!(
            dates,
            vec![
                date(2025, 1, 1),
                date(2025, 2, 1),
                date(2025, 3, 1),
                date(2025, 4, 1),
                date(2025, 5, 1),
                date(2025, 6, 1),
            ]
        );
    }

    #[test]
    fn all_due_dates_fall_within_lease_period() {
        let start = date(2024, 3, 7);
        let end = date(2025, 3, 7);
        for day in 1..=31 {
            for due in rent_due_dates(start, end, day) {
                assert!(due >= start && due <= end, "day {day}: {due} out of range");
            }
        }
    }

    #[test]
    fn short_period_with_no_billable_month_is_empty() {
        // Billing day 10 falls before the start in January and past the end
        // after rolling into February.
        let dates = rent_due_dates(date(2025, 1, 20), date(2025, 2, 1), 10);
        assert!(dates.is_empty());
    }

    #[test]
    fn due_day_31_clamps_to_last_day_of_short_months() {
        let dates = rent_due_dates(date(2025, 1, 1), date(2025, 4, 30), 31);
        assert_eq!(
            dates,
            vec![date(2025, 1, 31), date(2025, 2, 28), date(2025, 3, 31), date(2025, 4, 30)]
        );
    }

    #[test]
    fn due_day_29_clamps_only_in_february() {
        let dates = rent_due_dates(date(2025, 1, 1), date(2025, 3, 31), 29);
        assert_eq!(
            dates,
            vec![date(2025, 1, 29), date(2025, 2, 28), date(2025, 3, 29)]
        );
    }

    #[test]
    fn leap_year_february_keeps_day_29() {
        let dates = rent_due_dates(date(2024, 2, 1), date(2024, 3, 1), 29);
        assert_eq!(dates, vec![date(2024, 2, 29)]);
    }

    #[test]
    fn new_payments_carry_lease_fields() {
        let lease = lease(date(2025, 1, 15), date(2025, 6, 15), 1);
        let payments = new_rent_payments(&lease, &[]);

        assert_eq!(payments.len(), 5);
        for p in &payments {
            assert_eq!(p.lease_id, lease.lease_id);
            assert_eq!(p.tenant_id, lease.tenant_id);
            assert_eq!(p.amount, lease.monthly_rent);
        }
    }

    #[test]
    fn existing_due_dates_are_skipped() {
        let lease = lease(date(2025, 1, 15), date(2025, 6, 15), 1);
        let existing = vec![date(2025, 2, 1), date(2025, 4, 1)];
        let payments = new_rent_payments(&lease, &existing);

        let due_dates: Vec<NaiveDate> = payments.iter().map(|p| p.due_date).collect();
        assert_eq!(
            due_dates,
            vec![date(2025, 3, 1), date(2025, 5, 1), date(2025, 6, 1)]
        );
    }

    #[test]
    fn regeneration_is_idempotent() {
        let lease = lease(date(2025, 1, 15), date(2025, 6, 15), 1);
        let first: Vec<NaiveDate> = new_rent_payments(&lease, &[])
            .into_iter()
            .map(|p| p.due_date)
            .collect();
        let second = new_rent_payments(&lease, &first);
        assert!(second.is_empty());
    }
}
