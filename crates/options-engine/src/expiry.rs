//! Expiration qualification and time-to-expiry

use chrono::{Days, NaiveDate};

/// Calendar days per year used for time-to-expiry
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Convert business days to calendar days (5 trading days per 7), rounding up
pub fn calendar_days_for(business_days: u32) -> u64 {
    (u64::from(business_days) * 7 + 4) / 5
}

/// First expiration date that satisfies the minimum-days-out requirement
///
/// `None` when the cutoff lies past the last representable date.
pub fn earliest_qualifying_expiration(today: NaiveDate, min_business_days: u32) -> Option<NaiveDate> {
    today.checked_add_days(Days::new(calendar_days_for(min_business_days)))
}

/// Expirations at least `min_business_days` out, sorted and deduplicated
pub fn qualifying_expirations(
    expirations: &[NaiveDate],
    today: NaiveDate,
    min_business_days: u32,
) -> Vec<NaiveDate> {
    let Some(cutoff) = earliest_qualifying_expiration(today, min_business_days) else {
        return Vec::new();
    };

    let mut valid: Vec<NaiveDate> = expirations
        .iter()
        .copied()
        .filter(|date| *date >= cutoff)
        .collect();
    valid.sort();
    valid.dedup();
    valid
}

pub fn days_to_expiry(expiration: NaiveDate, as_of: NaiveDate) -> i64 {
    (expiration - as_of).num_days()
}

/// Time to expiry in years, or `None` when the contract expires today or earlier
pub fn time_to_expiry(expiration: NaiveDate, as_of: NaiveDate) -> Option<f64> {
    let days = days_to_expiry(expiration, as_of);
    (days > 0).then(|| days as f64 / DAYS_PER_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_days_for() {
        assert_eq!(calendar_days_for(0), 0);
        assert_eq!(calendar_days_for(5), 7);
        assert_eq!(calendar_days_for(10), 14);
        // 3 * 7 / 5 = 4.2, rounds up
        assert_eq!(calendar_days_for(3), 5);
    }

    #[test]
    fn test_qualifying_expirations() {
        let today = date(2026, 10, 14);
        let expirations = [
            date(2026, 10, 16),
            date(2026, 10, 23),
            date(2026, 10, 21),
            date(2026, 11, 20),
            date(2026, 10, 21),
        ];

        let valid = qualifying_expirations(&expirations, today, 5);

        // cutoff is 2026-10-21, inclusive
        assert_eq!(
            valid,
            vec![date(2026, 10, 21), date(2026, 10, 23), date(2026, 11, 20)]
        );
    }

    #[test]
    fn test_no_qualifying_expirations() {
        let today = date(2026, 10, 14);
        let valid = qualifying_expirations(&[date(2026, 10, 15)], today, 5);
        assert!(valid.is_empty());
    }

    #[test]
    fn test_cutoff_past_calendar_range() {
        let today = date(2026, 10, 14);

        assert_eq!(earliest_qualifying_expiration(today, u32::MAX), None);
        assert!(qualifying_expirations(&[today, date(2030, 1, 18)], today, u32::MAX).is_empty());
        assert_eq!(
            earliest_qualifying_expiration(today, 5),
            Some(date(2026, 10, 21))
        );
    }

    #[test]
    fn test_time_to_expiry() {
        let today = date(2026, 10, 14);
        let t = time_to_expiry(date(2027, 10, 14), today).unwrap();
        assert!((t - 1.0).abs() < 1e-12);

        assert_eq!(time_to_expiry(today, today), None);
        assert_eq!(time_to_expiry(date(2026, 10, 1), today), None);
    }
}
