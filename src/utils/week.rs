//! Calendar helpers for report filtering
//!
//! Year and week are always taken in UTC so the derived columns do not
//! depend on the server's local timezone.

use chrono::{DateTime, Datelike, Utc};

/// Calendar year of an arrival timestamp
pub fn arrival_year(arrival: &DateTime<Utc>) -> i32 {
    arrival.year()
}

/// ISO 8601 week number (1..=53) of an arrival timestamp
///
/// Note that the ISO week-year can differ from the calendar year around
/// New Year (2016-01-01 is in week 53 of 2015); filtering pairs the
/// calendar year with this week number.
pub fn arrival_week(arrival: &DateTime<Utc>) -> i32 {
    arrival.iso_week().week() as i32
}

/// Epoch milliseconds → UTC timestamp, `None` when out of range
pub fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_45_2016() {
        let monday = from_millis(1_478_501_763_000).unwrap();
        let wednesday = from_millis(1_478_674_513_000).unwrap();

        assert_eq!(arrival_year(&monday), 2016);
        assert_eq!(arrival_week(&monday), 45);
        assert_eq!(arrival_week(&wednesday), 45);
    }

    #[test]
    fn test_week_46_2016() {
        let monday = from_millis(1_479_106_519_000).unwrap();
        let thursday = from_millis(1_479_365_724_000).unwrap();

        assert_eq!(arrival_week(&monday), 46);
        assert_eq!(arrival_week(&thursday), 46);
    }

    #[test]
    fn test_new_year_uses_iso_week() {
        // 2016-01-01T12:00:00Z
        let new_year = from_millis(1_451_649_600_000).unwrap();
        assert_eq!(arrival_year(&new_year), 2016);
        assert_eq!(arrival_week(&new_year), 53);
    }

    #[test]
    fn test_out_of_range_millis() {
        assert!(from_millis(i64::MAX).is_none());
        assert!(from_millis(0).is_some());
    }
}
