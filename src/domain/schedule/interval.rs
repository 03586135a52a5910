//! Closed time intervals and calendar-date normalization
//!
//! Dates carry no time of day, so they are pinned to instants in a fixed
//! reference zone before any comparison with slot intervals.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A closed time range `[start, end]` with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawInterval> for Interval {
    type Error = DomainError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl Interval {
    /// Create an interval, rejecting an end that precedes the start
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::validation(format!(
                "Interval end {} is before its start {}",
                end, start
            )));
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `inner` lies entirely within this interval, bounds included.
    ///
    /// Partial overlap does not count.
    pub fn encloses(&self, inner: &Interval) -> bool {
        inner.start >= self.start && inner.end <= self.end
    }
}

/// Convert two calendar dates into an interval in the given reference zone.
///
/// The start maps to 00:00:00 of its day. The end maps to 00:00:00 of its day
/// as well, except when both dates are the same day: then it maps to 23:59:59
/// so a single-day query covers the whole day.
pub fn interval_of(
    start_date: NaiveDate,
    end_date: NaiveDate,
    zone: &FixedOffset,
) -> Result<Interval, DomainError> {
    let start = to_instant(start_date.and_time(NaiveTime::MIN), zone)?;

    let end_time = if start_date == end_date {
        NaiveTime::from_hms_opt(23, 59, 59)
            .ok_or_else(|| DomainError::validation("Invalid end of day"))?
    } else {
        NaiveTime::MIN
    };
    let end = to_instant(end_date.and_time(end_time), zone)?;

    Interval::new(start, end)
}

fn to_instant(local: NaiveDateTime, zone: &FixedOffset) -> Result<DateTime<Utc>, DomainError> {
    zone.from_local_datetime(&local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            DomainError::validation(format!("Local time {} does not exist in zone {}", local, zone))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn utc_zone() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_new_rejects_reversed_bounds() {
        let result = Interval::new(utc(2024, 1, 2, 0, 0, 0), utc(2024, 1, 1, 0, 0, 0));
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_new_accepts_empty_interval() {
        let instant = utc(2024, 1, 1, 8, 0, 0);
        let interval = Interval::new(instant, instant).unwrap();
        assert_eq!(interval.start(), interval.end());
    }

    #[test]
    fn test_same_day_spans_whole_day() {
        let day = date(2024, 3, 14);
        let interval = interval_of(day, day, &utc_zone()).unwrap();

        assert_eq!(interval.start(), utc(2024, 3, 14, 0, 0, 0));
        assert_eq!(interval.end(), utc(2024, 3, 14, 23, 59, 59));
    }

    #[test]
    fn test_distinct_days_end_at_midnight() {
        let interval = interval_of(date(2024, 1, 1), date(2024, 1, 15), &utc_zone()).unwrap();

        assert_eq!(interval.start(), utc(2024, 1, 1, 0, 0, 0));
        assert_eq!(interval.end(), utc(2024, 1, 15, 0, 0, 0));
    }

    #[test]
    fn test_offset_zone_shifts_instants() {
        let paris_winter = FixedOffset::east_opt(3600).unwrap();
        let day = date(2024, 1, 5);
        let interval = interval_of(day, day, &paris_winter).unwrap();

        assert_eq!(interval.start(), utc(2024, 1, 4, 23, 0, 0));
        assert_eq!(interval.end(), utc(2024, 1, 5, 22, 59, 59));
        assert_eq!(interval.end().second(), 59);
    }

    #[test]
    fn test_reversed_dates_are_rejected() {
        let result = interval_of(date(2024, 2, 1), date(2024, 1, 1), &utc_zone());
        assert!(result.is_err());
    }

    #[test]
    fn test_encloses_inner_interval() {
        let outer = Interval::new(utc(2024, 1, 1, 0, 0, 0), utc(2024, 1, 15, 0, 0, 0)).unwrap();
        let inner = Interval::new(utc(2024, 1, 5, 9, 0, 0), utc(2024, 1, 5, 11, 0, 0)).unwrap();

        assert!(outer.encloses(&inner));
        assert!(!inner.encloses(&outer));
    }

    #[test]
    fn test_encloses_includes_bounds() {
        let outer = Interval::new(utc(2024, 1, 1, 8, 0, 0), utc(2024, 1, 1, 12, 0, 0)).unwrap();

        assert!(outer.encloses(&outer));
    }

    #[test]
    fn test_encloses_rejects_partial_overlap() {
        let outer = Interval::new(utc(2024, 1, 1, 0, 0, 0), utc(2024, 1, 2, 0, 0, 0)).unwrap();
        let straddles_start =
            Interval::new(utc(2023, 12, 31, 22, 0, 0), utc(2024, 1, 1, 1, 0, 0)).unwrap();
        let straddles_end =
            Interval::new(utc(2024, 1, 1, 23, 0, 0), utc(2024, 1, 2, 1, 0, 0)).unwrap();

        assert!(!outer.encloses(&straddles_start));
        assert!(!outer.encloses(&straddles_end));
    }

    #[test]
    fn test_deserialize_validates_bounds() {
        let json = r#"{"start":"2024-01-02T00:00:00Z","end":"2024-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<Interval>(json).is_err());

        let json = r#"{"start":"2024-01-01T00:00:00Z","end":"2024-01-02T00:00:00Z"}"#;
        let interval: Interval = serde_json::from_str(json).unwrap();
        assert_eq!(interval.end(), utc(2024, 1, 2, 0, 0, 0));
    }
}
