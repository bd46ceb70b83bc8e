//! Fixed UTC offset used to translate between a user's local day and UTC instants.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::ValidationError;

const MIN_OFFSET_MINUTES: i32 = -12 * 60;
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Offset of the user's local clock from UTC, in minutes (east positive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UtcOffset(i32);

impl UtcOffset {
    pub const UTC: UtcOffset = UtcOffset(0);

    pub fn from_minutes(minutes: i32) -> Result<Self, ValidationError> {
        if !(MIN_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
            return Err(ValidationError::out_of_range(
                "utc_offset_minutes",
                MIN_OFFSET_MINUTES,
                MAX_OFFSET_MINUTES,
                minutes,
            ));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(&self) -> i32 {
        self.0
    }

    /// Converts a local wall-clock time on `date` to a UTC instant.
    pub fn to_utc(&self, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
        (date.and_time(time) - Duration::minutes(self.0 as i64)).and_utc()
    }

    /// UTC instant of local midnight starting `date`.
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        self.to_utc(date, NaiveTime::MIN)
    }

    /// Local calendar date of a UTC instant.
    pub fn local_date(&self, instant: &DateTime<Utc>) -> NaiveDate {
        (instant.naive_utc() + Duration::minutes(self.0 as i64)).date()
    }

    /// Local hour (0..=23) of a UTC instant.
    pub fn local_hour(&self, instant: &DateTime<Utc>) -> u32 {
        (instant.naive_utc() + Duration::minutes(self.0 as i64)).hour()
    }

    /// Local wall-clock time of a UTC instant.
    pub fn local_time(&self, instant: &DateTime<Utc>) -> NaiveTime {
        (instant.naive_utc() + Duration::minutes(self.0 as i64)).time()
    }
}

impl TryFrom<i32> for UtcOffset {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_minutes(value)
    }
}

impl From<UtcOffset> for i32 {
    fn from(offset: UtcOffset) -> Self {
        offset.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_offsets_outside_real_timezones() {
        assert!(UtcOffset::from_minutes(-721).is_err());
        assert!(UtcOffset::from_minutes(841).is_err());
        assert!(UtcOffset::from_minutes(330).is_ok());
    }

    #[test]
    fn to_utc_subtracts_positive_offset() {
        let offset = UtcOffset::from_minutes(120).unwrap();
        let utc = offset.to_utc(date(2024, 3, 4), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(utc.to_rfc3339(), "2024-03-04T07:00:00+00:00");
    }

    #[test]
    fn local_date_can_roll_into_next_day() {
        let offset = UtcOffset::from_minutes(-300).unwrap();
        let instant = offset.to_utc(date(2024, 3, 4), NaiveTime::from_hms_opt(23, 30, 0).unwrap());
        assert_eq!(offset.local_date(&instant), date(2024, 3, 4));
        assert_eq!(UtcOffset::UTC.local_date(&instant), date(2024, 3, 5));
        assert_eq!(offset.local_hour(&instant), 23);
    }

    #[test]
    fn deserialization_validates_range() {
        assert!(serde_json::from_str::<UtcOffset>("60").is_ok());
        assert!(serde_json::from_str::<UtcOffset>("9000").is_err());
    }
}
