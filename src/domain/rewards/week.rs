//! Monday-to-Sunday week of local dates.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TimeSpan, UtcOffset, ValidationError};

pub const DAYS_PER_WEEK: u32 = 7;

/// The seven local days starting on a Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekRange {
    start: NaiveDate,
}

impl WeekRange {
    /// The week whose Monday-to-Sunday range contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let back = date.weekday().num_days_from_monday() as i64;
        Self {
            start: date - Duration::days(back),
        }
    }

    /// Monday.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Sunday.
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(DAYS_PER_WEEK as i64 - 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..DAYS_PER_WEEK as i64).map(move |offset| start + Duration::days(offset))
    }

    pub fn previous(&self) -> Self {
        Self {
            start: self.start - Duration::days(DAYS_PER_WEEK as i64),
        }
    }

    /// UTC instants covering the whole local week.
    pub fn utc_span(&self, offset: UtcOffset) -> Result<TimeSpan, ValidationError> {
        TimeSpan::new(
            offset.start_of_day(self.start),
            offset.start_of_day(self.start + Duration::days(DAYS_PER_WEEK as i64)),
        )
    }
}
