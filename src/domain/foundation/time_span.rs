//! Half-open UTC time interval `[start, end)`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A non-empty interval of time. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSpan {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSpan {
    /// Creates a span, rejecting empty or inverted intervals.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::invalid_format(
                "time_span",
                format!("end {} must be after start {}", end, start),
            ));
        }
        Ok(Self { start, end })
    }

    /// Span of `minutes` length beginning at `start`.
    pub fn starting_at(start: DateTime<Utc>, minutes: i64) -> Result<Self, ValidationError> {
        Self::new(start, start + Duration::minutes(minutes))
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Minutes shared by both spans (0 when disjoint).
    pub fn overlap_minutes(&self, other: &TimeSpan) -> i64 {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if end > start {
            (end - start).num_minutes()
        } else {
            0
        }
    }

    /// Intersection of both spans, if any.
    pub fn clip_to(&self, bounds: &TimeSpan) -> Option<TimeSpan> {
        let start = self.start.max(bounds.start);
        let end = self.end.min(bounds.end);
        TimeSpan::new(start, end).ok()
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant < self.end
    }
}
