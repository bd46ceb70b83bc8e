//! Per-request helpers shared by the endpoint modules.

use axum::response::Response;
use chrono::NaiveDate;
use uuid::Uuid;

use super::error::bad_request;
use crate::domain::foundation::{CommandMetadata, UserId};

/// Metadata for a command issued through the API.
pub fn request_metadata(user_id: UserId) -> CommandMetadata {
    CommandMetadata::new(user_id)
        .with_correlation_id(Uuid::new_v4().to_string())
        .with_source("api")
}

/// Parses a `YYYY-MM-DD` path segment.
pub fn parse_date(raw: &str) -> Result<NaiveDate, Response> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| bad_request(format!("Invalid date '{}', expected YYYY-MM-DD", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(
            parse_date("2024-05-06").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
        );
        assert_eq!(parse_date("06/05/2024").unwrap_err().status(), StatusCode::BAD_REQUEST);
        assert_eq!(parse_date("2024-02-30").unwrap_err().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn metadata_is_tagged_with_a_fixed_correlation_id() {
        let metadata = request_metadata(UserId::new("user-1").unwrap());
        assert_eq!(metadata.correlation_id(), metadata.correlation_id());
        assert_eq!(metadata.source(), Some("api"));
    }
}
