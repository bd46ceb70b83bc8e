//! Fixtures shared by the handler tests.

use chrono::{NaiveDate, NaiveTime};

use crate::domain::foundation::{CommandMetadata, Timestamp, UserId};
use crate::domain::profile::UserProfile;

pub fn user() -> UserId {
    UserId::new("user-1").unwrap()
}

pub fn other_user() -> UserId {
    UserId::new("user-2").unwrap()
}

/// 2024-05-06, a Monday.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
}

pub fn at(date: NaiveDate, hour: u32, minute: u32) -> Timestamp {
    Timestamp::from_datetime(
        date.and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
            .and_utc(),
    )
}

/// Metadata for `user()` pinned to `at`.
pub fn metadata_at(at: Timestamp) -> CommandMetadata {
    CommandMetadata::new(user())
        .issued_at(at)
        .with_correlation_id("test-correlation")
}

/// A default profile for `user()` (UTC, 09:00-17:00).
pub fn profile() -> UserProfile {
    UserProfile::new(user(), "Ada", at(monday(), 6, 0)).unwrap()
}

/// Cipher over an all-zero test key.
pub fn cipher() -> crate::adapters::crypto::ChaChaSecretCipher {
    crate::adapters::crypto::ChaChaSecretCipher::from_base64_key(&secrecy::Secret::new(
        "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=".to_string(),
    ))
    .unwrap()
}
