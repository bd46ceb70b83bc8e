//! Self-reported check-ins.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CheckInId, DomainError, Rating, Timestamp, UserId};

pub const MAX_NOTE_LENGTH: usize = 500;

/// A mood/energy/focus self-rating at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub id: CheckInId,
    pub user_id: UserId,
    pub recorded_at: Timestamp,
    pub mood: Rating,
    pub energy: Rating,
    pub focus: Rating,
    pub note: Option<String>,
}

impl CheckIn {
    /// # Errors
    ///
    /// - `ValidationFailed` if the note exceeds 500 characters
    pub fn new(
        user_id: UserId,
        recorded_at: Timestamp,
        mood: Rating,
        energy: Rating,
        focus: Rating,
        note: Option<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: CheckInId::new(),
            user_id,
            recorded_at,
            mood,
            energy,
            focus,
            note: normalize_note(note)?,
        })
    }
}

/// Trims a free-text note, dropping it when blank.
pub(crate) fn normalize_note(note: Option<String>) -> Result<Option<String>, DomainError> {
    let Some(note) = note else {
        return Ok(None);
    };
    let trimmed = note.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_NOTE_LENGTH {
        return Err(DomainError::validation(
            "note",
            format!("Note must be {} characters or less", MAX_NOTE_LENGTH),
        ));
    }
    Ok(Some(trimmed.to_string()))
}

/// Mean of a rating across check-ins, `None` when there are none.
pub fn average_rating<F>(check_ins: &[CheckIn], rating: F) -> Option<f64>
where
    F: Fn(&CheckIn) -> Rating,
{
    if check_ins.is_empty() {
        return None;
    }
    let sum: u32 = check_ins.iter().map(|c| rating(c).value() as u32).sum();
    Some(sum as f64 / check_ins.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(v: u8) -> Rating {
        Rating::new(v).unwrap()
    }

    fn check_in(energy: u8, note: Option<&str>) -> Result<CheckIn, DomainError> {
        CheckIn::new(
            UserId::new("u").unwrap(),
            Timestamp::from_unix_secs(0),
            rating(3),
            rating(energy),
            rating(4),
            note.map(String::from),
        )
    }

    #[test]
    fn blank_note_is_dropped() {
        assert_eq!(check_in(3, Some("   ")).unwrap().note, None);
        assert_eq!(check_in(3, Some(" ok ")).unwrap().note.as_deref(), Some("ok"));
    }

    #[test]
    fn long_note_is_rejected() {
        let long = "n".repeat(MAX_NOTE_LENGTH + 1);
        assert!(check_in(3, Some(&long)).is_err());
        let exact = "n".repeat(MAX_NOTE_LENGTH);
        assert!(check_in(3, Some(&exact)).is_ok());
    }

    #[test]
    fn average_rating_of_energy() {
        let list = vec![check_in(2, None).unwrap(), check_in(5, None).unwrap()];
        assert_eq!(average_rating(&list, |c| c.energy), Some(3.5));
        assert_eq!(average_rating(&[], |c| c.energy), None);
    }
}
