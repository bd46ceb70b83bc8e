//! Self-reported rating on a 1 (very low) to 5 (very high) scale.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A 1..=5 self-assessment used by check-ins (mood, energy, focus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        Self::for_field("rating", value)
    }

    /// Validates a rating, reporting `field` on failure.
    pub fn for_field(field: &str, value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                field,
                Self::MIN as i32,
                Self::MAX as i32,
                value as i32,
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_one_through_five() {
        for v in 1..=5 {
            assert_eq!(Rating::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn rejects_zero_and_six() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
    }

    #[test]
    fn for_field_names_the_field() {
        let err = Rating::for_field("energy", 7).unwrap_err();
        assert_eq!(err.field(), "energy");
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<Rating>("3").is_ok());
        assert!(serde_json::from_str::<Rating>("0").is_err());
    }
}
