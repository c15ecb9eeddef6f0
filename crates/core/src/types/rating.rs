//! Product rating.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The value is above the five-star scale.
    #[error("rating must be between 0 and {max} (got {value})")]
    OutOfRange {
        /// The rejected value.
        value: u8,
        /// Maximum allowed rating.
        max: u8,
    },
}

/// Aggregate product rating, an integer out of five.
///
/// Decoding a rating outside `0..=5` fails, so a malformed catalog record is
/// rejected at the boundary instead of rendering an impossible star count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Highest rating on the scale.
    pub const MAX: u8 = 5;

    /// Create a rating, validating the range.
    ///
    /// # Errors
    ///
    /// Returns `RatingError::OutOfRange` if `value` is greater than 5.
    pub const fn new(value: u8) -> Result<Self, RatingError> {
        if value > Self::MAX {
            return Err(RatingError::OutOfRange {
                value,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    /// Get the number of stars.
    #[must_use]
    pub const fn stars(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

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
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_full_scale() {
        for value in 0..=5 {
            assert_eq!(Rating::new(value).unwrap().stars(), value);
        }
    }

    #[test]
    fn test_rejects_above_five() {
        assert!(matches!(
            Rating::new(6),
            Err(RatingError::OutOfRange { value: 6, max: 5 })
        ));
    }

    #[test]
    fn test_decode_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("4").is_ok());
        assert!(serde_json::from_str::<Rating>("9").is_err());
        assert!(serde_json::from_str::<Rating>("-1").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Rating::new(4).unwrap().to_string(), "4/5");
    }
}
