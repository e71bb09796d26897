//! Bounded ratings used across assumptions, interviews and segments

use crate::DomainError;
use std::fmt;

/// An integer rating in 1..=5 ("very low" .. "very high")
///
/// Used for assumption confidence and importance, interview problem
/// importance, and beachhead pain/access/willingness. Construction rejects
/// out-of-range values instead of clamping them, so bad upstream data
/// surfaces as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating
    pub const MIN: Rating = Rating(1);
    /// Default rating for new assumptions
    pub const MEDIUM: Rating = Rating(3);
    /// Highest rating
    pub const MAX: Rating = Rating(5);

    /// Create a rating, rejecting values outside 1..=5
    pub fn new(value: u8) -> Result<Self, DomainError> {
        Self::checked("rating", i64::from(value))
    }

    /// Create a rating for a named field, rejecting values outside 1..=5
    ///
    /// The field name is carried into the error message.
    pub fn checked(field: &'static str, value: i64) -> Result<Self, DomainError> {
        if (1..=5).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DomainError::RatingOutOfRange { field, value })
        }
    }

    /// Get the raw value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Shift the rating by `change`, clamped to [1, 5]
    pub fn nudge(&self, change: ConfidenceChange) -> Self {
        let shifted = i16::from(self.0) + i16::from(change.value());
        Self(shifted.clamp(1, 5) as u8)
    }

    /// Human label for the rating
    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "very low",
            2 => "low",
            3 => "medium",
            4 => "high",
            _ => "very high",
        }
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::MEDIUM
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Rating {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// How far an interview tag moves an assumption's confidence, in [-2, 2]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConfidenceChange(i8);

impl ConfidenceChange {
    /// No change
    pub const NONE: ConfidenceChange = ConfidenceChange(0);

    /// Create a confidence change, rejecting values outside [-2, 2]
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if (-2..=2).contains(&value) {
            Ok(Self(value as i8))
        } else {
            Err(DomainError::ConfidenceChangeOutOfRange(value))
        }
    }

    /// Get the raw value
    pub fn value(&self) -> i8 {
        self.0
    }
}

impl fmt::Display for ConfidenceChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}
