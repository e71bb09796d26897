//! Scoring primitives: risk score, priority tier and beachhead readiness
//!
//! All functions here are pure. The `compute_*` variants accept raw
//! integers for callers holding unvalidated data and reject anything out of
//! range; the typed variants cannot fail.

use crate::{DomainError, Rating};
use std::fmt;

/// Risk of an assumption, `(6 - confidence) * importance`, in [5, 25]
///
/// Higher means riskier: low confidence combined with high importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RiskScore(u8);

impl RiskScore {
    /// Lowest reachable score
    pub const MIN: u8 = 5;
    /// Highest reachable score
    pub const MAX: u8 = 25;

    /// Compute the risk score from validated ratings
    pub fn from_ratings(confidence: Rating, importance: Rating) -> Self {
        Self((6 - confidence.value()) * importance.value())
    }

    /// Wrap an existing score, rejecting values outside [5, 25]
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DomainError::RiskScoreOutOfRange(value))
        }
    }

    /// Get the raw value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Priority tier for this score
    pub fn priority(&self) -> Priority {
        Priority::from_risk_score(*self)
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority tier derived from a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Risk score below 8
    Low,
    /// Risk score in [8, 15)
    Medium,
    /// Risk score 15 and above
    High,
}

impl Priority {
    /// Lower bound (inclusive) of the medium tier
    pub const MEDIUM_THRESHOLD: u8 = 8;
    /// Lower bound (inclusive) of the high tier
    pub const HIGH_THRESHOLD: u8 = 15;

    /// Tier for a risk score
    pub fn from_risk_score(score: RiskScore) -> Self {
        match score.value() {
            v if v >= Self::HIGH_THRESHOLD => Priority::High,
            v if v >= Self::MEDIUM_THRESHOLD => Priority::Medium,
            _ => Priority::Low,
        }
    }

    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Parse a tier from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute a risk score from raw confidence and importance values
///
/// # Errors
///
/// Returns [`DomainError::RatingOutOfRange`] if either input is outside 1..=5.
///
/// # Examples
///
/// ```
/// use canvass_domain::scoring::compute_risk_score;
///
/// assert_eq!(compute_risk_score(2, 5).unwrap(), 20);
/// assert!(compute_risk_score(0, 5).is_err());
/// ```
pub fn compute_risk_score(confidence: i64, importance: i64) -> Result<u8, DomainError> {
    let confidence = Rating::checked("confidence", confidence)?;
    let importance = Rating::checked("importance", importance)?;
    Ok(RiskScore::from_ratings(confidence, importance).value())
}

/// Compute the priority tier for a raw risk score
///
/// # Errors
///
/// Returns [`DomainError::RiskScoreOutOfRange`] outside [5, 25].
pub fn compute_priority(risk_score: i64) -> Result<Priority, DomainError> {
    RiskScore::new(risk_score).map(Priority::from_risk_score)
}

/// Readiness of a candidate beachhead segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeachheadReadiness {
    /// `pain * 2 + access + willingness`, at most 20
    pub score: u8,
    /// Pain and access both at least 4
    pub is_ready: bool,
}

impl BeachheadReadiness {
    /// Highest possible score
    pub const MAX_SCORE: u8 = 20;
    /// Pain and access must each reach this to be ready
    pub const READY_THRESHOLD: u8 = 4;

    /// Score a segment
    ///
    /// `is_ready` is decided from pain and access alone, never from the
    /// score: a segment with a high score but poor access is not ready.
    pub fn assess(pain: Rating, access: Rating, willingness: Rating) -> Self {
        let score = pain.value() * 2 + access.value() + willingness.value();
        let is_ready =
            pain.value() >= Self::READY_THRESHOLD && access.value() >= Self::READY_THRESHOLD;
        Self { score, is_ready }
    }
}

/// Score a beachhead segment from raw 1-5 values
pub fn beachhead_readiness(
    pain: i64,
    access: i64,
    willingness: i64,
) -> Result<BeachheadReadiness, DomainError> {
    Ok(BeachheadReadiness::assess(
        Rating::checked("pain", pain)?,
        Rating::checked("access", access)?,
        Rating::checked("willingness", willingness)?,
    ))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: risk never rises with confidence and never falls with importance
        #[test]
        fn test_risk_monotonicity(c in 1i64..=4, i in 1i64..=4) {
            let base = compute_risk_score(c, i).unwrap();
            prop_assert!(compute_risk_score(c + 1, i).unwrap() <= base);
            prop_assert!(compute_risk_score(c, i + 1).unwrap() >= base);
        }

        /// Property: every reachable risk score lands in [5, 25]
        #[test]
        fn test_risk_range(c in 1i64..=5, i in 1i64..=5) {
            let score = compute_risk_score(c, i).unwrap();
            prop_assert!((RiskScore::MIN..=RiskScore::MAX).contains(&score));
        }

        /// Property: the tiers partition [5, 25] with no gaps
        #[test]
        fn test_priority_partition(r in 5i64..=25) {
            let expected = if r < 8 {
                Priority::Low
            } else if r < 15 {
                Priority::Medium
            } else {
                Priority::High
            };
            prop_assert_eq!(compute_priority(r).unwrap(), expected);
        }

        /// Property: readiness depends only on pain and access
        #[test]
        fn test_readiness_ignores_willingness(p in 1i64..=5, a in 1i64..=5, w1 in 1i64..=5, w2 in 1i64..=5) {
            let r1 = beachhead_readiness(p, a, w1).unwrap();
            let r2 = beachhead_readiness(p, a, w2).unwrap();
            prop_assert_eq!(r1.is_ready, r2.is_ready);
            prop_assert!(r1.score <= BeachheadReadiness::MAX_SCORE);
        }
    }
}
