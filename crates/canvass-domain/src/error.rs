//! Domain error types

use thiserror::Error;

/// Errors raised when domain values or lifecycle operations are invalid
///
/// These always indicate a caller bug or bad input data. An assumption that
/// lacks evidence, or a stage that cannot graduate yet, is never an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A 1-5 rating was outside its range
    #[error("{field} must be between 1 and 5, got {value}")]
    RatingOutOfRange {
        /// Which rating was being built (confidence, importance, ...)
        field: &'static str,
        /// The rejected value
        value: i64,
    },

    /// A tag's confidence change was outside [-2, 2]
    #[error("confidence change must be between -2 and 2, got {0}")]
    ConfidenceChangeOutOfRange(i64),

    /// A risk score outside the reachable [5, 25] range
    #[error("risk score must be between 5 and 25, got {0}")]
    RiskScoreOutOfRange(i64),

    /// A stage number other than 1, 2 or 3
    #[error("validation stage must be 1, 2 or 3, got {0}")]
    InvalidStage(i64),

    /// An enum value could not be parsed from text
    #[error("unknown {kind}: '{value}'")]
    UnknownValue {
        /// Name of the enum being parsed
        kind: &'static str,
        /// The rejected text
        value: String,
    },

    /// An identifier string was not a valid UUID
    #[error("invalid {kind} id '{value}': {reason}")]
    InvalidId {
        /// assumption or interview
        kind: &'static str,
        /// The rejected text
        value: String,
        /// Parser message
        reason: String,
    },

    /// The requested status change is not an edge of the state machine
    #[error("cannot move assumption from {from} to {to}")]
    InvalidTransition {
        /// Current status
        from: &'static str,
        /// Requested status
        to: &'static str,
    },

    /// Lookup by id failed
    #[error("{kind} not found: {id}")]
    NotFound {
        /// assumption or interview
        kind: &'static str,
        /// The missing id
        id: String,
    },

    /// A required text field was empty
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
}
