//! Engine error types

use canvass_domain::DomainError;
use thiserror::Error;

/// Errors that can occur in engine operations
///
/// A stage that cannot graduate or an assumption without enough evidence
/// is reported through the result types, not through this enum.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Configuration values are inconsistent or out of range
    #[error("Configuration error: {0}")]
    Config(String),

    /// A suggestion was accepted although the evidence did not allow it
    #[error("Assumption {assumption} is not eligible: {reason}")]
    NotEligible {
        /// Assumption the suggestion was for
        assumption: String,
        /// Reason given by the eligibility check
        reason: String,
    },

    /// Domain rule violated while applying a change
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
