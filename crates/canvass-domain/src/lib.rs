//! Canvass Domain Layer
//!
//! Core entities and pure business rules for customer discovery: the
//! assumptions a founder holds, the interviews that test them, and the
//! three-stage validation ladder they climb.
//!
//! ## Key Concepts
//!
//! - **Assumption**: a belief about customers, problems or the solution,
//!   rated for confidence and importance
//! - **Interview**: a structured conversation, linked to assumptions through
//!   embedded tags that support, contradict or are neutral
//! - **Risk score**: `(6 - confidence) * importance`, bucketed into priority tiers
//! - **Validation stage**: customer-problem fit, problem-solution fit,
//!   business model validation; each owns a set of canvas areas
//!
//! ## Architecture
//!
//! - Pure business logic only, no I/O
//! - Values are validated at construction; out-of-range ratings and unknown
//!   canvas areas are errors, never silently clamped
//! - Persistence lives behind the [`traits::ProjectStore`] trait

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assumption;
pub mod canvas;
pub mod error;
pub mod ids;
pub mod interview;
pub mod project;
pub mod rating;
pub mod scoring;
pub mod stage;
pub mod traits;

// Re-exports for convenience
pub use assumption::{Assumption, AssumptionStatus, NewAssumption};
pub use canvas::{AssumptionType, CanvasArea};
pub use error::DomainError;
pub use ids::{AssumptionId, InterviewId};
pub use interview::{
    AssumptionTag, Interview, InterviewStatus, IntervieweeType, NewInterview, ValidationEffect,
};
pub use project::Project;
pub use rating::{ConfidenceChange, Rating};
pub use scoring::{BeachheadReadiness, Priority, RiskScore};
pub use stage::{GraduationCriteria, StageDefinition, ValidationStage, STAGE_DEFINITIONS};
