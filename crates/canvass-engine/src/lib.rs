//! Canvass Engine
//!
//! Rules that turn assumptions and interview evidence into decisions:
//!
//! - Stage evaluation and the three-stage graduation gate
//! - Validation eligibility for a single assumption
//! - Interview-requirement tracking
//! - Stage-weighted overall progress
//!
//! Every function is pure over the data it is given. Thresholds come from
//! an [`EngineConfig`] passed in by the caller.
//!
//! # Examples
//!
//! ```
//! use canvass_domain::{Assumption, AssumptionType, CanvasArea, Interview};
//! use canvass_engine::{DiscoveryEngine, EngineConfig};
//!
//! let engine = DiscoveryEngine::new(EngineConfig::default()).unwrap();
//! let assumption = Assumption::new(
//!     AssumptionType::Problem,
//!     "Students lose lecture notes",
//!     CanvasArea::Problem,
//! );
//!
//! let result = engine.check_validation_eligibility(&assumption, &[], None);
//! assert!(!result.can_validate);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod eligibility;
mod engine;
mod error;
mod index;
mod progress;
mod requirements;
mod stage;

pub use config::{EngineConfig, StageThresholds};
pub use eligibility::{check_validation_eligibility, EligibilityResult, EvidenceTally};
pub use engine::DiscoveryEngine;
pub use error::{EngineError, Result};
pub use index::{TagIndex, TaggedInterview};
pub use progress::{overall_progress, OverallProgress, StageProgress};
pub use requirements::{calculate_interview_requirements, InterviewRequirements};
pub use stage::{evaluate_all_stages, evaluate_stage, Shortfall, StageStatus};
