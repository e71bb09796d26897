//! Assumption module - the unit of customer discovery
//!
//! An assumption is a belief about customers, problems or the solution
//! that has to be tested with interviews before it is relied upon.

use crate::{
    AssumptionId, AssumptionType, CanvasArea, DomainError, Priority, Rating, RiskScore,
    ValidationStage,
};
use std::fmt;

/// Where an assumption stands in validation
///
/// Allowed transitions: untested -> testing, testing -> untested,
/// testing -> validated, testing -> invalidated, and validated or
/// invalidated back to testing when new evidence arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AssumptionStatus {
    /// No interviews yet
    #[default]
    Untested,
    /// Evidence is being gathered
    Testing,
    /// Evidence supports the assumption
    Validated,
    /// Evidence contradicts the assumption
    Invalidated,
}

impl AssumptionStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AssumptionStatus::Untested => "untested",
            AssumptionStatus::Testing => "testing",
            AssumptionStatus::Validated => "validated",
            AssumptionStatus::Invalidated => "invalidated",
        }
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "untested" => Some(AssumptionStatus::Untested),
            "testing" => Some(AssumptionStatus::Testing),
            "validated" => Some(AssumptionStatus::Validated),
            "invalidated" => Some(AssumptionStatus::Invalidated),
            _ => None,
        }
    }

    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: AssumptionStatus) -> bool {
        use AssumptionStatus::*;
        matches!(
            (self, next),
            (Untested, Testing)
                | (Testing, Untested)
                | (Testing, Validated)
                | (Testing, Invalidated)
                | (Validated, Testing)
                | (Invalidated, Testing)
        )
    }

    /// Validated or invalidated
    pub fn is_decided(&self) -> bool {
        matches!(self, AssumptionStatus::Validated | AssumptionStatus::Invalidated)
    }
}

impl fmt::Display for AssumptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssumptionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| DomainError::UnknownValue {
            kind: "assumption status",
            value: s.to_string(),
        })
    }
}

/// A tracked assumption
///
/// Risk score and priority are never stored; they are computed from
/// confidence and importance on every read, so they cannot go stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Assumption {
    /// Unique identifier
    pub id: AssumptionId,

    /// Customer, problem or solution
    pub assumption_type: AssumptionType,

    /// Free text statement of the belief
    pub description: String,

    /// Canvas area the assumption belongs to
    pub canvas_area: CanvasArea,

    /// Explicitly assigned stage, if any
    ///
    /// When absent the stage is derived from the canvas area.
    pub validation_stage: Option<ValidationStage>,

    /// Current validation status
    pub status: AssumptionStatus,

    /// How sure we are the assumption holds
    pub confidence: Rating,

    /// How much the business depends on it
    pub importance: Rating,

    /// Evidence notes, oldest first
    pub evidence: Vec<String>,

    /// Number of distinct interviews tagging this assumption
    ///
    /// Advisory cache maintained by [`crate::Project`]; the engine always
    /// counts tags itself.
    pub interview_count: usize,
}

impl Assumption {
    /// Create an untested assumption with medium confidence and importance
    pub fn new(
        assumption_type: AssumptionType,
        description: impl Into<String>,
        canvas_area: CanvasArea,
    ) -> Self {
        Self {
            id: AssumptionId::new(),
            assumption_type,
            description: description.into(),
            canvas_area,
            validation_stage: None,
            status: AssumptionStatus::Untested,
            confidence: Rating::MEDIUM,
            importance: Rating::MEDIUM,
            evidence: Vec::new(),
            interview_count: 0,
        }
    }

    /// Stage this assumption is worked in
    ///
    /// The explicit stage wins; otherwise the canvas area decides.
    pub fn stage(&self) -> ValidationStage {
        self.validation_stage
            .unwrap_or_else(|| ValidationStage::for_area(self.canvas_area))
    }

    /// The canvas area's stage, when it differs from the explicit stage
    pub fn stage_conflict(&self) -> Option<ValidationStage> {
        let area_stage = ValidationStage::for_area(self.canvas_area);
        match self.validation_stage {
            Some(explicit) if explicit != area_stage => Some(area_stage),
            _ => None,
        }
    }

    /// Whether this assumption is counted in `stage`
    ///
    /// True if the explicit stage matches or the canvas area is owned by the
    /// stage. An assumption whose explicit stage contradicts its area is
    /// counted in both stages.
    pub fn belongs_to(&self, stage: ValidationStage) -> bool {
        self.validation_stage == Some(stage) || stage.definition().areas.contains(&self.canvas_area)
    }

    /// Current risk score
    pub fn risk_score(&self) -> RiskScore {
        RiskScore::from_ratings(self.confidence, self.importance)
    }

    /// Current priority tier
    pub fn priority(&self) -> Priority {
        self.risk_score().priority()
    }

    /// Change status, enforcing the transition rules
    pub fn set_status(&mut self, next: AssumptionStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.status.as_str(),
                to: next.as_str(),
            });
        }
        self.status = next;
        Ok(())
    }

    /// Append an evidence note
    pub fn add_evidence(&mut self, note: impl Into<String>) -> Result<(), DomainError> {
        let note = note.into();
        if note.trim().is_empty() {
            return Err(DomainError::EmptyField("evidence"));
        }
        self.evidence.push(note);
        Ok(())
    }
}

/// Input for creating an assumption through [`crate::Project::add_assumption`]
#[derive(Debug, Clone)]
pub struct NewAssumption {
    /// Customer, problem or solution
    pub assumption_type: AssumptionType,
    /// Free text statement
    pub description: String,
    /// Canvas area
    pub canvas_area: CanvasArea,
    /// Explicit stage (None = derive from area)
    pub validation_stage: Option<ValidationStage>,
    /// Starting confidence (None = medium)
    pub confidence: Option<Rating>,
    /// Importance (None = medium)
    pub importance: Option<Rating>,
}

impl NewAssumption {
    /// Minimal input with every optional field unset
    pub fn new(
        assumption_type: AssumptionType,
        description: impl Into<String>,
        canvas_area: CanvasArea,
    ) -> Self {
        Self {
            assumption_type,
            description: description.into(),
            canvas_area,
            validation_stage: None,
            confidence: None,
            importance: None,
        }
    }
}
