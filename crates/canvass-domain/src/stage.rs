//! Validation stages - the three gated steps of customer discovery

use crate::{CanvasArea, DomainError};
use std::fmt;

/// One of the three validation stages
///
/// Stages are worked in order. Stage 1 is always open; each later stage
/// unlocks once the stage before it can graduate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValidationStage {
    /// Customer-problem fit
    One,
    /// Problem-solution fit
    Two,
    /// Business model validation
    Three,
}

impl ValidationStage {
    /// All stages in evaluation order
    pub const ALL: [ValidationStage; 3] = [
        ValidationStage::One,
        ValidationStage::Two,
        ValidationStage::Three,
    ];

    /// Stage number (1, 2 or 3)
    pub fn number(&self) -> u8 {
        match self {
            ValidationStage::One => 1,
            ValidationStage::Two => 2,
            ValidationStage::Three => 3,
        }
    }

    /// Zero-based position, for indexing per-stage tables
    pub fn index(&self) -> usize {
        usize::from(self.number() - 1)
    }

    /// Parse a stage from its number
    pub fn from_number(n: i64) -> Result<Self, DomainError> {
        match n {
            1 => Ok(ValidationStage::One),
            2 => Ok(ValidationStage::Two),
            3 => Ok(ValidationStage::Three),
            _ => Err(DomainError::InvalidStage(n)),
        }
    }

    /// The stage after this one
    pub fn next(&self) -> Option<Self> {
        match self {
            ValidationStage::One => Some(ValidationStage::Two),
            ValidationStage::Two => Some(ValidationStage::Three),
            ValidationStage::Three => None,
        }
    }

    /// The stage before this one
    pub fn previous(&self) -> Option<Self> {
        match self {
            ValidationStage::One => None,
            ValidationStage::Two => Some(ValidationStage::One),
            ValidationStage::Three => Some(ValidationStage::Two),
        }
    }

    /// The stage that owns a canvas area
    ///
    /// The mapping is total: every area belongs to exactly one stage.
    pub fn for_area(area: CanvasArea) -> Self {
        Self::ALL
            .into_iter()
            .find(|stage| stage.definition().areas.contains(&area))
            .unwrap_or(ValidationStage::Three)
    }

    /// Static definition of this stage
    pub fn definition(&self) -> &'static StageDefinition {
        &STAGE_DEFINITIONS[self.index()]
    }
}

impl fmt::Display for ValidationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stage {}", self.number())
    }
}

impl std::str::FromStr for ValidationStage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("stage")
            .or_else(|| trimmed.strip_prefix("Stage"))
            .unwrap_or(trimmed)
            .trim();
        let n = digits.parse::<i64>().map_err(|_| DomainError::UnknownValue {
            kind: "validation stage",
            value: s.to_string(),
        })?;
        Self::from_number(n)
    }
}

/// Thresholds a stage must meet before it can graduate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraduationCriteria {
    /// Minimum average assumption confidence
    pub min_confidence: f64,
    /// Maximum number of invalidated assumptions tolerated
    pub max_invalidated: usize,
}

/// Static description of a validation stage
#[derive(Debug, Clone, PartialEq)]
pub struct StageDefinition {
    /// Which stage this describes
    pub stage: ValidationStage,
    /// Short name
    pub name: &'static str,
    /// The question the stage answers
    pub question: &'static str,
    /// Longer description of the work in this stage
    pub description: &'static str,
    /// Canvas areas owned by this stage
    pub areas: &'static [CanvasArea],
    /// Default minimum number of interviews
    pub minimum_interviews: usize,
    /// Default graduation thresholds
    pub graduation_criteria: GraduationCriteria,
}

/// The three stage definitions, in order
pub static STAGE_DEFINITIONS: [StageDefinition; 3] = [
    StageDefinition {
        stage: ValidationStage::One,
        name: "Customer-Problem Fit",
        question: "Do the customers you picked actually have this problem?",
        description: "Confirm who the customer is and that the problem is real and \
                      painful enough to act on.",
        areas: &[CanvasArea::Problem, CanvasArea::CustomerSegments],
        minimum_interviews: 5,
        graduation_criteria: GraduationCriteria {
            min_confidence: 4.0,
            max_invalidated: 0,
        },
    },
    StageDefinition {
        stage: ValidationStage::Two,
        name: "Problem-Solution Fit",
        question: "Does your solution solve the problem better than what they use today?",
        description: "Compare the solution against existing alternatives and find the \
                      early adopters who feel the gap most.",
        areas: &[
            CanvasArea::ExistingAlternatives,
            CanvasArea::EarlyAdopters,
            CanvasArea::Solution,
            CanvasArea::UniqueValueProposition,
        ],
        minimum_interviews: 5,
        graduation_criteria: GraduationCriteria {
            min_confidence: 4.0,
            max_invalidated: 1,
        },
    },
    StageDefinition {
        stage: ValidationStage::Three,
        name: "Business Model Validation",
        question: "Can you reach these customers and build a viable business around them?",
        description: "Test channels, pricing, costs and the metrics that show the \
                      business works.",
        areas: &[
            CanvasArea::Channels,
            CanvasArea::RevenueStreams,
            CanvasArea::CostStructure,
            CanvasArea::KeyMetrics,
            CanvasArea::UnfairAdvantage,
        ],
        minimum_interviews: 3,
        graduation_criteria: GraduationCriteria {
            min_confidence: 3.0,
            max_invalidated: 2,
        },
    },
];
