//! Stage evaluator
//!
//! Aggregates assumptions and interview evidence into per-stage statistics
//! and decides, for each stage, whether it can graduate and whether it is
//! unlocked. Stages are evaluated as a left-to-right fold: stage N is
//! unlocked only if stage N-1 can graduate in the same pass.

use crate::{EngineConfig, TagIndex};
use canvass_domain::{Assumption, AssumptionStatus, Interview, ValidationStage};
use std::collections::BTreeMap;
use std::fmt;

/// A graduation criterion the stage does not meet yet
#[derive(Debug, Clone, PartialEq)]
pub enum Shortfall {
    /// Not enough distinct interviews
    Interviews {
        /// Interviews counted
        have: usize,
        /// Interviews required
        required: usize,
    },
    /// Average confidence below the bar
    Confidence {
        /// Current average
        average: f64,
        /// Required average
        required: f64,
    },
    /// Too many invalidated assumptions
    Invalidated {
        /// Invalidated assumptions
        count: usize,
        /// Maximum tolerated
        max: usize,
    },
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shortfall::Interviews { have, required } => write!(
                f,
                "need {} more interview(s) ({}/{})",
                required - have,
                have,
                required
            ),
            Shortfall::Confidence { average, required } => write!(
                f,
                "average confidence {:.1} is below {:.1}",
                average, required
            ),
            Shortfall::Invalidated { count, max } => write!(
                f,
                "{} invalidated assumption(s) exceed the limit of {}",
                count, max
            ),
        }
    }
}

/// Derived status of one stage, recomputed on every evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct StageStatus {
    /// Which stage
    pub stage: ValidationStage,
    /// Distinct interviews tagging at least one of the stage's assumptions
    pub interview_count: usize,
    /// Interviews still required (0 when met)
    pub interviews_needed: usize,
    /// Mean confidence over the stage's assumptions (0 when empty)
    pub avg_confidence: f64,
    /// Assumptions marked validated
    pub validated_count: usize,
    /// Assumptions marked invalidated
    pub invalidated_count: usize,
    /// Assumptions still untested
    pub untested_count: usize,
    /// Assumptions being tested
    pub testing_count: usize,
    /// Assumptions counted in this stage
    pub total_assumptions: usize,
    /// All graduation criteria met
    pub can_graduate: bool,
    /// Stage 1, or the previous stage can graduate
    pub is_unlocked: bool,
    /// Unmet criteria, in check order
    pub shortfalls: Vec<Shortfall>,
    /// Human readable next step
    pub recommendation: String,
}

/// Evaluate a single stage
///
/// `previous_graduated` is ignored for stage 1, which is always unlocked.
pub fn evaluate_stage(
    stage: ValidationStage,
    assumptions: &[Assumption],
    interviews: &[Interview],
    previous_graduated: bool,
    config: &EngineConfig,
) -> StageStatus {
    let index = TagIndex::build(interviews);
    evaluate_with_index(stage, assumptions, &index, previous_graduated, config)
}

/// Evaluate all three stages in order, chaining graduation into unlocking
pub fn evaluate_all_stages(
    assumptions: &[Assumption],
    interviews: &[Interview],
    config: &EngineConfig,
) -> BTreeMap<ValidationStage, StageStatus> {
    let index = TagIndex::build(interviews);
    let mut statuses = BTreeMap::new();
    let mut previous_graduated = true;

    for stage in ValidationStage::ALL {
        let status = evaluate_with_index(stage, assumptions, &index, previous_graduated, config);
        previous_graduated = status.can_graduate;
        statuses.insert(stage, status);
    }

    statuses
}

pub(crate) fn evaluate_with_index(
    stage: ValidationStage,
    assumptions: &[Assumption],
    index: &TagIndex<'_>,
    previous_graduated: bool,
    config: &EngineConfig,
) -> StageStatus {
    let thresholds = config.stage(stage);

    let stage_assumptions: Vec<&Assumption> =
        assumptions.iter().filter(|a| a.belongs_to(stage)).collect();
    let total_assumptions = stage_assumptions.len();

    let interview_count = index
        .interviews_tagging_any(stage_assumptions.iter().map(|a| a.id))
        .len();

    let avg_confidence = if total_assumptions == 0 {
        0.0
    } else {
        let sum: u32 = stage_assumptions
            .iter()
            .map(|a| u32::from(a.confidence.value()))
            .sum();
        f64::from(sum) / total_assumptions as f64
    };

    let count_status = |status: AssumptionStatus| {
        stage_assumptions
            .iter()
            .filter(|a| a.status == status)
            .count()
    };
    let validated_count = count_status(AssumptionStatus::Validated);
    let invalidated_count = count_status(AssumptionStatus::Invalidated);
    let untested_count = count_status(AssumptionStatus::Untested);
    let testing_count = count_status(AssumptionStatus::Testing);

    let interviews_needed = thresholds.min_interviews.saturating_sub(interview_count);

    let mut shortfalls = Vec::new();
    if interview_count < thresholds.min_interviews {
        shortfalls.push(Shortfall::Interviews {
            have: interview_count,
            required: thresholds.min_interviews,
        });
    }
    if avg_confidence < thresholds.min_confidence {
        shortfalls.push(Shortfall::Confidence {
            average: avg_confidence,
            required: thresholds.min_confidence,
        });
    }
    if invalidated_count > thresholds.max_invalidated {
        shortfalls.push(Shortfall::Invalidated {
            count: invalidated_count,
            max: thresholds.max_invalidated,
        });
    }

    let can_graduate = total_assumptions > 0 && shortfalls.is_empty();
    let is_unlocked = stage == ValidationStage::One || previous_graduated;

    let recommendation = recommend(stage, is_unlocked, total_assumptions, can_graduate, &shortfalls);

    tracing::debug!(
        stage = stage.number(),
        assumptions = total_assumptions,
        interviews = interview_count,
        avg_confidence,
        invalidated = invalidated_count,
        can_graduate,
        is_unlocked,
        "evaluated stage"
    );

    StageStatus {
        stage,
        interview_count,
        interviews_needed,
        avg_confidence,
        validated_count,
        invalidated_count,
        untested_count,
        testing_count,
        total_assumptions,
        can_graduate,
        is_unlocked,
        shortfalls,
        recommendation,
    }
}

fn recommend(
    stage: ValidationStage,
    is_unlocked: bool,
    total_assumptions: usize,
    can_graduate: bool,
    shortfalls: &[Shortfall],
) -> String {
    if !is_unlocked {
        // Stage 1 is never locked, so a previous stage exists here
        let previous = stage.previous().unwrap_or(ValidationStage::One);
        return format!(
            "Locked: graduate {} ({}) before relying on this stage.",
            previous,
            previous.definition().name
        );
    }

    if total_assumptions == 0 {
        let areas: Vec<&str> = stage.definition().areas.iter().map(|a| a.label()).collect();
        return format!(
            "No assumptions yet. Add assumptions for {} to start this stage.",
            areas.join(", ")
        );
    }

    if can_graduate {
        return match stage.next() {
            Some(next) => format!(
                "Ready to graduate. Proceed to {}: {}.",
                next,
                next.definition().name
            ),
            None => "All criteria met. Ready for execution.".to_string(),
        };
    }

    let issues: Vec<String> = shortfalls.iter().map(ToString::to_string).collect();
    format!("Not ready to graduate: {}.", issues.join("; "))
}
