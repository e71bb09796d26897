//! Stage-weighted overall progress
//!
//! Each stage contributes its weight times a completion fraction. A stage
//! that can graduate is complete; otherwise it earns partial credit for
//! each graduation criterion it already meets.

use crate::requirements::coverage;
use crate::{EngineConfig, StageStatus};
use canvass_domain::ValidationStage;
use std::collections::BTreeMap;

/// Completion of one stage
#[derive(Debug, Clone, PartialEq)]
pub struct StageProgress {
    /// Stage
    pub stage: ValidationStage,
    /// Weight of the stage, as a fraction of 1
    pub weight: f64,
    /// Completion from 0 to 1
    pub completion: f64,
}

impl StageProgress {
    /// Points this stage adds to the overall percentage
    pub fn contribution(&self) -> f64 {
        self.weight * self.completion * 100.0
    }
}

/// Progress across all three stages
#[derive(Debug, Clone, PartialEq)]
pub struct OverallProgress {
    /// Per-stage breakdown, stage 1 first
    pub per_stage: Vec<StageProgress>,
    /// Weighted total, 0 to 100
    pub percentage: f64,
}

/// Roll stage statuses up into one percentage
pub fn overall_progress(
    statuses: &BTreeMap<ValidationStage, StageStatus>,
    config: &EngineConfig,
) -> OverallProgress {
    let per_stage: Vec<StageProgress> = ValidationStage::ALL
        .into_iter()
        .map(|stage| StageProgress {
            stage,
            weight: config.stage_weight(stage),
            completion: statuses
                .get(&stage)
                .map(|s| stage_completion(s, config))
                .unwrap_or(0.0),
        })
        .collect();

    let percentage = per_stage.iter().map(StageProgress::contribution).sum();

    OverallProgress {
        per_stage,
        percentage,
    }
}

fn stage_completion(status: &StageStatus, config: &EngineConfig) -> f64 {
    if status.total_assumptions == 0 {
        return 0.0;
    }
    if status.can_graduate {
        return 1.0;
    }

    let thresholds = config.stage(status.stage);
    let interviews = coverage(status.interview_count, thresholds.min_interviews);
    let confidence = if thresholds.min_confidence > 0.0 {
        (status.avg_confidence / thresholds.min_confidence).min(1.0)
    } else {
        1.0
    };
    let invalidation = if status.invalidated_count <= thresholds.max_invalidated {
        1.0
    } else {
        0.0
    };

    (interviews + confidence + invalidation) / 3.0
}
