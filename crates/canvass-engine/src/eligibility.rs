//! Validation-eligibility checker
//!
//! Decides whether the interview evidence tagged to one assumption is
//! plentiful and one-sided enough to suggest marking it validated or
//! invalidated. Checks run in a fixed order and stop at the first gate
//! that fails:
//!
//! 1. enough tags overall
//! 2. for stage 1 assumptions, enough tags from beachhead interviews
//! 3. the support ratio against the two thresholds

use crate::{EngineConfig, TagIndex};
use canvass_domain::{
    Assumption, AssumptionStatus, Interview, InterviewId, ValidationEffect, ValidationStage,
};
use std::collections::HashSet;

/// Counts of the evidence tagged to one assumption
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvidenceTally {
    /// Tags that support
    pub supports: usize,
    /// Tags that contradict
    pub contradicts: usize,
    /// Neutral tags
    pub neutral: usize,
    /// Distinct tagging interviews from the beachhead segment
    pub beachhead_interviews: usize,
}

impl EvidenceTally {
    /// Total tags
    pub fn total(&self) -> usize {
        self.supports + self.contradicts + self.neutral
    }
}

/// Outcome of an eligibility check
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityResult {
    /// Whether the evidence justifies a decided status
    pub can_validate: bool,
    /// Status the evidence points to
    pub suggested_status: AssumptionStatus,
    /// Human readable explanation
    pub reason: String,
    /// Supporting tags / all tags, once the count gates pass
    pub support_ratio: Option<f64>,
    /// The evidence argues for rethinking the idea
    pub suggest_pivot: bool,
    /// Evidence counts behind the decision
    pub tally: EvidenceTally,
}

/// Check whether an assumption can be validated or invalidated
pub fn check_validation_eligibility(
    assumption: &Assumption,
    interviews: &[Interview],
    beachhead_segment: Option<&str>,
    config: &EngineConfig,
) -> EligibilityResult {
    let index = TagIndex::build(interviews);
    check_with_index(assumption, &index, beachhead_segment, config)
}

pub(crate) fn check_with_index(
    assumption: &Assumption,
    index: &TagIndex<'_>,
    beachhead_segment: Option<&str>,
    config: &EngineConfig,
) -> EligibilityResult {
    let tags = index.tags_for(assumption.id);

    let mut tally = EvidenceTally::default();
    let mut beachhead: HashSet<InterviewId> = HashSet::new();
    for tagged in tags {
        match tagged.tag.validation_effect {
            ValidationEffect::Supports => tally.supports += 1,
            ValidationEffect::Contradicts => tally.contradicts += 1,
            ValidationEffect::Neutral => tally.neutral += 1,
        }
        if tagged.interview.is_beachhead(beachhead_segment) {
            beachhead.insert(tagged.interview.id);
        }
    }
    tally.beachhead_interviews = beachhead.len();

    let result = decide(assumption, tally, beachhead_segment, config);
    tracing::debug!(
        assumption = %assumption.id,
        tags = tally.total(),
        supports = tally.supports,
        beachhead = tally.beachhead_interviews,
        can_validate = result.can_validate,
        suggested = %result.suggested_status,
        "checked validation eligibility"
    );
    result
}

fn decide(
    assumption: &Assumption,
    tally: EvidenceTally,
    beachhead_segment: Option<&str>,
    config: &EngineConfig,
) -> EligibilityResult {
    let total = tally.total();
    // At least one tag, so the support ratio always has a denominator
    let required = config.minimum_interviews_for_validation.max(1);

    if total < required {
        let suggested_status = if total == 0 {
            AssumptionStatus::Untested
        } else {
            AssumptionStatus::Testing
        };
        return EligibilityResult {
            can_validate: false,
            suggested_status,
            reason: format!(
                "Need {} more interview(s) tagged to this assumption ({}/{}).",
                required - total,
                total,
                required
            ),
            support_ratio: None,
            suggest_pivot: false,
            tally,
        };
    }

    let beachhead_required = config.minimum_beachhead_interviews;
    if assumption.belongs_to(ValidationStage::One)
        && tally.beachhead_interviews < beachhead_required
    {
        let segment = match beachhead_segment {
            Some(name) => format!("beachhead segment '{}'", name),
            None => "beachhead segment (none chosen yet)".to_string(),
        };
        return EligibilityResult {
            can_validate: false,
            suggested_status: AssumptionStatus::Testing,
            reason: format!(
                "Stage 1 assumptions need {} more interview(s) from the {} ({}/{}).",
                beachhead_required - tally.beachhead_interviews,
                segment,
                tally.beachhead_interviews,
                beachhead_required
            ),
            support_ratio: None,
            suggest_pivot: false,
            tally,
        };
    }

    let ratio = tally.supports as f64 / total as f64;
    let percent = |r: f64| (r * 100.0).round();

    if ratio >= config.minimum_support_ratio {
        EligibilityResult {
            can_validate: true,
            suggested_status: AssumptionStatus::Validated,
            reason: format!(
                "{}% of tagged interviews support this assumption; it can be marked validated.",
                percent(ratio)
            ),
            support_ratio: Some(ratio),
            suggest_pivot: false,
            tally,
        }
    } else if ratio <= config.maximum_support_ratio_for_invalidation {
        EligibilityResult {
            can_validate: true,
            suggested_status: AssumptionStatus::Invalidated,
            reason: format!(
                "Only {}% of tagged interviews support this assumption; mark it invalidated and consider a pivot.",
                percent(ratio)
            ),
            support_ratio: Some(ratio),
            suggest_pivot: true,
            tally,
        }
    } else {
        EligibilityResult {
            can_validate: false,
            suggested_status: AssumptionStatus::Testing,
            reason: format!(
                "Mixed evidence: {}% support sits between the {}% and {}% thresholds; keep testing.",
                percent(ratio),
                percent(config.maximum_support_ratio_for_invalidation),
                percent(config.minimum_support_ratio)
            ),
            support_ratio: Some(ratio),
            suggest_pivot: false,
            tally,
        }
    }
}
