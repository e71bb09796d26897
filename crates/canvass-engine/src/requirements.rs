//! Interview-requirement tracker
//!
//! A two-factor view of how far interviewing has come: stage 1 coverage and
//! beachhead coverage, blended evenly. This is not the stage-weighted
//! rollup in [`crate::progress`].

use crate::{EngineConfig, TagIndex};
use canvass_domain::{Assumption, Interview, ValidationStage};

/// Interview counts against their targets
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewRequirements {
    /// Distinct interviews tagging at least one stage 1 assumption
    pub stage1_interviews: usize,
    /// Stage 1 interview target
    pub stage1_required: usize,
    /// Interviews from the beachhead segment
    pub beachhead_interviews: usize,
    /// Beachhead interview target
    pub beachhead_required: usize,
    /// Even blend of both coverages, 0 to 100
    pub overall_progress: f64,
}

impl InterviewRequirements {
    /// Both targets reached
    pub fn is_met(&self) -> bool {
        self.stage1_interviews >= self.stage1_required
            && self.beachhead_interviews >= self.beachhead_required
    }
}

/// Count stage 1 and beachhead interviews against the configured targets
pub fn calculate_interview_requirements(
    interviews: &[Interview],
    assumptions: &[Assumption],
    beachhead_segment: Option<&str>,
    config: &EngineConfig,
) -> InterviewRequirements {
    let index = TagIndex::build(interviews);
    let stage1_ids = assumptions
        .iter()
        .filter(|a| a.belongs_to(ValidationStage::One))
        .map(|a| a.id);
    let stage1_interviews = index.interviews_tagging_any(stage1_ids).len();

    let beachhead_interviews = interviews
        .iter()
        .filter(|i| i.is_beachhead(beachhead_segment))
        .count();

    let stage1_required = config.stage(ValidationStage::One).min_interviews;
    let beachhead_required = config.minimum_beachhead_interviews;

    let overall_progress = (coverage(stage1_interviews, stage1_required)
        + coverage(beachhead_interviews, beachhead_required))
        / 2.0
        * 100.0;

    InterviewRequirements {
        stage1_interviews,
        stage1_required,
        beachhead_interviews,
        beachhead_required,
        overall_progress,
    }
}

/// `have / required` capped at 1; a zero target counts as covered
pub(crate) fn coverage(have: usize, required: usize) -> f64 {
    if required == 0 {
        return 1.0;
    }
    (have as f64 / required as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvass_domain::{AssumptionTag, AssumptionType, CanvasArea, ValidationEffect};

    fn problem() -> Assumption {
        Assumption::new(AssumptionType::Problem, "Notes get lost", CanvasArea::Problem)
    }

    #[test]
    fn test_empty_project_has_zero_progress() {
        let result =
            calculate_interview_requirements(&[], &[], None, &EngineConfig::default());
        assert_eq!(result.stage1_interviews, 0);
        assert_eq!(result.beachhead_interviews, 0);
        assert_eq!(result.stage1_required, 5);
        assert_eq!(result.beachhead_required, 5);
        assert_eq!(result.overall_progress, 0.0);
        assert!(!result.is_met());
    }

    #[test]
    fn test_counts_and_blend() {
        let a = problem();
        let solution = Assumption::new(AssumptionType::Solution, "x", CanvasArea::Solution);
        let interviews = vec![
            Interview::new("Grad Students")
                .with_tag(AssumptionTag::new(a.id, ValidationEffect::Supports))
                .with_tag(AssumptionTag::new(a.id, ValidationEffect::Supports)),
            Interview::new("grad  students")
                .with_tag(AssumptionTag::new(solution.id, ValidationEffect::Supports)),
            Interview::new("Faculty").with_tag(AssumptionTag::new(a.id, ValidationEffect::Neutral)),
        ];

        let result = calculate_interview_requirements(
            &interviews,
            &[a, solution],
            Some("Grad Students"),
            &EngineConfig::default(),
        );

        assert_eq!(result.stage1_interviews, 2);
        assert_eq!(result.beachhead_interviews, 2);
        // (2/5 + 2/5) / 2
        assert!((result.overall_progress - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_explicit_flag_overrides_name() {
        let mut flagged = Interview::new("Someone else");
        flagged.matches_beachhead = Some(true);
        let mut unflagged = Interview::new("Grad Students");
        unflagged.matches_beachhead = Some(false);

        let result = calculate_interview_requirements(
            &[flagged, unflagged],
            &[],
            Some("Grad Students"),
            &EngineConfig::default(),
        );
        assert_eq!(result.beachhead_interviews, 1);
    }

    #[test]
    fn test_progress_caps_at_100() {
        let a = problem();
        let interviews: Vec<Interview> = (0..12)
            .map(|_| {
                Interview::new("Grad Students")
                    .with_tag(AssumptionTag::new(a.id, ValidationEffect::Supports))
            })
            .collect();
        let result = calculate_interview_requirements(
            &interviews,
            &[a],
            Some("Grad Students"),
            &EngineConfig::default(),
        );
        assert_eq!(result.overall_progress, 100.0);
        assert!(result.is_met());
    }

    #[test]
    fn test_coverage_handles_zero_target() {
        assert_eq!(coverage(0, 0), 1.0);
        assert_eq!(coverage(3, 6), 0.5);
    }
}
