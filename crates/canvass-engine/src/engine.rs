//! The discovery engine facade

use crate::eligibility::check_with_index;
use crate::{
    calculate_interview_requirements, check_validation_eligibility, evaluate_all_stages,
    evaluate_stage, overall_progress, EligibilityResult, EngineConfig, EngineError,
    InterviewRequirements, OverallProgress, Result, StageStatus, TagIndex,
};
use canvass_domain::{
    Assumption, AssumptionId, AssumptionStatus, DomainError, Interview, Project, Rating,
    ValidationStage,
};
use std::collections::BTreeMap;

/// Stage evaluation and validation checks bound to one configuration
///
/// # Examples
///
/// ```
/// use canvass_engine::{DiscoveryEngine, EngineConfig};
///
/// let engine = DiscoveryEngine::new(EngineConfig::default()).unwrap();
/// let stages = engine.evaluate_all_stages(&[], &[]);
/// assert_eq!(stages.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiscoveryEngine {
    config: EngineConfig,
}

impl DiscoveryEngine {
    /// Create an engine, rejecting an inconsistent configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate one stage
    pub fn evaluate_stage(
        &self,
        stage: ValidationStage,
        assumptions: &[Assumption],
        interviews: &[Interview],
        previous_graduated: bool,
    ) -> StageStatus {
        evaluate_stage(stage, assumptions, interviews, previous_graduated, &self.config)
    }

    /// Evaluate all three stages
    pub fn evaluate_all_stages(
        &self,
        assumptions: &[Assumption],
        interviews: &[Interview],
    ) -> BTreeMap<ValidationStage, StageStatus> {
        evaluate_all_stages(assumptions, interviews, &self.config)
    }

    /// Check one assumption's evidence
    pub fn check_validation_eligibility(
        &self,
        assumption: &Assumption,
        interviews: &[Interview],
        beachhead_segment: Option<&str>,
    ) -> EligibilityResult {
        check_validation_eligibility(assumption, interviews, beachhead_segment, &self.config)
    }

    /// Check every assumption, indexing the interviews once
    pub fn check_all(
        &self,
        assumptions: &[Assumption],
        interviews: &[Interview],
        beachhead_segment: Option<&str>,
    ) -> Vec<(AssumptionId, EligibilityResult)> {
        let index = TagIndex::build(interviews);
        assumptions
            .iter()
            .map(|a| (a.id, check_with_index(a, &index, beachhead_segment, &self.config)))
            .collect()
    }

    /// Stage 1 and beachhead interview coverage
    pub fn calculate_interview_requirements(
        &self,
        interviews: &[Interview],
        assumptions: &[Assumption],
        beachhead_segment: Option<&str>,
    ) -> InterviewRequirements {
        calculate_interview_requirements(interviews, assumptions, beachhead_segment, &self.config)
    }

    /// Stage-weighted progress for a whole project
    pub fn overall_progress(&self, project: &Project) -> OverallProgress {
        let statuses = self.evaluate_all_stages(&project.assumptions, &project.interviews);
        overall_progress(&statuses, &self.config)
    }

    /// Apply an eligible suggestion to an assumption
    ///
    /// Validation raises confidence to at least `confidence_to_validate`,
    /// invalidation lowers it to at most `confidence_to_invalidate`. On any
    /// error the project is left unchanged.
    pub fn accept_suggestion(
        &self,
        project: &mut Project,
        assumption_id: AssumptionId,
        result: &EligibilityResult,
    ) -> Result<()> {
        let not_eligible = |reason: &str| EngineError::NotEligible {
            assumption: assumption_id.to_string(),
            reason: reason.to_string(),
        };

        if !result.can_validate {
            return Err(not_eligible(&result.reason));
        }
        let target = result.suggested_status;
        if !target.is_decided() {
            return Err(not_eligible("suggestion does not decide the assumption"));
        }

        let slot = project
            .assumptions
            .iter_mut()
            .find(|a| a.id == assumption_id)
            .ok_or_else(|| DomainError::NotFound {
                kind: "assumption",
                id: assumption_id.to_string(),
            })?;

        let mut updated = slot.clone();
        if updated.status != target {
            if !updated.status.can_transition_to(target) {
                updated.set_status(AssumptionStatus::Testing)?;
            }
            updated.set_status(target)?;
        }

        updated.confidence = match target {
            AssumptionStatus::Validated => {
                let floor = Rating::checked(
                    "confidence_to_validate",
                    i64::from(self.config.confidence_to_validate),
                )?;
                updated.confidence.max(floor)
            }
            _ => {
                let ceiling = Rating::checked(
                    "confidence_to_invalidate",
                    i64::from(self.config.confidence_to_invalidate),
                )?;
                updated.confidence.min(ceiling)
            }
        };

        tracing::info!(
            assumption = %assumption_id,
            status = %updated.status,
            confidence = updated.confidence.value(),
            "accepted suggestion"
        );
        *slot = updated;
        Ok(())
    }
}
