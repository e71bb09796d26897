//! Project - the in-memory snapshot of one discovery effort
//!
//! The hosting application loads a `Project` through a
//! [`crate::traits::ProjectStore`], applies user actions with the methods
//! here, and hands `&project.assumptions` / `&project.interviews` to the
//! engine for evaluation.

use crate::{
    interview::segment_matches, Assumption, AssumptionId, AssumptionStatus, AssumptionTag,
    DomainError, Interview, InterviewId, NewAssumption, NewInterview, Rating,
};

/// One founder's (or team's) discovery project
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    /// Display name
    pub name: String,
    /// Segment chosen as the beachhead market
    pub beachhead_segment: Option<String>,
    /// Tracked assumptions
    pub assumptions: Vec<Assumption>,
    /// Recorded interviews
    pub interviews: Vec<Interview>,
}

impl Project {
    /// Create an empty project
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Look up an assumption
    pub fn assumption(&self, id: AssumptionId) -> Option<&Assumption> {
        self.assumptions.iter().find(|a| a.id == id)
    }

    /// Look up an interview
    pub fn interview(&self, id: InterviewId) -> Option<&Interview> {
        self.interviews.iter().find(|i| i.id == id)
    }

    fn assumption_mut(&mut self, id: AssumptionId) -> Result<&mut Assumption, DomainError> {
        self.assumptions
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DomainError::NotFound {
                kind: "assumption",
                id: id.to_string(),
            })
    }

    fn interview_mut(&mut self, id: InterviewId) -> Result<&mut Interview, DomainError> {
        self.interviews
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| DomainError::NotFound {
                kind: "interview",
                id: id.to_string(),
            })
    }

    /// Create an untested assumption
    ///
    /// An explicit stage that contradicts the canvas area is accepted (the
    /// assumption then counts toward both stages) but logged as a warning.
    pub fn add_assumption(&mut self, input: NewAssumption) -> Result<AssumptionId, DomainError> {
        if input.description.trim().is_empty() {
            return Err(DomainError::EmptyField("description"));
        }

        let mut assumption =
            Assumption::new(input.assumption_type, input.description, input.canvas_area);
        assumption.validation_stage = input.validation_stage;
        assumption.confidence = input.confidence.unwrap_or(Rating::MEDIUM);
        assumption.importance = input.importance.unwrap_or(Rating::MEDIUM);

        if let Some(area_stage) = assumption.stage_conflict() {
            tracing::warn!(
                assumption = %assumption.id,
                area = %assumption.canvas_area,
                explicit = %assumption.stage(),
                area_stage = %area_stage,
                "explicit stage contradicts canvas area; assumption will count toward both stages"
            );
        }

        let id = assumption.id;
        self.assumptions.push(assumption);
        Ok(id)
    }

    /// Change confidence and/or importance
    pub fn update_assumption_ratings(
        &mut self,
        id: AssumptionId,
        confidence: Option<Rating>,
        importance: Option<Rating>,
    ) -> Result<(), DomainError> {
        let assumption = self.assumption_mut(id)?;
        if let Some(confidence) = confidence {
            assumption.confidence = confidence;
        }
        if let Some(importance) = importance {
            assumption.importance = importance;
        }
        Ok(())
    }

    /// Explicit user status change, enforcing the transition rules
    pub fn set_assumption_status(
        &mut self,
        id: AssumptionId,
        status: AssumptionStatus,
    ) -> Result<(), DomainError> {
        self.assumption_mut(id)?.set_status(status)
    }

    /// Append an evidence note
    pub fn append_evidence(
        &mut self,
        id: AssumptionId,
        note: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.assumption_mut(id)?.add_evidence(note)
    }

    /// Delete an assumption and strip every tag that points at it
    pub fn delete_assumption(&mut self, id: AssumptionId) -> Result<Assumption, DomainError> {
        let position = self
            .assumptions
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| DomainError::NotFound {
                kind: "assumption",
                id: id.to_string(),
            })?;

        let mut stripped = 0;
        for interview in &mut self.interviews {
            let before = interview.assumption_tags.len();
            interview.assumption_tags.retain(|tag| tag.assumption_id != id);
            stripped += before - interview.assumption_tags.len();
        }
        tracing::debug!(assumption = %id, stripped, "deleted assumption");

        Ok(self.assumptions.remove(position))
    }

    /// Record an interview
    ///
    /// `matches_beachhead` is filled in when the project has a beachhead
    /// segment.
    pub fn add_interview(&mut self, input: NewInterview) -> Result<InterviewId, DomainError> {
        if input.segment_name.trim().is_empty() {
            return Err(DomainError::EmptyField("segment name"));
        }

        let mut interview = Interview::new(input.segment_name);
        interview.interviewee_type = input.interviewee_type;
        interview.date = input.date;
        interview.context = input.context;
        interview.status = input.status;
        interview.problem_importance = input.problem_importance.unwrap_or(Rating::MEDIUM);
        interview.main_pain_points = input.main_pain_points;
        interview.current_alternatives = input.current_alternatives;
        interview.memorable_quotes = input.memorable_quotes;
        interview.matches_beachhead = self
            .beachhead_segment
            .as_deref()
            .map(|beachhead| segment_matches(&interview.segment_name, beachhead));

        let id = interview.id;
        self.interviews.push(interview);
        Ok(id)
    }

    /// Tag an interview with an assumption
    ///
    /// Replaces any existing tag for the same assumption on that interview.
    /// The tag's confidence change is applied to the assumption (clamped to
    /// [1, 5]), its quote is appended to the assumption's evidence, and the
    /// assumption's interview count is refreshed. Status is left alone.
    pub fn tag_interview(
        &mut self,
        interview_id: InterviewId,
        tag: AssumptionTag,
    ) -> Result<(), DomainError> {
        let assumption_id = tag.assumption_id;
        if self.assumption(assumption_id).is_none() {
            return Err(DomainError::NotFound {
                kind: "assumption",
                id: assumption_id.to_string(),
            });
        }

        let change = tag.confidence_change;
        let quote = tag.quote.clone();

        let interview = self.interview_mut(interview_id)?;
        interview
            .assumption_tags
            .retain(|existing| existing.assumption_id != assumption_id);
        interview.assumption_tags.push(tag);

        let count = self.count_tagging_interviews(assumption_id);
        let assumption = self.assumption_mut(assumption_id)?;
        let before = assumption.confidence;
        assumption.confidence = before.nudge(change);
        if let Some(quote) = quote.filter(|q| !q.trim().is_empty()) {
            assumption.evidence.push(quote);
        }
        assumption.interview_count = count;

        tracing::debug!(
            interview = %interview_id,
            assumption = %assumption_id,
            from = before.value(),
            to = assumption.confidence.value(),
            "tagged interview"
        );
        Ok(())
    }

    /// Delete an interview
    ///
    /// Assumption evidence and interview counts are not reconciled; call
    /// [`Project::recount_interviews`] if the cached counts should follow.
    pub fn delete_interview(&mut self, id: InterviewId) -> Result<Interview, DomainError> {
        let position = self
            .interviews
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| DomainError::NotFound {
                kind: "interview",
                id: id.to_string(),
            })?;
        Ok(self.interviews.remove(position))
    }

    /// Recompute every assumption's cached interview count
    ///
    /// Returns how many counts changed.
    pub fn recount_interviews(&mut self) -> usize {
        let counts: Vec<usize> = self
            .assumptions
            .iter()
            .map(|a| self.count_tagging_interviews(a.id))
            .collect();

        let mut changed = 0;
        for (assumption, count) in self.assumptions.iter_mut().zip(counts) {
            if assumption.interview_count != count {
                assumption.interview_count = count;
                changed += 1;
            }
        }
        changed
    }

    /// Set (or clear) the beachhead segment and refresh every interview's flag
    pub fn set_beachhead_segment(&mut self, segment: Option<String>) {
        let segment = segment.filter(|s| !s.trim().is_empty());
        for interview in &mut self.interviews {
            interview.matches_beachhead = segment
                .as_deref()
                .map(|beachhead| segment_matches(&interview.segment_name, beachhead));
        }
        self.beachhead_segment = segment;
    }

    fn count_tagging_interviews(&self, assumption_id: AssumptionId) -> usize {
        self.interviews
            .iter()
            .filter(|i| i.tags_assumption(assumption_id))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AssumptionType, CanvasArea, ConfidenceChange, ValidationEffect, ValidationStage};

    fn project_with_assumption() -> (Project, AssumptionId) {
        let mut project = Project::new("Notes app");
        let id = project
            .add_assumption(NewAssumption::new(
                AssumptionType::Problem,
                "Students lose interview notes",
                CanvasArea::Problem,
            ))
            .unwrap();
        (project, id)
    }

    #[test]
    fn test_add_assumption_defaults() {
        let (project, id) = project_with_assumption();
        let a = project.assumption(id).unwrap();
        assert_eq!(a.status, AssumptionStatus::Untested);
        assert_eq!(a.confidence, Rating::MEDIUM);
        assert_eq!(a.stage(), ValidationStage::One);
    }

    #[test]
    fn test_add_assumption_rejects_blank_description() {
        let mut project = Project::new("p");
        let result = project.add_assumption(NewAssumption::new(
            AssumptionType::Customer,
            "  ",
            CanvasArea::CustomerSegments,
        ));
        assert_eq!(result, Err(DomainError::EmptyField("description")));
    }

    #[test]
    fn test_tagging_nudges_confidence_and_records_quote() {
        let (mut project, aid) = project_with_assumption();
        let iid = project.add_interview(NewInterview::new("Grad Students")).unwrap();

        let tag = AssumptionTag::new(aid, ValidationEffect::Supports)
            .with_confidence_change(ConfidenceChange::new(2).unwrap())
            .with_quote("I lose notes every week");
        project.tag_interview(iid, tag).unwrap();

        let a = project.assumption(aid).unwrap();
        assert_eq!(a.confidence.value(), 5);
        assert_eq!(a.evidence, vec!["I lose notes every week".to_string()]);
        assert_eq!(a.interview_count, 1);
        assert_eq!(a.status, AssumptionStatus::Untested);
    }

    #[test]
    fn test_tagging_clamps_confidence() {
        let (mut project, aid) = project_with_assumption();
        let down = ConfidenceChange::new(-2).unwrap();
        for _ in 0..3 {
            let iid = project.add_interview(NewInterview::new("seg")).unwrap();
            project
                .tag_interview(
                    iid,
                    AssumptionTag::new(aid, ValidationEffect::Contradicts).with_confidence_change(down),
                )
                .unwrap();
        }
        let a = project.assumption(aid).unwrap();
        assert_eq!(a.confidence, Rating::MIN);
        assert_eq!(a.interview_count, 3);
    }

    #[test]
    fn test_retagging_replaces_tag() {
        let (mut project, aid) = project_with_assumption();
        let iid = project.add_interview(NewInterview::new("seg")).unwrap();
        project
            .tag_interview(iid, AssumptionTag::new(aid, ValidationEffect::Supports))
            .unwrap();
        project
            .tag_interview(iid, AssumptionTag::new(aid, ValidationEffect::Contradicts))
            .unwrap();

        let interview = project.interview(iid).unwrap();
        assert_eq!(interview.assumption_tags.len(), 1);
        assert_eq!(
            interview.assumption_tags[0].validation_effect,
            ValidationEffect::Contradicts
        );
        assert_eq!(project.assumption(aid).unwrap().interview_count, 1);
    }

    #[test]
    fn test_tagging_unknown_assumption_fails() {
        let (mut project, _) = project_with_assumption();
        let iid = project.add_interview(NewInterview::new("seg")).unwrap();
        let result = project.tag_interview(
            iid,
            AssumptionTag::new(AssumptionId::new(), ValidationEffect::Neutral),
        );
        assert!(matches!(result, Err(DomainError::NotFound { kind: "assumption", .. })));
    }

    #[test]
    fn test_delete_assumption_strips_tags() {
        let (mut project, aid) = project_with_assumption();
        let iid = project.add_interview(NewInterview::new("seg")).unwrap();
        project
            .tag_interview(iid, AssumptionTag::new(aid, ValidationEffect::Supports))
            .unwrap();

        project.delete_assumption(aid).unwrap();

        assert!(project.assumption(aid).is_none());
        assert!(project.interview(iid).unwrap().assumption_tags.is_empty());
    }

    #[test]
    fn test_delete_interview_leaves_counts_until_recount() {
        let (mut project, aid) = project_with_assumption();
        let iid = project.add_interview(NewInterview::new("seg")).unwrap();
        project
            .tag_interview(iid, AssumptionTag::new(aid, ValidationEffect::Supports))
            .unwrap();

        project.delete_interview(iid).unwrap();
        assert_eq!(project.assumption(aid).unwrap().interview_count, 1);

        assert_eq!(project.recount_interviews(), 1);
        assert_eq!(project.assumption(aid).unwrap().interview_count, 0);
    }

    #[test]
    fn test_beachhead_flag_follows_segment() {
        let mut project = Project::new("p");
        project.set_beachhead_segment(Some("Grad Students".to_string()));
        let hit = project.add_interview(NewInterview::new(" grad  students")).unwrap();
        let miss = project.add_interview(NewInterview::new("Faculty")).unwrap();

        assert_eq!(project.interview(hit).unwrap().matches_beachhead, Some(true));
        assert_eq!(project.interview(miss).unwrap().matches_beachhead, Some(false));

        project.set_beachhead_segment(Some("Faculty".to_string()));
        assert_eq!(project.interview(hit).unwrap().matches_beachhead, Some(false));
        assert_eq!(project.interview(miss).unwrap().matches_beachhead, Some(true));

        project.set_beachhead_segment(None);
        assert_eq!(project.interview(hit).unwrap().matches_beachhead, None);
    }

    #[test]
    fn test_status_change_enforces_state_machine() {
        let (mut project, aid) = project_with_assumption();
        assert!(project
            .set_assumption_status(aid, AssumptionStatus::Invalidated)
            .is_err());
        project
            .set_assumption_status(aid, AssumptionStatus::Testing)
            .unwrap();
        project
            .set_assumption_status(aid, AssumptionStatus::Invalidated)
            .unwrap();
        assert_eq!(
            project.assumption(aid).unwrap().status,
            AssumptionStatus::Invalidated
        );
    }
}
