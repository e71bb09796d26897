//! Integration tests for canvass-domain
//!
//! These tests walk a project through its lifecycle and persist it through
//! an in-memory `ProjectStore`.

use canvass_domain::scoring::{beachhead_readiness, compute_priority, compute_risk_score};
use canvass_domain::traits::ProjectStore;
use canvass_domain::{
    AssumptionStatus, AssumptionTag, AssumptionType, CanvasArea, ConfidenceChange, DomainError,
    NewAssumption, NewInterview, Priority, Project, Rating, ValidationEffect, ValidationStage,
};

#[derive(Default)]
struct MemoryStore {
    saved: Option<Project>,
    writes: usize,
}

impl ProjectStore for MemoryStore {
    type Error = String;

    fn load(&self) -> Result<Project, Self::Error> {
        self.saved.clone().ok_or_else(|| "nothing saved".to_string())
    }

    fn save(&mut self, project: &Project) -> Result<(), Self::Error> {
        self.saved = Some(project.clone());
        self.writes += 1;
        Ok(())
    }

    fn exists(&self) -> bool {
        self.saved.is_some()
    }
}

#[test]
fn test_project_lifecycle_roundtrips_through_store() {
    let mut store = MemoryStore::default();
    assert!(!store.exists());
    assert!(store.load().is_err());

    let mut project = Project::new("Lecture notes");
    project.set_beachhead_segment(Some("Grad Students".to_string()));

    let problem = project
        .add_assumption(NewAssumption::new(
            AssumptionType::Problem,
            "Grad students lose track of reading notes",
            CanvasArea::Problem,
        ))
        .unwrap();
    let interview = project
        .add_interview(NewInterview::new("grad students"))
        .unwrap();
    project
        .tag_interview(
            interview,
            AssumptionTag::new(problem, ValidationEffect::Supports)
                .with_confidence_change(ConfidenceChange::new(1).unwrap())
                .with_quote("I have notes in four apps"),
        )
        .unwrap();
    project
        .set_assumption_status(problem, AssumptionStatus::Testing)
        .unwrap();

    store.save(&project).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded, project);
    assert_eq!(store.writes, 1);
    let a = loaded.assumption(problem).unwrap();
    assert_eq!(a.confidence.value(), 4);
    assert_eq!(a.interview_count, 1);
    assert_eq!(a.evidence, vec!["I have notes in four apps".to_string()]);
    assert_eq!(loaded.interview(interview).unwrap().matches_beachhead, Some(true));
}

#[test]
fn test_deleting_assumption_strips_tags() {
    let mut project = Project::new("p");
    let keep = project
        .add_assumption(NewAssumption::new(AssumptionType::Solution, "keep", CanvasArea::Solution))
        .unwrap();
    let drop = project
        .add_assumption(NewAssumption::new(AssumptionType::Problem, "drop", CanvasArea::Problem))
        .unwrap();
    let interview = project.add_interview(NewInterview::new("s")).unwrap();
    project
        .tag_interview(interview, AssumptionTag::new(keep, ValidationEffect::Supports))
        .unwrap();
    project
        .tag_interview(interview, AssumptionTag::new(drop, ValidationEffect::Contradicts))
        .unwrap();

    let removed = project.delete_assumption(drop).unwrap();
    assert_eq!(removed.description, "drop");

    let tags = &project.interview(interview).unwrap().assumption_tags;
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].assumption_id, keep);
    assert!(matches!(
        project.delete_assumption(drop),
        Err(DomainError::NotFound { .. })
    ));
}

#[test]
fn test_status_rules_hold_through_project() {
    let mut project = Project::new("p");
    let id = project
        .add_assumption(NewAssumption::new(AssumptionType::Problem, "x", CanvasArea::Problem))
        .unwrap();

    let err = project
        .set_assumption_status(id, AssumptionStatus::Validated)
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::InvalidTransition {
            from: "untested",
            to: "validated"
        }
    );

    project.set_assumption_status(id, AssumptionStatus::Testing).unwrap();
    project.set_assumption_status(id, AssumptionStatus::Validated).unwrap();
    project.set_assumption_status(id, AssumptionStatus::Testing).unwrap();
    project.set_assumption_status(id, AssumptionStatus::Untested).unwrap();
}

#[test]
fn test_stage_membership_union() {
    let mut project = Project::new("p");
    let mut input = NewAssumption::new(AssumptionType::Problem, "x", CanvasArea::Problem);
    input.validation_stage = Some(ValidationStage::Two);
    let id = project.add_assumption(input).unwrap();

    let a = project.assumption(id).unwrap();
    assert!(a.belongs_to(ValidationStage::One));
    assert!(a.belongs_to(ValidationStage::Two));
    assert!(!a.belongs_to(ValidationStage::Three));
}

#[test]
fn test_scoring_entry_points() {
    // (6 - 2) * 5
    assert_eq!(compute_risk_score(2, 5).unwrap(), 20);
    assert_eq!(compute_priority(20).unwrap(), Priority::High);
    // (6 - 4) * 4, the first medium score
    assert_eq!(compute_risk_score(4, 4).unwrap(), 8);
    assert_eq!(compute_priority(8).unwrap(), Priority::Medium);
    assert_eq!(compute_priority(7).unwrap(), Priority::Low);

    assert!(compute_risk_score(0, 3).is_err());
    assert!(compute_priority(26).is_err());

    let readiness = beachhead_readiness(4, 4, 1).unwrap();
    assert_eq!(readiness.score, 13);
    assert!(readiness.is_ready);
    let readiness = beachhead_readiness(5, 3, 5).unwrap();
    assert_eq!(readiness.score, 18);
    assert!(!readiness.is_ready);
    assert!(beachhead_readiness(6, 1, 1).is_err());
}

#[test]
fn test_assumption_priority_follows_ratings() {
    let mut project = Project::new("p");
    let id = project
        .add_assumption(NewAssumption::new(AssumptionType::Problem, "x", CanvasArea::Problem))
        .unwrap();
    assert_eq!(project.assumption(id).unwrap().priority(), Priority::Medium);

    project
        .update_assumption_ratings(id, Some(Rating::MIN), Some(Rating::MAX))
        .unwrap();
    let a = project.assumption(id).unwrap();
    assert_eq!(a.risk_score().value(), 25);
    assert_eq!(a.priority(), Priority::High);
}
