//! Stage, eligibility and progress command implementations.

use crate::cli::CheckArgs;
use crate::error::Result;
use crate::lookup::resolve_assumption;
use crate::output::Formatter;
use crate::store::JsonFileStore;
use canvass_domain::traits::ProjectStore;
use canvass_domain::{Assumption, AssumptionId};
use canvass_engine::{DiscoveryEngine, EligibilityResult};

/// Execute the stages command.
pub fn execute_stages(
    store: &JsonFileStore,
    engine: &DiscoveryEngine,
    formatter: &Formatter,
) -> Result<()> {
    let project = store.load()?;
    let statuses = engine.evaluate_all_stages(&project.assumptions, &project.interviews);
    println!("{}", formatter.stages(&statuses)?);
    Ok(())
}

/// Execute the check command.
///
/// With `--accept`, a single assumption must be eligible or the command
/// fails. When checking every assumption, only eligible ones whose status
/// would change are updated.
pub fn execute_check(
    args: CheckArgs,
    store: &mut JsonFileStore,
    engine: &DiscoveryEngine,
    formatter: &Formatter,
) -> Result<()> {
    let mut project = store.load()?;
    let beachhead = project.beachhead_segment.clone();

    let results: Vec<(AssumptionId, EligibilityResult)> = match &args.assumption {
        Some(key) => {
            let id = resolve_assumption(&project, key)?;
            project
                .assumption(id)
                .map(|a| {
                    vec![(
                        id,
                        engine.check_validation_eligibility(
                            a,
                            &project.interviews,
                            beachhead.as_deref(),
                        ),
                    )]
                })
                .unwrap_or_default()
        }
        None => engine.check_all(&project.assumptions, &project.interviews, beachhead.as_deref()),
    };

    let rows: Vec<(&Assumption, &EligibilityResult)> = results
        .iter()
        .filter_map(|(id, r)| project.assumption(*id).map(|a| (a, r)))
        .collect();
    println!("{}", formatter.eligibility(&rows)?);

    if !args.accept {
        return Ok(());
    }

    let single = args.assumption.is_some();
    let mut accepted = Vec::new();
    for (id, result) in &results {
        let unchanged = project
            .assumption(*id)
            .is_some_and(|a| a.status == result.suggested_status);
        if !single && (!result.can_validate || unchanged) {
            continue;
        }
        engine.accept_suggestion(&mut project, *id, result)?;
        accepted.push((*id, result.suggested_status));
    }

    if accepted.is_empty() {
        println!("{}", formatter.info("No assumption had decisive evidence; nothing changed."));
        return Ok(());
    }

    store.save(&project)?;
    for (id, status) in accepted {
        println!("{}", formatter.accepted(id, status));
    }
    Ok(())
}

/// Execute the requirements command.
pub fn execute_requirements(
    store: &JsonFileStore,
    engine: &DiscoveryEngine,
    formatter: &Formatter,
) -> Result<()> {
    let project = store.load()?;
    let requirements = engine.calculate_interview_requirements(
        &project.interviews,
        &project.assumptions,
        project.beachhead_segment.as_deref(),
    );
    println!("{}", formatter.requirements(&requirements)?);
    Ok(())
}

/// Execute the progress command.
pub fn execute_progress(
    store: &JsonFileStore,
    engine: &DiscoveryEngine,
    formatter: &Formatter,
) -> Result<()> {
    let project = store.load()?;
    println!("{}", formatter.progress(&engine.overall_progress(&project))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use canvass_domain::{
        AssumptionStatus, AssumptionTag, AssumptionType, CanvasArea, NewAssumption, NewInterview,
        Project, ValidationEffect,
    };
    use canvass_engine::EngineError;
    use tempfile::TempDir;

    /// One solution assumption tagged by the given effects
    fn setup(effects: &[ValidationEffect]) -> (TempDir, JsonFileStore, String) {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("canvass.json"));
        let mut project = Project::new("Notes");
        let id = project
            .add_assumption(NewAssumption::new(
                AssumptionType::Solution,
                "Auto-tagging saves time",
                CanvasArea::Solution,
            ))
            .unwrap();
        for effect in effects {
            let interview = project.add_interview(NewInterview::new("s")).unwrap();
            project
                .tag_interview(interview, AssumptionTag::new(id, *effect))
                .unwrap();
        }
        store.save(&project).unwrap();
        (dir, store, id.to_string())
    }

    fn formatter() -> Formatter {
        Formatter::new(OutputFormat::Quiet, false)
    }

    #[test]
    fn test_check_without_accept_changes_nothing() {
        let (_dir, mut store, id) = setup(&[ValidationEffect::Supports; 3]);
        let before = store.load().unwrap();
        execute_check(
            CheckArgs {
                assumption: Some(id),
                accept: false,
            },
            &mut store,
            &DiscoveryEngine::default(),
            &formatter(),
        )
        .unwrap();
        assert_eq!(store.load().unwrap(), before);
    }

    #[test]
    fn test_check_accept_validates() {
        let (_dir, mut store, id) = setup(&[ValidationEffect::Supports; 3]);
        execute_check(
            CheckArgs {
                assumption: Some(id),
                accept: true,
            },
            &mut store,
            &DiscoveryEngine::default(),
            &formatter(),
        )
        .unwrap();

        let a = &store.load().unwrap().assumptions[0];
        assert_eq!(a.status, AssumptionStatus::Validated);
        assert_eq!(a.confidence.value(), 4);
    }

    #[test]
    fn test_check_accept_on_mixed_evidence_fails() {
        let (_dir, mut store, id) = setup(&[
            ValidationEffect::Supports,
            ValidationEffect::Contradicts,
            ValidationEffect::Contradicts,
        ]);
        let err = execute_check(
            CheckArgs {
                assumption: Some(id),
                accept: true,
            },
            &mut store,
            &DiscoveryEngine::default(),
            &formatter(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::Engine(EngineError::NotEligible { .. })
        ));
        assert_eq!(
            store.load().unwrap().assumptions[0].status,
            AssumptionStatus::Untested
        );
    }

    #[test]
    fn test_check_all_skips_ineligible() {
        let (_dir, mut store, _) = setup(&[ValidationEffect::Contradicts; 3]);
        let mut project = store.load().unwrap();
        project
            .add_assumption(NewAssumption::new(
                AssumptionType::Problem,
                "untagged",
                CanvasArea::Problem,
            ))
            .unwrap();
        store.save(&project).unwrap();

        execute_check(
            CheckArgs {
                assumption: None,
                accept: true,
            },
            &mut store,
            &DiscoveryEngine::default(),
            &formatter(),
        )
        .unwrap();

        let project = store.load().unwrap();
        assert_eq!(project.assumptions[0].status, AssumptionStatus::Invalidated);
        assert_eq!(project.assumptions[1].status, AssumptionStatus::Untested);
    }

    #[test]
    fn test_read_only_commands_need_a_project() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing.json"));
        let engine = DiscoveryEngine::default();
        assert!(matches!(
            execute_stages(&store, &engine, &formatter()),
            Err(CliError::ProjectMissing(_))
        ));
        assert!(execute_progress(&store, &engine, &formatter()).is_err());
        assert!(execute_requirements(&store, &engine, &formatter()).is_err());
    }
}
