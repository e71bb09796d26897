//! Interview and recount command implementations.

use crate::cli::InterviewAction;
use crate::error::Result;
use crate::lookup::{resolve_assumption, resolve_interview};
use crate::output::Formatter;
use crate::store::JsonFileStore;
use canvass_domain::traits::ProjectStore;
use canvass_domain::{
    AssumptionTag, ConfidenceChange, InterviewStatus, NewInterview, Rating,
};

/// Execute an interview subcommand.
pub fn execute_interview(
    action: InterviewAction,
    store: &mut JsonFileStore,
    formatter: &Formatter,
) -> Result<()> {
    let mut project = store.load()?;

    match action {
        InterviewAction::Add {
            segment,
            kind,
            date,
            context,
            pain_points,
            alternatives,
            importance,
            quotes,
            draft,
        } => {
            let mut input = NewInterview::new(segment);
            input.interviewee_type = kind.into();
            input.date = date;
            input.context = context;
            input.main_pain_points = pain_points;
            input.current_alternatives = alternatives;
            input.memorable_quotes = quotes;
            input.problem_importance = importance
                .map(|v| Rating::checked("problem importance", v))
                .transpose()?;
            if draft {
                input.status = InterviewStatus::Draft;
            }

            let id = project.add_interview(input)?;
            store.save(&project)?;
            println!("{}", formatter.created("interview", &id.to_string()));

            if let (Some(beachhead), Some(interview)) =
                (project.beachhead_segment.as_deref(), project.interview(id))
            {
                if interview.matches_beachhead == Some(false) {
                    eprintln!(
                        "{}",
                        formatter.warning(&format!(
                            "Segment '{}' is not the beachhead '{}'; it will not count toward stage 1 beachhead evidence",
                            interview.segment_name, beachhead
                        ))
                    );
                }
            }
        }

        InterviewAction::List => {
            println!(
                "{}",
                formatter.interviews(&project.interviews, project.beachhead_segment.as_deref())?
            );
        }

        InterviewAction::Tag {
            interview,
            assumption,
            effect,
            change,
            quote,
        } => {
            let interview_id = resolve_interview(&project, &interview)?;
            let assumption_id = resolve_assumption(&project, &assumption)?;

            let mut tag = AssumptionTag::new(assumption_id, effect.into())
                .with_confidence_change(ConfidenceChange::new(change)?);
            if let Some(quote) = quote {
                tag = tag.with_quote(quote);
            }
            let effect = tag.validation_effect;

            project.tag_interview(interview_id, tag)?;
            store.save(&project)?;

            if let Some(a) = project.assumption(assumption_id) {
                println!(
                    "{}",
                    formatter.success(&format!(
                        "Interview {} {} '{}' (confidence {}, {} interview(s))",
                        interview_id, effect, a.description, a.confidence, a.interview_count
                    ))
                );
            }
        }

        InterviewAction::Delete { id } => {
            let id = resolve_interview(&project, &id)?;
            project.delete_interview(id)?;
            store.save(&project)?;
            println!("{}", formatter.success(&format!("Deleted interview {}", id)));
            println!(
                "{}",
                formatter.info("Cached interview counts are unchanged; run 'canvass recount' to refresh them.")
            );
        }
    }

    Ok(())
}

/// Execute the recount command.
pub fn execute_recount(store: &mut JsonFileStore, formatter: &Formatter) -> Result<()> {
    let mut project = store.load()?;
    let changed = project.recount_interviews();
    if changed > 0 {
        store.save(&project)?;
    }
    println!(
        "{}",
        formatter.success(&format!("Updated interview counts on {} assumption(s)", changed))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{EffectArg, IntervieweeArg};
    use crate::config::OutputFormat;
    use canvass_domain::{AssumptionType, CanvasArea, NewAssumption, Project, ValidationEffect};
    use tempfile::TempDir;

    fn setup() -> (TempDir, JsonFileStore, Formatter) {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("canvass.json"));
        let mut project = Project::new("Notes");
        project.set_beachhead_segment(Some("Grad Students".to_string()));
        project
            .add_assumption(NewAssumption::new(
                AssumptionType::Problem,
                "Notes get lost",
                CanvasArea::Problem,
            ))
            .unwrap();
        store.save(&project).unwrap();
        (dir, store, Formatter::new(OutputFormat::Quiet, false))
    }

    fn add_interview(store: &mut JsonFileStore, formatter: &Formatter, segment: &str) {
        execute_interview(
            InterviewAction::Add {
                segment: segment.to_string(),
                kind: IntervieweeArg::Customer,
                date: "2026-03-02".to_string(),
                context: String::new(),
                pain_points: "Can't find last week's notes".to_string(),
                alternatives: String::new(),
                importance: Some(4),
                quotes: vec!["I have notes in four apps".to_string()],
                draft: false,
            },
            store,
            formatter,
        )
        .unwrap();
    }

    #[test]
    fn test_add_sets_beachhead_flag() {
        let (_dir, mut store, formatter) = setup();
        add_interview(&mut store, &formatter, "grad students");
        add_interview(&mut store, &formatter, "Faculty");

        let project = store.load().unwrap();
        assert_eq!(project.interviews[0].matches_beachhead, Some(true));
        assert_eq!(project.interviews[1].matches_beachhead, Some(false));
        assert_eq!(project.interviews[0].problem_importance.value(), 4);
    }

    #[test]
    fn test_tag_nudges_confidence() {
        let (_dir, mut store, formatter) = setup();
        add_interview(&mut store, &formatter, "Grad Students");
        let project = store.load().unwrap();
        let interview = project.interviews[0].id.to_string();
        let assumption = project.assumptions[0].id.to_string();

        execute_interview(
            InterviewAction::Tag {
                interview,
                assumption,
                effect: EffectArg::Contradicts,
                change: -2,
                quote: Some("Paper works fine".to_string()),
            },
            &mut store,
            &formatter,
        )
        .unwrap();

        let project = store.load().unwrap();
        let a = &project.assumptions[0];
        assert_eq!(a.confidence.value(), 1);
        assert_eq!(a.interview_count, 1);
        assert_eq!(a.evidence, vec!["Paper works fine".to_string()]);
        assert_eq!(
            project.interviews[0].assumption_tags[0].validation_effect,
            ValidationEffect::Contradicts
        );
    }

    #[test]
    fn test_tag_rejects_large_change() {
        let (_dir, mut store, formatter) = setup();
        add_interview(&mut store, &formatter, "Grad Students");
        let project = store.load().unwrap();

        let result = execute_interview(
            InterviewAction::Tag {
                interview: project.interviews[0].id.to_string(),
                assumption: project.assumptions[0].id.to_string(),
                effect: EffectArg::Supports,
                change: 3,
                quote: None,
            },
            &mut store,
            &formatter,
        );
        assert!(result.is_err());
        assert!(store.load().unwrap().interviews[0].assumption_tags.is_empty());
    }

    #[test]
    fn test_delete_then_recount() {
        let (_dir, mut store, formatter) = setup();
        add_interview(&mut store, &formatter, "Grad Students");
        let project = store.load().unwrap();
        let interview = project.interviews[0].id.to_string();
        execute_interview(
            InterviewAction::Tag {
                interview: interview.clone(),
                assumption: project.assumptions[0].id.to_string(),
                effect: EffectArg::Supports,
                change: 0,
                quote: None,
            },
            &mut store,
            &formatter,
        )
        .unwrap();

        execute_interview(InterviewAction::Delete { id: interview }, &mut store, &formatter)
            .unwrap();
        assert_eq!(store.load().unwrap().assumptions[0].interview_count, 1);

        execute_recount(&mut store, &formatter).unwrap();
        assert_eq!(store.load().unwrap().assumptions[0].interview_count, 0);
    }
}
