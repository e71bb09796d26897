//! Assumption command implementations.

use crate::cli::AssumptionAction;
use crate::error::{CliError, Result};
use crate::lookup::resolve_assumption;
use crate::output::Formatter;
use crate::store::JsonFileStore;
use canvass_domain::traits::ProjectStore;
use canvass_domain::{Assumption, AssumptionStatus, NewAssumption, Rating, ValidationStage};
use std::cmp::Reverse;

/// Execute an assumption subcommand.
pub fn execute_assumption(
    action: AssumptionAction,
    store: &mut JsonFileStore,
    formatter: &Formatter,
) -> Result<()> {
    let mut project = store.load()?;

    match action {
        AssumptionAction::Add {
            description,
            kind,
            area,
            stage,
            confidence,
            importance,
        } => {
            let mut input = NewAssumption::new(kind.into(), description, area);
            input.validation_stage = stage
                .map(|s| ValidationStage::from_number(i64::from(s)))
                .transpose()?;
            input.confidence = rating("confidence", confidence)?;
            input.importance = rating("importance", importance)?;

            let id = project.add_assumption(input)?;
            store.save(&project)?;
            println!("{}", formatter.created("assumption", &id.to_string()));
        }

        AssumptionAction::List {
            stage,
            status,
            by_risk,
        } => {
            let stage = stage
                .map(|s| ValidationStage::from_number(i64::from(s)))
                .transpose()?;
            let status: Option<AssumptionStatus> = status.map(Into::into);

            let mut selected: Vec<&Assumption> = project
                .assumptions
                .iter()
                .filter(|a| stage.is_none_or(|s| a.belongs_to(s)))
                .filter(|a| status.is_none_or(|s| a.status == s))
                .collect();
            if by_risk {
                selected.sort_by_key(|a| Reverse(a.risk_score().value()));
            }
            println!("{}", formatter.assumptions(&selected)?);
        }

        AssumptionAction::Show { id } => {
            let id = resolve_assumption(&project, &id)?;
            let assumption = project.assumption(id).ok_or_else(|| CliError::NoMatch {
                kind: "assumption",
                key: id.to_string(),
            })?;
            println!("{}", formatter.assumption_detail(assumption)?);
        }

        AssumptionAction::Status { id, status } => {
            let id = resolve_assumption(&project, &id)?;
            let status: AssumptionStatus = status.into();
            project.set_assumption_status(id, status)?;
            store.save(&project)?;
            println!("{}", formatter.success(&format!("Assumption {} is now {}", id, status)));
        }

        AssumptionAction::Rate {
            id,
            confidence,
            importance,
        } => {
            if confidence.is_none() && importance.is_none() {
                return Err(CliError::InvalidInput(
                    "Give --confidence and/or --importance".to_string(),
                ));
            }
            let id = resolve_assumption(&project, &id)?;
            project.update_assumption_ratings(
                id,
                rating("confidence", confidence)?,
                rating("importance", importance)?,
            )?;
            store.save(&project)?;

            if let Some(a) = project.assumption(id) {
                println!(
                    "{}",
                    formatter.success(&format!(
                        "Assumption {} rated: risk {} ({})",
                        id,
                        a.risk_score(),
                        a.priority()
                    ))
                );
            }
        }

        AssumptionAction::Evidence { id, note } => {
            let id = resolve_assumption(&project, &id)?;
            project.append_evidence(id, note)?;
            store.save(&project)?;
            println!("{}", formatter.success(&format!("Evidence added to {}", id)));
        }

        AssumptionAction::Delete { id } => {
            let id = resolve_assumption(&project, &id)?;
            let removed = project.delete_assumption(id)?;
            store.save(&project)?;
            println!(
                "{}",
                formatter.success(&format!("Deleted assumption '{}'", removed.description))
            );
        }
    }

    Ok(())
}

fn rating(field: &'static str, value: Option<i64>) -> Result<Option<Rating>> {
    Ok(value.map(|v| Rating::checked(field, v)).transpose()?)
}
