//! Beachhead command implementation.

use crate::cli::BeachheadArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::store::JsonFileStore;
use canvass_domain::scoring::beachhead_readiness;
use canvass_domain::traits::ProjectStore;

/// Execute the beachhead command.
///
/// Scoring needs no project. `--set` records the segment on the project.
pub fn execute_beachhead(
    args: BeachheadArgs,
    store: &mut JsonFileStore,
    formatter: &Formatter,
) -> Result<()> {
    let readiness = beachhead_readiness(args.pain, args.access, args.willingness)?;
    println!("{}", formatter.beachhead(&readiness)?);

    if let Some(segment) = args.set {
        let mut project = store.load()?;
        project.set_beachhead_segment(Some(segment));
        store.save(&project)?;

        let matching = project
            .interviews
            .iter()
            .filter(|i| i.matches_beachhead == Some(true))
            .count();
        let segment = project.beachhead_segment.as_deref().unwrap_or_default();
        println!(
            "{}",
            formatter.success(&format!(
                "Beachhead segment set to '{}' ({} matching interview(s))",
                segment, matching
            ))
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use canvass_domain::{DomainError, NewInterview, Project};
    use crate::error::CliError;
    use tempfile::TempDir;

    fn args(pain: i64, set: Option<&str>) -> BeachheadArgs {
        BeachheadArgs {
            pain,
            access: 4,
            willingness: 2,
            set: set.map(str::to_string),
        }
    }

    #[test]
    fn test_scoring_without_project() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("none.json"));
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        execute_beachhead(args(5, None), &mut store, &formatter).unwrap();
        assert!(!store.exists());
    }

    #[test]
    fn test_out_of_range_input() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("none.json"));
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let err = execute_beachhead(args(0, None), &mut store, &formatter).unwrap_err();
        assert!(matches!(
            err,
            CliError::Domain(DomainError::RatingOutOfRange { field: "pain", .. })
        ));
    }

    #[test]
    fn test_set_refreshes_interview_flags() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("canvass.json"));
        let mut project = Project::new("Notes");
        project.add_interview(NewInterview::new("Grad Students")).unwrap();
        project.add_interview(NewInterview::new("Faculty")).unwrap();
        store.save(&project).unwrap();

        let formatter = Formatter::new(OutputFormat::Quiet, false);
        execute_beachhead(args(5, Some("grad students")), &mut store, &formatter).unwrap();

        let project = store.load().unwrap();
        assert_eq!(project.beachhead_segment.as_deref(), Some("grad students"));
        assert_eq!(project.interviews[0].matches_beachhead, Some(true));
        assert_eq!(project.interviews[1].matches_beachhead, Some(false));
    }
}
