//! Init command implementation.

use crate::cli::InitArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::store::JsonFileStore;
use canvass_domain::traits::ProjectStore;
use canvass_domain::Project;

/// Execute the init command.
pub fn execute_init(args: InitArgs, store: &mut JsonFileStore, formatter: &Formatter) -> Result<()> {
    if args.name.trim().is_empty() {
        return Err(CliError::InvalidInput("Project name cannot be empty".to_string()));
    }
    if store.exists() && !args.force {
        return Err(CliError::ProjectExists(store.path().to_path_buf()));
    }

    let mut project = Project::new(args.name.trim());
    project.set_beachhead_segment(args.beachhead);
    store.save(&project)?;

    println!(
        "{}",
        formatter.success(&format!(
            "Created project '{}' at {}",
            project.name,
            store.path().display()
        ))
    );
    if project.beachhead_segment.is_none() {
        println!(
            "{}",
            formatter.info("No beachhead segment yet. Score candidates with 'canvass beachhead'.")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    fn args(name: &str, force: bool) -> InitArgs {
        InitArgs {
            name: name.to_string(),
            beachhead: Some("Grad Students".to_string()),
            force,
        }
    }

    #[test]
    fn test_init_creates_project() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("canvass.json"));
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        execute_init(args("Notes", false), &mut store, &formatter).unwrap();

        let project = store.load().unwrap();
        assert_eq!(project.name, "Notes");
        assert_eq!(project.beachhead_segment.as_deref(), Some("Grad Students"));
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("canvass.json"));
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        execute_init(args("First", false), &mut store, &formatter).unwrap();
        let err = execute_init(args("Second", false), &mut store, &formatter).unwrap_err();
        assert!(matches!(err, CliError::ProjectExists(_)));

        execute_init(args("Second", true), &mut store, &formatter).unwrap();
        assert_eq!(store.load().unwrap().name, "Second");
    }

    #[test]
    fn test_init_rejects_blank_name() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("canvass.json"));
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert!(execute_init(args("  ", false), &mut store, &formatter).is_err());
        assert!(!store.exists());
    }
}
