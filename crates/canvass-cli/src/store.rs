//! JSON file persistence for projects.

use crate::error::{CliError, Result};
use crate::snapshot::ProjectFile;
use canvass_domain::traits::ProjectStore;
use canvass_domain::Project;
use std::fs;
use std::path::{Path, PathBuf};

/// Stores one project as a pretty-printed JSON file.
///
/// Saves go through a sibling temporary file and a rename, so a failed
/// write never leaves a half-written project behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "canvass.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ProjectStore for JsonFileStore {
    type Error = CliError;

    fn load(&self) -> Result<Project> {
        if !self.exists() {
            return Err(CliError::ProjectMissing(self.path.clone()));
        }

        let contents = fs::read_to_string(&self.path)?;
        let file: ProjectFile =
            serde_json::from_str(&contents).map_err(|e| CliError::InvalidProject {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        let project = Project::try_from(file).map_err(|e| CliError::InvalidProject {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        tracing::debug!(
            path = %self.path.display(),
            assumptions = project.assumptions.len(),
            interviews = project.interviews.len(),
            "loaded project"
        );
        Ok(project)
    }

    fn save(&mut self, project: &Project) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&ProjectFile::from(project))?;
        let temp = self.temp_path();
        fs::write(&temp, contents)?;
        fs::rename(&temp, &self.path)?;

        tracing::info!(path = %self.path.display(), "saved project");
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvass_domain::{AssumptionType, CanvasArea, NewAssumption};
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested").join("project.json"));
        assert!(!store.exists());

        let mut project = Project::new("Notes");
        project
            .add_assumption(NewAssumption::new(
                AssumptionType::Problem,
                "Notes get lost",
                CanvasArea::Problem,
            ))
            .unwrap();
        store.save(&project).unwrap();

        assert!(store.exists());
        assert!(!store.temp_path().exists());
        assert_eq!(store.load().unwrap(), project);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("none.json"));
        assert!(matches!(store.load(), Err(CliError::ProjectMissing(_))));
    }

    #[test]
    fn test_malformed_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{\"name\": \"x\", \"assumptions\": [{\"id\": \"nope\"}]}").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, CliError::InvalidProject { .. }));
        assert!(err.to_string().contains("bad.json"));
    }
}
