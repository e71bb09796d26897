//! Trait definitions for external interactions
//!
//! The evaluation engine never performs I/O. Persistence is an adapter the
//! hosting application implements and injects.

use crate::Project;

/// Trait for loading and saving a project snapshot
///
/// Implemented by the application layer (e.g. the CLI's JSON file store).
pub trait ProjectStore {
    /// Error type for store operations
    type Error;

    /// Load the current project snapshot
    fn load(&self) -> Result<Project, Self::Error>;

    /// Persist a project snapshot, replacing what was stored
    fn save(&mut self, project: &Project) -> Result<(), Self::Error>;

    /// Whether a project has been stored yet
    fn exists(&self) -> bool;
}
