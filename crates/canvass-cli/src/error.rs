//! Error types for the CLI application.

use canvass_domain::DomainError;
use canvass_engine::EngineError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Domain rule violated
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Engine error
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No project file yet
    #[error("No project at {}. Run 'canvass init' first.", .0.display())]
    ProjectMissing(PathBuf),

    /// Refusing to overwrite a project
    #[error("A project already exists at {}. Use --force to replace it.", .0.display())]
    ProjectExists(PathBuf),

    /// The project file parsed but holds invalid data
    #[error("Invalid project file {}: {reason}", .path.display())]
    InvalidProject {
        /// File that was read
        path: PathBuf,
        /// What was wrong
        reason: String,
    },

    /// No id matched the given prefix
    #[error("No {kind} matches '{key}'")]
    NoMatch {
        /// assumption or interview
        kind: &'static str,
        /// The prefix given
        key: String,
    },

    /// More than one id matched the given prefix
    #[error("'{key}' matches {count} {kind}s; use a longer prefix")]
    AmbiguousId {
        /// assumption or interview
        kind: &'static str,
        /// The prefix given
        key: String,
        /// How many ids matched
        count: usize,
    },
}
