//! Resolve ids typed on the command line.
//!
//! Full UUIDs and unique prefixes are accepted, case-insensitively. Table
//! output shows the first 8 characters, which is usually enough.

use crate::error::{CliError, Result};
use canvass_domain::{AssumptionId, InterviewId, Project};

/// Resolve an assumption id or prefix.
pub fn resolve_assumption(project: &Project, key: &str) -> Result<AssumptionId> {
    resolve(
        "assumption",
        key,
        project.assumptions.iter().map(|a| (a.id, a.id.to_string())),
    )
}

/// Resolve an interview id or prefix.
pub fn resolve_interview(project: &Project, key: &str) -> Result<InterviewId> {
    resolve(
        "interview",
        key,
        project.interviews.iter().map(|i| (i.id, i.id.to_string())),
    )
}

fn resolve<T: Copy>(
    kind: &'static str,
    key: &str,
    candidates: impl Iterator<Item = (T, String)>,
) -> Result<T> {
    let needle = key.trim().to_lowercase();
    if needle.is_empty() {
        return Err(CliError::InvalidInput(format!("empty {} id", kind)));
    }

    let matches: Vec<(T, String)> = candidates
        .filter(|(_, text)| text.starts_with(&needle))
        .collect();

    if let Some((id, _)) = matches.iter().find(|(_, text)| *text == needle) {
        return Ok(*id);
    }
    match matches.as_slice() {
        [] => Err(CliError::NoMatch {
            kind,
            key: key.to_string(),
        }),
        [(id, _)] => Ok(*id),
        _ => Err(CliError::AmbiguousId {
            kind,
            key: key.to_string(),
            count: matches.len(),
        }),
    }
}
