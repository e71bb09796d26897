//! Command implementations.

pub mod assumption;
pub mod beachhead;
pub mod evaluate;
pub mod init;
pub mod interview;

pub use self::assumption::execute_assumption;
pub use self::beachhead::execute_beachhead;
pub use self::evaluate::{execute_check, execute_progress, execute_requirements, execute_stages};
pub use self::init::execute_init;
pub use self::interview::{execute_interview, execute_recount};

use crate::cli::Command;
use crate::error::Result;
use crate::output::Formatter;
use crate::store::JsonFileStore;
use canvass_engine::DiscoveryEngine;

/// Run one parsed command against a project store.
pub fn execute(
    command: Command,
    store: &mut JsonFileStore,
    engine: &DiscoveryEngine,
    formatter: &Formatter,
) -> Result<()> {
    match command {
        Command::Init(args) => execute_init(args, store, formatter),
        Command::Assumption(action) => execute_assumption(action, store, formatter),
        Command::Interview(action) => execute_interview(action, store, formatter),
        Command::Stages => execute_stages(store, engine, formatter),
        Command::Check(args) => execute_check(args, store, engine, formatter),
        Command::Requirements => execute_requirements(store, engine, formatter),
        Command::Progress => execute_progress(store, engine, formatter),
        Command::Beachhead(args) => execute_beachhead(args, store, formatter),
        Command::Recount => execute_recount(store, formatter),
    }
}
