//! Canvass CLI - customer-discovery assumptions, interviews and validation stages.

use canvass_cli::{commands, init_tracing, Cli, Config, Formatter, JsonFileStore};
use canvass_engine::DiscoveryEngine;
use clap::Parser;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> canvass_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let engine = DiscoveryEngine::new(config.engine_config()?)?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    tracing::info!(project = %cli.project.display(), "running command");
    let mut store = JsonFileStore::new(cli.project);
    commands::execute(cli.command, &mut store, &engine, &formatter)
}
