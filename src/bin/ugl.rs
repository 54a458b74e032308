// src/bin/ugl.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use ugl::{
    cli::{Cli, session::Session},
    core::paths,
    state::SessionState,
    system::{
        interrupt,
        launcher_config::load_launcher_config,
        terminal::ConsoleTerminal,
        transcript::Transcript,
    },
};

/// The main entry point of the launcher.
/// It sets up logging, parses arguments, resolves the configuration and runs the
/// interactive session, with centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);
    if let Err(e) = interrupt::install() {
        log::warn!("Ctrl-C handling unavailable: {}", e);
    }

    let root = paths::get_config_root(cli.root.as_deref())?;
    let config = load_launcher_config(&root)?.with_registry(cli.registry);
    log::debug!("Resolved launcher config: {:?}", config);

    let manager = config.environment_manager();
    manager
        .store()
        .ensure_document()
        .context(ugl::t!("main.error.registry_init"))?;

    let transcript =
        (config.transcripts && !cli.no_transcript).then(|| Transcript::new(&config.log_root));
    let mut terminal = ConsoleTerminal::new(transcript);

    Session::new(
        &manager,
        &mut terminal,
        SessionState::with_pending_target(cli.environment),
    )
    .run()
}
