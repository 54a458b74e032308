//! Universal GAM Launcher: a registry of GAM environments and an interactive,
//! switchable session inside one of them.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

/// Argument parsing, the menu and the session loop.
pub mod cli;
/// File names, defaults and fixed vocabulary.
pub mod constants;
/// Registry storage, environment operations, activation and proxies.
pub mod core;
/// Serde models for the registry document and `launcher.toml`.
pub mod models;
/// Runtime session state.
pub mod state;
/// Console, child processes, transcripts and launcher settings.
pub mod system;
