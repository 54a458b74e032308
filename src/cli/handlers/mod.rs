// src/cli/handlers/mod.rs

// One module per lettered menu action.

use anyhow::Result;

use crate::{
    cli::dispatcher::MenuFlow, core::environment_manager::EnvironmentManager,
    system::terminal::Terminal,
};

/// Prompt and listing helpers shared by the handlers.
pub mod commons;
/// `[N]` New environment.
pub mod create;
/// `[D]` Delete environment.
pub mod delete;
/// `[V]` Validate and sanitize stored paths.
pub mod validate;

/// Everything a menu handler may touch.
pub struct MenuContext<'a> {
    /// Registry operations.
    pub manager: &'a EnvironmentManager,
    /// Where prompts and output go.
    pub terminal: &'a mut dyn Terminal,
}

/// `[Q]`: ends the session.
pub fn quit(_context: &mut MenuContext<'_>) -> Result<MenuFlow> {
    Ok(MenuFlow::Quit)
}
