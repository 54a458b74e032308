// src/cli/handlers/validate.rs

use anyhow::Result;

use crate::{
    cli::{dispatcher::MenuFlow, handlers::commons, handlers::MenuContext},
    core::environment_manager::ValidationReport,
    system::terminal::{TerminalError, Tone},
};

/// `[V]`: shows every stored path that is not in normalized form and rewrites them
/// on confirmation.
pub fn handle(context: &mut MenuContext<'_>) -> Result<MenuFlow> {
    let MenuContext { manager, terminal } = context;

    if manager.list()?.is_empty() {
        terminal.say(Tone::Warning, t!("validate.info.nothing_to_validate"));
        return Ok(MenuFlow::Continue);
    }

    let mut prompt_error: Option<TerminalError> = None;
    let report = manager.validate_and_sanitize(|issues| {
        commons::section(&mut **terminal, t!("validate.header"));
        for issue in issues {
            terminal.say(
                Tone::Plain,
                &format!(
                    t!("validate.issue"),
                    number = issue.number,
                    name = issue.name,
                    original = issue.original,
                    clean = issue.clean
                ),
            );
        }
        match terminal.read_line(t!("validate.prompt.apply")) {
            Ok(answer) => answer.is_some_and(|a| a.trim().eq_ignore_ascii_case("y")),
            Err(e) => {
                prompt_error = Some(e);
                false
            }
        }
    })?;
    if let Some(e) = prompt_error {
        return Err(e.into());
    }

    match report {
        ValidationReport::Clean => terminal.say(Tone::Success, t!("validate.success.clean")),
        ValidationReport::Declined(_) => terminal.say(Tone::Dim, t!("validate.info.no_changes")),
        ValidationReport::Applied { issues, backup } => {
            commons::report_backup(&mut **terminal, &backup);
            terminal.say(
                Tone::Success,
                &format!(t!("validate.success.applied"), count = issues.len()),
            );
            terminal.say(
                Tone::Dim,
                &format!(
                    t!("common.saved"),
                    path = manager.store().document_path().display()
                ),
            );
        }
    }

    Ok(MenuFlow::Continue)
}
