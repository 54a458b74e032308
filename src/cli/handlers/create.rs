// src/cli/handlers/create.rs

use anyhow::Result;

use crate::{
    cli::{dispatcher::MenuFlow, handlers::commons, handlers::MenuContext},
    core::{
        color::parse_color_name,
        environment_manager::{ManagerError, NewEnvironment},
    },
    system::terminal::Tone,
};

/// `[N]`: asks for a name and the optional hints, then creates the environment.
pub fn handle(context: &mut MenuContext<'_>) -> Result<MenuFlow> {
    let MenuContext { manager, terminal } = context;
    commons::section(&mut **terminal, t!("create.header"));

    let name = commons::ask(&mut **terminal, t!("create.prompt.name"))?;
    let folder = match manager.folder_for(&name) {
        Ok(folder) => folder,
        Err(e @ (ManagerError::EmptyName | ManagerError::EmptyFolderKey { .. })) => {
            terminal.say(Tone::Warning, &e.to_string());
            return Ok(MenuFlow::Continue);
        }
        Err(e) => return Err(e.into()),
    };
    terminal.say(
        Tone::Dim,
        &format!(t!("create.info.folder"), path = folder.display()),
    );

    let admin = commons::ask_optional(&mut **terminal, t!("create.prompt.admin"))?;
    let color = commons::ask_optional(&mut **terminal, t!("create.prompt.color"))?;
    if let Some(hint) = &color
        && parse_color_name(hint).is_none()
    {
        terminal.say(
            Tone::Warning,
            &format!(t!("create.warning.unknown_color"), color = hint),
        );
    }

    let report = match manager.create(NewEnvironment { name, admin, color }) {
        Ok(report) => report,
        Err(ManagerError::AlreadyExists { name }) => {
            terminal.say(
                Tone::Warning,
                &format!(t!("create.error.already_exists"), name = name),
            );
            return Ok(MenuFlow::Continue);
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(source) = &report.template_source {
        terminal.say(
            Tone::Dim,
            &format!(t!("create.info.cloned_from"), path = source.display()),
        );
    }
    for warning in &report.warnings {
        terminal.say(Tone::Warning, warning);
    }
    commons::report_backup(&mut **terminal, &report.backup);
    terminal.say(
        Tone::Dim,
        &format!(
            t!("common.saved"),
            path = manager.store().document_path().display()
        ),
    );

    terminal.say(
        Tone::Success,
        &format!(t!("create.success.created"), name = report.record.name),
    );
    terminal.say(
        Tone::Plain,
        &format!(t!("create.info.path"), path = report.record.path),
    );
    if !report.executable_present {
        terminal.say(
            Tone::Warning,
            &format!(
                t!("create.warning.no_executable"),
                executable = manager.executable()
            ),
        );
    }

    Ok(MenuFlow::Continue)
}
