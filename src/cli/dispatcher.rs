use anyhow::Result;

use crate::cli::handlers::{self, MenuContext};

/// What the session does after a menu command returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFlow {
    /// Redraw the menu.
    Continue,
    /// Leave the launcher.
    Quit,
}

/// A lettered menu entry, its aliases, and the handler that runs it.
pub struct MenuCommand {
    /// Letter shown in the menu.
    pub key: &'static str,
    aliases: &'static [&'static str],
    /// Text shown next to the letter.
    pub label: &'static str,
    handler: fn(&mut MenuContext<'_>) -> Result<MenuFlow>,
}

/// Every lettered menu option, in display order.
static MENU_COMMANDS: &[MenuCommand] = &[
    MenuCommand {
        key: "N",
        aliases: &["new", "create"],
        label: t!("menu.option.create"),
        handler: handlers::create::handle,
    },
    MenuCommand {
        key: "D",
        aliases: &["delete", "del"],
        label: t!("menu.option.delete"),
        handler: handlers::delete::handle,
    },
    MenuCommand {
        key: "V",
        aliases: &["validate", "sanitise", "sanitize"],
        label: t!("menu.option.validate"),
        handler: handlers::validate::handle,
    },
    MenuCommand {
        key: "Q",
        aliases: &["quit", "exit"],
        label: t!("menu.option.quit"),
        handler: handlers::quit,
    },
];

/// All menu commands, in display order.
pub fn menu_commands() -> &'static [MenuCommand] {
    MENU_COMMANDS
}

/// Finds a menu command by its letter or an alias, ignoring case.
pub fn find_command(input: &str) -> Option<&'static MenuCommand> {
    let input = input.trim();
    MENU_COMMANDS.iter().find(|cmd| {
        cmd.key.eq_ignore_ascii_case(input)
            || cmd.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(input))
    })
}

/// Runs one menu command.
pub fn dispatch(command: &MenuCommand, context: &mut MenuContext<'_>) -> Result<MenuFlow> {
    log::debug!("Dispatching menu command '{}'", command.key);
    (command.handler)(context)
}
