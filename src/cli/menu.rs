// src/cli/menu.rs

use crate::{
    cli::dispatcher,
    core::color::parse_color_name,
    models::Registry,
    system::terminal::{Terminal, Tone},
};

/// Prints the banner, the numbered environments and the lettered options.
pub fn render(terminal: &mut dyn Terminal, registry: &Registry) {
    render_banner(terminal);

    terminal.say(Tone::Heading, t!("menu.header.environments"));
    if registry.is_empty() {
        terminal.say(Tone::Dim, t!("menu.info.no_environments"));
    }
    for (i, record) in registry.environments.iter().enumerate() {
        let line = format!(t!("menu.entry"), number = i + 1, name = record.name);
        let tone = record
            .color
            .as_deref()
            .and_then(parse_color_name)
            .map_or(Tone::Plain, Tone::Accent);
        terminal.say(tone, &line);
    }

    render_options(terminal);
}

/// The fallback shown when the registry could not be read on a later cycle.
pub fn render_unavailable(terminal: &mut dyn Terminal) {
    render_banner(terminal);
    terminal.say(Tone::Heading, t!("menu.header.environments"));
    terminal.say(Tone::Error, t!("menu.error.registry_unavailable"));
    render_options(terminal);
}

fn render_banner(terminal: &mut dyn Terminal) {
    let title = format!(t!("menu.banner.title"), version = env!("CARGO_PKG_VERSION"));
    let rule = "=".repeat(title.chars().count());
    terminal.say(Tone::Plain, "");
    terminal.say(Tone::Heading, &rule);
    terminal.say(Tone::Heading, &title);
    terminal.say(Tone::Dim, t!("menu.banner.credits"));
    terminal.say(Tone::Heading, &rule);
}

fn render_options(terminal: &mut dyn Terminal) {
    terminal.say(Tone::Plain, "");
    for command in dispatcher::menu_commands() {
        terminal.say(
            Tone::Plain,
            &format!(t!("menu.option"), key = command.key, label = command.label),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::EnvironmentRecord, system::terminal::scripted::ScriptedTerminal};
    use colored::Color;

    #[test]
    fn test_empty_registry() {
        let mut terminal = ScriptedTerminal::new(&[]);
        render(&mut terminal, &Registry::default());
        assert!(terminal.said("Universal GAM Launcher v"));
        assert!(terminal.said("No environments configured."));
        assert!(terminal.said("[N] Create New Environment"));
        assert!(terminal.said("[Q] Quit"));
    }

    #[test]
    fn test_entries_are_numbered_and_colored() {
        let mut plain = EnvironmentRecord::new("Acme", "/a");
        plain.color = Some("Chartreuse".to_string());
        let mut green = EnvironmentRecord::new("Beta", "/b");
        green.color = Some("DarkGreen".to_string());
        let registry = Registry {
            environments: vec![plain, green],
            ..Default::default()
        };

        let mut terminal = ScriptedTerminal::new(&[]);
        render(&mut terminal, &registry);

        assert!(terminal.lines.contains(&(Tone::Plain, "[1] Acme".to_string())));
        assert!(
            terminal
                .lines
                .contains(&(Tone::Accent(Color::Green), "[2] Beta".to_string()))
        );
        assert!(!terminal.said("No environments configured."));
    }
}
