// src/cli/handlers/commons.rs

// Prompts and reporting shared by the menu handlers.

use anyhow::Result;

use crate::{
    core::registry_store::BackupOutcome,
    models::Registry,
    system::terminal::{Terminal, Tone},
};

/// Asks for one line and trims it. End of input reads as an empty answer, which
/// every handler treats as "cancel".
pub fn ask(terminal: &mut dyn Terminal, prompt: &str) -> Result<String> {
    Ok(terminal
        .read_line(prompt)?
        .map(|answer| answer.trim().to_string())
        .unwrap_or_default())
}

/// Like [`ask`], but a blank answer becomes `None`.
pub fn ask_optional(terminal: &mut dyn Terminal, prompt: &str) -> Result<Option<String>> {
    let answer = ask(terminal, prompt)?;
    Ok((!answer.is_empty()).then_some(answer))
}

/// Prints a blank line and a heading.
pub fn section(terminal: &mut dyn Terminal, title: &str) {
    terminal.say(Tone::Plain, "");
    terminal.say(Tone::Heading, title);
    terminal.say(Tone::Heading, &"-".repeat(title.chars().count()));
}

/// Prints `[n] Name - Path` for every record.
pub fn list_numbered(terminal: &mut dyn Terminal, registry: &Registry) {
    for (i, record) in registry.environments.iter().enumerate() {
        terminal.say(
            Tone::Plain,
            &format!(
                t!("common.list.entry"),
                number = i + 1,
                name = record.name,
                path = record.path
            ),
        );
    }
}

/// Reports what happened to the backup taken before a save.
pub fn report_backup(terminal: &mut dyn Terminal, backup: &BackupOutcome) {
    match backup {
        BackupOutcome::Created(path) => terminal.say(
            Tone::Dim,
            &format!(t!("common.backup.created"), path = path.display()),
        ),
        BackupOutcome::NotNeeded => {}
        BackupOutcome::Failed(reason) => terminal.say(
            Tone::Warning,
            &format!(t!("common.backup.failed"), reason = reason),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::terminal::scripted::ScriptedTerminal;
    use std::path::PathBuf;

    #[test]
    fn test_ask_trims_and_treats_eof_as_blank() {
        let mut terminal = ScriptedTerminal::new(&["  Acme  "]);
        assert_eq!(ask(&mut terminal, "Name").unwrap(), "Acme");
        assert_eq!(ask(&mut terminal, "Name").unwrap(), "");
        assert_eq!(ask_optional(&mut terminal, "Admin").unwrap(), None);
    }

    #[test]
    fn test_backup_reporting() {
        let mut terminal = ScriptedTerminal::new(&[]);
        report_backup(&mut terminal, &BackupOutcome::NotNeeded);
        assert!(terminal.lines.is_empty());

        report_backup(
            &mut terminal,
            &BackupOutcome::Created(PathBuf::from("GAM_Clients_20240101120000.json")),
        );
        report_backup(&mut terminal, &BackupOutcome::Failed("disk full".to_string()));
        assert!(terminal.said("JSON backup saved to: GAM_Clients_20240101120000.json"));
        assert!(terminal.said("disk full"));
    }
}
