// src/cli/handlers/delete.rs

use anyhow::Result;

use crate::{
    cli::{dispatcher::MenuFlow, handlers::commons, handlers::MenuContext},
    constants::DELETE_CONFIRMATION,
    core::environment_manager::{DeleteOutcome, FolderOutcome, ManagerError},
    system::terminal::Tone,
};

/// `[D]`: removes one environment after an exact `YES`, then separately offers to
/// delete its folder.
pub fn handle(context: &mut MenuContext<'_>) -> Result<MenuFlow> {
    let MenuContext { manager, terminal } = context;

    let registry = manager.list()?;
    if registry.is_empty() {
        terminal.say(Tone::Warning, t!("delete.info.nothing_to_delete"));
        return Ok(MenuFlow::Continue);
    }

    commons::section(&mut **terminal, t!("delete.header"));
    commons::list_numbered(&mut **terminal, &registry);

    let choice = commons::ask(&mut **terminal, t!("delete.prompt.select"))?;
    if choice.is_empty() {
        terminal.say(Tone::Dim, t!("common.cancelled"));
        return Ok(MenuFlow::Continue);
    }
    let Some(target) = choice
        .parse::<usize>()
        .ok()
        .and_then(|n| registry.by_number(n))
    else {
        terminal.say(Tone::Error, t!("delete.error.invalid_selection"));
        return Ok(MenuFlow::Continue);
    };

    terminal.say(Tone::Warning, t!("delete.info.about_to_delete"));
    terminal.say(Tone::Plain, &format!(t!("delete.info.name"), name = target.name));
    terminal.say(Tone::Plain, &format!(t!("delete.info.path"), path = target.path));

    let confirmation = commons::ask(
        &mut **terminal,
        &format!(t!("delete.prompt.confirm"), word = DELETE_CONFIRMATION),
    )?;
    let outcome = match manager.delete(target, &confirmation) {
        Err(ManagerError::NotFound { name }) => {
            terminal.say(Tone::Error, &format!(t!("delete.error.not_found"), name = name));
            return Ok(MenuFlow::Continue);
        }
        other => other?,
    };
    let record = match outcome {
        DeleteOutcome::Cancelled => {
            terminal.say(Tone::Dim, t!("common.cancelled"));
            return Ok(MenuFlow::Continue);
        }
        DeleteOutcome::Removed { record, backup } => {
            commons::report_backup(&mut **terminal, &backup);
            terminal.say(Tone::Success, t!("delete.success.removed"));
            record
        }
    };

    let answer = commons::ask(&mut **terminal, t!("delete.prompt.folder"))?;
    match manager.delete_folder(&record, &answer) {
        FolderOutcome::Deleted => terminal.say(Tone::Success, t!("delete.success.folder_deleted")),
        FolderOutcome::Retained => terminal.say(Tone::Dim, t!("delete.info.folder_retained")),
        FolderOutcome::Missing => terminal.say(
            Tone::Warning,
            &format!(t!("delete.warning.folder_missing"), path = record.path),
        ),
        FolderOutcome::Failed(reason) => terminal.say(
            Tone::Error,
            &format!(t!("delete.error.folder_failed"), reason = reason),
        ),
    }

    Ok(MenuFlow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::DEFAULT_EXECUTABLE,
        core::{
            environment_manager::{EnvironmentManager, NewEnvironment},
            registry_store::RegistryStore,
        },
        models::Registry,
        system::terminal::{Terminal, TerminalError, scripted::ScriptedTerminal},
    };
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn manager_with(dir: &TempDir, names: &[&str]) -> EnvironmentManager {
        let manager = EnvironmentManager::new(
            RegistryStore::new(dir.path().join("GAM_Clients.json"), dir.path().join("bk")),
            dir.path().join("GAM-Clients"),
            dir.path().join("GAM-Template"),
            DEFAULT_EXECUTABLE,
        );
        for name in names {
            manager
                .create(NewEnvironment {
                    name: name.to_string(),
                    ..Default::default()
                })
                .unwrap();
        }
        manager
    }

    fn run(manager: &EnvironmentManager, inputs: &[&str]) -> ScriptedTerminal {
        let mut terminal = ScriptedTerminal::new(inputs);
        let flow = handle(&mut MenuContext {
            manager,
            terminal: &mut terminal,
        })
        .unwrap();
        assert_eq!(flow, MenuFlow::Continue);
        terminal
    }

    #[test]
    fn test_empty_registry_has_nothing_to_delete() {
        let dir = TempDir::new().unwrap();
        let manager = manager_with(&dir, &[]);
        let terminal = run(&manager, &[]);
        assert!(terminal.said("No environments to delete."));
        assert!(terminal.prompts.is_empty());
    }

    #[test]
    fn test_lowercase_yes_keeps_everything() {
        let dir = TempDir::new().unwrap();
        let manager = manager_with(&dir, &["Acme", "Beta"]);

        let terminal = run(&manager, &["2", "yes"]);

        assert!(terminal.said("[2] Beta - "));
        assert!(terminal.said("Cancelled."));
        assert_eq!(manager.list().unwrap().len(), 2);
    }

    #[test]
    fn test_yes_removes_record_and_folder_prompt_is_separate() {
        let dir = TempDir::new().unwrap();
        let manager = manager_with(&dir, &["Acme", "Beta"]);
        let acme_folder = PathBuf::from(&manager.list().unwrap().environments[0].path);

        let terminal = run(&manager, &["1", "YES", "n"]);

        assert!(terminal.said("Environment removed from configuration."));
        assert!(terminal.said("Folder retained."));
        assert!(acme_folder.is_dir());
        let remaining = manager.list().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining.environments[0].name, "Beta");

        let beta_folder = PathBuf::from(&remaining.environments[0].path);
        let terminal = run(&manager, &["1", "YES", "y"]);
        assert!(terminal.said("Folder deleted."));
        assert!(!beta_folder.exists());
        assert!(manager.list().unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range_and_blank_selection() {
        let dir = TempDir::new().unwrap();
        let manager = manager_with(&dir, &["Acme"]);

        let terminal = run(&manager, &["7"]);
        assert!(terminal.said("Invalid selection."));

        let terminal = run(&manager, &[""]);
        assert!(terminal.said("Cancelled."));
        assert_eq!(manager.list().unwrap().len(), 1);
    }

    /// Rewrites the registry on disk right before the `YES` prompt is answered.
    struct RewritingTerminal<'a> {
        inner: ScriptedTerminal,
        document: &'a Path,
        rewrite: Option<Registry>,
    }

    impl Terminal for RewritingTerminal<'_> {
        fn read_line(&mut self, prompt: &str) -> Result<Option<String>, TerminalError> {
            if prompt.starts_with("Type YES") {
                if let Some(registry) = self.rewrite.take() {
                    RegistryStore::new(self.document.to_path_buf(), self.document.with_extension("bk"))
                        .save(&registry)
                        .unwrap();
                }
            }
            self.inner.read_line(prompt)
        }

        fn say(&mut self, tone: Tone, text: &str) {
            self.inner.say(tone, text);
        }
    }

    fn run_with_rewrite(
        manager: &EnvironmentManager,
        inputs: &[&str],
        rewrite: Registry,
    ) -> ScriptedTerminal {
        let document = manager.store().document_path().to_path_buf();
        let mut terminal = RewritingTerminal {
            inner: ScriptedTerminal::new(inputs),
            document: &document,
            rewrite: Some(rewrite),
        };
        handle(&mut MenuContext {
            manager,
            terminal: &mut terminal,
        })
        .unwrap();
        terminal.inner
    }

    #[test]
    fn test_confirmed_record_is_removed_even_if_registry_reordered() {
        let dir = TempDir::new().unwrap();
        let manager = manager_with(&dir, &["Acme", "Beta"]);
        let listed = manager.list().unwrap();
        let reordered = Registry {
            environments: listed.environments.iter().rev().cloned().collect(),
            ..Default::default()
        };

        let terminal = run_with_rewrite(&manager, &["1", "YES", "n"], reordered);

        assert!(terminal.said("  Name: Acme"));
        assert!(terminal.said("Environment removed from configuration."));
        let remaining = manager.list().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining.environments[0].name, "Beta");
    }

    #[test]
    fn test_confirmed_record_removed_elsewhere_is_reported() {
        let dir = TempDir::new().unwrap();
        let manager = manager_with(&dir, &["Acme", "Beta"]);
        let listed = manager.list().unwrap();
        let without_acme = Registry {
            environments: listed.environments[1..].to_vec(),
            ..Default::default()
        };

        let terminal = run_with_rewrite(&manager, &["1", "YES"], without_acme);

        assert!(terminal.said("Environment 'Acme' is no longer in the registry."));
        assert!(!terminal.said("Environment removed from configuration."));
        assert_eq!(manager.list().unwrap().environments[0].name, "Beta");
    }
}
