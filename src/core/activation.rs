// src/core/activation.rs

use crate::constants::{CONFIG_DIR_ENV_VAR, TOOL_NAME};
use crate::core::environment_manager::ensure_internal_layout;
use crate::core::paths::normalise_path;
use crate::core::proxy::ProxyTable;
use crate::models::EnvironmentRecord;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Why an environment could not be activated.
#[derive(Error, Debug)]
pub enum ActivationError {
    /// The environment folder does not exist.
    #[error("Environment folder does not exist: {0}")]
    FolderMissing(String),
    /// The internal layout could not be created.
    #[error("Could not prepare environment folder '{path}': {source}")]
    Prepare {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The working directory could not be changed.
    #[error("Could not change directory to '{path}': {source}")]
    ChangeDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// An environment that has been made the current working context.
#[derive(Debug, Clone)]
pub struct Activation {
    /// The record that was activated.
    pub record: EnvironmentRecord,
    /// Normalized environment folder, also the working directory.
    pub root: PathBuf,
    /// The internal config directory exposed through `GAMCFGDIR`.
    pub config_dir: PathBuf,
    /// Variables applied to every process started from the session.
    pub env_vars: HashMap<String, String>,
    /// Command aliases bound for this environment.
    pub proxies: ProxyTable,
}

impl Activation {
    /// `true` when the executable was found and commands can be forwarded.
    pub fn executable_available(&self) -> bool {
        self.proxies.executable().is_some()
    }
}

/// Prepares `record` for use and changes the working directory into it.
///
/// A missing folder aborts activation. A missing executable does not: the session
/// still starts, only forwarding is unavailable.
pub fn activate(
    record: &EnvironmentRecord,
    executable_name: &str,
) -> Result<Activation, ActivationError> {
    let root = PathBuf::from(normalise_path(&record.path));
    if !root.is_dir() {
        return Err(ActivationError::FolderMissing(root.display().to_string()));
    }

    let config_dir = ensure_internal_layout(&root).map_err(|e| ActivationError::Prepare {
        path: root.display().to_string(),
        source: e,
    })?;

    let mut env_vars = HashMap::new();
    env_vars.insert(
        CONFIG_DIR_ENV_VAR.to_string(),
        config_dir.display().to_string(),
    );

    env::set_current_dir(&root).map_err(|e| ActivationError::ChangeDirectory {
        path: root.display().to_string(),
        source: e,
    })?;

    let executable = root.join(executable_name);
    let executable = executable.is_file().then_some(executable);
    log::info!(
        "Activated '{}' at '{}' (executable present: {})",
        record.name,
        root.display(),
        executable.is_some()
    );

    Ok(Activation {
        record: record.clone(),
        proxies: ProxyTable::bind(TOOL_NAME, executable),
        root,
        config_dir,
        env_vars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CACHE_DIR, DEFAULT_EXECUTABLE, DRIVE_DIR, INTERNAL_DIR};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_folder_is_not_activated() {
        let dir = TempDir::new().unwrap();
        let record = EnvironmentRecord::new("Gone", dir.path().join("gone").display().to_string());

        let err = activate(&record, DEFAULT_EXECUTABLE).unwrap_err();

        assert!(matches!(err, ActivationError::FolderMissing(_)));
    }

    #[test]
    fn test_activation_prepares_layout_and_variables() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("Acme");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join(DEFAULT_EXECUTABLE), "stub").unwrap();
        let record = EnvironmentRecord::new("Acme", format!(" \"{}\" ", root.display()));

        let activation = activate(&record, DEFAULT_EXECUTABLE).unwrap();

        let internal = root.join(INTERNAL_DIR);
        assert!(internal.join(CACHE_DIR).is_dir());
        assert!(internal.join(DRIVE_DIR).is_dir());
        assert_eq!(activation.config_dir, internal);
        assert_eq!(
            activation.env_vars.get(CONFIG_DIR_ENV_VAR),
            Some(&internal.display().to_string())
        );
        assert!(activation.executable_available());
    }

    #[test]
    fn test_missing_executable_still_activates() {
        let dir = TempDir::new().unwrap();
        let record = EnvironmentRecord::new("Bare", dir.path().display().to_string());

        let activation = activate(&record, DEFAULT_EXECUTABLE).unwrap();

        assert!(!activation.executable_available());
    }
}
