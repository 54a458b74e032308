// src/system/launcher_config.rs

use crate::{
    constants::LAUNCHER_CONFIG_FILENAME,
    core::{
        environment_manager::EnvironmentManager,
        paths::{self, PathError},
        registry_store::RegistryStore,
    },
    models::LauncherSettings,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Failures while loading `launcher.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the file failed.
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML for the settings.
    #[error("Failed to parse {file}: {source}")]
    TomlParse {
        file: String,
        #[source]
        source: toml::de::Error,
    },
    /// The defaults could not be written.
    #[error("Failed to serialize launcher config to TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    /// A configured path could not be resolved.
    #[error(transparent)]
    Path(#[from] PathError),
    /// `executable` was blank.
    #[error("The 'executable' setting in {0} must not be empty.")]
    EmptyExecutable(String),
}

/// Fully resolved launcher settings: every location is an absolute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// The config root.
    pub root: PathBuf,
    /// Registry document.
    pub registry_path: PathBuf,
    /// Registry backups.
    pub backup_root: PathBuf,
    /// Session transcripts.
    pub log_root: PathBuf,
    /// Template folder cloned into new environments.
    pub template_root: PathBuf,
    /// Parent of every environment folder.
    pub clients_root: PathBuf,
    /// File name of the external executable.
    pub executable: String,
    /// Whether session transcripts are written.
    pub transcripts: bool,
}

impl LauncherConfig {
    /// Resolves raw settings against the config root.
    pub fn resolve(root: &Path, settings: &LauncherSettings) -> Result<Self, ConfigError> {
        let executable = settings.executable.trim();
        if executable.is_empty() {
            return Err(ConfigError::EmptyExecutable(
                LAUNCHER_CONFIG_FILENAME.to_string(),
            ));
        }
        Ok(Self {
            root: root.to_path_buf(),
            registry_path: paths::expand_path_template(&settings.registry_file, root)?,
            backup_root: paths::expand_path_template(&settings.backup_dir, root)?,
            log_root: paths::expand_path_template(&settings.log_dir, root)?,
            template_root: paths::expand_path_template(&settings.template_dir, root)?,
            clients_root: paths::expand_path_template(&settings.clients_dir, root)?,
            executable: executable.to_string(),
            transcripts: settings.transcripts,
        })
    }

    /// Points the registry at another document for this run.
    pub fn with_registry(mut self, registry_path: Option<PathBuf>) -> Self {
        if let Some(path) = registry_path {
            self.registry_path = dunce::simplified(&path).to_path_buf();
        }
        self
    }

    /// Builds the store and manager that operate on this configuration.
    pub fn environment_manager(&self) -> EnvironmentManager {
        let store = RegistryStore::new(&self.registry_path, &self.backup_root);
        EnvironmentManager::new(
            store,
            &self.clients_root,
            &self.template_root,
            &self.executable,
        )
    }
}

/// Reads `<root>/launcher.toml`, writing the defaults first if it does not exist.
pub fn load_launcher_config(root: &Path) -> Result<LauncherConfig, ConfigError> {
    let config_path = root.join(LAUNCHER_CONFIG_FILENAME);
    let settings = if !config_path.exists() {
        let default_settings = LauncherSettings::default();
        let toml_string = toml::to_string_pretty(&default_settings)?;
        fs::create_dir_all(root)?;
        fs::write(&config_path, toml_string)?;
        log::info!("Wrote default launcher config to '{}'", config_path.display());
        default_settings
    } else {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
            file: config_path.display().to_string(),
            source: e,
        })?
    };
    LauncherConfig::resolve(root, &settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_EXECUTABLE, DEFAULT_REGISTRY_FILENAME};
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_written_and_resolved_under_root() {
        let dir = TempDir::new().unwrap();

        let config = load_launcher_config(dir.path()).unwrap();

        assert!(dir.path().join(LAUNCHER_CONFIG_FILENAME).is_file());
        assert_eq!(config.registry_path, dir.path().join(DEFAULT_REGISTRY_FILENAME));
        assert_eq!(config.clients_root, dir.path().join("GAM-Clients"));
        assert_eq!(config.executable, DEFAULT_EXECUTABLE);
        assert!(config.transcripts);
        // A second load reads the file it just wrote.
        assert_eq!(load_launcher_config(dir.path()).unwrap(), config);
    }

    #[test]
    fn test_partial_file_overrides_selected_keys() {
        let dir = TempDir::new().unwrap();
        let clients = dir.path().join("elsewhere");
        fs::write(
            dir.path().join(LAUNCHER_CONFIG_FILENAME),
            format!(
                "clients_dir = '{}'\ntranscripts = false\n",
                clients.display()
            ),
        )
        .unwrap();

        let config = load_launcher_config(dir.path()).unwrap();

        assert_eq!(config.clients_root, clients);
        assert!(!config.transcripts);
        assert_eq!(config.template_root, dir.path().join("GAM-Template"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(LAUNCHER_CONFIG_FILENAME), "clients_dir = [").unwrap();
        assert!(matches!(
            load_launcher_config(dir.path()),
            Err(ConfigError::TomlParse { .. })
        ));
    }

    #[test]
    fn test_registry_override() {
        let dir = TempDir::new().unwrap();
        let other = dir.path().join("other.json");
        let config = load_launcher_config(dir.path())
            .unwrap()
            .with_registry(Some(other.clone()));
        assert_eq!(config.registry_path, other);
        assert_eq!(config.environment_manager().store().document_path(), other);
    }
}
