// src/core/environment_manager.rs

//! Business operations over the registry: create, delete, validate/sanitize.
//!
//! Every operation reloads the registry from disk first so that edits made by hand
//! (or by another launcher window) between menu cycles are never overwritten with a
//! stale copy.

use crate::constants::{CACHE_DIR, CREDENTIAL_FILES, DELETE_CONFIRMATION, DRIVE_DIR, INTERNAL_DIR};
use crate::core::paths::{normalise_path, safe_folder_key};
use crate::core::registry_store::{BackupOutcome, RegistryError, RegistryStore};
use crate::models::{EnvironmentRecord, Registry};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Failures of the environment operations.
#[derive(Error, Debug)]
pub enum ManagerError {
    /// Loading or saving the registry failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The name was blank.
    #[error("An environment name is required.")]
    EmptyName,
    /// Nothing of the name survives as a folder key.
    #[error("The name '{name}' does not contain any characters usable in a folder name.")]
    EmptyFolderKey { name: String },
    /// A record with the same name or path exists.
    #[error("Environment '{name}' already exists.")]
    AlreadyExists { name: String },
    /// The record to delete is no longer in the registry.
    #[error("Environment '{name}' is no longer in the registry.")]
    NotFound { name: String },
    /// The environment folder could not be created.
    #[error("Could not create environment folder '{path}': {source}")]
    FolderCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

type ManagerResult<T> = Result<T, ManagerError>;

/// Input for [`EnvironmentManager::create`].
#[derive(Debug, Clone, Default)]
pub struct NewEnvironment {
    /// Display name; also the source of the folder key.
    pub name: String,
    /// Optional admin account.
    pub admin: Option<String>,
    /// Optional color hint for the menu.
    pub color: Option<String>,
}

/// Result of a successful create.
#[derive(Debug)]
pub struct CreateReport {
    /// The record that was stored.
    pub record: EnvironmentRecord,
    /// The created environment folder.
    pub folder: PathBuf,
    /// The template folder that was cloned, if any was found.
    pub template_source: Option<PathBuf>,
    /// Whether the executable ended up in the folder.
    pub executable_present: bool,
    /// Non-fatal problems (missing template, partial copy, leftover credentials).
    pub warnings: Vec<String>,
    /// What happened to the previous registry document.
    pub backup: BackupOutcome,
}

/// Result of a delete request.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The confirmation did not match; nothing was changed.
    Cancelled,
    /// The record was removed from the registry. Its folder is untouched.
    Removed {
        record: EnvironmentRecord,
        backup: BackupOutcome,
    },
}

/// Result of the separately confirmed folder removal.
#[derive(Debug)]
pub enum FolderOutcome {
    /// The folder was removed.
    Deleted,
    /// The user chose to keep it.
    Retained,
    /// There was nothing on disk to remove.
    Missing,
    /// Removal failed with this reason.
    Failed(String),
}

/// A stored path that differs from its normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathIssue {
    /// 1-based menu number of the affected environment.
    pub number: usize,
    /// Name of the affected environment.
    pub name: String,
    /// The path as stored.
    pub original: String,
    /// The normalized path.
    pub clean: String,
}

/// Result of [`EnvironmentManager::validate_and_sanitize`].
#[derive(Debug)]
pub enum ValidationReport {
    /// Every stored path is already normalized.
    Clean,
    /// Issues were found and left in place.
    Declined(Vec<PathIssue>),
    /// Issues were fixed and the registry saved.
    Applied {
        issues: Vec<PathIssue>,
        backup: BackupOutcome,
    },
}

/// Creates, deletes and repairs environments, persisting through a [`RegistryStore`].
#[derive(Debug, Clone)]
pub struct EnvironmentManager {
    store: RegistryStore,
    clients_root: PathBuf,
    template_root: PathBuf,
    executable: String,
}

impl EnvironmentManager {
    /// Creates a manager over `store`, placing new environments under `clients_root`.
    pub fn new(
        store: RegistryStore,
        clients_root: impl Into<PathBuf>,
        template_root: impl Into<PathBuf>,
        executable: impl Into<String>,
    ) -> Self {
        Self {
            store,
            clients_root: clients_root.into(),
            template_root: template_root.into(),
            executable: executable.into(),
        }
    }

    /// The underlying registry store.
    pub fn store(&self) -> &RegistryStore {
        &self.store
    }

    /// Folder searched for a template to clone.
    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    /// File name of the external executable.
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Loads the current registry.
    pub fn list(&self) -> ManagerResult<Registry> {
        Ok(self.store.load()?)
    }

    /// The folder a new environment called `name` would get.
    pub fn folder_for(&self, name: &str) -> ManagerResult<PathBuf> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ManagerError::EmptyName);
        }
        let key = safe_folder_key(name);
        if key.is_empty() {
            return Err(ManagerError::EmptyFolderKey {
                name: name.to_string(),
            });
        }
        Ok(self.clients_root.join(key))
    }

    /// Registers a new environment, creating and populating its folder.
    pub fn create(&self, request: NewEnvironment) -> ManagerResult<CreateReport> {
        let name = request.name.trim().to_string();
        let folder = self.folder_for(&name)?;
        let folder_str = normalise_path(&folder.display().to_string());

        let mut registry = self.store.load()?;
        let duplicate = registry
            .environments
            .iter()
            .any(|env| env.name == name || normalise_path(&env.path) == folder_str);
        if duplicate {
            return Err(ManagerError::AlreadyExists { name });
        }

        let folder_error = |e: std::io::Error| ManagerError::FolderCreation {
            path: folder.display().to_string(),
            source: e,
        };
        fs::create_dir_all(&folder).map_err(folder_error)?;

        let mut warnings = Vec::new();
        let template_source = select_template_source(&self.template_root, &self.executable);
        match &template_source {
            Some(source) => {
                log::info!(
                    "Cloning template '{}' into '{}'",
                    source.display(),
                    folder.display()
                );
                warnings.extend(clone_template(source, &folder));
            }
            None => {
                log::warn!(
                    "No template containing '{}' under '{}'",
                    self.executable,
                    self.template_root.display()
                );
                warnings.push(format!(
                    "No valid template found. Expected '{}' under '{}'.",
                    self.executable,
                    self.template_root.display()
                ));
            }
        }

        let internal_dir = ensure_internal_layout(&folder).map_err(folder_error)?;
        warnings.extend(remove_credentials(&internal_dir));

        let record = EnvironmentRecord {
            name,
            path: folder_str,
            admin: clean_optional(request.admin),
            color: clean_optional(request.color),
        };
        registry.environments.push(record.clone());
        let backup = self.store.save(&registry)?;

        Ok(CreateReport {
            executable_present: folder.join(&self.executable).is_file(),
            record,
            folder,
            template_source,
            warnings,
            backup,
        })
    }

    /// Removes `target` from the registry if `confirmation` is exactly `YES`.
    ///
    /// The record is looked up again by name and normalized path after reloading, so
    /// an edit to the registry between listing and confirming can never cause a
    /// different environment to be removed. The folder on disk is handled by
    /// [`Self::delete_folder`].
    pub fn delete(
        &self,
        target: &EnvironmentRecord,
        confirmation: &str,
    ) -> ManagerResult<DeleteOutcome> {
        let mut registry = self.store.load()?;
        let wanted = normalise_path(&target.path);
        let Some(index) = registry
            .environments
            .iter()
            .position(|env| env.name == target.name && normalise_path(&env.path) == wanted)
        else {
            return Err(ManagerError::NotFound {
                name: target.name.clone(),
            });
        };
        if confirmation.trim() != DELETE_CONFIRMATION {
            log::debug!("Delete of environment '{}' not confirmed", target.name);
            return Ok(DeleteOutcome::Cancelled);
        }

        let record = registry.environments.remove(index);
        let backup = self.store.save(&registry)?;
        log::info!("Removed environment '{}' from the registry", record.name);
        Ok(DeleteOutcome::Removed { record, backup })
    }

    /// Deletes the folder of a removed environment when `answer` is `Y`.
    pub fn delete_folder(&self, record: &EnvironmentRecord, answer: &str) -> FolderOutcome {
        if !answer.trim().eq_ignore_ascii_case("y") {
            return FolderOutcome::Retained;
        }
        let folder = PathBuf::from(normalise_path(&record.path));
        if !folder.exists() {
            return FolderOutcome::Missing;
        }
        match fs::remove_dir_all(&folder) {
            Ok(()) => {
                log::info!("Deleted environment folder '{}'", folder.display());
                FolderOutcome::Deleted
            }
            Err(e) => FolderOutcome::Failed(e.to_string()),
        }
    }

    /// Detects path drift and, if `approve` agrees, writes the clean paths back.
    ///
    /// `approve` is only consulted when there is something to fix.
    pub fn validate_and_sanitize<F>(&self, approve: F) -> ManagerResult<ValidationReport>
    where
        F: FnOnce(&[PathIssue]) -> bool,
    {
        let mut registry = self.store.load()?;
        let issues = path_issues(&registry);
        if issues.is_empty() {
            return Ok(ValidationReport::Clean);
        }
        if !approve(&issues) {
            return Ok(ValidationReport::Declined(issues));
        }

        for issue in &issues {
            if let Some(env) = registry.environments.get_mut(issue.number - 1) {
                env.path = issue.clean.clone();
            }
        }
        let backup = self.store.save(&registry)?;
        Ok(ValidationReport::Applied { issues, backup })
    }
}

fn path_issues(registry: &Registry) -> Vec<PathIssue> {
    registry
        .environments
        .iter()
        .enumerate()
        .filter_map(|(index, env)| {
            let clean = normalise_path(&env.path);
            (clean != env.path).then(|| PathIssue {
                number: index + 1,
                name: env.name.clone(),
                original: env.path.clone(),
                clean,
            })
        })
        .collect()
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Finds the folder to clone: the template root itself if it holds the executable,
/// otherwise the first immediate subfolder (by name) that does.
pub fn select_template_source(template_root: &Path, executable: &str) -> Option<PathBuf> {
    if template_root.join(executable).is_file() {
        return Some(template_root.to_path_buf());
    }
    let mut children: Vec<PathBuf> = fs::read_dir(template_root)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    children.sort();
    children
        .into_iter()
        .find(|child| child.join(executable).is_file())
}

/// Recursively copies `source` into `destination`. Returns a warning per failed entry.
fn clone_template(source: &Path, destination: &Path) -> Vec<String> {
    let mut warnings = Vec::new();
    for entry in WalkDir::new(source).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warnings.push(format!("Template copy failed: {}", e));
                continue;
            }
        };
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = destination.join(relative);
        let result = if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
        } else {
            fs::copy(entry.path(), &target).map(|_| ())
        };
        if let Err(e) = result {
            warnings.push(format!(
                "Template copy failed for '{}': {}",
                relative.display(),
                e
            ));
        }
    }
    warnings
}

/// Ensures `<root>/.gam`, `<root>/.gam/gamcache` and `<root>/.gam/drive` exist.
/// Returns the internal config directory.
pub fn ensure_internal_layout(root: &Path) -> std::io::Result<PathBuf> {
    let internal = root.join(INTERNAL_DIR);
    for dir in [
        root.to_path_buf(),
        internal.clone(),
        internal.join(CACHE_DIR),
        internal.join(DRIVE_DIR),
    ] {
        fs::create_dir_all(&dir)?;
    }
    Ok(internal)
}

/// Deletes any shared credentials copied in from a template.
fn remove_credentials(internal_dir: &Path) -> Vec<String> {
    let mut warnings = Vec::new();
    for file in CREDENTIAL_FILES {
        let path = internal_dir.join(file);
        if path.exists() {
            match fs::remove_file(&path) {
                Ok(()) => log::debug!("Removed template credential '{}'", path.display()),
                Err(e) => warnings.push(format!(
                    "Could not remove credential file '{}': {}",
                    path.display(),
                    e
                )),
            }
        }
    }
    warnings
}
