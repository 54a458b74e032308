// src/core/registry_store.rs

//! Persistence for the environment registry (`GAM_Clients.json`).
//!
//! Every save first copies the current document into the backup directory, then
//! writes the new content through a temporary file that is persisted over the
//! primary document. A crash at any point leaves either the old document or a full
//! backup of it on disk.

use crate::core::paths;
use crate::models::Registry;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors raised while reading or writing the registry document.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The document exists but could not be read.
    #[error("Could not read registry document '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The document could be read but is not a valid registry.
    #[error("Registry document '{path}' is malformed: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// The in-memory registry could not be serialized.
    #[error("Could not serialize the registry: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Writing the new document failed. The previous document is untouched.
    #[error("Could not write registry document '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The fully written temporary file could not replace the primary document.
    #[error("Could not replace registry document: {0}")]
    Persist(#[from] tempfile::PersistError),
}

type RegistryResult<T> = Result<T, RegistryError>;

/// What happened to the previous document before a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    /// A copy of the previous document was written here.
    Created(PathBuf),
    /// There was no previous document to back up.
    NotNeeded,
    /// The copy failed. The save went ahead regardless.
    Failed(String),
}

/// Loads and saves the registry document, keeping timestamped backups.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    document_path: PathBuf,
    backup_root: PathBuf,
}

impl RegistryStore {
    /// Creates a store for `document_path`, keeping backups under `backup_root`.
    pub fn new(document_path: impl Into<PathBuf>, backup_root: impl Into<PathBuf>) -> Self {
        Self {
            document_path: document_path.into(),
            backup_root: backup_root.into(),
        }
    }

    /// The primary registry document.
    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    /// Folder receiving timestamped backups.
    pub fn backup_root(&self) -> &Path {
        &self.backup_root
    }

    /// Creates an empty document if none exists. Returns `true` if one was created.
    pub fn ensure_document(&self) -> RegistryResult<bool> {
        if self.document_path.exists() {
            return Ok(false);
        }
        log::info!(
            "Registry document not found. Creating '{}'.",
            self.document_path.display()
        );
        self.write_document(&Registry::default())?;
        Ok(true)
    }

    /// Reads the registry, creating an empty document first if it is missing.
    pub fn load(&self) -> RegistryResult<Registry> {
        self.ensure_document()?;

        let content =
            fs::read_to_string(&self.document_path).map_err(|e| RegistryError::Read {
                path: self.document_path.display().to_string(),
                source: e,
            })?;

        // Byte-order marks are common in files edited on Windows.
        let content = content.trim_start_matches('\u{feff}');
        if content.trim().is_empty() {
            log::warn!(
                "Registry document '{}' is empty. Treating it as an empty registry.",
                self.document_path.display()
            );
            return Ok(Registry::default());
        }

        let registry: Registry =
            serde_json::from_str(content).map_err(|e| RegistryError::Malformed {
                path: self.document_path.display().to_string(),
                source: e,
            })?;
        log::debug!(
            "Loaded {} environment(s) from '{}'",
            registry.len(),
            self.document_path.display()
        );
        Ok(registry)
    }

    /// Backs up the current document (best effort) and overwrites it with `registry`.
    pub fn save(&self, registry: &Registry) -> RegistryResult<BackupOutcome> {
        let backup = self.backup_current();
        if let BackupOutcome::Failed(reason) = &backup {
            log::warn!("Registry backup failed, saving anyway: {}", reason);
        }
        self.write_document(registry)?;
        log::info!(
            "Saved {} environment(s) to '{}'",
            registry.len(),
            self.document_path.display()
        );
        Ok(backup)
    }

    /// Where a backup taken right now would be written.
    pub fn backup_path_now(&self) -> PathBuf {
        let name = paths::backup_file_name(&self.document_path, &chrono::Local::now());
        self.backup_root.join(name)
    }

    fn backup_current(&self) -> BackupOutcome {
        if !self.document_path.exists() {
            return BackupOutcome::NotNeeded;
        }
        if let Err(e) = fs::create_dir_all(&self.backup_root) {
            return BackupOutcome::Failed(format!(
                "cannot create '{}': {}",
                self.backup_root.display(),
                e
            ));
        }
        // Two saves within the same second share a name; the later copy wins.
        let backup_path = self.backup_path_now();
        match fs::copy(&self.document_path, &backup_path) {
            Ok(_) => {
                log::debug!("Registry backed up to '{}'", backup_path.display());
                BackupOutcome::Created(backup_path)
            }
            Err(e) => BackupOutcome::Failed(format!(
                "cannot copy to '{}': {}",
                backup_path.display(),
                e
            )),
        }
    }

    fn write_document(&self, registry: &Registry) -> RegistryResult<()> {
        let json = serde_json::to_string_pretty(registry)?;
        let write_error = |e: std::io::Error| RegistryError::Write {
            path: self.document_path.display().to_string(),
            source: e,
        };

        let parent = match self.document_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(write_error)?;

        let mut temp = NamedTempFile::new_in(&parent).map_err(write_error)?;
        temp.write_all(json.as_bytes()).map_err(write_error)?;
        temp.write_all(b"\n").map_err(write_error)?;
        temp.flush().map_err(write_error)?;
        temp.persist(&self.document_path)?;
        Ok(())
    }
}
