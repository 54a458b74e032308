// src/core/paths.rs

use crate::constants::{CONFIG_ROOT_ENV_VAR, WINDOWS_CONFIG_ROOT};
use chrono::{DateTime, TimeZone};
use lazy_static::lazy_static;
use regex::Regex;
use std::env;
use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use thiserror::Error;

lazy_static! {
    /// A hyphen used as a spaced separator (`"A - B"`) is dropped along with its spaces.
    static ref SPACED_HYPHEN: Regex = Regex::new(r"\s+-+\s+").unwrap();
    /// Anything that is not a letter, digit, hyphen or space is dropped from folder keys.
    static ref UNSAFE_KEY_CHARS: Regex = Regex::new(r"[^A-Za-z0-9\- ]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Failures while resolving launcher paths.
#[derive(Error, Debug)]
pub enum PathError {
    /// The platform has no config directory.
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    /// The config root could not be created.
    #[error("Could not create config directory at '{path}': {source}")]
    ConfigDirCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// A `~` or variable in a template could not be expanded.
    #[error("Failed to expand path template '{template}': {reason}")]
    Expansion { template: String, reason: String },
}

/// Canonicalizes a user-entered or stored path string using the host's separator.
///
/// Surrounding whitespace and quotes are removed, both `/` and `\` become the native
/// separator, and trailing separators are dropped (a bare root such as `C:\` or `/`
/// is kept intact).
pub fn normalise_path(value: &str) -> String {
    normalise_path_with(value, MAIN_SEPARATOR)
}

/// Same as [`normalise_path`] with an explicit target separator.
pub fn normalise_path_with(value: &str, separator: char) -> String {
    let unquoted = value
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim();

    let mut clean: String = unquoted
        .chars()
        .map(|c| if c == '/' || c == '\\' { separator } else { c })
        .collect();

    while clean.len() > 1 {
        let Some(without) = clean.strip_suffix(separator) else {
            break;
        };
        if without.ends_with(':') {
            break; // `C:\` is a root, not a trailing separator.
        }
        let keep = without.len();
        clean.truncate(keep);
    }
    clean
}

/// Derives a folder-safe key from an environment's display name.
///
/// `"WMAT-ROD - Rodborough School"` becomes `"WMAT-RODRodboroughSchool"`. Hyphens
/// inside a word survive; a hyphen standing between spaces is a separator and goes.
pub fn safe_folder_key(name: &str) -> String {
    let cleaned = UNSAFE_KEY_CHARS.replace_all(name, "");
    let cleaned = SPACED_HYPHEN.replace_all(&cleaned, " ");
    WHITESPACE.replace_all(&cleaned, "").into_owned()
}

/// Returns the config root, creating it if it doesn't exist.
///
/// Precedence: explicit override, then `UGL_ROOT`, then the platform default.
pub fn get_config_root(override_root: Option<&Path>) -> Result<PathBuf, PathError> {
    let root = match override_root {
        Some(path) => path.to_path_buf(),
        None => match env::var(CONFIG_ROOT_ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => expand_path_template(&value, Path::new(""))?,
            _ => default_config_root()?,
        },
    };

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::ConfigDirCreation {
            path: root.display().to_string(),
            source: e,
        })?;
    }
    Ok(dunce::simplified(&root).to_path_buf())
}

fn default_config_root() -> Result<PathBuf, PathError> {
    if cfg!(target_os = "windows") {
        Ok(PathBuf::from(WINDOWS_CONFIG_ROOT))
    } else {
        dirs::config_dir()
            .map(|dir| dir.join("ugl"))
            .ok_or(PathError::ConfigDirNotFound)
    }
}

/// Expands `~` and environment variables in a configured path.
/// Relative results are anchored at `base`.
pub fn expand_path_template(template: &str, base: &Path) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(template.trim()).map_err(|e| PathError::Expansion {
        template: template.to_string(),
        reason: e.to_string(),
    })?;

    let path = PathBuf::from(normalise_path(&expanded));
    let anchored = if path.is_absolute() {
        path
    } else {
        base.join(path)
    };
    Ok(dunce::simplified(&anchored).to_path_buf())
}

/// Builds `<basename>_<YYYYMMDDHHMMSS>.<ext>` for a backup of `document`.
pub fn backup_file_name<Tz: TimeZone>(document: &Path, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let stem = document
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "registry".to_string());
    let stamp = at.format("%Y%m%d%H%M%S");
    match document.extension() {
        Some(ext) => format!("{}_{}.{}", stem, stamp, ext.to_string_lossy()),
        None => format!("{}_{}", stem, stamp),
    }
}
