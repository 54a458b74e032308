// src/models.rs

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::constants::{
    DEFAULT_BACKUP_DIR, DEFAULT_CLIENTS_DIR, DEFAULT_EXECUTABLE, DEFAULT_LOG_DIR,
    DEFAULT_REGISTRY_FILENAME, DEFAULT_TEMPLATE_DIR,
};

// --- REGISTRY DOCUMENT MODELS ---
// These map 1:1 onto `GAM_Clients.json`. Keys are PascalCase on disk.

/// One configured environment: a named folder bound to its own GAM configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentRecord {
    /// Display name, unique within the registry.
    #[serde(rename = "Name", alias = "name", default)]
    pub name: String,
    /// Environment folder as stored; may need normalizing.
    #[serde(rename = "Path", alias = "path", default)]
    pub path: String,
    /// Free-text annotation, usually the admin account for this tenant.
    #[serde(
        rename = "Admin",
        alias = "admin",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    pub admin: Option<String>,
    /// Display hint used when rendering the menu.
    #[serde(
        rename = "Color",
        alias = "color",
        default,
        deserialize_with = "deserialize_optional_text"
    )]
    pub color: Option<String>,
}

impl EnvironmentRecord {
    /// Creates a record with no optional annotations.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            admin: None,
            color: None,
        }
    }
}

/// The persisted, ordered collection of environments.
///
/// Top-level keys other than `Environments` are carried through untouched so that
/// a load/save cycle never drops data written by other tools.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Registry {
    /// Environments in menu order.
    #[serde(
        rename = "Environments",
        default,
        deserialize_with = "deserialize_environments"
    )]
    pub environments: Vec<EnvironmentRecord>,
    /// Unknown top-level keys, written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Registry {
    /// Returns `true` if no environments are configured.
    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }

    /// Number of configured environments.
    pub fn len(&self) -> usize {
        self.environments.len()
    }

    /// Looks up an environment by its 1-based menu number.
    pub fn by_number(&self, number: usize) -> Option<&EnvironmentRecord> {
        number
            .checked_sub(1)
            .and_then(|index| self.environments.get(index))
    }

    /// Finds an environment by name, ignoring case. Returns its 1-based menu number too.
    pub fn find_by_name(&self, name: &str) -> Option<(usize, &EnvironmentRecord)> {
        let wanted = name.trim().to_lowercase();
        self.environments
            .iter()
            .enumerate()
            .find(|(_, env)| env.name.to_lowercase() == wanted)
            .map(|(index, env)| (index + 1, env))
    }
}

/// Accepts every shape `Environments` has had over time.
///
/// A list is the normal form. Older launchers wrote a single object when only one
/// environment existed, and blank files sometimes carry `null` or `""`. Anything
/// else is a malformed document and must surface as an error.
fn deserialize_environments<'de, D>(deserializer: D) -> Result<Vec<EnvironmentRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::String(_) => Ok(Vec::new()),
        list @ Value::Array(_) => serde_json::from_value(list).map_err(D::Error::custom),
        single @ Value::Object(_) => serde_json::from_value(single)
            .map(|record| vec![record])
            .map_err(D::Error::custom),
        other => Err(D::Error::custom(format!(
            "'Environments' must be a list of environments, found {}",
            other
        ))),
    }
}

/// Blank strings in optional fields are treated as "not set".
fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}

// --- `launcher.toml` MODEL ---

/// The raw contents of `launcher.toml`. Paths are templates, resolved by the config loader.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LauncherSettings {
    /// Registry document file name or path.
    pub registry_file: String,
    /// Backup folder.
    pub backup_dir: String,
    /// Transcript folder.
    pub log_dir: String,
    /// Template folder.
    pub template_dir: String,
    /// Parent of environment folders.
    pub clients_dir: String,
    /// External executable file name.
    pub executable: String,
    /// Write session transcripts.
    pub transcripts: bool,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            registry_file: DEFAULT_REGISTRY_FILENAME.to_string(),
            backup_dir: DEFAULT_BACKUP_DIR.to_string(),
            log_dir: DEFAULT_LOG_DIR.to_string(),
            template_dir: DEFAULT_TEMPLATE_DIR.to_string(),
            clients_dir: DEFAULT_CLIENTS_DIR.to_string(),
            executable: DEFAULT_EXECUTABLE.to_string(),
            transcripts: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Registry, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_list_shape_is_read_in_order() {
        let registry = parse(
            r#"{"Environments":[{"Name":"SiteA","Path":"C:\\a"},{"Name":"siteb","Path":"C:\\b","Admin":"ops@b.org","Color":"Cyan"}]}"#,
        )
        .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.environments[0].name, "SiteA");
        assert_eq!(registry.environments[1].admin.as_deref(), Some("ops@b.org"));
        assert_eq!(registry.environments[1].color.as_deref(), Some("Cyan"));
    }

    #[test]
    fn test_legacy_single_object_is_wrapped() {
        let registry = parse(r#"{"Environments":{"Name":"Only","Path":"D:\\only"}}"#).unwrap();
        assert_eq!(registry.environments, vec![EnvironmentRecord::new("Only", "D:\\only")]);
    }

    #[test]
    fn test_absent_null_and_blank_environments_read_as_empty() {
        assert!(parse("{}").unwrap().is_empty());
        assert!(parse(r#"{"Environments":null}"#).unwrap().is_empty());
        assert!(parse(r#"{"Environments":""}"#).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_environments_are_rejected() {
        assert!(parse(r#"{"Environments":42}"#).is_err());
        assert!(parse(r#"{"Environments":[{"Name":["not","a","string"]}]}"#).is_err());
        assert!(parse("{ not json").is_err());
    }

    #[test]
    fn test_empty_registry_serializes_as_empty_list() {
        let json = serde_json::to_string(&Registry::default()).unwrap();
        assert_eq!(json, r#"{"Environments":[]}"#);
    }

    #[test]
    fn test_lowercase_keys_and_blank_optionals() {
        let registry =
            parse(r#"{"Environments":[{"name":"x","path":"/x","admin":"  ","color":""}]}"#).unwrap();
        let record = &registry.environments[0];
        assert_eq!(record.name, "x");
        assert_eq!(record.path, "/x");
        assert!(record.admin.is_none());
        assert!(record.color.is_none());
    }

    #[test]
    fn test_unknown_top_level_fields_survive() {
        let registry = parse(r#"{"Version":3,"Environments":[]}"#).unwrap();
        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(json["Version"], 3);
        assert_eq!(json["Environments"], serde_json::json!([]));
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        let registry = Registry {
            environments: vec![
                EnvironmentRecord::new("SiteA", "/a"),
                EnvironmentRecord::new("siteb", "/b"),
            ],
            ..Default::default()
        };
        let (number, env) = registry.find_by_name("SITEA").unwrap();
        assert_eq!(number, 1);
        assert_eq!(env.name, "SiteA");
        assert_eq!(registry.find_by_name("SiteB").unwrap().0, 2);
        assert!(registry.find_by_name("nope").is_none());
        assert!(registry.by_number(0).is_none());
        assert!(registry.by_number(3).is_none());
    }
}
