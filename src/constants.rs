// src/constants.rs

/// Name of the launcher's own configuration file, inside the config root.
pub const LAUNCHER_CONFIG_FILENAME: &str = "launcher.toml";

/// Process variable that overrides the default config root.
pub const CONFIG_ROOT_ENV_VAR: &str = "UGL_ROOT";

/// Config root used on Windows when nothing else is specified.
pub const WINDOWS_CONFIG_ROOT: &str = r"C:\EDUIT\GAM_Configs";

/// Defaults for `launcher.toml`, relative to the config root.
pub const DEFAULT_REGISTRY_FILENAME: &str = "GAM_Clients.json";
/// Registry backups.
pub const DEFAULT_BACKUP_DIR: &str = "GAM-JSONBackups";
/// Session transcripts.
pub const DEFAULT_LOG_DIR: &str = "Logs";
/// Folder cloned into new environments.
pub const DEFAULT_TEMPLATE_DIR: &str = "GAM-Template";
/// Parent of every environment folder.
pub const DEFAULT_CLIENTS_DIR: &str = "GAM-Clients";

/// The name the external tool answers to on the command line.
pub const TOOL_NAME: &str = "gam";

/// File name of the external executable inside an environment folder.
#[cfg(windows)]
pub const DEFAULT_EXECUTABLE: &str = "gam.exe";
/// File name of the external executable on other hosts.
#[cfg(not(windows))]
pub const DEFAULT_EXECUTABLE: &str = "gam";

/// Variable exposing the active environment's internal config directory to child processes.
pub const CONFIG_DIR_ENV_VAR: &str = "GAMCFGDIR";

/// Internal layout of an environment folder.
pub const INTERNAL_DIR: &str = ".gam";
/// Cache folder inside the internal directory.
pub const CACHE_DIR: &str = "gamcache";
/// Download folder inside the internal directory.
pub const DRIVE_DIR: &str = "drive";

/// Credential files that must never be inherited from a template.
pub const CREDENTIAL_FILES: &[&str] = &["oauth2.txt", "oauth2service.json"];

/// Exact confirmation required before a record is removed from the registry.
pub const DELETE_CONFIRMATION: &str = "YES";

/// Prefix and extension of session transcripts.
pub const TRANSCRIPT_PREFIX: &str = "GAMLaunch";
/// Transcript file extension.
pub const TRANSCRIPT_EXTENSION: &str = "txt";

/// Subcommands of the external tool that can be typed without the leading tool name.
pub const TOOL_SUBCOMMANDS: &[&str] = &[
    "adminrole",
    "alert",
    "alias",
    "browser",
    "building",
    "chatevent",
    "chatmember",
    "chatmessage",
    "chatspace",
    "chromeapp",
    "chromeprofile",
    "chromeprofilecommand",
    "chromeschema",
    "cigroup",
    "cigroupmembers",
    "contact",
    "course",
    "courses",
    "cros",
    "crostelemetry",
    "currentprojectid",
    "customer",
    "datatransfer",
    "device",
    "deviceuser",
    "deviceuserstate",
    "domain",
    "domainalias",
    "domaincontact",
    "drivefileacl",
    "drivelabel",
    "group",
    "groupmembers",
    "inboundssoassignment",
    "inboundssocredential",
    "inboundssoprofile",
    "instance",
    "mobile",
    "org",
    "orgs",
    "peoplecontact",
    "peopleprofile",
    "policy",
    "printer",
    "resoldcustomer",
    "resoldsubscription",
    "resource",
    "resources",
    "schema",
    "shareddrive",
    "site",
    "siteacl",
    "user",
    "userinvitation",
    "users",
    "vaultexport",
    "vaulthold",
    "vaultmatter",
    "vaultquery",
    "verify",
];
