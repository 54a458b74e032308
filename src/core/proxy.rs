// src/core/proxy.rs

//! The command table installed when an environment is activated.
//!
//! The table maps the first word of a line typed in an active session to a binding:
//! the tool's own name (and `run`) forward everything to the executable, each known
//! subcommand forwards with itself prepended, and `switch`/`exit` leave the session.
//! Nothing here interprets the tool's arguments beyond dropping a redundant leading
//! tool name.

use crate::constants::TOOL_SUBCOMMANDS;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Generic alias that forwards to the executable under any tool name.
pub const RUN_ALIAS: &str = "run";
/// Leaves the active environment, optionally naming the next one.
pub const SWITCH_ALIAS: &str = "switch";
/// Ends the session from inside an environment.
pub const EXIT_ALIAS: &str = "exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    Forward,
    Subcommand(&'static str),
    Switch,
    Exit,
}

/// What the session should do with one typed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyAction {
    /// Run the executable with exactly these arguments.
    Forward {
        executable: PathBuf,
        args: Vec<String>,
    },
    /// A forwarding alias was typed without any arguments.
    NothingToForward,
    /// A forwarding alias was typed but this environment has no executable.
    Unavailable,
    /// Leave the active session, optionally jumping straight to another environment.
    Switch(Option<String>),
    /// End the launcher.
    Exit,
    /// Not a bound name; the line belongs to the host shell.
    Unbound,
}

/// Name → binding lookup built once per activation.
#[derive(Debug, Clone)]
pub struct ProxyTable {
    tool_name: String,
    executable: Option<PathBuf>,
    bindings: HashMap<String, Binding>,
}

impl ProxyTable {
    /// Builds the table for an environment. `executable` is `None` when the
    /// environment folder has no executable yet; switching still works.
    pub fn bind(tool_name: &str, executable: Option<PathBuf>) -> Self {
        let mut bindings = HashMap::new();
        bindings.insert(tool_name.to_lowercase(), Binding::Forward);
        bindings.insert(RUN_ALIAS.to_string(), Binding::Forward);
        for sub in TOOL_SUBCOMMANDS {
            bindings.insert((*sub).to_string(), Binding::Subcommand(sub));
        }
        bindings.insert(SWITCH_ALIAS.to_string(), Binding::Switch);
        bindings.insert(EXIT_ALIAS.to_string(), Binding::Exit);

        log::debug!(
            "Bound {} command aliases (executable: {:?})",
            bindings.len(),
            executable
        );
        Self {
            tool_name: tool_name.to_string(),
            executable,
            bindings,
        }
    }

    /// The executable bound by this table, if it exists.
    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    /// Decides what a tokenized line means.
    pub fn resolve(&self, tokens: &[String]) -> ProxyAction {
        let Some((head, rest)) = tokens.split_first() else {
            return ProxyAction::Unbound;
        };
        let Some(binding) = self.bindings.get(&head.to_lowercase()) else {
            return ProxyAction::Unbound;
        };

        match *binding {
            Binding::Switch => {
                let target = rest.join(" ");
                let target = target.trim();
                ProxyAction::Switch((!target.is_empty()).then(|| target.to_string()))
            }
            Binding::Exit => ProxyAction::Exit,
            Binding::Forward => {
                let args = strip_tool_name(rest, &self.tool_name);
                if args.is_empty() {
                    return ProxyAction::NothingToForward;
                }
                self.forward(args.to_vec())
            }
            Binding::Subcommand(sub) => {
                let mut args = vec![sub.to_string()];
                args.extend_from_slice(strip_tool_name(rest, &self.tool_name));
                self.forward(args)
            }
        }
    }

    fn forward(&self, args: Vec<String>) -> ProxyAction {
        match &self.executable {
            Some(executable) => ProxyAction::Forward {
                executable: executable.clone(),
                args,
            },
            None => ProxyAction::Unavailable,
        }
    }
}

/// Drops a leading argument equal to the tool's name, ignoring case.
pub fn strip_tool_name<'a>(args: &'a [String], tool_name: &str) -> &'a [String] {
    match args.split_first() {
        Some((first, rest)) if first.eq_ignore_ascii_case(tool_name) => rest,
        _ => args,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    fn table() -> ProxyTable {
        ProxyTable::bind("gam", Some(PathBuf::from("/env/gam")))
    }

    fn forwarded(action: ProxyAction) -> Vec<String> {
        match action {
            ProxyAction::Forward { args, .. } => args,
            other => panic!("expected a forward, got {:?}", other),
        }
    }

    #[test]
    fn test_generic_alias_forwards_verbatim() {
        assert_eq!(
            forwarded(table().resolve(&words("gam info user a@b.org"))),
            words("info user a@b.org")
        );
        assert_eq!(
            forwarded(table().resolve(&words("run print users"))),
            words("print users")
        );
    }

    #[test]
    fn test_redundant_tool_name_is_stripped_once() {
        assert_eq!(
            forwarded(table().resolve(&words("gam GAM version"))),
            words("version")
        );
        assert_eq!(
            forwarded(table().resolve(&words("run gam gam version"))),
            words("gam version")
        );
    }

    #[test]
    fn test_subcommand_alias_prepends_itself() {
        assert_eq!(
            forwarded(table().resolve(&words("user a@b.org show"))),
            words("user a@b.org show")
        );
        assert_eq!(
            forwarded(table().resolve(&words("Users gam print"))),
            words("users print")
        );
        assert_eq!(forwarded(table().resolve(&words("orgs"))), words("orgs"));
    }

    #[test]
    fn test_bare_generic_alias_forwards_nothing() {
        assert_eq!(table().resolve(&words("gam")), ProxyAction::NothingToForward);
        assert_eq!(table().resolve(&words("gam gam")), ProxyAction::NothingToForward);
    }

    #[test]
    fn test_missing_executable_degrades_forwarding_only() {
        let table = ProxyTable::bind("gam", None);
        assert_eq!(table.resolve(&words("gam info domain")), ProxyAction::Unavailable);
        assert_eq!(table.resolve(&words("user x")), ProxyAction::Unavailable);
        assert_eq!(table.resolve(&words("switch")), ProxyAction::Switch(None));
        assert_eq!(table.resolve(&words("exit")), ProxyAction::Exit);
    }

    #[test]
    fn test_switch_target_keeps_spaces() {
        assert_eq!(
            table().resolve(&words("SWITCH WMAT-ROD - Rodborough School")),
            ProxyAction::Switch(Some("WMAT-ROD - Rodborough School".to_string()))
        );
        assert_eq!(table().resolve(&words("switch")), ProxyAction::Switch(None));
    }

    #[test]
    fn test_unbound_words_belong_to_the_host() {
        assert_eq!(table().resolve(&words("dir /b")), ProxyAction::Unbound);
        assert_eq!(table().resolve(&[]), ProxyAction::Unbound);
        assert_eq!(table().resolve(&words("ls -la")), ProxyAction::Unbound);
        assert_ne!(table().resolve(&words("ChromeProfile")), ProxyAction::Unbound);
    }
}
