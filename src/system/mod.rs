//! # System Interaction Layer
//!
//! Everything that touches the world outside the registry: the console, child
//! processes, transcripts and the launcher's own settings file.
//!
//! ## Modules
//!
//! - **`executor`**: Spawns the forwarded tool and host-shell commands with the active
//!   environment's variables and working directory, returning their exit status.
//! - **`interrupt`**: Keeps Ctrl-C from ending the launcher while a child is running.
//! - **`launcher_config`**: Loads `launcher.toml` from the config root, writing the
//!   defaults on first run, and resolves every configured location to a path.
//! - **`terminal`**: The line-oriented prompt/print seam the session loop talks to.
//! - **`transcript`**: Plain-text copies of each session under the log directory.

pub mod executor;
pub mod interrupt;
pub mod launcher_config;
pub mod terminal;
pub mod transcript;
