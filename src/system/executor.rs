// src/system/executor.rs

use crate::system::interrupt;
use std::collections::HashMap;
use std::path::Path;
use std::process::{Command as StdCommand, ExitStatus, Stdio};
use thiserror::Error;

/// Failures to start a child process.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The line was blank.
    #[error("No command specified to run.")]
    EmptyCommand,
    /// The process could not be spawned or waited on.
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
}

/// How a child process ended.
#[derive(Debug, Clone, Copy)]
pub struct Completion {
    /// Exit status as reported by the OS.
    pub status: ExitStatus,
    /// Ctrl-C was pressed while the child was running.
    pub interrupted: bool,
}

/// Waits for `command` with the launcher shielded from Ctrl-C.
fn run_to_completion(command: &mut StdCommand, label: &str) -> Result<Completion, ExecutionError> {
    let (status, interrupted) = interrupt::shielded(|| command.status());
    let status = status.map_err(|e| ExecutionError::CommandFailed(label.to_string(), e))?;
    if interrupted {
        log::debug!("'{}' was interrupted ({})", label, status);
    }
    Ok(Completion {
        status,
        interrupted,
    })
}

/// Runs `executable` with `args`, inheriting the terminal, and waits for it.
///
/// The exit status is returned as-is. A non-zero code is the tool's own answer
/// and is not turned into an error here.
pub fn forward(
    executable: &Path,
    args: &[String],
    cwd: &Path,
    env_vars: &HashMap<String, String>,
) -> Result<Completion, ExecutionError> {
    log::debug!("Forwarding to '{}' with {:?}", executable.display(), args);
    let mut command = StdCommand::new(executable);
    command
        .args(args)
        .current_dir(dunce::simplified(cwd))
        .envs(env_vars)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    run_to_completion(&mut command, &executable.display().to_string())
}

/// Runs a free-form line through the host shell (`cmd /C` on Windows, `sh -c` elsewhere).
pub fn run_host_command(
    command_line: &str,
    cwd: &Path,
    env_vars: &HashMap<String, String>,
) -> Result<Completion, ExecutionError> {
    let trimmed_command = command_line.trim();
    if trimmed_command.is_empty() {
        return Err(ExecutionError::EmptyCommand);
    }

    let (shell, flag) = if cfg!(target_os = "windows") {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    };
    log::debug!("Running host command via {}: {}", shell, trimmed_command);

    let mut command = StdCommand::new(shell);
    command
        .arg(flag)
        .arg(trimmed_command)
        .current_dir(dunce::simplified(cwd))
        .envs(env_vars)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    run_to_completion(&mut command, trimmed_command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_host_command_is_rejected() {
        let dir = TempDir::new().unwrap();
        let result = run_host_command("   ", dir.path(), &HashMap::new());
        assert!(matches!(result, Err(ExecutionError::EmptyCommand)));
    }

    #[test]
    fn test_missing_executable_is_reported() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no-such-tool");
        let result = forward(&missing, &[], dir.path(), &HashMap::new());
        assert!(matches!(result, Err(ExecutionError::CommandFailed(_, _))));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_and_environment_pass_through() {
        let dir = TempDir::new().unwrap();
        let mut env_vars = HashMap::new();
        env_vars.insert("GAMCFGDIR".to_string(), "/cfg/acme".to_string());

        let completion = run_host_command(
            r#"test "$GAMCFGDIR" = /cfg/acme && exit 3"#,
            dir.path(),
            &env_vars,
        )
        .unwrap();
        assert_eq!(completion.status.code(), Some(3));
        assert!(!completion.interrupted);

        let args = vec!["-c".to_string(), "exit 0".to_string()];
        let completion = forward(Path::new("sh"), &args, dir.path(), &env_vars).unwrap();
        assert!(completion.status.success());
    }
}
