use std::process::{Output, Stdio};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::{Map, Value};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use super::CommandError;
use crate::config::CommandConfig;

/// Runs one configured command and yields the JSON object it printed.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Executes `command`, giving up when `cancel` fires.
    async fn execute(
        &self,
        command: &CommandConfig,
        cancel: &CancellationToken,
    ) -> Result<Map<String, Value>, CommandError>;
}

/// What a finished process left behind.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Exit code, absent when terminated by a signal.
    pub code: Option<i32>,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Decides whether a finished process produced usable data.
///
/// Checks run in order: exit status, stderr diagnostics, JSON object parse,
/// then the `error` field.
pub fn interpret_output(
    output: CommandOutput,
    fail_on_stderr: bool,
) -> Result<Map<String, Value>, CommandError> {
    if !output.success {
        return Err(CommandError::Exit { code: output.code, stderr: output.stderr.trim().into() });
    }

    let stderr = output.stderr.trim();
    if fail_on_stderr && !stderr.is_empty() {
        return Err(CommandError::Diagnostics(stderr.to_string()));
    }

    let value: Value = match serde_json::from_str(output.stdout.trim()) {
        Ok(value) => value,
        Err(e) => return Err(CommandError::Malformed { reason: e.to_string(), raw: output.stdout }),
    };

    let mut map = match value {
        Value::Object(map) => map,
        other => {
            return Err(CommandError::Malformed {
                reason: format!("expected a JSON object, found {}", json_type(&other)),
                raw: output.stdout,
            });
        }
    };

    if let Some(error) = map.remove("error") {
        return Err(CommandError::Reported(error));
    }

    Ok(map)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Launches commands as child processes.
///
/// Stdin is closed, stdout and stderr are captured, and the child is killed
/// if it outlives its timeout or the caller's cancellation token.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    /// Creates a new `ProcessExecutor`.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    async fn execute(
        &self,
        command: &CommandConfig,
        cancel: &CancellationToken,
    ) -> Result<Map<String, Value>, CommandError> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &command.working_dir {
            cmd.current_dir(dir);
        }

        tracing::debug!(
            command = %command.display(),
            timeout = ?command.timeout,
            "Launching command."
        );
        let launch_error =
            |source| CommandError::Launch { program: command.program.clone(), source };
        let child = cmd.spawn().map_err(launch_error)?;

        // Dropping `wait_with_output` drops the child, which kills it.
        let output = tokio::select! {
            output = child.wait_with_output() => output.map_err(launch_error)?,
            _ = tokio::time::sleep(command.timeout) => {
                return Err(CommandError::Timeout(command.timeout));
            }
            _ = cancel.cancelled() => return Err(CommandError::Cancelled),
        };

        interpret_output(output.into(), command.fail_on_stderr)
    }
}
