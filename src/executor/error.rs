use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Why an external command did not produce usable data.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process could not be started.
    #[error("Failed to launch '{program}': {source}")]
    Launch {
        /// The program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The process exited unsuccessfully or was killed by a signal.
    #[error("Command exited with status {}", exit_label(.code))]
    Exit {
        /// Exit code, absent when terminated by a signal.
        code: Option<i32>,
        /// Whatever the process wrote to stderr.
        stderr: String,
    },

    /// The process ran longer than its configured timeout and was killed.
    #[error("Command timed out after {0:?}")]
    Timeout(Duration),

    /// The process was killed to make way for an emergency stop.
    #[error("Command was cancelled by an emergency stop")]
    Cancelled,

    /// The command was not started because an emergency stop is pending.
    #[error("Command was preempted by a pending emergency stop")]
    Preempted,

    /// The process exited successfully but wrote to stderr.
    #[error("Command wrote diagnostics to stderr: {0}")]
    Diagnostics(String),

    /// Standard output was not a JSON object of the expected shape.
    #[error("Command output is not a valid JSON object: {reason}")]
    Malformed {
        /// Parser or decoder message.
        reason: String,
        /// The raw standard output.
        raw: String,
    },

    /// The command printed an object carrying an `error` field.
    #[error("Command reported an error: {0}")]
    Reported(Value),
}

fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

impl CommandError {
    /// Machine-readable tag for this failure.
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::Launch { .. } => "launch_failed",
            CommandError::Exit { .. } => "exit_failure",
            CommandError::Timeout(_) => "timeout",
            CommandError::Cancelled => "cancelled",
            CommandError::Preempted => "preempted",
            CommandError::Diagnostics(_) => "diagnostics",
            CommandError::Malformed { .. } => "malformed_output",
            CommandError::Reported(_) => "reported_error",
        }
    }
}
