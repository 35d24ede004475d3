use std::{path::PathBuf, time::Duration};

use serde::Deserialize;

use super::deserialize_duration_from_ms;

fn default_timeout() -> Duration {
    Duration::from_millis(10_000)
}

fn default_fail_on_stderr() -> bool {
    true
}

/// An external command bound to one gateway operation.
///
/// Everything the process receives comes from here; nothing derived from an
/// HTTP request is ever appended.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CommandConfig {
    /// Executable to launch, resolved through `PATH` when not absolute.
    pub program: String,

    /// Fixed arguments passed to the program.
    #[serde(default)]
    pub args: Vec<String>,

    /// Working directory for the process. Inherits the gateway's when unset.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// Time after which the process is killed and the call treated as failed.
    #[serde(
        rename = "timeout_ms",
        deserialize_with = "deserialize_duration_from_ms",
        default = "default_timeout"
    )]
    pub timeout: Duration,

    /// Whether any output on stderr counts as a failure.
    #[serde(default = "default_fail_on_stderr")]
    pub fail_on_stderr: bool,
}

impl CommandConfig {
    /// Creates a command with default timeout and stderr policy.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
            timeout: default_timeout(),
            fail_on_stderr: default_fail_on_stderr(),
        }
    }

    /// Overrides the execution timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Renders the command line for log output.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self::new(String::new(), Vec::new())
    }
}

/// The command bound to each gateway operation.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct CommandsConfig {
    /// Aggregate usage metrics.
    pub dashboard_status: CommandConfig,
    /// Tank level and weather sensor.
    pub sensor_data: CommandConfig,
    /// Begin spraying.
    pub system_on: CommandConfig,
    /// Stop spraying.
    pub system_off: CommandConfig,
    /// Halt immediately.
    pub emergency_stop: CommandConfig,
}

impl CommandsConfig {
    /// Iterates over `(operation name, command)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &CommandConfig)> {
        [
            ("dashboard_status", &self.dashboard_status),
            ("sensor_data", &self.sensor_data),
            ("system_on", &self.system_on),
            ("system_off", &self.system_off),
            ("emergency_stop", &self.emergency_stop),
        ]
        .into_iter()
    }
}
