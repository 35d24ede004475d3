use std::{path::PathBuf, time::Duration};

use serde::Deserialize;

use super::deserialize_duration_from_seconds;

/// How command failures are reported to HTTP callers.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Always answer 200 and substitute the fallback payload. This is what the
    /// bundled dashboard expects.
    #[default]
    Compat,
    /// Answer with a non-2xx status and an `{error, kind}` body.
    Strict,
}

/// Configuration for the HTTP server.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address and port for the HTTP server to listen on.
    #[serde(default = "default_listen_address")]
    pub listen_address: String,

    /// Directory holding the dashboard markup, stylesheet and script.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Failure reporting mode.
    #[serde(default)]
    pub response_mode: ResponseMode,

    /// Upper bound on read commands running at the same time.
    #[serde(default = "default_max_concurrent_reads")]
    pub max_concurrent_reads: usize,

    /// The maximum time in seconds to wait for in-flight requests on shutdown.
    #[serde(
        rename = "shutdown_timeout_secs",
        deserialize_with = "deserialize_duration_from_seconds",
        default = "default_shutdown_timeout"
    )]
    pub shutdown_timeout: Duration,
}

fn default_listen_address() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_max_concurrent_reads() -> usize {
    4
}

fn default_shutdown_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            static_dir: default_static_dir(),
            response_mode: ResponseMode::default(),
            max_concurrent_reads: default_max_concurrent_reads(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}
