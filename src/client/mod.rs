//! Client for the gateway's HTTP API.
//!
//! Mirrors what the browser dashboard does: refresh fetches metrics and
//! sensor readings concurrently, and each control action ends in a single
//! [`Notice`] for the operator. A request that never got an answer is told
//! apart from one where the robot answered with `success: false`.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::models::{ControlOperation, DashboardStatus, SensorData};

const REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Errors that can occur when talking to the gateway.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL could not be parsed.
    #[error("Invalid gateway URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL as given.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The request failed or the response could not be read.
    #[error("Failed to communicate with gateway: {0}")]
    Http(#[from] reqwest::Error),
}

/// What the operator is told after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The robot accepted the command.
    Success(String),
    /// The gateway answered, but the command did not go through.
    Failure(String),
    /// The gateway could not be reached or its answer could not be read.
    Transport(String),
    /// The operator declined the confirmation; nothing was sent.
    Cancelled,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(message) => write!(f, "{message}"),
            Notice::Failure(message) => write!(f, "Command failed: {message}"),
            Notice::Transport(reason) => {
                write!(f, "Could not reach the spraying robot. Check the connection. ({reason})")
            }
            Notice::Cancelled => write!(f, "Emergency stop cancelled."),
        }
    }
}

/// Everything a dashboard refresh shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Summary figures.
    pub dashboard: DashboardStatus,
    /// Tank and weather readings.
    pub sensors: SensorData,
}

impl Snapshot {
    /// Width of the tank progress bar in percent.
    pub fn tank_bar_width(&self) -> u8 {
        self.sensors.tank_percent().unwrap_or(0)
    }
}

/// HTTP client for the gateway.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    base_url: Url,
    http: reqwest::Client,
}

impl DashboardClient {
    /// Creates a client for the gateway at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl { url: base_url.into(), reason: e.to_string() })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                url: base_url.to_string(),
                reason: "not a base URL".into(),
            });
        }
        // Endpoints are joined relative to the base, which needs a trailing slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()?;
        Ok(Self { base_url, http })
    }

    /// The gateway this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches dashboard metrics and sensor readings concurrently.
    pub async fn refresh(&self) -> Result<Snapshot, ClientError> {
        let (dashboard, sensors) = tokio::try_join!(
            self.get_json::<DashboardStatus>("dashboard-status"),
            self.get_json::<SensorData>("sensor-data")
        )?;
        Ok(Snapshot { dashboard, sensors })
    }

    /// Asks the robot to begin spraying.
    pub async fn start(&self) -> Notice {
        self.control(ControlOperation::SystemOn).await
    }

    /// Asks the robot to stop spraying.
    pub async fn stop(&self) -> Notice {
        self.control(ControlOperation::SystemOff).await
    }

    /// Halts the robot once `confirm` agrees. Nothing is sent if it declines.
    pub async fn emergency_stop(&self, confirm: impl FnOnce() -> bool) -> Notice {
        if !confirm() {
            return Notice::Cancelled;
        }
        self.control(ControlOperation::EmergencyStop).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    async fn control(&self, operation: ControlOperation) -> Notice {
        let path = match operation {
            ControlOperation::SystemOn => "system-on",
            ControlOperation::SystemOff => "system-off",
            ControlOperation::EmergencyStop => "emergency-stop",
        };
        let url = match self.endpoint(path) {
            Ok(url) => url,
            Err(e) => return Notice::Transport(e.to_string()),
        };

        let response = match self.http.post(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(operation = %operation, error = %e, "Control request failed.");
                return Notice::Transport(e.to_string());
            }
        };
        let status = response.status();
        let body = match response.json::<Value>().await {
            Ok(body) => body,
            Err(e) => return Notice::Transport(e.to_string()),
        };

        classify(operation, status.is_success(), &body)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl { url: path.into(), reason: e.to_string() })
    }
}

/// Decides what the operator sees for a control response.
fn classify(operation: ControlOperation, status_ok: bool, body: &Value) -> Notice {
    let message = body.get("message").and_then(Value::as_str);
    let success = body.get("success").and_then(Value::as_bool);

    if status_ok && success != Some(false) {
        let default = match operation {
            ControlOperation::SystemOn => "System started.",
            ControlOperation::SystemOff => "System stopped.",
            ControlOperation::EmergencyStop => "Emergency stop executed.",
        };
        return Notice::Success(message.unwrap_or(default).to_string());
    }

    let reason = message
        .or_else(|| body.get("error").and_then(Value::as_str))
        .unwrap_or("the robot did not accept the command");
    Notice::Failure(reason.to_string())
}
