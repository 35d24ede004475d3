use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::models::ControlOperation;

/// The most recent control command and how it ended.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ControlRecord {
    /// Which command ran.
    pub operation: ControlOperation,
    /// Whether the fallback was served instead of the command's output.
    pub fallback: bool,
    /// The `success` flag of the payload returned to the caller.
    pub success: Option<bool>,
    /// When the command finished.
    pub finished_at: DateTime<Utc>,
}

/// A struct to hold gateway metrics.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// The time the gateway started.
    pub start_time: tokio::time::Instant,
    /// Number of responses that carried a fallback payload.
    pub fallbacks_served: u64,
    /// The last control command handled.
    pub last_control: Option<ControlRecord>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self { start_time: tokio::time::Instant::now(), fallbacks_served: 0, last_control: None }
    }
}

/// Shared gateway metrics for the HTTP server.
#[derive(Clone, Default)]
pub struct AppMetrics {
    /// Shared metrics.
    pub metrics: Arc<RwLock<Metrics>>,
}
