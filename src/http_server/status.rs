//! Represents the `/status` endpoint handler and response structure.
//! Reports gateway uptime and the last control command.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;

use super::ApiState;
use crate::context::ControlRecord;

/// Represents the response from the `/status` endpoint.
#[derive(Debug, Serialize, Clone)]
pub struct StatusResponse {
    /// The version of the gateway.
    pub version: String,
    /// The uptime of the gateway in seconds.
    pub uptime_secs: u64,
    /// Whether a control command is running right now.
    pub control_in_flight: bool,
    /// Number of responses that carried a fallback payload.
    pub fallbacks_served: u64,
    /// The last control command handled, if any.
    pub last_control: Option<ControlRecord>,
}

/// Retrieves gateway status.
pub async fn status(State(state): State<ApiState>) -> impl IntoResponse {
    let metrics = state.metrics.metrics.read().await;
    let response = StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: metrics.start_time.elapsed().as_secs(),
        control_in_flight: state.gateway.control_in_flight(),
        fallbacks_served: metrics.fallbacks_served,
        last_control: metrics.last_control.clone(),
    };
    (StatusCode::OK, Json(response))
}
