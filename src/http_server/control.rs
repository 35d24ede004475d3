//! Handlers for the control endpoints.
//!
//! Request bodies are ignored: nothing a caller sends reaches the command.

use axum::{extract::State, response::Response};

use super::ApiState;
use crate::models::ControlOperation;

/// Begins spraying.
pub async fn system_on(State(state): State<ApiState>) -> Response {
    let outcome = state.gateway.control(ControlOperation::SystemOn).await;
    state.respond(outcome)
}

/// Stops spraying.
pub async fn system_off(State(state): State<ApiState>) -> Response {
    let outcome = state.gateway.control(ControlOperation::SystemOff).await;
    state.respond(outcome)
}

/// Halts the robot, cancelling any start/stop in progress.
pub async fn emergency_stop(State(state): State<ApiState>) -> Response {
    let outcome = state.gateway.control(ControlOperation::EmergencyStop).await;
    state.respond(outcome)
}
