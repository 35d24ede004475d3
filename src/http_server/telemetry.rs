//! Handlers for the read endpoints.

use axum::{extract::State, response::Response};

use super::ApiState;

/// Aggregate usage metrics for the dashboard summary.
pub async fn dashboard_status(State(state): State<ApiState>) -> Response {
    let outcome = state.gateway.dashboard_status().await;
    state.respond(outcome)
}

/// Tank level and weather readings.
pub async fn sensor_data(State(state): State<ApiState>) -> Response {
    let outcome = state.gateway.sensor_data().await;
    state.respond(outcome)
}
