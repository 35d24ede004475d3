//! HTTP server module

mod control;
mod error;
mod status;
mod telemetry;

use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
pub use error::ApiError;
use serde::Serialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    config::{AppConfig, ResponseMode},
    context::AppMetrics,
    gateway::{Gateway, Outcome},
};

/// Shared state for the HTTP server handlers.
#[derive(Clone)]
pub struct ApiState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The gateway serving every operation.
    pub gateway: Arc<Gateway>,
    /// Metrics reported by `/status`.
    pub metrics: AppMetrics,
}

impl ApiState {
    /// Turns a gateway outcome into a response according to the configured
    /// response mode.
    fn respond<T: Serialize>(&self, outcome: Outcome<T>) -> Response {
        match (outcome, self.config.server.response_mode) {
            (Outcome::Live(value), _) | (Outcome::Fallback { value, .. }, ResponseMode::Compat) => {
                (StatusCode::OK, Json(value)).into_response()
            }
            (Outcome::Fallback { cause, .. }, ResponseMode::Strict) => {
                ApiError::from(cause).into_response()
            }
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Builds the router: JSON endpoints plus the dashboard's static assets.
pub fn router(state: ApiState) -> Router {
    let assets = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        .route("/health", get(health))
        .route("/status", get(status::status))
        .route("/dashboard-status", get(telemetry::dashboard_status))
        .route("/sensor-data", get(telemetry::sensor_data))
        .route("/system-on", post(control::system_on))
        .route("/system-off", post(control::system_off))
        .route("/emergency-stop", post(control::emergency_stop))
        // Endpoints of the older robot server, bound to the same commands.
        .route("/start", post(control::system_on))
        .route("/stop", post(control::system_off))
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the HTTP server until `shutdown` fires, then drains in-flight
/// requests.
pub async fn run_server_from_config(
    config: Arc<AppConfig>,
    gateway: Arc<Gateway>,
    metrics: AppMetrics,
    shutdown: CancellationToken,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(&config.server.listen_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        static_dir = %config.server.static_dir.display(),
        "HTTP server listening."
    );

    let app = router(ApiState { config, gateway, metrics });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            tracing::info!("HTTP server received shutdown signal.");
        })
        .await
}
