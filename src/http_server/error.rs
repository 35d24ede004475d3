//! Defines the custom `ApiError` type for the HTTP server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::executor::CommandError;

/// An error reported to HTTP callers in strict response mode.
#[derive(Debug)]
pub enum ApiError {
    /// The bound command failed or did not produce usable data.
    Command(CommandError),
}

impl From<CommandError> for ApiError {
    fn from(err: CommandError) -> Self {
        ApiError::Command(err)
    }
}

impl ApiError {
    /// The status code this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Command(err) => match err {
                CommandError::Launch { .. } | CommandError::Exit { .. } => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                CommandError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                CommandError::Diagnostics(_) => StatusCode::INTERNAL_SERVER_ERROR,
                CommandError::Malformed { .. } => StatusCode::BAD_GATEWAY,
                CommandError::Reported(_) => StatusCode::FAILED_DEPENDENCY,
                CommandError::Cancelled | CommandError::Preempted => StatusCode::CONFLICT,
            },
        }
    }
}

/// Implements the conversion from `ApiError` into an `axum` response.
///
/// Only used in strict mode; compat mode answers 200 with the fallback.
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = match &self {
            ApiError::Command(err) => json!({ "error": err.to_string(), "kind": err.kind() }),
        };

        (status, Json(body)).into_response()
    }
}
