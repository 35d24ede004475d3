//! The fallback policy shared by every endpoint.
//!
//! A capability call either yields real data or fails with a
//! [`CommandError`]. The [`Gateway`] turns every failure into an
//! [`Outcome::Fallback`] carrying the operation's canned payload, logs the
//! cause, and never lets one endpoint's failure affect another.

mod control_gate;
pub mod fallback;

use std::sync::Arc;

use chrono::Utc;
pub use control_gate::ControlGate;
use tokio::sync::Semaphore;

use crate::{
    context::{AppMetrics, ControlRecord},
    devices::{SprayControl, Telemetry},
    executor::CommandError,
    models::{ControlAck, ControlOperation, DashboardStatus, SensorData},
};

/// The result of a gateway operation.
#[derive(Debug)]
pub enum Outcome<T> {
    /// Data produced by the external command.
    Live(T),
    /// The fallback payload, and why it was needed.
    Fallback {
        /// The canned payload.
        value: T,
        /// What went wrong with the command.
        cause: CommandError,
    },
}

impl<T> Outcome<T> {
    /// The payload, wherever it came from.
    pub fn value(&self) -> &T {
        match self {
            Outcome::Live(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    /// Consumes the outcome, returning the payload.
    pub fn into_value(self) -> T {
        match self {
            Outcome::Live(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    /// Whether the payload is a fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback { .. })
    }

    /// The failure behind a fallback.
    pub fn cause(&self) -> Option<&CommandError> {
        match self {
            Outcome::Live(_) => None,
            Outcome::Fallback { cause, .. } => Some(cause),
        }
    }
}

/// Binds each operation to its capability and fallback.
pub struct Gateway {
    telemetry: Arc<dyn Telemetry>,
    control: Arc<dyn SprayControl>,
    gate: ControlGate,
    reads: Semaphore,
    metrics: AppMetrics,
}

impl Gateway {
    /// Creates a gateway. At most `max_concurrent_reads` read commands run at
    /// once (a value of zero is treated as one).
    pub fn new(
        telemetry: Arc<dyn Telemetry>,
        control: Arc<dyn SprayControl>,
        max_concurrent_reads: usize,
        metrics: AppMetrics,
    ) -> Self {
        Self {
            telemetry,
            control,
            gate: ControlGate::new(),
            reads: Semaphore::new(max_concurrent_reads.max(1)),
            metrics,
        }
    }

    /// Aggregate usage metrics, or randomized placeholders.
    pub async fn dashboard_status(&self) -> Outcome<DashboardStatus> {
        let result = {
            // The semaphore is never closed, so acquiring cannot fail.
            let _permit = self.reads.acquire().await;
            self.telemetry.dashboard_status().await
        };
        self.settle("dashboard_status", result, fallback::dashboard_status).await
    }

    /// Tank and weather readings, or fixed placeholders.
    pub async fn sensor_data(&self) -> Outcome<SensorData> {
        let result = {
            let _permit = self.reads.acquire().await;
            self.telemetry.sensor_data().await
        };
        self.settle("sensor_data", result, fallback::sensor_data).await
    }

    /// Runs a control command through the control gate.
    pub async fn control(&self, operation: ControlOperation) -> Outcome<ControlAck> {
        let control = &self.control;
        let result = match operation {
            ControlOperation::SystemOn => {
                self.gate.run_routine(|token| async move { control.start(&token).await }).await
            }
            ControlOperation::SystemOff => {
                self.gate.run_routine(|token| async move { control.stop(&token).await }).await
            }
            ControlOperation::EmergencyStop => {
                self.gate.run_emergency(|| control.emergency_stop()).await
            }
        };

        let outcome =
            self.settle(operation.name(), result, || fallback::control_ack(operation)).await;

        let record = ControlRecord {
            operation,
            fallback: outcome.is_fallback(),
            success: outcome.value().success(),
            finished_at: Utc::now(),
        };
        tracing::info!(
            operation = %operation,
            fallback = record.fallback,
            success = ?record.success,
            "Control command finished."
        );
        self.metrics.metrics.write().await.last_control = Some(record);

        outcome
    }

    /// Whether a control command is running right now.
    pub fn control_in_flight(&self) -> bool {
        self.gate.is_busy()
    }

    /// Shared metrics this gateway updates.
    pub fn metrics(&self) -> &AppMetrics {
        &self.metrics
    }

    async fn settle<T>(
        &self,
        operation: &str,
        result: Result<T, CommandError>,
        fallback: impl FnOnce() -> T,
    ) -> Outcome<T> {
        match result {
            Ok(value) => Outcome::Live(value),
            Err(cause) => {
                log_failure(operation, &cause);
                self.metrics.metrics.write().await.fallbacks_served += 1;
                Outcome::Fallback { value: fallback(), cause }
            }
        }
    }
}

fn log_failure(operation: &str, cause: &CommandError) {
    match cause {
        CommandError::Malformed { reason, raw } => tracing::warn!(
            operation,
            reason = %reason,
            raw_output = %raw,
            "Command output is not a usable JSON object, serving fallback."
        ),
        CommandError::Reported(error) => tracing::warn!(
            operation,
            error = %error,
            "Command reported an error, serving fallback."
        ),
        CommandError::Exit { code, stderr } => tracing::warn!(
            operation,
            code = ?code,
            stderr = %stderr,
            "Command exited unsuccessfully, serving fallback."
        ),
        other => tracing::warn!(operation, error = %other, "Command failed, serving fallback."),
    }
}
