use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio_util::sync::CancellationToken;

use crate::{
    executor::CommandError,
    models::{ControlAck, DashboardStatus, SensorData},
};

/// Read-only sensor and usage data.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Telemetry: Send + Sync {
    /// Reads aggregate usage metrics.
    async fn dashboard_status(&self) -> Result<DashboardStatus, CommandError>;

    /// Reads the tank level and weather sensor.
    async fn sensor_data(&self) -> Result<SensorData, CommandError>;
}

/// Commands that change what the robot is doing.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SprayControl: Send + Sync {
    /// Begins spraying. Aborts when `cancel` fires.
    async fn start(&self, cancel: &CancellationToken) -> Result<ControlAck, CommandError>;

    /// Stops spraying. Aborts when `cancel` fires.
    async fn stop(&self, cancel: &CancellationToken) -> Result<ControlAck, CommandError>;

    /// Halts the robot immediately. Cannot be cancelled.
    async fn emergency_stop(&self) -> Result<ControlAck, CommandError>;
}
