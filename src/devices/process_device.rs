use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use super::{SprayControl, Telemetry};
use crate::{
    config::{CommandConfig, CommandsConfig},
    executor::{CommandError, CommandExecutor},
    models::{ControlAck, DashboardStatus, SensorData},
};

/// Robot capabilities backed by external scripts.
pub struct ProcessDevice {
    commands: CommandsConfig,
    executor: Arc<dyn CommandExecutor>,
}

impl ProcessDevice {
    /// Creates a device that runs `commands` through `executor`.
    pub fn new(commands: CommandsConfig, executor: Arc<dyn CommandExecutor>) -> Self {
        Self { commands, executor }
    }

    async fn read<T: DeserializeOwned>(&self, command: &CommandConfig) -> Result<T, CommandError> {
        // Reads are never preempted, so they get a token nobody holds.
        let map = self.executor.execute(command, &CancellationToken::new()).await?;
        decode(map)
    }
}

fn decode<T: DeserializeOwned>(map: Map<String, Value>) -> Result<T, CommandError> {
    let value = Value::Object(map);
    serde_json::from_value(value.clone())
        .map_err(|e| CommandError::Malformed { reason: e.to_string(), raw: value.to_string() })
}

#[async_trait]
impl Telemetry for ProcessDevice {
    async fn dashboard_status(&self) -> Result<DashboardStatus, CommandError> {
        self.read(&self.commands.dashboard_status).await
    }

    async fn sensor_data(&self) -> Result<SensorData, CommandError> {
        self.read(&self.commands.sensor_data).await
    }
}

#[async_trait]
impl SprayControl for ProcessDevice {
    async fn start(&self, cancel: &CancellationToken) -> Result<ControlAck, CommandError> {
        self.executor.execute(&self.commands.system_on, cancel).await.map(ControlAck::from)
    }

    async fn stop(&self, cancel: &CancellationToken) -> Result<ControlAck, CommandError> {
        self.executor.execute(&self.commands.system_off, cancel).await.map(ControlAck::from)
    }

    async fn emergency_stop(&self) -> Result<ControlAck, CommandError> {
        self.executor
            .execute(&self.commands.emergency_stop, &CancellationToken::new())
            .await
            .map(ControlAck::from)
    }
}
