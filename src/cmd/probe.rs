//! Runs the read commands once and prints what the gateway would serve.
//!
//! Control commands are never run here: probing must not move the robot.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::{
    context::{AppContextBuilder, AppContextError},
    gateway::Outcome,
    models::{DashboardStatus, SensorData},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Initialization error: {0}")]
    Context(#[from] AppContextError),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// How one operation fared.
#[derive(Debug, Serialize)]
pub struct ProbeReport<T> {
    /// `live` or `fallback`.
    pub source: &'static str,
    /// The payload a client would receive.
    pub data: T,
    /// The failure behind a fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable failure tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

impl<T> From<Outcome<T>> for ProbeReport<T> {
    fn from(outcome: Outcome<T>) -> Self {
        match outcome {
            Outcome::Live(data) => Self { source: "live", data, error: None, kind: None },
            Outcome::Fallback { value, cause } => Self {
                source: "fallback",
                data: value,
                error: Some(cause.to_string()),
                kind: Some(cause.kind()),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ProbeSummary {
    commands: BTreeMap<&'static str, String>,
    dashboard_status: ProbeReport<DashboardStatus>,
    sensor_data: ProbeReport<SensorData>,
}

pub async fn execute(config_dir: Option<String>) -> Result<(), Error> {
    let context = AppContextBuilder::new(config_dir).build()?;

    let (dashboard, sensors) =
        tokio::join!(context.gateway.dashboard_status(), context.gateway.sensor_data());
    let summary = ProbeSummary {
        commands: context.config.commands.iter().map(|(op, cmd)| (op, cmd.display())).collect(),
        dashboard_status: dashboard.into(),
        sensor_data: sensors.into(),
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
