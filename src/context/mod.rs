//! Application context and initialization logic.
//! This module handles loading configuration, validating the command
//! bindings, and wiring the process-backed device into the gateway. The
//! `AppContext` struct encapsulates these components for the server and the
//! probe command.

mod error;
mod metrics;

use std::sync::Arc;

pub use error::{AppContextError, InitializationError};
pub use metrics::{AppMetrics, ControlRecord, Metrics};

use crate::{
    config::AppConfig,
    devices::ProcessDevice,
    executor::{CommandExecutor, ProcessExecutor},
    gateway::Gateway,
};

/// The application context, holding configuration, the gateway and the
/// metrics it updates.
pub struct AppContext {
    /// Shared application configuration.
    pub config: Arc<AppConfig>,

    /// The gateway serving every operation.
    pub gateway: Arc<Gateway>,

    /// Metrics shared with the status endpoint.
    pub metrics: AppMetrics,
}

/// A builder for the `AppContext`, allowing configuration overrides.
pub struct AppContextBuilder {
    /// Optional configuration directory to load settings from.
    config_dir: Option<String>,

    /// Optional override for the listen address.
    listen_address_override: Option<String>,

    /// Executor used to run commands. Defaults to child processes.
    executor: Option<Arc<dyn CommandExecutor>>,
}

impl AppContextBuilder {
    /// Creates a new `AppContextBuilder` with an optional configuration
    /// directory.
    pub fn new(config_dir: Option<String>) -> Self {
        Self { config_dir, listen_address_override: None, executor: None }
    }

    /// Sets a listen address override.
    pub fn listen_address(mut self, address: String) -> Self {
        self.listen_address_override = Some(address);
        self
    }

    /// Uses `executor` instead of spawning child processes.
    pub fn executor(mut self, executor: Arc<dyn CommandExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Builds the `AppContext` from the configuration directory.
    pub fn build(self) -> Result<AppContext, AppContextError> {
        tracing::debug!("Loading application configuration...");
        let config = AppConfig::new(self.config_dir.as_deref())?;
        self.build_with_config(config)
    }

    /// Builds the `AppContext` from an already loaded configuration.
    pub fn build_with_config(self, mut config: AppConfig) -> Result<AppContext, AppContextError> {
        if let Some(address) = self.listen_address_override {
            tracing::info!(listen_address = %address, "Overriding listen address.");
            config.server.listen_address = address;
        }

        validate_commands(&config)?;
        for (operation, command) in config.commands.iter() {
            tracing::debug!(
                operation,
                command = %command.display(),
                timeout = ?command.timeout,
                "Command bound."
            );
        }

        if !config.server.static_dir.is_dir() {
            tracing::warn!(
                static_dir = %config.server.static_dir.display(),
                "Static directory not found; the dashboard will not be served."
            );
        }

        let executor = self.executor.unwrap_or_else(|| Arc::new(ProcessExecutor::new()));
        let device = Arc::new(ProcessDevice::new(config.commands.clone(), executor));
        let metrics = AppMetrics::default();
        let gateway = Arc::new(Gateway::new(
            device.clone(),
            device,
            config.server.max_concurrent_reads,
            metrics.clone(),
        ));
        tracing::info!(
            response_mode = ?config.server.response_mode,
            max_concurrent_reads = config.server.max_concurrent_reads,
            "Gateway initialized."
        );

        Ok(AppContext { config: Arc::new(config), gateway, metrics })
    }
}

/// Rejects command bindings that can never succeed.
fn validate_commands(config: &AppConfig) -> Result<(), InitializationError> {
    for (operation, command) in config.commands.iter() {
        if command.program.trim().is_empty() {
            return Err(InitializationError::MissingProgram(operation.to_string()));
        }
        if let Some(dir) = &command.working_dir {
            if !dir.is_dir() {
                return Err(InitializationError::MissingWorkingDir {
                    operation: operation.to_string(),
                    path: dir.display().to_string(),
                });
            }
        }
    }
    Ok(())
}
