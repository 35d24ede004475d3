use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use super::{CommandsConfig, ServerConfig};

/// Application configuration for the gateway.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// External command bound to each operation.
    pub commands: CommandsConfig,
}

impl AppConfig {
    /// Creates a new `AppConfig` by reading `app.yaml` from the configuration
    /// directory, with `AGRISPRAY__`-prefixed environment variables layered on
    /// top.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir_str = config_dir.unwrap_or("configs");
        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/app.yaml", config_dir_str)))
            .add_source(Environment::with_prefix("AGRISPRAY").separator("__"))
            .build()?;
        s.try_deserialize()
    }
}
