use thiserror::Error;

/// Errors that can occur during application context initialization.
#[derive(Debug, Error)]
pub enum AppContextError {
    /// Configuration error.
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    /// Initialization error.
    #[error("Initialization error: {0}")]
    Initialization(#[from] InitializationError),
}

/// Errors that can occur during specific initialization steps.
#[derive(Debug, Error)]
pub enum InitializationError {
    /// A command binding has no program.
    #[error("No program configured for operation '{0}'")]
    MissingProgram(String),

    /// A configured working directory does not exist.
    #[error("Working directory for operation '{operation}' does not exist: {path}")]
    MissingWorkingDir {
        /// The operation whose command is misconfigured.
        operation: String,
        /// The directory that was not found.
        path: String,
    },
}
