//! Configuration module for the agrispray gateway.

mod app_config;
mod commands;
mod helpers;
mod server;

pub use app_config::AppConfig;
pub use commands::{CommandConfig, CommandsConfig};
pub use helpers::{deserialize_duration_from_ms, deserialize_duration_from_seconds};
pub use server::{ResponseMode, ServerConfig};
