use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use agrispray::{
    config::{AppConfig, CommandConfig, CommandsConfig, ResponseMode, ServerConfig},
    context::AppContextBuilder,
    http_server,
};
use reqwest::Client;
use tokio::task;
use tokio_util::sync::CancellationToken;

pub const DASHBOARD_JSON: &str =
    r#"{"summary_time":"3h 10m","dosage_used":2.5,"area_covered":4.2,"battery_level":81}"#;
pub const SENSOR_JSON: &str =
    r#"{"tank_level":"62%","weather_value":"badal","weather_note":"halki hawa"}"#;

/// A command that runs `script` with `sh -c`.
pub fn sh_command(script: &str) -> CommandConfig {
    CommandConfig::new("sh", vec!["-c".into(), script.into()])
}

/// A command that prints `json` and exits zero.
pub fn printing(json: &str) -> CommandConfig {
    sh_command(&format!("printf '%s' '{json}'"))
}

/// A command that fails before printing anything.
pub fn unavailable_command() -> CommandConfig {
    sh_command("exit 1")
}

/// Commands that all succeed.
pub fn healthy_commands() -> CommandsConfig {
    CommandsConfig {
        dashboard_status: printing(DASHBOARD_JSON),
        sensor_data: printing(SENSOR_JSON),
        system_on: printing(r#"{"success":true,"message":"started","pid":4242}"#),
        system_off: printing(r#"{"success":true,"message":"AI program stopped successfully."}"#),
        emergency_stop: printing(r#"{"success":true,"message":"stopped"}"#),
    }
}

/// Commands that all fail.
pub fn failing_commands() -> CommandsConfig {
    CommandsConfig {
        dashboard_status: unavailable_command(),
        sensor_data: unavailable_command(),
        system_on: unavailable_command(),
        system_off: unavailable_command(),
        emergency_stop: unavailable_command(),
    }
}

pub fn static_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

pub fn create_test_config(
    address: &str,
    commands: CommandsConfig,
    mode: ResponseMode,
) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            listen_address: address.into(),
            static_dir: static_dir(),
            response_mode: mode,
            ..Default::default()
        },
        commands,
    }
}

pub struct TestServer {
    pub address: SocketAddr,
    pub server_handle: task::JoinHandle<()>,
    pub client: Client,
    shutdown: CancellationToken,
}

impl TestServer {
    pub async fn new(commands: CommandsConfig) -> Self {
        Self::with_mode(commands, ResponseMode::Compat).await
    }

    pub async fn with_mode(commands: CommandsConfig, mode: ResponseMode) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get address");
        drop(listener); // Release port for the app to use

        let config = create_test_config(&addr.to_string(), commands, mode);
        let context = AppContextBuilder::new(None)
            .build_with_config(config)
            .expect("Failed to build app context");

        let shutdown = CancellationToken::new();
        let server_shutdown = shutdown.clone();
        let server_handle = task::spawn(async move {
            http_server::run_server_from_config(
                Arc::clone(&context.config),
                Arc::clone(&context.gateway),
                context.metrics.clone(),
                server_shutdown,
            )
            .await
            .expect("Server failed");
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(300)).await;

        Self { address: addr, server_handle, client: Client::new(), shutdown }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.address)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        let url = format!("http://{}{}", self.address, path);
        self.client.get(&url).send().await.expect("Request failed")
    }

    pub async fn post(&self, path: &str) -> reqwest::Response {
        let url = format!("http://{}{}", self.address, path);
        self.client.post(&url).send().await.expect("Request failed")
    }

    pub fn cleanup(self) {
        self.shutdown.cancel();
        self.server_handle.abort();
    }
}
