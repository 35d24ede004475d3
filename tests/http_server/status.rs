use serde_json::Value;

use crate::helpers::*;

#[tokio::test]
async fn status_endpoint_returns_status_json() {
    let server = TestServer::new(healthy_commands()).await;

    let resp = server.get("/status").await;

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptime_secs"].as_u64().is_some());
    assert_eq!(body["control_in_flight"], false);
    assert_eq!(body["fallbacks_served"], 0);
    assert!(body["last_control"].is_null());

    server.cleanup();
}

#[tokio::test]
async fn status_reports_last_control_and_fallbacks() {
    let mut commands = healthy_commands();
    commands.sensor_data = unavailable_command();
    let server = TestServer::new(commands).await;

    server.get("/sensor-data").await;
    server.post("/emergency-stop").await;

    let body: Value = server.get("/status").await.json().await.unwrap();
    assert_eq!(body["fallbacks_served"], 1);
    assert_eq!(body["last_control"]["operation"], "emergency_stop");
    assert_eq!(body["last_control"]["fallback"], false);
    assert_eq!(body["last_control"]["success"], true);
    assert!(body["last_control"]["finished_at"].as_str().is_some());

    server.cleanup();
}
