use serde_json::{Value, json};

use crate::helpers::*;

#[tokio::test]
async fn dashboard_status_relays_command_output() {
    let server = TestServer::new(healthy_commands()).await;

    let resp = server.get("/dashboard-status").await;

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body, serde_json::from_str::<Value>(DASHBOARD_JSON).unwrap());

    server.cleanup();
}

#[tokio::test]
async fn sensor_data_falls_back_when_command_fails() {
    let server = TestServer::new(failing_commands()).await;

    let resp = server.get("/sensor-data").await;

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body,
        json!({
            "tank_level": "47%",
            "weather_value": "dhoop",
            "weather_note": "chidkav ke liye anukool"
        })
    );

    server.cleanup();
}

#[tokio::test]
async fn dashboard_fallback_stays_within_bounds() {
    let server = TestServer::new(failing_commands()).await;

    let body: Value = server.get("/dashboard-status").await.json().await.unwrap();

    let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 4);
    for key in ["summary_time", "dosage_used", "area_covered", "battery_level"] {
        assert!(keys.contains(&key), "missing {key}");
    }

    let (hours, minutes) = body["summary_time"].as_str().unwrap().split_once("h ").unwrap();
    let hours: u32 = hours.parse().unwrap();
    let minutes: u32 = minutes.trim_end_matches('m').parse().unwrap();
    assert!((1..=5).contains(&hours));
    assert!(minutes <= 59);

    let dosage = body["dosage_used"].as_f64().unwrap();
    assert!((1.0..=5.0).contains(&dosage));
    let area = body["area_covered"].as_f64().unwrap();
    assert!((1.0..=6.0).contains(&area));
    let battery = body["battery_level"].as_u64().unwrap();
    assert!((30..=95).contains(&battery));

    server.cleanup();
}

#[tokio::test]
async fn reported_error_yields_fallback() {
    let mut commands = healthy_commands();
    commands.sensor_data = printing(r#"{"error":"sensor offline"}"#);
    let server = TestServer::new(commands).await;

    let body: Value = server.get("/sensor-data").await.json().await.unwrap();
    assert_eq!(body["tank_level"], "47%");

    server.cleanup();
}

#[tokio::test]
async fn unparseable_output_yields_fallback() {
    let mut commands = healthy_commands();
    commands.sensor_data = sh_command("echo 'tank sensor warming up'");
    let server = TestServer::new(commands).await;

    let body: Value = server.get("/sensor-data").await.json().await.unwrap();
    assert_eq!(body["weather_value"], "dhoop");

    server.cleanup();
}

#[tokio::test]
async fn missing_field_yields_fallback_and_extra_fields_are_dropped() {
    let mut commands = healthy_commands();
    commands.sensor_data = printing(r#"{"tank_level":"80%"}"#);
    commands.dashboard_status = printing(concat!(
        r#"{"summary_time":"1h 0m","dosage_used":1.5,"#,
        r#""area_covered":2.0,"battery_level":50,"firmware":"v2"}"#
    ));
    let server = TestServer::new(commands).await;

    let sensors: Value = server.get("/sensor-data").await.json().await.unwrap();
    assert_eq!(sensors["tank_level"], "47%");

    let dashboard: Value = server.get("/dashboard-status").await.json().await.unwrap();
    assert_eq!(dashboard["summary_time"], "1h 0m");
    assert!(dashboard.get("firmware").is_none());

    server.cleanup();
}

#[tokio::test]
async fn stderr_output_yields_fallback_unless_allowed() {
    let mut commands = healthy_commands();
    commands.sensor_data =
        sh_command(&format!("echo 'calibrating' >&2; printf '%s' '{SENSOR_JSON}'"));
    commands.dashboard_status = sh_command(&format!(
        "echo 'low battery warning' >&2; printf '%s' '{DASHBOARD_JSON}'"
    ));
    commands.dashboard_status.fail_on_stderr = false;
    let server = TestServer::new(commands).await;

    let sensors: Value = server.get("/sensor-data").await.json().await.unwrap();
    assert_eq!(sensors["tank_level"], "47%");

    let dashboard: Value = server.get("/dashboard-status").await.json().await.unwrap();
    assert_eq!(dashboard["battery_level"], 81);

    server.cleanup();
}
