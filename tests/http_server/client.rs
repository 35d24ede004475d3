use agrispray::{
    client::{DashboardClient, Notice},
    models::ControlOperation,
};

use crate::helpers::*;

#[tokio::test]
async fn refresh_fetches_both_readings() {
    let server = TestServer::new(healthy_commands()).await;
    let client = DashboardClient::new(&server.url()).unwrap();

    let snapshot = client.refresh().await.expect("Refresh failed");

    assert_eq!(snapshot.dashboard.summary_time, "3h 10m");
    assert_eq!(snapshot.sensors.weather_value, "badal");
    assert_eq!(snapshot.tank_bar_width(), 62);

    server.cleanup();
}

#[tokio::test]
async fn control_success_carries_server_message() {
    let server = TestServer::new(healthy_commands()).await;
    let client = DashboardClient::new(&server.url()).unwrap();

    assert_eq!(client.start().await, Notice::Success("started".into()));
    assert_eq!(client.emergency_stop(|| true).await, Notice::Success("stopped".into()));

    server.cleanup();
}

#[tokio::test]
async fn control_failure_is_reported_with_message() {
    let server = TestServer::new(failing_commands()).await;
    let client = DashboardClient::new(&server.url()).unwrap();

    assert_eq!(
        client.stop().await,
        Notice::Failure(ControlOperation::SystemOff.failure_message().into())
    );

    server.cleanup();
}

#[tokio::test]
async fn declined_emergency_stop_sends_nothing() {
    let marker = tempfile::tempdir().unwrap();
    let marker_path = marker.path().join("stopped");
    let mut commands = healthy_commands();
    commands.emergency_stop = sh_command(&format!(
        r#"touch '{}'; printf '{{"success":true}}'"#,
        marker_path.display()
    ));
    let server = TestServer::new(commands).await;
    let client = DashboardClient::new(&server.url()).unwrap();

    assert_eq!(client.emergency_stop(|| false).await, Notice::Cancelled);
    assert!(!marker_path.exists());

    server.cleanup();
}

#[tokio::test]
async fn unreachable_gateway_is_a_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = DashboardClient::new(&format!("http://{addr}")).unwrap();

    assert!(matches!(client.start().await, Notice::Transport(_)));
    assert!(client.refresh().await.is_err());
}

#[tokio::test]
async fn ack_without_success_flag_counts_as_success() {
    let mut commands = healthy_commands();
    commands.system_on = printing(r#"{"message":"AI program started","pid":4242}"#);
    let server = TestServer::new(commands).await;
    let client = DashboardClient::new(&server.url()).unwrap();

    assert_eq!(client.start().await, Notice::Success("AI program started".into()));

    server.cleanup();
}
