use crate::helpers::*;

#[tokio::test]
async fn root_serves_dashboard_page() {
    let server = TestServer::new(healthy_commands()).await;

    let resp = server.get("/").await;

    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("dashboard.js"));
    assert!(html.contains("estop-btn"));

    server.cleanup();
}

#[tokio::test]
async fn script_and_stylesheet_are_served() {
    let server = TestServer::new(healthy_commands()).await;

    assert_eq!(server.get("/dashboard.js").await.status(), 200);
    assert_eq!(server.get("/style.css").await.status(), 200);
    assert_eq!(server.get("/missing.png").await.status(), 404);

    server.cleanup();
}

#[tokio::test]
async fn dashboard_script_alerts_on_every_refresh_failure() {
    let server = TestServer::new(healthy_commands()).await;

    let script = server.get("/dashboard.js").await.text().await.unwrap();
    let refresh = script
        .split("async function refresh()")
        .nth(1)
        .and_then(|rest| rest.split("async function control(").next())
        .expect("refresh handler missing");

    // Unreachable gateway, unreadable body and strict-mode error status all
    // end in a notification rather than only a console line.
    assert!(refresh.contains("alert(TRANSPORT_FAILURE)"));
    assert!(refresh.contains("!r.ok"));
    assert!(script.contains("throw new TransportError(\"unreadable response"));

    server.cleanup();
}

#[tokio::test]
async fn dashboard_script_treats_only_explicit_false_as_failure() {
    let server = TestServer::new(healthy_commands()).await;

    let script = server.get("/dashboard.js").await.text().await.unwrap();
    assert!(script.contains("result.ok && data.success !== false"));
    assert!(!script.contains("if (data.success)"));

    server.cleanup();
}
