mod common;

use common::TestApp;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/api/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "OK");
    assert_eq!(body["service"], "esql-to-xsd-converter");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].is_string());
    assert!(body["uptimeSeconds"].is_u64());
}

#[tokio::test]
async fn root_describes_the_api() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(&app.address)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["service"], "esql-to-xsd-converter");
    assert!(body["endpoints"]["POST /api/convert"].is_object());
    assert!(body["endpoints"]["GET /api/health"].is_object());
    assert_eq!(
        body["endpoints"]["POST /api/convert"]["maxUploadBytes"],
        10 * 1024 * 1024
    );
    assert!(body["usage"]["fileUpload"]
        .as_str()
        .unwrap()
        .contains("/api/convert"));
}

#[tokio::test]
async fn metrics_endpoint_returns_text() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let content_type = response
        .headers()
        .get("content-type")
        .expect("Missing content-type header")
        .to_str()
        .expect("Invalid content-type")
        .to_string();
    assert!(content_type.starts_with("text/plain"));
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/does-not-exist", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Not found");
}
