#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use study_service::config::StudyConfig;
use study_service::services::providers::mock::MockModelClient;
use study_service::services::ModelClient;
use study_service::startup::{build_router, AppState, Application};
use tower::util::ServiceExt;

/// Router backed by a fresh mock client and session registry.
pub fn mock_router() -> (Arc<MockModelClient>, Router) {
    let client = Arc::new(MockModelClient::new());
    let router = build_router(AppState::new(client.clone()));
    (client, router)
}

/// Router whose model fails every call with `message`.
pub fn failing_router(message: &str) -> Router {
    build_router(AppState::new(Arc::new(MockModelClient::failing(message))))
}

pub async fn post_raw(app: &Router, uri: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, "application/json", &body.to_string()).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// A running server on a random localhost port.
pub struct TestApp {
    pub address: String,
    pub state: AppState,
}

impl TestApp {
    pub async fn spawn(model: Arc<dyn ModelClient>) -> Self {
        let app = Application::build_with_model(StudyConfig::local_mock(), model)
            .await
            .expect("Failed to build test application");

        let address = format!("http://127.0.0.1:{}", app.port());
        let state = app.state().clone();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }

        TestApp { address, state }
    }
}
