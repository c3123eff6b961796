#![allow(dead_code)]

use std::fs;
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use panel_survey::{
    AppState, JsonDocumentStore, SharedSecretVerifier, SurveyService, build_router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const SECRET: &str = "initiator-test-secret";

pub struct TestApp {
    pub dir: TempDir,
    pub service: SurveyService,
    pub router: Router,
}

impl TestApp {
    pub fn data_file(&self) -> std::path::PathBuf {
        self.dir.path().join("data/survey_results.json")
    }
}

/// Fresh store in a temp dir, an asset directory with an entry page and one
/// extra file, and a private file next to (not inside) the asset directory.
pub async fn spawn_app() -> TestApp {
    let dir = TempDir::new().expect("temp dir");
    let assets = dir.path().join("assets");
    fs::create_dir_all(assets.join("js")).expect("asset dir");
    fs::write(assets.join("survey_final.html"), "<html><body>survey</body></html>")
        .expect("entry page");
    fs::write(assets.join("js/app.js"), "console.log('survey');").expect("script");
    fs::write(dir.path().join("private.txt"), "do not serve").expect("private file");

    let store = JsonDocumentStore::new(dir.path().join("data/survey_results.json"));
    let service = SurveyService::new(store, Arc::new(SharedSecretVerifier::new(SECRET)));
    service.initialize().await.expect("store initializes");

    let router = build_router(AppState::new(
        service.clone(),
        assets.clone(),
        assets.join("survey_final.html"),
    ));

    TestApp {
        dir,
        service,
        router,
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("response expected");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");
    (status, body.to_vec())
}

pub async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    if body.is_empty() {
        return (status, Value::Null);
    }
    let json = serde_json::from_slice::<Value>(&body).expect("body should be valid JSON");
    (status, json)
}

pub async fn submit(app: &Router, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/submit")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request should build");
    send_json(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    send_json(app, request).await
}
