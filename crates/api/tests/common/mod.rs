#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use cablewatch_api::config::ServerConfig;
use cablewatch_api::engine::evaluation::EvaluationMirror;
use cablewatch_api::router::build_app_router;
use cablewatch_api::state::AppState;
use cablewatch_db::models::submission::CreateSubmission;
use cablewatch_db::repositories::{SubmissionRepo, WorksiteRepo};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Defaults with a smaller pool and an ephemeral port.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        db_max_connections: 5,
        ..ServerConfig::default()
    }
}

/// Build the full application router, middleware included, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config).unwrap()
}

/// Same as [`build_test_app`] with a replacement mirror.
pub fn build_test_app_with_mirror(pool: PgPool, mirror: Arc<dyn EvaluationMirror>) -> Router {
    let config = test_config();
    let mut state = AppState::new(pool, config.clone());
    state.mirror = mirror;
    build_app_router(state, &config).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Insert a submission from a JSON description of [`CreateSubmission`].
pub async fn seed_submission(pool: &PgPool, input: serde_json::Value) -> i64 {
    let input: CreateSubmission = serde_json::from_value(input).unwrap();
    SubmissionRepo::create(pool, &input).await.unwrap().id
}

pub async fn seed_worksite(pool: &PgPool) -> i64 {
    WorksiteRepo::create(pool, "Cantiere di prova").await.unwrap().id
}
