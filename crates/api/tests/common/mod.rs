#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use derain_api::config::ServerConfig;
use derain_api::processing::Orchestrator;
use derain_api::router::build_app_router;
use derain_api::state::AppState;
use derain_core::artifacts::ArtifactStore;
use derain_inference::{Derain, DerainOutput, InferenceError};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![],
        request_timeout_secs: 30,
        inference_url: "http://localhost:8000".to_string(),
        inference_timeout_secs: 5,
        upload_dir: "uploads".to_string(),
    }
}

/// Scripted stand-in for the inference service.
pub enum StubDerain {
    /// Return fixed data-URI references.
    Succeed,
    /// Fail as if the service could not be reached (e.g. timeout).
    Unreachable,
    /// Fail as if the service rejected the request with a detail message.
    Rejected,
}

#[async_trait]
impl Derain for StubDerain {
    async fn transform(
        &self,
        _bytes: Vec<u8>,
        _filename: &str,
        _mime_type: &str,
    ) -> Result<DerainOutput, InferenceError> {
        match self {
            StubDerain::Succeed => Ok(DerainOutput {
                original_image: "data:image/png;base64,orig".to_string(),
                derained_image: "data:image/png;base64,clean".to_string(),
            }),
            StubDerain::Unreachable => {
                Err(InferenceError::Unreachable("connection timed out".to_string()))
            }
            StubDerain::Rejected => Err(InferenceError::Rejected {
                status: 500,
                detail: "Error processing image: model failure".to_string(),
            }),
        }
    }
}

/// Build the full application router with all middleware layers, a real
/// database pool, a temp-dir artifact store, and the given inference stub.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app(pool: PgPool, derainer: Arc<dyn Derain>, upload_dir: &Path) -> Router {
    let config = test_config();
    let store = Arc::new(ArtifactStore::new(upload_dir));
    let orchestrator = Arc::new(Orchestrator::new(pool.clone(), store, derainer));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        orchestrator,
    };

    build_app_router(state, &config)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, path: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

const BOUNDARY: &str = "derain-test-boundary";

/// Issue a multipart POST with a single file field.
pub async fn post_multipart(
    app: Router,
    path: &str,
    field: &str,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
) -> Response {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Number of files currently in the upload directory (0 if it was never
/// created).
pub fn upload_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

/// Total number of rows in the `jobs` table.
pub async fn job_count(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM jobs")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}
