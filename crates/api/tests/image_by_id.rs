//! Integration tests for `GET /api/image/{id}`.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, post_multipart, StubDerain};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_id_returns_404(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, Arc::new(StubDerain::Succeed), dir.path());

    let response = get(app, "/api/image/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Image not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn returns_a_completed_job_by_id(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), Arc::new(StubDerain::Succeed), dir.path());

    let response = post_multipart(
        app.clone(),
        "/api/process-image",
        "image",
        "rainy.jpg",
        "image/jpeg",
        b"jpeg bytes",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = get(app, &format!("/api/image/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["image"]["id"], id);
    assert_eq!(json["image"]["originalFilename"], "rainy.jpg");
    assert_eq!(json["image"]["status"], "completed");
    assert_eq!(
        json["image"]["result"]["derainedImage"],
        "data:image/png;base64,clean"
    );
    assert!(
        json["image"].get("originalPath").is_none()
            && json["image"].get("original_path").is_none(),
        "the transient upload path must not be serialized"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeated_reads_return_identical_results(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), Arc::new(StubDerain::Succeed), dir.path());

    sqlx::query("INSERT INTO jobs (original_filename, status) VALUES ('one.jpg', 'failed')")
        .execute(&pool)
        .await
        .unwrap();
    let (id,): (i64,) = sqlx::query_as("SELECT id FROM jobs LIMIT 1")
        .fetch_one(&pool)
        .await
        .unwrap();

    let first = body_json(get(app.clone(), &format!("/api/image/{id}")).await).await;
    let second = body_json(get(app, &format!("/api/image/{id}")).await).await;
    assert_eq!(first, second);
}
