//! HTTP-level integration tests for transformers, inspections, images and
//! the three inspection forms.

mod common;

use axum::http::StatusCode;
use common::{
    body_bytes, body_json, create_inspection, create_transformer, get, post_json,
    post_multipart, upload_image, TestApp,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Transformers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_transformer_returns_201(pool: PgPool) {
    let app = TestApp::new(pool);
    let data = create_transformer(app.router(), "AZ-8890").await;

    assert_eq!(data["transformerNo"], "AZ-8890");
    assert_eq!(data["type"], "Distribution");
    assert!(data["createdAt"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_transformer_no_returns_400(pool: PgPool) {
    let app = TestApp::new(pool);
    let response = post_json(app.router(), "/api/transformers", json!({"transformerNo": " "})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "transformerNo is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_transformer_returns_409(pool: PgPool) {
    let app = TestApp::new(pool);
    create_transformer(app.router(), "AZ-1").await;

    let response = post_json(app.router(), "/api/transformers", json!({"transformerNo": "AZ-1"})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_transformer_and_list(pool: PgPool) {
    let app = TestApp::new(pool);
    create_transformer(app.router(), "AZ-2").await;
    create_transformer(app.router(), "AZ-3").await;

    let response = get(app.router(), "/api/transformers/AZ-2").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["region"], "Kandy");

    let response = get(app.router(), "/api/transformers").await;
    let list = body_json(response).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 2);

    let response = get(app.router(), "/api/transformers/missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Inspections
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inspection_defaults_to_pending(pool: PgPool) {
    let app = TestApp::new(pool);
    let id = create_inspection(&app, "AZ-4").await;

    let response = get(app.router(), &format!("/api/inspections/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "Pending");
    assert_eq!(json["data"]["date"], "2025-03-14");
    assert_eq!(json["data"]["time"], "09:30:00");

    let response = get(app.router(), "/api/transformers/AZ-4/inspections").await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inspection_for_unknown_transformer_returns_404(pool: PgPool) {
    let app = TestApp::new(pool);
    let response = post_json(
        app.router(),
        "/api/inspections",
        json!({"transformerNo": "ghost", "date": "2025-01-01"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Transformer with key ghost not found"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inspection_with_bad_date_is_rejected(pool: PgPool) {
    let app = TestApp::new(pool);
    create_transformer(app.router(), "AZ-5").await;

    let response = post_json(
        app.router(),
        "/api/inspections",
        json!({"transformerNo": "AZ-5", "date": "not a date"}),
    )
    .await;
    assert!(response.status().is_client_error());
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_and_stream_image(pool: PgPool) {
    let app = TestApp::new(pool);
    let inspection_id = create_inspection(&app, "AZ-6").await;

    let image_id = upload_image(&app, inspection_id, "../thermal.png", b"PNGDATA").await;

    // Stored under the sanitized name inside the upload dir.
    assert!(app.upload_dir().join("thermal.png").exists());

    let response = get(app.router(), &format!("/api/images/{image_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/png");
    assert_eq!(body_bytes(response).await, b"PNGDATA");

    let response = get(app.router(), &format!("/api/inspections/{inspection_id}/images")).await;
    let images = body_json(response).await;
    assert_eq!(images["data"][0]["fileName"], "thermal.png");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_for_unknown_inspection_returns_404(pool: PgPool) {
    let app = TestApp::new(pool);
    let response = post_multipart(
        app.router(),
        "/api/images",
        &[("inspectionId", None, b"999999"), ("file", Some("a.png"), b"x")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_without_file_returns_400(pool: PgPool) {
    let app = TestApp::new(pool);
    let inspection_id = create_inspection(&app, "AZ-7").await;
    let id = inspection_id.to_string();

    let response = post_multipart(
        app.router(),
        "/api/images",
        &[("inspectionId", None, id.as_bytes()), ("weather", None, b"sunny")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Missing required 'file' field");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_image_missing_on_disk_returns_404(pool: PgPool) {
    let app = TestApp::new(pool);
    let inspection_id = create_inspection(&app, "AZ-8").await;
    let image_id = upload_image(&app, inspection_id, "gone.png", b"x").await;
    std::fs::remove_file(app.upload_dir().join("gone.png")).unwrap();

    let response = get(app.router(), &format!("/api/images/{image_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_general_record_create_and_fetch(pool: PgPool) {
    let app = TestApp::new(pool);
    let inspection_id = create_inspection(&app, "AZ-9").await;

    let response = post_json(
        app.router(),
        "/api/general-records",
        json!({
            "inspectionId": inspection_id,
            "inspectorName": "N. Silva",
            "voltageR": "230.5",
            "currentR": 12,
            "time": "10:30",
            "date": ""
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["voltageR"], 230.5);
    assert!(created["data"]["date"].is_null());
    let id = created["data"]["id"].as_i64().unwrap();

    let response = get(app.router(), &format!("/api/general-records/{id}")).await;
    assert_eq!(body_json(response).await["data"]["inspectorName"], "N. Silva");

    let response = get(
        app.router(),
        &format!("/api/general-records/inspection/{inspection_id}"),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["id"], id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_form_returns_409(pool: PgPool) {
    let app = TestApp::new(pool);
    let inspection_id = create_inspection(&app, "AZ-10").await;
    let body = json!({"inspectionId": inspection_id, "allSpotsCorrect": true});

    let first = post_json(app.router(), "/api/maintenance-records", body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(app.router(), "/api/maintenance-records", body).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_form_for_unknown_inspection_returns_404(pool: PgPool) {
    let app = TestApp::new(pool);
    let response = post_json(
        app.router(),
        "/api/work-datasheets",
        json!({"inspectionId": 424242, "serialNo": "X"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_form_by_inspection_returns_404(pool: PgPool) {
    let app = TestApp::new(pool);
    let inspection_id = create_inspection(&app, "AZ-11").await;

    let response = get(
        app.router(),
        &format!("/api/work-datasheets/inspection/{inspection_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
