//! HTTP-level integration tests for the PDF report routes.

mod common;

use axum::body::Body;
use axum::http::{Response, StatusCode};
use common::{body_bytes, body_json, create_inspection, get, post_json, TestApp};
use serde_json::json;
use sqlx::PgPool;

/// Assert the attachment headers and a PDF body.
async fn assert_pdf(response: Response<Body>, file_name: &str) {
    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["content-type"], "application/pdf");
    assert_eq!(
        headers["content-disposition"],
        format!("attachment; filename=\"{file_name}\"").as_str()
    );
    assert_eq!(
        headers["cache-control"],
        "must-revalidate, post-check=0, pre-check=0"
    );
    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"%PDF-"));
}

async fn store_datasheet(app: &TestApp, inspection_id: i64) -> i64 {
    let response = post_json(
        app.router(),
        "/api/work-datasheets",
        json!({
            "inspectionId": inspection_id,
            "serialNo": "SN-77",
            "gangLeader": "R. Perera",
            "fdsF1": "true",
            "fdsF1Value": "91.5",
            "workNotes": "Replaced fuse"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mock_report(pool: PgPool) {
    let app = TestApp::new(pool);
    let response = get(app.router(), "/api/pdf/generate/mock").await;
    assert_pdf(response, "transformer_complete_inspection_mock.pdf").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_generate_from_body(pool: PgPool) {
    let app = TestApp::new(pool);
    let response = post_json(
        app.router(),
        "/api/pdf/generate",
        json!({"serialNo": "TXF 9", "kva": "250", "workDate": "2025-02-01"}),
    )
    .await;
    assert_pdf(response, "transformer_inspection_TXF_9.pdf").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_generate_without_serial(pool: PgPool) {
    let app = TestApp::new(pool);
    let response = post_json(app.router(), "/api/pdf/generate", json!({})).await;
    assert_pdf(response, "transformer_inspection_N_A.pdf").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_generate_complete(pool: PgPool) {
    let app = TestApp::new(pool);
    let response = post_json(
        app.router(),
        "/api/pdf/generate/complete",
        json!({
            "workDataSheet": {"serialNo": "C-1"},
            "maintenanceRecord": {"supervisedBy": "A. Fernando", "allSpotsCorrect": true},
            "generalRecord": {"inspectorName": "N. Silva", "voltageR": 231}
        }),
    )
    .await;
    assert_pdf(response, "transformer_complete_C-1.pdf").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_generate_by_stored_datasheet(pool: PgPool) {
    let app = TestApp::new(pool);
    let inspection_id = create_inspection(&app, "PDF-1").await;
    let sheet_id = store_datasheet(&app, inspection_id).await;

    let response = get(app.router(), &format!("/api/pdf/generate/{sheet_id}")).await;
    assert_pdf(response, "transformer_inspection_SN-77.pdf").await;

    let response = get(app.router(), "/api/pdf/generate/99999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inspection_report(pool: PgPool) {
    let app = TestApp::new(pool);
    let inspection_id = create_inspection(&app, "PDF-2").await;
    let uri = format!("/api/pdf/inspections/{inspection_id}");

    // No datasheet yet.
    let response = get(app.router(), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    store_datasheet(&app, inspection_id).await;
    let response = post_json(
        app.router(),
        "/api/maintenance-records",
        json!({"inspectionId": inspection_id, "techI": "K. Perera"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app.router(), &uri).await;
    assert_pdf(response, "transformer_complete_SN-77.pdf").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inspection_report_for_unknown_inspection(pool: PgPool) {
    let app = TestApp::new(pool);
    let response = get(app.router(), "/api/pdf/inspections/4040").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
