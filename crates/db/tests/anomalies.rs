//! Integration tests for anomaly annotations and stored analysis results.

use serde_json::json;
use sqlx::PgPool;
use thermoscan_core::anomaly::{AnomalyDraft, AnomalyKey};
use thermoscan_core::boxes::extract_box_records;
use thermoscan_db::repositories::{AnalysisResultRepo, AnomalyRepo, InspectionBoxRepo};

fn draft(inspection_number: &str, idx: i32) -> AnomalyDraft {
    AnomalyDraft {
        inspection_number: inspection_number.to_string(),
        idx,
        label: Some("hotspot".to_string()),
        coords: Some(json!({"x": 10, "y": 12, "w": 4, "h": 4})),
        confidence: Some(0.8),
        severity: Some("high".to_string()),
        area_frac: Some(0.01),
        is_manual: false,
        created_by: Some("model".to_string()),
    }
}

fn key(inspection_number: &str, idx: i32) -> AnomalyKey {
    AnomalyKey {
        inspection_number: inspection_number.to_string(),
        idx,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_many_and_list_in_index_order(pool: PgPool) {
    let inserted = AnomalyRepo::insert_many(&pool, &[draft("INS-1", 2), draft("INS-1", 0), draft("INS-2", 0)])
        .await
        .unwrap();
    assert_eq!(inserted.len(), 3);

    let listed = AnomalyRepo::list_by_inspection_number(&pool, "INS-1").await.unwrap();
    let idxs: Vec<i32> = listed.iter().map(|a| a.idx).collect();
    assert_eq!(idxs, vec![0, 2]);
    assert_eq!(listed[0].coords, Some(json!({"x": 10, "y": 12, "w": 4, "h": 4})));
    assert!(!listed[0].deleted);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_keeps_row_with_audit_fields(pool: PgPool) {
    let inserted = AnomalyRepo::insert_many(&pool, &[draft("INS-3", 1)]).await.unwrap();
    let id = inserted[0].id;

    let updated = AnomalyRepo::soft_delete_by_key(&pool, &key("INS-3", 1), Some("supervisor"))
        .await
        .unwrap();
    assert_eq!(updated, 1);

    let row = AnomalyRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert!(row.deleted);
    assert!(row.deleted_at.is_some());
    assert_eq!(row.deleted_by.as_deref(), Some("supervisor"));

    // Still listed, flagged.
    let listed = AnomalyRepo::list_by_inspection_number(&pool, "INS-3").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].deleted);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hard_delete_removes_every_match(pool: PgPool) {
    let inserted = AnomalyRepo::insert_many(&pool, &[draft("INS-4", 5), draft("INS-4", 5), draft("INS-4", 6)])
        .await
        .unwrap();

    let deleted = AnomalyRepo::hard_delete_by_key(&pool, &key("INS-4", 5)).await.unwrap();
    assert_eq!(deleted, 2);
    assert!(AnomalyRepo::find_by_id(&pool, inserted[0].id).await.unwrap().is_none());

    let none = AnomalyRepo::hard_delete_by_key(&pool, &key("INS-4", 99)).await.unwrap();
    assert_eq!(none, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_analysis_result_saves_boxes(pool: PgPool) {
    let result = json!({
        "faultType": "loose_joint",
        "boxInfo": [
            {"x": 1, "y": 2, "w": 3, "h": 4, "label": "a", "boxFault": "loose_joint"},
            {"x": 9, "areaFrac": 0.2}
        ]
    });
    let boxes = extract_box_records(&result);

    let (stored, saved) = AnalysisResultRepo::create_with_boxes(&pool, Some("12"), &result, &boxes)
        .await
        .unwrap();
    assert_eq!(saved.len(), 2);
    assert!(saved.iter().all(|b| b.analysis_result_id == Some(stored.id)));
    assert_eq!(saved[1].area_frac, 0.2);
    assert_eq!(saved[1].label, "");

    let results = AnalysisResultRepo::list_by_inspection(&pool, "12").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].result_json["faultType"], "loose_joint");

    let listed = InspectionBoxRepo::list_by_inspection(&pool, "12").await.unwrap();
    let indices: Vec<i32> = listed.iter().map(|b| b.box_index).collect();
    assert_eq!(indices, vec![0, 1]);
}
