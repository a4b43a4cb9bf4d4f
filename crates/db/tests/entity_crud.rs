//! Integration tests for transformer, inspection, image and form CRUD.
//!
//! Exercises the repository layer against a real database:
//! - Transformer -> inspection -> image hierarchy
//! - Duplicate transformer numbers and duplicate forms
//! - Foreign key violations on unknown parents
//! - Lookups by inspection

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use thermoscan_db::models::general_record::{CreateGeneralRecord, GeneralRecordFields};
use thermoscan_db::models::inspection::CreateInspection;
use thermoscan_db::models::inspection_image::CreateInspectionImage;
use thermoscan_db::models::maintenance_record::{CreateMaintenanceRecord, MaintenanceRecordFields};
use thermoscan_db::models::transformer::CreateTransformer;
use thermoscan_db::models::work_datasheet::{CreateWorkDatasheet, WorkDatasheetFields};
use thermoscan_db::repositories::{
    GeneralRecordRepo, InspectionImageRepo, InspectionRepo, MaintenanceRecordRepo,
    TransformerRepo, WorkDatasheetRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_transformer(no: &str) -> CreateTransformer {
    CreateTransformer {
        transformer_no: no.to_string(),
        region: Some("Nugegoda".to_string()),
        pole_no: Some("EN-122-A".to_string()),
        r#type: Some("Bulk".to_string()),
        location_details: None,
    }
}

fn new_inspection(transformer_no: &str) -> CreateInspection {
    CreateInspection {
        transformer_no: transformer_no.to_string(),
        branch: Some("Colombo".to_string()),
        date: NaiveDate::from_ymd_opt(2025, 3, 14),
        time: NaiveTime::from_hms_opt(9, 30, 0),
        status: None,
        maintenance_date: None,
    }
}

async fn seed_inspection(pool: &PgPool, no: &str) -> i64 {
    TransformerRepo::create(pool, &new_transformer(no))
        .await
        .unwrap()
        .expect("fresh transformer number");
    InspectionRepo::create(pool, &new_inspection(no))
        .await
        .unwrap()
        .id
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

fn is_fk_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23503"))
}

// ---------------------------------------------------------------------------
// Transformers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_transformer_create_and_fetch(pool: PgPool) {
    let created = TransformerRepo::create(&pool, &new_transformer("AZ-8890"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.transformer_no, "AZ-8890");
    assert_eq!(created.r#type.as_deref(), Some("Bulk"));

    let found = TransformerRepo::find_by_no(&pool, "AZ-8890").await.unwrap();
    assert!(found.is_some());

    let list = TransformerRepo::list(&pool).await.unwrap();
    assert_eq!(list.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_transformer_returns_none(pool: PgPool) {
    TransformerRepo::create(&pool, &new_transformer("AZ-1"))
        .await
        .unwrap()
        .unwrap();
    let second = TransformerRepo::create(&pool, &new_transformer("AZ-1"))
        .await
        .unwrap();
    assert!(second.is_none(), "duplicate number must not insert");
}

// ---------------------------------------------------------------------------
// Inspections and images
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inspection_defaults_to_pending(pool: PgPool) {
    let id = seed_inspection(&pool, "AZ-2").await;
    let inspection = InspectionRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(inspection.status, "Pending");
    assert_eq!(inspection.time, NaiveTime::from_hms_opt(9, 30, 0));

    let by_transformer = InspectionRepo::list_by_transformer(&pool, "AZ-2").await.unwrap();
    assert_eq!(by_transformer.len(), 1);
    assert!(InspectionRepo::list_by_transformer(&pool, "nope")
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inspection_keeps_explicit_status(pool: PgPool) {
    TransformerRepo::create(&pool, &new_transformer("AZ-3")).await.unwrap();
    let mut input = new_inspection("AZ-3");
    input.status = Some("Completed".to_string());
    let created = InspectionRepo::create(&pool, &input).await.unwrap();
    assert_eq!(created.status, "Completed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inspection_for_unknown_transformer_fails(pool: PgPool) {
    let err = InspectionRepo::create(&pool, &new_inspection("ghost"))
        .await
        .unwrap_err();
    assert!(is_fk_violation(&err), "expected FK violation, got {err}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_images_listed_per_inspection(pool: PgPool) {
    let id = seed_inspection(&pool, "AZ-4").await;
    for name in ["a.jpg", "b.jpg"] {
        InspectionImageRepo::create(
            &pool,
            &CreateInspectionImage {
                inspection_id: id,
                file_name: name.to_string(),
                file_path: format!("/uploads/{name}"),
                content_type: Some("image/jpeg".to_string()),
                weather: Some("sunny".to_string()),
            },
        )
        .await
        .unwrap();
    }

    let images = InspectionImageRepo::list_by_inspection(&pool, id).await.unwrap();
    let names: Vec<&str> = images.iter().map(|i| i.file_name.as_str()).collect();
    assert_eq!(names, vec!["a.jpg", "b.jpg"]);

    let first = InspectionImageRepo::find_by_id(&pool, images[0].id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.weather.as_deref(), Some("sunny"));
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_general_record_is_one_per_inspection(pool: PgPool) {
    let id = seed_inspection(&pool, "AZ-5").await;
    let input = CreateGeneralRecord {
        inspection_id: id,
        fields: GeneralRecordFields {
            inspector_name: Some("N. Silva".to_string()),
            voltage_r: Some(230.5),
            ..Default::default()
        },
    };

    let created = GeneralRecordRepo::create(&pool, &input).await.unwrap();
    assert_eq!(created.fields.voltage_r, Some(230.5));

    let err = GeneralRecordRepo::create(&pool, &input).await.unwrap_err();
    assert!(is_unique_violation(&err), "expected unique violation, got {err}");

    let by_inspection = GeneralRecordRepo::find_by_inspection(&pool, id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_inspection.id, created.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_maintenance_record_round_trip(pool: PgPool) {
    let id = seed_inspection(&pool, "AZ-6").await;
    let created = MaintenanceRecordRepo::create(
        &pool,
        &CreateMaintenanceRecord {
            inspection_id: id,
            fields: MaintenanceRecordFields {
                start_time: NaiveTime::from_hms_opt(8, 0, 0),
                all_spots_correct: Some(true),
                css_date: NaiveDate::from_ymd_opt(2025, 1, 2),
                ..Default::default()
            },
        },
    )
    .await
    .unwrap();

    let found = MaintenanceRecordRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.fields.all_spots_correct, Some(true));
    assert_eq!(found.fields.css_date, NaiveDate::from_ymd_opt(2025, 1, 2));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_work_datasheet_for_unknown_inspection_fails(pool: PgPool) {
    let err = WorkDatasheetRepo::create(
        &pool,
        &CreateWorkDatasheet {
            inspection_id: 999_999,
            fields: WorkDatasheetFields::default(),
        },
    )
    .await
    .unwrap_err();
    assert!(is_fk_violation(&err), "expected FK violation, got {err}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_work_datasheet_stores_every_field_group(pool: PgPool) {
    let id = seed_inspection(&pool, "AZ-7").await;
    let created = WorkDatasheetRepo::create(
        &pool,
        &CreateWorkDatasheet {
            inspection_id: id,
            fields: WorkDatasheetFields {
                serial_no: Some("TXF-2024-001".to_string()),
                fds_f3: Some(false),
                fds_f3_value: Some(88.2),
                material_2_5mm2_ct_lug_used: Some(true),
                work_notes: Some("Oil topped up".to_string()),
                ..Default::default()
            },
        },
    )
    .await
    .unwrap();

    let found = WorkDatasheetRepo::find_by_inspection(&pool, id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.fields.serial_no.as_deref(), Some("TXF-2024-001"));
    assert_eq!(found.fields.fds_f3, Some(false));
    assert_eq!(found.fields.fds_f3_value, Some(88.2));
    assert_eq!(found.fields.material_2_5mm2_ct_lug_used, Some(true));
    assert!(found.fields.material_70mm2_abc_used.is_none());
}
