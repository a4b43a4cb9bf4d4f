//! Assembly of printable reports from inspection forms.
//!
//! The layout lives here; drawing is [`thermoscan_core::report::render_pdf`].

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use thermoscan_core::report::format;
use thermoscan_core::report::Report;
use thermoscan_db::models::general_record::GeneralRecordFields;
use thermoscan_db::models::maintenance_record::MaintenanceRecordFields;
use thermoscan_db::models::work_datasheet::WorkDatasheetFields;

pub const DATASHEET_TITLE: &str = "TRANSFORMER INSPECTION REPORT";
pub const COMPLETE_TITLE: &str = "TRANSFORMER COMPLETE INSPECTION REPORT";

/// Body of `POST /pdf/generate/complete`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteReportRequest {
    #[serde(alias = "workDatasheet")]
    pub work_data_sheet: WorkDatasheetFields,
    #[serde(default)]
    pub maintenance_record: Option<MaintenanceRecordFields>,
    #[serde(default)]
    pub general_record: Option<GeneralRecordFields>,
}

/// Report for a work datasheet on its own.
pub fn datasheet_report(sheet: &WorkDatasheetFields, today: NaiveDate) -> Report {
    with_datasheet(Report::new(DATASHEET_TITLE), sheet).generated_on(today)
}

/// Work datasheet followed by whichever of the other two forms exist.
pub fn complete_report(
    sheet: &WorkDatasheetFields,
    maintenance: Option<&MaintenanceRecordFields>,
    general: Option<&GeneralRecordFields>,
    today: NaiveDate,
) -> Report {
    let mut report = with_datasheet(Report::new(COMPLETE_TITLE), sheet);
    if let Some(general) = general {
        report = with_general_record(report, general);
    }
    if let Some(maintenance) = maintenance {
        report = with_maintenance_record(report, maintenance);
    }
    report.generated_on(today)
}

/// `<prefix>_<serial>.pdf`, with `N/A` standing in for a missing serial.
pub fn file_name(prefix: &str, serial_no: Option<&str>) -> String {
    let serial = format::text(serial_no);
    format!("{prefix}_{}.pdf", format::file_name_part(&serial))
}

fn with_datasheet(report: Report, sheet: &WorkDatasheetFields) -> Report {
    let fds_rows = sheet
        .fds_results()
        .iter()
        .map(|(name, passed, value)| {
            vec![name.to_string(), format::pass_fail(*passed), format::float(*value)]
        })
        .collect();

    let material_rows = sheet
        .materials()
        .iter()
        .map(|(code, description, used)| {
            vec![code.to_string(), description.to_string(), format::yes_no(*used)]
        })
        .collect();

    let report = report
        .key_values(
            None,
            vec![
                ("Work Date:", format::date(sheet.work_date)),
                ("Job Started:", format::time(sheet.job_started_time)),
                ("Job Completed:", format::time(sheet.job_completed_time)),
            ],
        )
        .key_values(
            Some("Transformer Details"),
            vec![
                ("Gang Leader:", format::text(sheet.gang_leader.as_deref())),
                ("Serial No:", format::text(sheet.serial_no.as_deref())),
                ("KVA:", format::text(sheet.kva.as_deref())),
                ("Make:", format::text(sheet.make.as_deref())),
                ("Tap Position:", format::text(sheet.tap_position.as_deref())),
                ("TX CT Ratio:", format::text(sheet.tx_ct_ratio.as_deref())),
                ("Manufacture Year:", format::text(sheet.manufacture_year.as_deref())),
            ],
        )
        .key_values(
            Some("Electrical Measurements"),
            vec![
                ("Earth Resistance:", format::float(sheet.earth_resistance)),
                ("Neutral:", format::float(sheet.neutral_resistance)),
                ("Surge or Body:", format::text(sheet.surge_or_body.as_deref())),
            ],
        )
        .grid(Some("FDS Test Results"), &["Test", "Status", "Value"], fds_rows)
        .grid(Some("Materials Used"), &["Code", "Description", "Used"], material_rows);

    match sheet.work_notes.as_deref().map(str::trim) {
        Some(notes) if !notes.is_empty() => report.notes(Some("Work Notes"), notes),
        _ => report,
    }
}

fn with_general_record(report: Report, record: &GeneralRecordFields) -> Report {
    let phases = |label: &str, r: Option<f32>, y: Option<f32>, b: Option<f32>| {
        vec![
            label.to_string(),
            format::float(r),
            format::float(y),
            format::float(b),
        ]
    };

    report
        .key_values(
            Some("General Record"),
            vec![
                ("Date:", format::date(record.date)),
                ("Time:", format::time(record.time)),
                ("Inspector:", format::text(record.inspector_name.as_deref())),
                ("Transformer Status:", format::text(record.transformer_status.as_deref())),
                ("Recommended Action:", format::text(record.recommended_action.as_deref())),
                ("Additional Remarks:", format::text(record.additional_remarks.as_deref())),
            ],
        )
        .grid(
            Some("Voltage and Current Readings"),
            &["Reading", "R", "Y", "B"],
            vec![
                phases("Voltage", record.voltage_r, record.voltage_y, record.voltage_b),
                phases("Current", record.current_r, record.current_y, record.current_b),
                phases("Voltage (2nd)", record.voltage_r2, record.voltage_y2, record.voltage_b2),
                phases("Current (2nd)", record.current_r2, record.current_y2, record.current_b2),
            ],
        )
}

fn with_maintenance_record(report: Report, record: &MaintenanceRecordFields) -> Report {
    report.key_values(
        Some("Maintenance Record"),
        vec![
            ("Start Time:", format::time(record.start_time)),
            ("Completion Time:", format::time(record.completion_time)),
            ("Supervised By:", format::text(record.supervised_by.as_deref())),
            ("Helpers:", format::text(record.helpers.as_deref())),
            ("Tech I:", format::text(record.tech_i.as_deref())),
            ("Tech II:", format::text(record.tech_ii.as_deref())),
            ("Tech III:", format::text(record.tech_iii.as_deref())),
            ("All Spots Correct:", format::yes_no(record.all_spots_correct)),
            ("Inspected By:", format::text(record.inspected_by.as_deref())),
            ("Inspected Date:", format::date(record.inspected_date)),
            ("Rectified By:", format::text(record.rectified_by.as_deref())),
            ("Rectified Date:", format::date(record.rectified_date)),
            ("Re-inspected By:", format::text(record.re_inspected_by.as_deref())),
            ("Re-inspected Date:", format::date(record.re_inspected_date)),
            ("CSS:", format::text(record.css.as_deref())),
            ("CSS Date:", format::date(record.css_date)),
            ("CSS 2:", format::text(record.css2.as_deref())),
            ("CSS 2 Date:", format::date(record.css2_date)),
        ],
    )
}

// ---------------------------------------------------------------------------
// Sample data
// ---------------------------------------------------------------------------

/// Filled-in datasheet used by the sample report endpoint.
pub fn mock_datasheet(today: NaiveDate) -> WorkDatasheetFields {
    WorkDatasheetFields {
        gang_leader: Some("John Smith".into()),
        work_date: Some(today),
        job_started_time: NaiveTime::from_hms_opt(9, 0, 0),
        job_completed_time: NaiveTime::from_hms_opt(15, 30, 0),
        serial_no: Some("TXF-2024-001".into()),
        kva: Some("500".into()),
        make: Some("ABB".into()),
        tap_position: Some("5".into()),
        tx_ct_ratio: Some("100/5".into()),
        manufacture_year: Some("2020".into()),
        earth_resistance: Some(2.5),
        neutral_resistance: Some(1.8),
        surge_or_body: Some("Normal".into()),
        fds_f1: Some(true),
        fds_f1_value: Some(95.5),
        fds_f2: Some(true),
        fds_f2_value: Some(94.8),
        fds_f3: Some(false),
        fds_f3_value: Some(88.2),
        fds_f4: Some(true),
        fds_f4_value: Some(96.1),
        fds_f5: Some(true),
        fds_f5_value: Some(97.3),
        work_notes: Some(
            "All tests completed successfully. Transformer is in good working condition. \
             Minor oil leak detected and fixed during inspection. Recommended for next \
             inspection after 6 months."
                .into(),
        ),
        material_16mm2_copper_used: Some(true),
        material_50mm2_earth_used: Some(true),
        material_16mm2_copper_lug_used: Some(true),
        ..Default::default()
    }
}

/// Maintenance record paired with [`mock_datasheet`].
pub fn mock_maintenance(today: NaiveDate) -> MaintenanceRecordFields {
    MaintenanceRecordFields {
        start_time: NaiveTime::from_hms_opt(9, 0, 0),
        completion_time: NaiveTime::from_hms_opt(15, 30, 0),
        supervised_by: Some("A. Fernando".into()),
        tech_i: Some("K. Perera".into()),
        helpers: Some("2".into()),
        inspected_by: Some("A. Fernando".into()),
        inspected_date: Some(today),
        all_spots_correct: Some(true),
        ..Default::default()
    }
}
