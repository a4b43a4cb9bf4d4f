//! Work datasheet (digital form 3 of 3), also the source of PDF reports.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thermoscan_core::forms::{lenient_bool, lenient_date, lenient_f32, lenient_time};
use thermoscan_core::types::{DbId, Timestamp};

/// Datasheet contents.
///
/// `fds_fN` is the pass/fail result of fuse test N and `fds_fN_value` the
/// reading taken. The `material_*` flags record which stock items were used.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkDatasheetFields {
    #[serde(default)]
    pub gang_leader: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub work_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_time")]
    pub job_started_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "lenient_time")]
    pub job_completed_time: Option<NaiveTime>,
    #[serde(default)]
    pub serial_no: Option<String>,
    #[serde(default)]
    pub kva: Option<String>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub tap_position: Option<String>,
    #[serde(default, alias = "txCtRation")]
    pub tx_ct_ratio: Option<String>,
    #[serde(default)]
    pub manufacture_year: Option<String>,
    #[serde(default, deserialize_with = "lenient_f32")]
    pub earth_resistance: Option<f32>,
    #[serde(default, alias = "neutral", deserialize_with = "lenient_f32")]
    pub neutral_resistance: Option<f32>,
    #[serde(default)]
    pub surge_or_body: Option<String>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub fds_f1: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub fds_f2: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub fds_f3: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub fds_f4: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub fds_f5: Option<bool>,
    #[serde(default, alias = "fdsF1A", deserialize_with = "lenient_f32")]
    pub fds_f1_value: Option<f32>,
    #[serde(default, alias = "fdsF2A", deserialize_with = "lenient_f32")]
    pub fds_f2_value: Option<f32>,
    #[serde(default, alias = "fdsF3A", deserialize_with = "lenient_f32")]
    pub fds_f3_value: Option<f32>,
    #[serde(default, alias = "fdsF4A", deserialize_with = "lenient_f32")]
    pub fds_f4_value: Option<f32>,
    #[serde(default, alias = "fdsF5A", deserialize_with = "lenient_f32")]
    pub fds_f5_value: Option<f32>,

    #[serde(default)]
    pub work_notes: Option<String>,

    #[serde(default, deserialize_with = "lenient_bool")]
    pub material_16mm2_copper_used: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub material_70mm2_abc_used: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub material_14mm2_aluminum_used: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub material_50mm2_earth_used: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub material_60mm2_aac_used: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub material_16mm2_copper_lug_used: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub material_50mm2_copper_lug_used: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub material_2_5mm2_ct_lug_used: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub material_35mm2_bimetallic_lug_used: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub material_50mm2_bimetallic_lug_used: Option<bool>,
}

impl WorkDatasheetFields {
    /// `(test name, passed, reading)` for the five fuse tests, in order.
    pub fn fds_results(&self) -> [(&'static str, Option<bool>, Option<f32>); 5] {
        [
            ("FDS F1", self.fds_f1, self.fds_f1_value),
            ("FDS F2", self.fds_f2, self.fds_f2_value),
            ("FDS F3", self.fds_f3, self.fds_f3_value),
            ("FDS F4", self.fds_f4, self.fds_f4_value),
            ("FDS F5", self.fds_f5, self.fds_f5_value),
        ]
    }

    /// `(item code, description, used)` for each stock item.
    pub fn materials(&self) -> [(&'static str, &'static str, Option<bool>); 10] {
        [
            ("B112", "16mm2 Copper Wire", self.material_16mm2_copper_used),
            ("B244", "70mm2 ABC Cable", self.material_70mm2_abc_used),
            ("B712", "14mm2 Aluminum Wire", self.material_14mm2_aluminum_used),
            ("B815", "50mm2 Earth Wire", self.material_50mm2_earth_used),
            ("C113", "60mm2 AAC Conductor", self.material_60mm2_aac_used),
            ("G332", "16mm2 Copper Lug", self.material_16mm2_copper_lug_used),
            ("G354", "50mm2 Copper Lug", self.material_50mm2_copper_lug_used),
            ("G360", "2.5mm2 CT Lug", self.material_2_5mm2_ct_lug_used),
            ("G373A", "35mm2 Bimetallic Lug", self.material_35mm2_bimetallic_lug_used),
            ("G374", "50mm2 Bimetallic Lug", self.material_50mm2_bimetallic_lug_used),
        ]
    }
}

/// A row from the `work_datasheets` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkDatasheet {
    pub id: DbId,
    pub inspection_id: DbId,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fields: WorkDatasheetFields,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkDatasheet {
    pub inspection_id: DbId,
    #[serde(flatten)]
    pub fields: WorkDatasheetFields,
}
