//! The JSON envelope every ML / thermal endpoint answers with.
//!
//! Success and failure share one shape so clients can always read
//! `success`, `errorMessage` and `processingTimeMs` without branching on
//! the HTTP status.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::thermal::{AnalysisError, ThermalFinding};

/// Answer given for requests that name a single image instead of a pair.
pub const SINGLE_IMAGE_UNSUPPORTED: &str =
    "Single image analysis not supported. Use thermal analysis with baseline and candidate images.";

/// `metadata.analysisType` for baseline/candidate comparisons.
pub const THERMAL_COMPARISON: &str = "thermal_comparison";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    pub success: bool,
    pub prediction: Option<String>,
    pub confidence: f64,
    pub metadata: Option<Map<String, Value>>,
    pub error_message: Option<String>,
    pub processing_time_ms: u64,
    pub prob: Option<f64>,
    pub hist_distance: Option<f64>,
    pub dv95: Option<f64>,
    pub warm_fraction: Option<f64>,
    pub image_width: Option<i32>,
    pub image_height: Option<i32>,
    pub boxes: Option<Vec<[i32; 4]>>,
    pub box_info: Option<Vec<Map<String, Value>>>,
    pub fault_type: Option<String>,
    pub annotated: Option<String>,
}

impl PredictionResponse {
    fn empty(success: bool, elapsed: Duration) -> Self {
        Self {
            success,
            prediction: None,
            confidence: 0.0,
            metadata: None,
            error_message: None,
            processing_time_ms: elapsed.as_millis() as u64,
            prob: None,
            hist_distance: None,
            dv95: None,
            warm_fraction: None,
            image_width: None,
            image_height: None,
            boxes: None,
            box_info: None,
            fault_type: None,
            annotated: None,
        }
    }

    /// Successful comparison. `script_used` is echoed in the metadata.
    pub fn from_finding(finding: ThermalFinding, script_used: &str, elapsed: Duration) -> Self {
        let metadata = json!({
            "analysisType": THERMAL_COMPARISON,
            "scriptUsed": script_used,
            "imageWidth": finding.image_width,
            "imageHeight": finding.image_height,
        });

        Self {
            prediction: Some(finding.fault_type.clone()),
            confidence: finding.prob,
            metadata: metadata.as_object().cloned(),
            prob: Some(finding.prob),
            hist_distance: Some(finding.hist_distance),
            dv95: Some(finding.dv95),
            warm_fraction: Some(finding.warm_fraction),
            image_width: Some(finding.image_width),
            image_height: Some(finding.image_height),
            boxes: Some(finding.boxes.iter().map(|b| b.as_array()).collect()),
            box_info: Some(finding.box_info),
            fault_type: Some(finding.fault_type),
            annotated: finding.annotated,
            ..Self::empty(true, elapsed)
        }
    }

    /// Failed request. An empty message is replaced so `errorMessage` is
    /// never blank.
    pub fn failure(message: impl Into<String>, elapsed: Duration) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = "Unknown analysis error".to_string();
        }
        Self {
            error_message: Some(message),
            ..Self::empty(false, elapsed)
        }
    }

    pub fn from_result(
        result: Result<ThermalFinding, AnalysisError>,
        script_used: &str,
        elapsed: Duration,
    ) -> Self {
        match result {
            Ok(finding) => Self::from_finding(finding, script_used, elapsed),
            Err(err) => Self::failure(err.to_string(), elapsed),
        }
    }

    /// Placeholder answer for single-image requests.
    pub fn single_image_unsupported(elapsed: Duration) -> Self {
        Self {
            prediction: Some(SINGLE_IMAGE_UNSUPPORTED.to_string()),
            ..Self::empty(true, elapsed)
        }
    }
}
