//! Decoding of the analysis script's stdout into a [`ThermalFinding`].

use serde_json::{Map, Value};

use super::{AnalysisError, BoundingBox, ThermalFinding, UNKNOWN_FAULT_TYPE};

/// Parse the script's standard output.
///
/// The output must be exactly one JSON object. An `"error"` key means the
/// script ran but reported a failure, whatever its value. Numeric fields accept JSON numbers or
/// numeric strings and default to zero when absent.
pub fn parse_finding(stdout: &str) -> Result<ThermalFinding, AnalysisError> {
    let raw = stdout.trim();

    let value: Value = serde_json::from_str(raw).map_err(|e| AnalysisError::Parse {
        reason: e.to_string(),
        raw: raw.to_string(),
    })?;

    let Value::Object(obj) = value else {
        return Err(AnalysisError::Parse {
            reason: "expected a JSON object".to_string(),
            raw: raw.to_string(),
        });
    };

    if let Some(err) = obj.get("error") {
        let message = match err {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(AnalysisError::Reported(message));
    }

    let fault_type = obj
        .get("faultType")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_FAULT_TYPE)
        .to_string();

    let annotated = obj
        .get("annotated")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(ThermalFinding {
        prob: number(&obj, "prob"),
        hist_distance: number(&obj, "histDistance"),
        dv95: number(&obj, "dv95"),
        warm_fraction: number(&obj, "warmFraction"),
        image_width: number(&obj, "imageWidth") as i32,
        image_height: number(&obj, "imageHeight") as i32,
        fault_type,
        annotated,
        boxes: boxes(obj.get("boxes")),
        box_info: box_info(obj.get("boxInfo")),
    })
}

/// Read a numeric field, accepting numbers and numeric strings.
pub(crate) fn number(obj: &Map<String, Value>, key: &str) -> f64 {
    obj.get(key).and_then(as_f64).unwrap_or(0.0)
}

pub(crate) fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn boxes(value: Option<&Value>) -> Vec<BoundingBox> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let coords = item.as_array()?;
            if coords.len() < 4 {
                return None;
            }
            let mut xywh = [0i32; 4];
            for (slot, v) in xywh.iter_mut().zip(coords) {
                *slot = as_f64(v)? as i32;
            }
            Some(BoundingBox {
                x: xywh[0],
                y: xywh[1],
                w: xywh[2],
                h: xywh[3],
            })
        })
        .collect()
}

fn box_info(value: Option<&Value>) -> Vec<Map<String, Value>> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| item.as_object().cloned())
        .collect()
}
