//! Parsing of loosely-typed anomaly payloads.
//!
//! The annotation front-end posts anomalies as free-form JSON: indices and
//! fractions may arrive as numbers or strings and keys are a mix of
//! snake_case and camelCase. This module turns those payloads into typed
//! values before anything touches the database.

use serde_json::{Map, Value};

use crate::error::CoreError;

/// One anomaly ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyDraft {
    pub inspection_number: String,
    pub idx: i32,
    pub label: Option<String>,
    /// Geometry as sent by the client, stored verbatim.
    pub coords: Option<Value>,
    pub confidence: Option<f32>,
    pub severity: Option<String>,
    pub area_frac: Option<f32>,
    pub is_manual: bool,
    pub created_by: Option<String>,
}

/// Identifies the anomalies targeted by a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnomalyKey {
    pub inspection_number: String,
    pub idx: i32,
}

/// Parse `{ "anomalies": [ ... ] }`. Items that are not objects are skipped.
pub fn parse_insert_payload(body: &Value) -> Result<Vec<AnomalyDraft>, CoreError> {
    let items = body
        .get("anomalies")
        .and_then(Value::as_array)
        .ok_or_else(|| CoreError::Validation("anomalies must be an array".to_string()))?;

    items
        .iter()
        .enumerate()
        .filter_map(|(pos, item)| item.as_object().map(|obj| (pos, obj)))
        .map(|(pos, obj)| {
            parse_draft(obj).map_err(|msg| CoreError::Validation(format!("anomalies[{pos}]: {msg}")))
        })
        .collect()
}

fn parse_draft(obj: &Map<String, Value>) -> Result<AnomalyDraft, String> {
    let inspection_number = text(obj, "inspection_number")
        .filter(|s| !s.trim().is_empty())
        .ok_or("inspection_number is required")?;
    let idx = integer(obj, "index")?
        .or(integer(obj, "idx")?)
        .ok_or("index is required")?;

    Ok(AnomalyDraft {
        inspection_number,
        idx,
        label: text(obj, "label"),
        coords: obj.get("coords").filter(|v| !v.is_null()).cloned(),
        confidence: float(obj, "confidence")?,
        severity: text(obj, "severity"),
        area_frac: float(obj, "areaFrac")?,
        is_manual: flag(obj, "isManual"),
        created_by: text(obj, "createdBy"),
    })
}

/// Parse the `{inspection_number, index}` pair of a delete request.
pub fn parse_key(body: &Value) -> Result<AnomalyKey, CoreError> {
    let required = || CoreError::Validation("inspection_number and index required".to_string());

    let obj = body.as_object().ok_or_else(required)?;
    let inspection_number = text(obj, "inspection_number")
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(required)?;
    let idx = integer(obj, "index")
        .map_err(CoreError::Validation)?
        .or(integer(obj, "idx").map_err(CoreError::Validation)?)
        .ok_or_else(required)?;

    Ok(AnomalyKey {
        inspection_number,
        idx,
    })
}

/// `deletedBy` of a soft-delete request, if given.
pub fn deleted_by(body: &Value) -> Option<String> {
    body.as_object().and_then(|obj| text(obj, "deletedBy"))
}

// ---------------------------------------------------------------------------
// Field readers
// ---------------------------------------------------------------------------

fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn integer(obj: &Map<String, Value>, key: &str) -> Result<Option<i32>, String> {
    let parsed = match obj.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };
    parsed
        .and_then(|n| i32::try_from(n).ok())
        .map(Some)
        .ok_or_else(|| format!("{key} must be an integer"))
}

fn float(obj: &Map<String, Value>, key: &str) -> Result<Option<f32>, String> {
    let parsed = match obj.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    parsed
        .map(|f| Some(f as f32))
        .ok_or_else(|| format!("{key} must be a number"))
}

fn flag(obj: &Map<String, Value>, key: &str) -> bool {
    match obj.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_mixed_types() {
        let body = json!({
            "anomalies": [
                {
                    "inspection_number": "INS-7",
                    "index": "2",
                    "label": "hotspot",
                    "coords": [10, 20, 30, 40],
                    "confidence": 0.9,
                    "severity": "high",
                    "areaFrac": "0.015",
                    "isManual": "true",
                    "createdBy": "inspector1"
                },
                {"inspection_number": 42, "idx": 3}
            ]
        });

        let drafts = parse_insert_payload(&body).unwrap();
        assert_eq!(drafts.len(), 2);

        let a = &drafts[0];
        assert_eq!(a.inspection_number, "INS-7");
        assert_eq!(a.idx, 2);
        assert_eq!(a.coords, Some(json!([10, 20, 30, 40])));
        assert_eq!(a.confidence, Some(0.9));
        assert_eq!(a.area_frac, Some(0.015));
        assert!(a.is_manual);

        let b = &drafts[1];
        assert_eq!(b.inspection_number, "42");
        assert_eq!(b.idx, 3);
        assert!(!b.is_manual);
        assert!(b.label.is_none());
    }

    #[test]
    fn non_array_is_rejected() {
        let err = parse_insert_payload(&json!({"anomalies": {}})).unwrap_err();
        assert_matches!(err, CoreError::Validation(m) if m == "anomalies must be an array");
    }

    #[test]
    fn non_object_items_are_skipped() {
        let body = json!({"anomalies": [1, "x", {"inspection_number": "A", "index": 0}]});
        assert_eq!(parse_insert_payload(&body).unwrap().len(), 1);
    }

    #[test]
    fn missing_index_names_position() {
        let body = json!({"anomalies": [
            {"inspection_number": "A", "index": 0},
            {"inspection_number": "A"}
        ]});
        let err = parse_insert_payload(&body).unwrap_err();
        assert_matches!(err, CoreError::Validation(m) if m.starts_with("anomalies[1]"));
    }

    #[test]
    fn bad_number_is_a_validation_error() {
        let body = json!({"anomalies": [{"inspection_number": "A", "index": "two"}]});
        assert_matches!(parse_insert_payload(&body), Err(CoreError::Validation(_)));
    }

    #[test]
    fn key_requires_both_fields() {
        let key = parse_key(&json!({"inspection_number": "A", "index": 5})).unwrap();
        assert_eq!(key.idx, 5);

        let err = parse_key(&json!({"inspection_number": "A"})).unwrap_err();
        assert_matches!(err, CoreError::Validation(m) if m == "inspection_number and index required");
        assert!(parse_key(&json!({"index": 1})).is_err());
    }

    #[test]
    fn deleted_by_is_optional() {
        assert_eq!(deleted_by(&json!({"deletedBy": "sup"})).as_deref(), Some("sup"));
        assert!(deleted_by(&json!({})).is_none());
    }
}
