//! Extraction of per-box records from a stored analysis result.

use serde_json::{Map, Value};

use crate::thermal::parse::as_f64;

/// One detected region from `result.boxInfo`, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxRecord {
    /// Position of the entry within `boxInfo`.
    pub box_index: i32,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub area_frac: f64,
    pub aspect: f64,
    pub overlap_center_frac: f64,
    pub label: String,
    pub box_fault: String,
}

/// Read `boxInfo` from an analysis result. Anything other than an array
/// yields no records, and entries that are not objects are skipped.
/// Missing or non-numeric coordinates become 0 and missing strings become
/// empty.
pub fn extract_box_records(result: &Value) -> Vec<BoxRecord> {
    let Some(items) = result.get("boxInfo").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(pos, item)| {
            let obj = item.as_object()?;
            Some(BoxRecord {
                box_index: pos as i32,
                x: int(obj, "x"),
                y: int(obj, "y"),
                w: int(obj, "w"),
                h: int(obj, "h"),
                area_frac: real(obj, "areaFrac"),
                aspect: real(obj, "aspect"),
                overlap_center_frac: real(obj, "overlapCenterFrac"),
                label: string(obj, "label"),
                box_fault: string(obj, "boxFault"),
            })
        })
        .collect()
}

fn int(obj: &Map<String, Value>, key: &str) -> i32 {
    obj.get(key).and_then(as_f64).map(|f| f as i32).unwrap_or(0)
}

fn real(obj: &Map<String, Value>, key: &str) -> f64 {
    obj.get(key).and_then(as_f64).unwrap_or(0.0)
}

fn string(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn records_follow_box_info_order() {
        let result = json!({
            "boxInfo": [
                {"x": 10, "y": 20, "w": 5, "h": 6, "areaFrac": 0.02, "aspect": 1.2,
                 "overlapCenterFrac": 0.5, "label": "hot", "boxFault": "loose_joint"},
                {"x": 1.9}
            ]
        });

        let records = extract_box_records(&result);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].box_index, 0);
        assert_eq!((records[0].x, records[0].y, records[0].w, records[0].h), (10, 20, 5, 6));
        assert_eq!(records[0].box_fault, "loose_joint");

        let second = &records[1];
        assert_eq!(second.box_index, 1);
        assert_eq!(second.x, 1);
        assert_eq!(second.h, 0);
        assert_eq!(second.area_frac, 0.0);
        assert_eq!(second.label, "");
    }

    #[test]
    fn malformed_box_info_yields_nothing() {
        assert!(extract_box_records(&json!({"boxInfo": "oops"})).is_empty());
        assert!(extract_box_records(&json!({})).is_empty());
        assert!(extract_box_records(&json!(null)).is_empty());
    }

    #[test]
    fn non_object_entries_keep_positions_of_others() {
        let records = extract_box_records(&json!({"boxInfo": [7, {"x": 3}]}));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].box_index, 1);
    }
}
