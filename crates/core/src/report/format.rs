//! Value formatting shared by every report section.

use chrono::{NaiveDate, NaiveTime};

/// Rendered in place of any missing value.
pub const PLACEHOLDER: &str = "N/A";

pub fn text(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// `dd/mm/yyyy`
pub fn date(value: Option<NaiveDate>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |d| d.format("%d/%m/%Y").to_string())
}

/// `HH:MM`
pub fn time(value: Option<NaiveTime>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |t| t.format("%H:%M").to_string())
}

/// Two decimal places.
pub fn float(value: Option<f32>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |f| format!("{f:.2}"))
}

pub fn pass_fail(value: Option<bool>) -> String {
    match value {
        Some(true) => "PASS".to_string(),
        Some(false) => "FAIL".to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn yes_no(value: Option<bool>) -> String {
    match value {
        Some(true) => "Yes".to_string(),
        Some(false) => "No".to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Restrict text to printable ASCII, which the standard PDF fonts can
/// always encode. Anything else becomes `?`; tabs and newlines become spaces.
pub fn ascii(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            ' '..='~' => c,
            '\t' | '\n' | '\r' => ' ',
            _ => '?',
        })
        .collect()
}

/// Keep `[A-Za-z0-9._-]`, replacing everything else with `_`.
pub fn file_name_part(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_for_missing_values() {
        assert_eq!(text(None), PLACEHOLDER);
        assert_eq!(text(Some("  ")), PLACEHOLDER);
        assert_eq!(date(None), PLACEHOLDER);
        assert_eq!(time(None), PLACEHOLDER);
        assert_eq!(float(None), PLACEHOLDER);
        assert_eq!(pass_fail(None), PLACEHOLDER);
    }

    #[test]
    fn formats_present_values() {
        assert_eq!(date(NaiveDate::from_ymd_opt(2024, 1, 5)), "05/01/2024");
        assert_eq!(time(NaiveTime::from_hms_opt(9, 7, 30)), "09:07");
        assert_eq!(float(Some(3.14159)), "3.14");
        assert_eq!(pass_fail(Some(true)), "PASS");
        assert_eq!(pass_fail(Some(false)), "FAIL");
        assert_eq!(yes_no(Some(true)), "Yes");
    }

    #[test]
    fn ascii_replaces_unencodable_characters() {
        assert_eq!(ascii("Ω-rated\tunit"), "?-rated unit");
        assert_eq!(ascii("plain (text)"), "plain (text)");
    }

    #[test]
    fn file_name_part_is_safe() {
        assert_eq!(file_name_part("SN/12 34"), "SN_12_34");
        assert_eq!(file_name_part("TX-01.a_b"), "TX-01.a_b");
    }
}
