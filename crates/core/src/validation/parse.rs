//! Lenient parsing of spreadsheet-style numeric and time values.
//!
//! Nothing here fails: unparseable input becomes `None`, and the rule
//! catalog decides whether that deserves a signal.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

static HOURS_MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?)(\d{1,3}):([0-5]\d)$").expect("valid H:MM pattern"));

/// Parse a quantity written as `150`, `12.5`, or `12,5`.
pub fn parse_quantity(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse a declared working time into hours.
///
/// Accepts plain numbers (`8`, `7.5`), comma decimals (`7,5`), and `H:MM`
/// (`7:30`). Range is not checked here.
pub fn parse_hours(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if let Some(caps) = HOURS_MINUTES.captures(trimmed) {
        let hours: f64 = caps[2].parse().ok()?;
        let minutes: f64 = caps[3].parse().ok()?;
        let total = hours + minutes / 60.0;
        return Some(if caps[1].is_empty() { total } else { -total });
    }
    parse_quantity(trimmed)
}

/// Serde helper: accept a JSON number, a numeric string, or null.
///
/// Strings that do not parse resolve to `None` instead of rejecting the
/// whole payload.
pub fn deserialize_lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_quantity(&s),
        _ => None,
    })
}

/// `true` when the text is absent or only whitespace.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_accepts_dot_and_comma_decimals() {
        assert_eq!(parse_quantity("150"), Some(150.0));
        assert_eq!(parse_quantity(" 12.5 "), Some(12.5));
        assert_eq!(parse_quantity("12,5"), Some(12.5));
    }

    #[test]
    fn quantity_rejects_garbage_without_failing() {
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("   "), None);
        assert_eq!(parse_quantity("dodici"), None);
        assert_eq!(parse_quantity("NaN"), None);
        assert_eq!(parse_quantity("inf"), None);
    }

    #[test]
    fn hours_accepts_all_three_notations() {
        assert_eq!(parse_hours("8"), Some(8.0));
        assert_eq!(parse_hours("7,5"), Some(7.5));
        assert_eq!(parse_hours("7:30"), Some(7.5));
        assert_eq!(parse_hours("25:00"), Some(25.0));
        assert_eq!(parse_hours("-1:00"), Some(-1.0));
        assert_eq!(parse_hours("-2"), Some(-2.0));
    }

    #[test]
    fn hours_rejects_malformed_clock_values() {
        assert_eq!(parse_hours(""), None);
        assert_eq!(parse_hours("7:75"), None);
        assert_eq!(parse_hours("7h"), None);
        assert_eq!(parse_hours("otto"), None);
    }

    #[test]
    fn lenient_number_deserializer() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default, deserialize_with = "deserialize_lenient_number")]
            qty: Option<f64>,
        }
        let parse = |json: &str| serde_json::from_str::<Row>(json).unwrap().qty;
        assert_eq!(parse(r#"{"qty": 3}"#), Some(3.0));
        assert_eq!(parse(r#"{"qty": "4,5"}"#), Some(4.5));
        assert_eq!(parse(r#"{"qty": ""}"#), None);
        assert_eq!(parse(r#"{"qty": "n/a"}"#), None);
        assert_eq!(parse(r#"{"qty": null}"#), None);
        assert_eq!(parse(r#"{}"#), None);
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(None));
        assert!(is_blank(Some("  ")));
        assert!(!is_blank(Some("x")));
    }
}
