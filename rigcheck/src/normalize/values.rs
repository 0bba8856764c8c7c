//! Loose value readers for raw catalog records.
//!
//! Catalog records come from several sources and disagree on shapes: a
//! socket may be `"AM5"` or `{"name": "AM5"}`, a wattage may be `850` or
//! `"850 W"`. These helpers read such values without ever failing.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref NUMBER: Regex = Regex::new(r"-?\d+(?:[.,]\d+)?").unwrap();
}

/// Keys that carry a display text when a value arrives as an object.
const TEXT_KEYS: [&str; 6] = ["name", "display_name", "type", "category", "label", "value"];

/// First non-null value under any of `keys`.
pub fn field<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let object = raw.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
}

/// Read a number from a JSON number or from the first number in a string.
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let found = NUMBER.find(s)?;
            found.as_str().replace(',', ".").parse::<f64>().ok()
        }
        _ => None,
    }
}

/// Non-negative integer reading; rejects negatives and overflow.
pub fn as_u32(value: &Value) -> Option<u32> {
    let number = as_f64(value)?;
    if number < 0.0 || number > u32::MAX as f64 {
        return None;
    }
    Some(number.round() as u32)
}

pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Some(true),
            "false" | "no" | "n" | "0" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Display text of a value: trimmed string, number, or an object's name.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Object(_) => field(value, &TEXT_KEYS).and_then(as_text),
        _ => None,
    }
}

/// A list of texts from an array, or a comma/slash separated string.
pub fn text_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(as_text).collect(),
        Value::String(s) => s
            .split(|c| c == ',' || c == '/' || c == ';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Object(_) => as_text(value).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// Read a field as f64.
pub fn f64_field(raw: &Value, keys: &[&str]) -> Option<f64> {
    field(raw, keys).and_then(as_f64)
}

/// Read a field as u32.
pub fn u32_field(raw: &Value, keys: &[&str]) -> Option<u32> {
    field(raw, keys).and_then(as_u32)
}

/// Read a field as text.
pub fn text_field(raw: &Value, keys: &[&str]) -> Option<String> {
    field(raw, keys).and_then(as_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_as_f64_reads_strings() {
        assert_eq!(as_f64(&json!(850)), Some(850.0));
        assert_eq!(as_f64(&json!("850 W")), Some(850.0));
        assert_eq!(as_f64(&json!("PCIe 4.0")), Some(4.0));
        assert_eq!(as_f64(&json!("Gen 5")), Some(5.0));
        assert_eq!(as_f64(&json!("3,5")), Some(3.5));
        assert_eq!(as_f64(&json!("n/a")), None);
        assert_eq!(as_f64(&json!(null)), None);
    }

    #[test]
    fn test_as_u32_rejects_negative() {
        assert_eq!(as_u32(&json!(-3)), None);
        assert_eq!(as_u32(&json!("16GB")), Some(16));
    }

    #[test]
    fn test_as_text_from_object() {
        assert_eq!(as_text(&json!({"name": "AM5"})), Some("AM5".to_string()));
        assert_eq!(as_text(&json!("  ATX ")), Some("ATX".to_string()));
        assert_eq!(as_text(&json!("")), None);
        assert_eq!(as_text(&json!([1, 2])), None);
    }

    #[test]
    fn test_text_list_shapes() {
        assert_eq!(text_list(&json!("ATX, Micro-ATX")), vec!["ATX", "Micro-ATX"]);
        assert_eq!(
            text_list(&json!([{"name": "ATX"}, "ITX", null])),
            vec!["ATX", "ITX"]
        );
        assert!(text_list(&json!(42)).is_empty());
    }

    #[test]
    fn test_field_skips_null() {
        let raw = json!({"socket": null, "socket_name": "LGA1700"});
        assert_eq!(
            text_field(&raw, &["socket", "socket_name"]),
            Some("LGA1700".to_string())
        );
        assert!(field(&json!("not an object"), &["socket"]).is_none());
    }
}
