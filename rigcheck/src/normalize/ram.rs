//! RAM standard parsing.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use super::values::{as_u32, field, text_field};
use crate::model::{RamStandard, RamSupportMap, RamType};

lazy_static! {
    static ref RAM_STANDARD: Regex =
        Regex::new(r"(?i)\bDDR([345])(?:\s*SDRAM)?[\s\-_/@:]*(\d{3,5})(?:\D|$)").unwrap();
    static ref RAM_TYPE: Regex = Regex::new(r"(?i)\bDDR\s*([345])\b").unwrap();
}

const TYPE_KEYS: [&str; 4] = ["type", "ram_type", "generation", "kind"];
const SPEED_KEYS: [&str; 6] = ["mts", "speed_mts", "speed", "frequency", "speed_mhz", "mhz"];
const TEXT_KEYS: [&str; 5] = ["display_name", "standard", "name", "label", "base"];

/// Parse a RAM standard from free text (`"DDR4-3200"`, `"DDR5 6000 MT/s"`)
/// or from a structured record (`{"type": "DDR4", "mts": 3200}`).
///
/// Returns `None` when no type and speed pair can be extracted; callers treat
/// that as unknown.
pub fn parse_ram_standard(raw: &Value) -> Option<RamStandard> {
    match raw {
        Value::String(text) => parse_ram_text(text),
        Value::Object(_) => parse_ram_object(raw),
        _ => None,
    }
}

/// Parse the textual form only.
pub fn parse_ram_text(text: &str) -> Option<RamStandard> {
    let caps = RAM_STANDARD.captures(text)?;
    let generation = caps.get(1)?.as_str().chars().next()?;
    let ram_type = RamType::from_generation(generation)?;
    let speed_mts: u32 = caps.get(2)?.as_str().parse().ok()?;
    if speed_mts == 0 {
        return None;
    }
    Some(RamStandard::new(ram_type, speed_mts))
}

/// Parse a bare RAM type (`"DDR4"`, `"ddr5"`).
pub fn parse_ram_type(text: &str) -> Option<RamType> {
    let caps = RAM_TYPE.captures(text)?;
    let generation = caps.get(1)?.as_str().chars().next()?;
    RamType::from_generation(generation)
}

fn parse_ram_object(raw: &Value) -> Option<RamStandard> {
    let ram_type = text_field(raw, &TYPE_KEYS).and_then(|t| parse_ram_type(&t));
    let speed = field(raw, &SPEED_KEYS)
        .and_then(as_u32)
        .filter(|speed| *speed > 0);

    if let (Some(ram_type), Some(speed_mts)) = (ram_type, speed) {
        return Some(RamStandard::new(ram_type, speed_mts));
    }

    TEXT_KEYS
        .iter()
        .filter_map(|key| raw.get(*key))
        .find_map(|value| match value {
            Value::String(text) => parse_ram_text(text),
            Value::Object(_) => parse_ram_object(value),
            _ => None,
        })
}

/// Reduce supported standards to the highest speed per type.
///
/// This is a max-reduce, so the result does not depend on entry order.
pub fn build_ram_support_map<I>(entries: I) -> RamSupportMap
where
    I: IntoIterator<Item = RamStandard>,
{
    let mut map = RamSupportMap::new();
    for entry in entries {
        map.entry(entry.ram_type)
            .and_modify(|max| *max = (*max).max(entry.speed_mts))
            .or_insert(entry.speed_mts);
    }
    map
}

/// Read a supported-RAM field: an array of texts or records, or a comma
/// separated string. Unparsable entries are skipped.
pub fn ram_support_from_raw(raw: &Value) -> RamSupportMap {
    let entries: Vec<RamStandard> = match raw {
        Value::Array(items) => items.iter().filter_map(parse_logged).collect(),
        Value::String(text) => text
            .split(|c| c == ',' || c == ';')
            .filter_map(|part| {
                let parsed = parse_ram_text(part);
                if parsed.is_none() && !part.trim().is_empty() {
                    tracing::debug!("Skipping unparsable RAM standard '{}'", part.trim());
                }
                parsed
            })
            .collect(),
        Value::Object(_) => parse_logged(raw).into_iter().collect(),
        _ => Vec::new(),
    };
    build_ram_support_map(entries)
}

fn parse_logged(raw: &Value) -> Option<RamStandard> {
    let parsed = parse_ram_standard(raw);
    if parsed.is_none() {
        tracing::debug!("Skipping unparsable RAM standard {}", raw);
    }
    parsed
}
