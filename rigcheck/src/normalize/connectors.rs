//! Power connector classification and pin-count extraction.
//!
//! A `6+2` connector is one physical plug and normalizes to a single 8-pin
//! entry. Entries whose pin count cannot be read stay unknown; they are never
//! counted as zero-pin connectors. Catalog records that carry no pin field
//! keep the pin count of a power connector in `lanes`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::values::{as_bool, as_text, as_u32, field, u32_field};
use crate::model::{BoardPower, PinSet};
use crate::power::MAX_MATCH_CONNECTORS;

lazy_static! {
    static ref SPLIT_PINS: Regex = Regex::new(r"(\d{1,2})\s*\+\s*(\d{1,2})").unwrap();
    static ref PIN_COUNT: Regex = Regex::new(r"(?i)(\d{1,2})\s*-?\s*pins?\b").unwrap();
    static ref HIGH_POWER: Regex = Regex::new(r"(?i)12v\s*hpwr|12v-?\s*2\s*x\s*6").unwrap();
    static ref QUANTITY_PREFIX: Regex = Regex::new(r"(?i)^\s*(\d{1,2})\s*[x×]\s+").unwrap();
}

/// 12VHPWR and 12V-2x6 carry twelve power pins and four sense pins.
const HIGH_POWER_PINS: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerConnectorKind {
    /// Graphics card power (6-pin, 8-pin, 6+2, 12VHPWR).
    PciePower,
    /// CPU power (EPS 4+4 / 8-pin).
    Eps,
    /// Mainboard power (ATX 20+4 / 24-pin).
    Atx,
}

/// A classified power connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorPins {
    pub kind: PowerConnectorKind,
    /// `None` when the connector is recognised but its pin count is not.
    pub pins: Option<u32>,
    pub quantity: u32,
}

/// Classify a power connector and read its pin count.
///
/// Accepts records (`{"category": "PCIe Power", "pins": 8, "quantity": 2}`,
/// `{"connector": {...}, "quantity": 1}`) and labels (`"PCIe 6+2-pin"`,
/// `"2x 8-pin PCI-E"`). Returns `None` for anything that is not a power
/// connector, for expansion slots and for zero-quantity entries.
pub fn extract_connector_pins(raw: &Value) -> Option<ConnectorPins> {
    match raw {
        Value::Object(_) => {
            let inner = field(raw, &["connector"]).filter(|c| c.is_object()).unwrap_or(raw);
            let label = ["category", "name", "type", "label"]
                .iter()
                .filter_map(|key| inner.get(*key).and_then(as_text))
                .collect::<Vec<_>>()
                .join(" ");
            let kind = classify(&label)?;

            let flagged = field(inner, &["is_power"]).and_then(as_bool).unwrap_or(false);
            let has_lanes = field(inner, &["lanes"]).is_some();
            if has_lanes && !flagged && !has_power_marker(&label) {
                return None;
            }

            let quantity = u32_field(raw, &["quantity", "qty", "count"]).unwrap_or(1);
            if quantity == 0 {
                return None;
            }

            let pins = field(inner, &["pins", "pin_count", "pin"])
                .and_then(pins_value)
                .or_else(|| pins_from_label(&label))
                .or_else(|| u32_field(inner, &["lanes"]).filter(|p| *p > 0));

            Some(ConnectorPins { kind, pins, quantity })
        }
        Value::String(text) => {
            let (quantity, label) = match QUANTITY_PREFIX.captures(text) {
                Some(caps) => {
                    let quantity = caps.get(1)?.as_str().parse::<u32>().ok()?;
                    (quantity, &text[caps.get(0)?.end()..])
                }
                None => (1, text.as_str()),
            };
            if quantity == 0 {
                return None;
            }
            let kind = classify(label)?;
            Some(ConnectorPins {
                kind,
                pins: pins_from_label(label),
                quantity,
            })
        }
        _ => None,
    }
}

fn classify(label: &str) -> Option<PowerConnectorKind> {
    let lower = label.to_lowercase();
    if lower.contains("pcie")
        || lower.contains("pci-e")
        || lower.contains("pci express")
        || HIGH_POWER.is_match(&lower)
    {
        return Some(PowerConnectorKind::PciePower);
    }
    if lower.contains("eps") || lower.contains("cpu") {
        return Some(PowerConnectorKind::Eps);
    }
    if lower.contains("atx") || lower.contains("mainboard") || lower.contains("20+4") {
        return Some(PowerConnectorKind::Atx);
    }
    None
}

fn has_power_marker(label: &str) -> bool {
    let lower = label.to_lowercase();
    lower.contains("power")
        || lower.contains("pin")
        || SPLIT_PINS.is_match(&lower)
        || HIGH_POWER.is_match(&lower)
}

/// A pin field: a number, `"8"`, or a label such as `"6+2"`.
fn pins_value(value: &Value) -> Option<u32> {
    match value {
        Value::String(text) => pins_from_label(text).or_else(|| as_u32(value)),
        other => as_u32(other),
    }
    .filter(|p| *p > 0)
}

fn pins_from_label(label: &str) -> Option<u32> {
    if let Some(caps) = SPLIT_PINS.captures(label) {
        let a: u32 = caps.get(1)?.as_str().parse().ok()?;
        let b: u32 = caps.get(2)?.as_str().parse().ok()?;
        return Some(a + b).filter(|p| *p > 0);
    }
    if HIGH_POWER.is_match(label) {
        return Some(HIGH_POWER_PINS);
    }
    PIN_COUNT
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|p| *p > 0)
}

/// Every classified power connector in a list, a `name -> quantity` map or
/// a comma separated label string.
pub fn power_connectors_from_raw(raw: &Value) -> Vec<ConnectorPins> {
    match raw {
        Value::Array(items) => items.iter().filter_map(extract_connector_pins).collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(name, value)| match value {
                Value::Object(_) => {
                    let mut entry = value.clone();
                    if let Some(obj) = entry.as_object_mut() {
                        obj.entry("name").or_insert_with(|| json!(name));
                    }
                    extract_connector_pins(&entry)
                }
                other => extract_connector_pins(&json!({"name": name, "quantity": other})),
            })
            .collect(),
        Value::String(text) => text
            .split(|c| c == ',' || c == ';')
            .filter_map(|part| extract_connector_pins(&json!(part.trim())))
            .collect(),
        _ => Vec::new(),
    }
}

/// Pin multiset of the `kind` connectors in a connector field.
///
/// A missing field is unknown. A present field whose `kind` entries all have
/// readable pin counts becomes a known multiset, one entry per physical
/// connector; a single unreadable entry, or more connectors than the power
/// matcher searches, makes the whole set unknown.
pub fn power_pins(raw: Option<&Value>, kind: PowerConnectorKind) -> PinSet {
    match raw {
        Some(raw) => pins_of_kind(&power_connectors_from_raw(raw), kind),
        None => PinSet::Unknown,
    }
}

/// PCIe power pin multiset of a connector field.
pub fn pcie_power_pins(raw: Option<&Value>) -> PinSet {
    power_pins(raw, PowerConnectorKind::PciePower)
}

/// EPS and ATX connectors of a connector field. A kind with no entry at all
/// stays `None`.
pub fn board_power_from_raw(raw: Option<&Value>) -> BoardPower {
    let Some(raw) = raw else {
        return BoardPower::default();
    };
    let connectors = power_connectors_from_raw(raw);
    let listed = |kind: PowerConnectorKind| {
        connectors
            .iter()
            .any(|c| c.kind == kind)
            .then(|| pins_of_kind(&connectors, kind))
    };
    BoardPower {
        eps: listed(PowerConnectorKind::Eps),
        atx: listed(PowerConnectorKind::Atx),
    }
}

fn pins_of_kind(connectors: &[ConnectorPins], kind: PowerConnectorKind) -> PinSet {
    let mut pins = Vec::new();
    for connector in connectors.iter().filter(|c| c.kind == kind) {
        let Some(count) = connector.pins else {
            tracing::debug!("{:?} connector with unreadable pin count; pins unknown", kind);
            return PinSet::Unknown;
        };
        let quantity = connector.quantity as usize;
        if quantity > MAX_MATCH_CONNECTORS.saturating_sub(pins.len()) {
            tracing::debug!(
                "more than {} {:?} connectors listed; pins unknown",
                MAX_MATCH_CONNECTORS,
                kind
            );
            return PinSet::Unknown;
        }
        pins.extend(std::iter::repeat(count).take(quantity));
    }
    PinSet::Known(pins)
}
