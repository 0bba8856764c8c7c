//! PCIe generation extraction and connector/slot lists.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::values::{as_f64, as_text, field, u32_field};
use crate::model::Connector;

lazy_static! {
    static ref PCIE_VERSION: Regex =
        Regex::new(r"(?i)(?:pci-?e|gen)\s*(\d{1,2}(?:\.\d)?)").unwrap();
    static ref LANES: Regex = Regex::new(r"(?i)\bx\s*(\d{1,2})\b").unwrap();
}

const VERSION_KEYS: [&str; 5] = ["version", "pcie_version", "pcie_max_gen", "pcie_gen", "gen"];
const CHIP_VERSION_KEYS: [&str; 4] = ["pcie_max_gen", "pcie_version", "pcie_gen", "pcie"];

/// Which list a PCIe generation is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PcieRole {
    /// Motherboard expansion slots (connector category `PCIe`).
    Slot,
    /// Motherboard M.2 slots wired to PCIe lanes.
    M2Slot,
    /// The GPU's embedded graphics-chip record.
    GraphicsChip,
    /// A storage drive's connector.
    Storage,
    /// A CPU's supported-PCIe list.
    CpuSupport,
}

/// Highest PCIe generation found for `role` in a raw record, or `None`
/// when nothing typed is present.
pub fn extract_pcie_version(raw: &Value, role: PcieRole) -> Option<f64> {
    match role {
        PcieRole::Slot => max_version(
            connectors_from_raw(raw)
                .iter()
                .filter(|c| c.is_pcie_slot())
                .filter_map(|c| c.version),
        ),
        PcieRole::M2Slot => max_version(
            connectors_from_raw(raw)
                .iter()
                .filter(|c| c.is_m2() && c.mentions_pcie())
                .filter_map(|c| c.version),
        ),
        PcieRole::GraphicsChip => {
            let chip = field(raw, &["graphics_chip", "chip"]).filter(|c| c.is_object());
            chip.and_then(chip_version).or_else(|| chip_version(raw))
        }
        PcieRole::Storage => {
            let connector = field(raw, &["connector", "interface", "interface_info"])?;
            match connector {
                Value::Object(_) => {
                    let parsed = connector_from_raw(connector)?;
                    if parsed.mentions_pcie() {
                        parsed.version
                    } else {
                        None
                    }
                }
                Value::String(text) => {
                    let lower = text.to_lowercase();
                    if lower.contains("pci") || lower.contains("nvme") {
                        version_from_text(text)
                    } else {
                        None
                    }
                }
                _ => None,
            }
        }
        PcieRole::CpuSupport => {
            let listed = field(raw, &["supported_pcie", "pcie_support"]).and_then(|list| {
                match list {
                    Value::Array(items) => max_version(items.iter().filter_map(entry_version)),
                    other => entry_version(other),
                }
            });
            listed.or_else(|| field(raw, &VERSION_KEYS[1..]).and_then(version_value))
        }
    }
}

fn chip_version(raw: &Value) -> Option<f64> {
    field(raw, &CHIP_VERSION_KEYS)
        .and_then(version_value)
        .or_else(|| match field(raw, &["supported_pcie"])? {
            Value::Array(items) => max_version(items.iter().filter_map(entry_version)),
            other => entry_version(other),
        })
}

fn entry_version(entry: &Value) -> Option<f64> {
    match entry {
        Value::Object(_) => field(entry, &VERSION_KEYS).and_then(version_value),
        other => version_value(other),
    }
}

/// Read a version from a number, `"4.0"`, `"PCIe 5.0"` or `"Gen4"`.
pub fn version_value(value: &Value) -> Option<f64> {
    let version = match value {
        Value::String(text) => version_from_text(text).or_else(|| as_f64(value)),
        other => as_f64(other),
    }?;
    (1.0..=10.0).contains(&version).then_some(version)
}

fn version_from_text(text: &str) -> Option<f64> {
    PCIE_VERSION
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn max_version<I: Iterator<Item = f64>>(versions: I) -> Option<f64> {
    versions.fold(None, |best, v| match best {
        Some(b) if b >= v => Some(b),
        _ => Some(v),
    })
}

/// Read a connector list from a record (`connectors`, `slots`, `ports`).
///
/// Entries may be flat (`{category, version, lanes, quantity}`), wrapped
/// (`{connector: {...}, quantity}`) or plain labels (`"PCIe 4.0 x16"`).
/// Zero-quantity and unrecognizable entries are dropped.
pub fn connectors_from_raw(raw: &Value) -> Vec<Connector> {
    match field(raw, &["connectors", "slots", "ports"]) {
        Some(Value::Array(items)) => items.iter().filter_map(connector_from_raw).collect(),
        _ => Vec::new(),
    }
}

/// Parse a single connector entry.
pub fn connector_from_raw(entry: &Value) -> Option<Connector> {
    match entry {
        Value::Object(_) => {
            let inner = field(entry, &["connector"]).filter(|c| c.is_object()).unwrap_or(entry);
            let category = field(inner, &["category", "name", "type"]).and_then(as_text)?;
            let quantity = u32_field(entry, &["quantity", "qty", "count"]).unwrap_or(1);
            if quantity == 0 {
                return None;
            }
            Some(Connector {
                category: canonical_category(&category),
                version: field(inner, &VERSION_KEYS).and_then(version_value),
                lanes: u32_field(inner, &["lanes", "width"]),
                quantity,
            })
        }
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(Connector {
                category: canonical_category(text),
                version: version_from_text(text),
                lanes: LANES
                    .captures(text)
                    .and_then(|caps| caps.get(1))
                    .and_then(|m| m.as_str().parse().ok()),
                quantity: 1,
            })
        }
        _ => None,
    }
}

/// Collapse connector labels onto the category names used in comparisons.
fn canonical_category(text: &str) -> String {
    let lower = text.to_lowercase();
    let is_pcie = lower.contains("pcie") || lower.contains("pci-e") || lower.contains("nvme");
    if lower.contains("power") || lower.contains("pin") {
        return text.trim().to_string();
    }
    if lower.contains("m.2") || lower.contains("m2 ") || lower == "m2" {
        if is_pcie {
            return "M.2 PCIe".to_string();
        }
        if lower.contains("sata") {
            return "M.2 SATA".to_string();
        }
        return "M.2".to_string();
    }
    if is_pcie {
        return "PCIe".to_string();
    }
    if lower.contains("sata") {
        return "SATA".to_string();
    }
    text.trim().to_string()
}
