//! Raw catalog record to canonical component.
//!
//! This is the only place that knows the alternate key names catalog sources
//! use. Downstream code sees canonical structs and nothing else.

use serde_json::Value;

use super::connectors::{board_power_from_raw, pcie_power_pins};
use super::pcie::{connector_from_raw, connectors_from_raw, extract_pcie_version, PcieRole};
use super::ram::{parse_ram_standard, ram_support_from_raw};
use super::values::{as_bool, as_text, f64_field, field, text_field, text_list, u32_field};
use crate::model::*;

const ID_KEYS: [&str; 3] = ["id", "pk", "uuid"];
const NAME_KEYS: [&str; 4] = ["name", "display_name", "model", "title"];
const SOCKET_KEYS: [&str; 3] = ["socket", "socket_name", "socket_type"];
const RAM_SUPPORT_KEYS: [&str; 3] = ["supported_ram", "ram_support", "memory_support"];
const FORM_FACTOR_KEYS: [&str; 2] = ["form_factor", "format"];
const TDP_KEYS: [&str; 3] = ["tdp", "tdp_w", "tdp_watts"];

/// Normalize one raw record of a known category.
pub fn normalize_component(category: Category, raw: &Value) -> Component {
    match category {
        Category::Cpu => Component::Cpu(normalize_cpu(raw)),
        Category::Mobo => Component::Mobo(normalize_motherboard(raw)),
        Category::Ram => Component::Ram(normalize_ram(raw)),
        Category::Gpu => Component::Gpu(normalize_gpu(raw)),
        Category::Psu => Component::Psu(normalize_psu(raw)),
        Category::Mem => Component::Mem(normalize_storage(raw)),
        Category::Chassis => Component::Chassis(normalize_chassis(raw)),
    }
}

/// Normalize a raw build document.
///
/// Category keys accept their aliases (`motherboard`, `storage`, `case`).
/// A `null` or empty slot is unselected. RAM and storage may be arrays and
/// are folded into one effective unit; other categories keep the first
/// entry of an array.
pub fn normalize_build(raw: &Value) -> Build {
    let mut build = Build::new();
    for category in Category::ALL {
        let keys: &[&str] = match category {
            Category::Cpu => &["cpu"],
            Category::Mobo => &["mobo", "motherboard"],
            Category::Ram => &["ram"],
            Category::Gpu => &["gpu"],
            Category::Psu => &["psu"],
            Category::Mem => &["mem", "storage"],
            Category::Chassis => &["chassis", "case"],
        };
        let Some(slot) = field(raw, keys) else {
            continue;
        };

        let records: Vec<&Value> = match slot {
            Value::Array(items) => items.iter().filter(|item| item.is_object()).collect(),
            Value::Object(_) => vec![slot],
            other => {
                tracing::debug!("Ignoring non-record {} slot: {}", category, other);
                continue;
            }
        };

        let component = match category {
            Category::Ram => fold_ram(records.iter().map(|r| normalize_ram(r)).collect())
                .map(Component::Ram),
            Category::Mem => fold_storage(records.iter().map(|r| normalize_storage(r)).collect())
                .map(Component::Mem),
            _ => records.first().map(|r| normalize_component(category, r)),
        };
        if let Some(component) = component {
            build.select(component);
        }
    }
    build
}

fn info_from_raw(raw: &Value) -> ComponentInfo {
    ComponentInfo {
        id: text_field(raw, &ID_KEYS).unwrap_or_default(),
        name: text_field(raw, &NAME_KEYS).unwrap_or_default(),
        manufacturer: text_field(raw, &["manufacturer", "brand", "vendor"]),
        price: f64_field(raw, &["price", "cost"]).filter(|p| *p >= 0.0),
    }
}

fn normalize_cpu(raw: &Value) -> Cpu {
    Cpu {
        info: info_from_raw(raw),
        socket: text_field(raw, &SOCKET_KEYS),
        tdp_w: u32_field(raw, &TDP_KEYS),
        p_cores: u32_field(raw, &["p_cores", "performance_cores", "cores"]),
        e_cores: u32_field(raw, &["e_cores", "efficiency_cores"]),
        ram_support: field(raw, &RAM_SUPPORT_KEYS)
            .map(ram_support_from_raw)
            .unwrap_or_default(),
        max_memory_gb: u32_field(raw, &["max_memory_gb", "max_memory", "max_ram_capacity"]),
        pcie_version: extract_pcie_version(raw, PcieRole::CpuSupport),
        integrated_gpu: field(raw, &["integrated_gpu", "igpu", "has_igpu"])
            .map(integrated_gpu_flag)
            .unwrap_or(false),
        tier_score: f64_field(raw, &["tier_score", "tier"]),
    }
}

/// `true`, `"yes"` and a named iGPU (`"Intel UHD 770"`) all count.
fn integrated_gpu_flag(value: &Value) -> bool {
    as_bool(value).unwrap_or_else(|| match as_text(value) {
        Some(text) => !matches!(text.to_lowercase().as_str(), "none" | "n/a" | "-"),
        None => value.is_object(),
    })
}

fn normalize_motherboard(raw: &Value) -> Motherboard {
    Motherboard {
        info: info_from_raw(raw),
        socket: text_field(raw, &SOCKET_KEYS),
        form_factor: text_field(raw, &FORM_FACTOR_KEYS),
        ram_support: field(raw, &RAM_SUPPORT_KEYS)
            .map(ram_support_from_raw)
            .unwrap_or_default(),
        max_ram_gb: u32_field(raw, &["max_ram_capacity", "max_ram_gb", "max_memory", "max_memory_gb"]),
        dimm_slots: u32_field(raw, &["dimm_slots", "ram_slots", "memory_slots"]),
        connectors: connectors_from_raw(raw),
        pcie_slot_version: extract_pcie_version(raw, PcieRole::Slot),
        m2_pcie_version: extract_pcie_version(raw, PcieRole::M2Slot),
        power_inputs: board_power_from_raw(field(raw, &["power_connectors", "connectors"])),
    }
}

fn normalize_ram(raw: &Value) -> Ram {
    let standard = field(raw, &["base", "standard", "ram_standard"])
        .and_then(parse_ram_standard)
        .or_else(|| parse_ram_standard(raw));
    let modules = u32_field(raw, &["modules", "modules_count", "module_count", "sticks"]);
    let total_gb = u32_field(raw, &["total_capacity", "total_gb", "capacity_gb", "capacity"])
        .or_else(|| {
            let per_module = u32_field(raw, &["module_capacity", "module_gb"])?;
            per_module.checked_mul(modules.unwrap_or(1))
        });
    Ram {
        info: info_from_raw(raw),
        standard,
        modules,
        total_gb,
    }
}

fn normalize_gpu(raw: &Value) -> Gpu {
    let chip_raw = field(raw, &["graphics_chip", "chip"]).filter(|c| c.is_object());
    let chip = GraphicsChip {
        name: chip_raw.and_then(|c| text_field(c, &["name", "model"])),
        pcie_version: extract_pcie_version(raw, PcieRole::GraphicsChip),
        pcie_lanes: chip_raw
            .and_then(|c| u32_field(c, &LANE_KEYS))
            .or_else(|| u32_field(raw, &LANE_KEYS)),
        tier_score: chip_raw
            .and_then(|c| f64_field(c, &["tier_score", "tier"]))
            .or_else(|| f64_field(raw, &["tier_score", "tier"])),
    };
    let power = field(raw, &["power_connectors", "power_pins", "pcie_power"])
        .or_else(|| field(raw, &["connectors"]));

    Gpu {
        info: info_from_raw(raw),
        length_mm: u32_field(raw, &["length_mm", "length"]),
        tdp_w: u32_field(raw, &TDP_KEYS),
        recommended_psu_w: u32_field(
            raw,
            &["recommended_system_power", "recommended_psu_w", "recommended_psu", "recommended_power"],
        ),
        power_pins: pcie_power_pins(power),
        chip,
    }
}

const LANE_KEYS: [&str; 4] = ["pcie_max_width", "pcie_lanes", "pcie_width", "lanes"];

fn normalize_psu(raw: &Value) -> Psu {
    let connectors = field(raw, &["connectors", "pcie_connectors", "power_connectors"]);
    Psu {
        info: info_from_raw(raw),
        wattage_w: u32_field(raw, &["wattage", "wattage_w", "power", "power_w"]),
        form_factor: text_field(raw, &FORM_FACTOR_KEYS),
        pcie_power: pcie_power_pins(connectors),
        board_power: board_power_from_raw(connectors),
    }
}

fn normalize_storage(raw: &Value) -> Storage {
    let connector = field(raw, &["connector", "interface_info"]).and_then(connector_from_raw);
    Storage {
        info: info_from_raw(raw),
        interface: storage_interface(raw, connector.as_ref()),
        capacity_gb: u32_field(raw, &["capacity_gb", "capacity", "size_gb"]),
        pcie_version: extract_pcie_version(raw, PcieRole::Storage),
        connector,
    }
}

/// Drive interface from an explicit type field, else from the connector.
fn storage_interface(raw: &Value, connector: Option<&Connector>) -> Option<StorageInterface> {
    let typed = text_field(raw, &["type", "interface", "storage_type", "kind"])
        .and_then(|text| interface_from_text(&text));
    typed.or_else(|| {
        let connector = connector?;
        if connector.mentions_pcie() {
            Some(StorageInterface::Nvme)
        } else if connector.category == "M.2 SATA" {
            Some(StorageInterface::Sata)
        } else {
            None
        }
    })
}

fn interface_from_text(text: &str) -> Option<StorageInterface> {
    let lower = text.to_lowercase();
    if lower.contains("nvme") || lower.contains("pcie") {
        Some(StorageInterface::Nvme)
    } else if lower.contains("hdd") || lower.contains("hard") {
        Some(StorageInterface::Hdd)
    } else if lower.contains("sata") || lower.contains("ssd") {
        Some(StorageInterface::Sata)
    } else {
        None
    }
}

fn normalize_chassis(raw: &Value) -> Chassis {
    Chassis {
        info: info_from_raw(raw),
        mobo_form_factors: field(
            raw,
            &["mobo_form_factor_support", "motherboard_form_factors", "mobo_form_factors"],
        )
        .map(text_list)
        .unwrap_or_default(),
        psu_form_factors: field(raw, &["psu_form_factor_support", "psu_form_factors"])
            .map(text_list)
            .unwrap_or_default(),
        max_gpu_length_mm: u32_field(raw, &["max_gpu_length_mm", "max_gpu_length", "gpu_clearance_mm"]),
    }
}

/// Comparison key for form factors: `"Micro-ATX"`, `"mATX"` and
/// `"micro atx"` all map to `MICROATX`.
pub fn form_factor_key(text: &str) -> String {
    let key: String = text
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_uppercase();
    match key.as_str() {
        "MATX" | "UATX" | "MICROATX" => "MICROATX".to_string(),
        "ITX" | "MITX" | "MINIITX" => "MINIITX".to_string(),
        "EATX" | "EXTENDEDATX" => "EATX".to_string(),
        _ => key,
    }
}

fn sum_known<I: IntoIterator<Item = Option<u32>>>(values: I) -> Option<u32> {
    values
        .into_iter()
        .try_fold(0u32, |acc, v| v.map(|v| acc.saturating_add(v)))
}

fn folded_info<'a, I: Iterator<Item = &'a ComponentInfo> + Clone>(infos: I) -> ComponentInfo {
    let ids: Vec<&str> = infos.clone().map(|i| i.id.as_str()).collect();
    let names: Vec<&str> = infos.clone().map(|i| i.name.as_str()).collect();
    let mut manufacturers = infos.clone().map(|i| i.manufacturer.clone());
    let first = manufacturers.next().flatten();
    let manufacturer = if manufacturers.all(|m| m == first) { first } else { None };
    let price = infos
        .map(|i| i.price)
        .try_fold(0.0, |acc, p| p.map(|p| acc + p));
    ComponentInfo {
        id: ids.join("+"),
        name: names.join(" + "),
        manufacturer,
        price,
    }
}

/// Fold several RAM kits into one effective kit.
///
/// Capacities and module counts add up (unknown if any kit is unknown). The
/// standard is the shared type at the lowest speed, or unknown when the
/// kits disagree on type or any kit is unknown.
pub fn fold_ram(mut kits: Vec<Ram>) -> Option<Ram> {
    if kits.len() <= 1 {
        return kits.pop();
    }
    let standards: Option<Vec<RamStandard>> = kits.iter().map(|k| k.standard).collect();
    let standard = standards.and_then(|standards| {
        let ram_type = standards.first()?.ram_type;
        if standards.iter().any(|s| s.ram_type != ram_type) {
            return None;
        }
        let speed = standards.iter().map(|s| s.speed_mts).min()?;
        Some(RamStandard::new(ram_type, speed))
    });
    Some(Ram {
        info: folded_info(kits.iter().map(|k| &k.info)),
        standard,
        modules: sum_known(kits.iter().map(|k| k.modules)),
        total_gb: sum_known(kits.iter().map(|k| k.total_gb)),
    })
}

/// Fold several drives into one: capacities add up and the fastest
/// interface wins, carrying its connector and PCIe generation.
pub fn fold_storage(mut drives: Vec<Storage>) -> Option<Storage> {
    if drives.len() <= 1 {
        return drives.pop();
    }
    let fastest = drives
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.interface.cmp(&b.interface).then(ib.cmp(ia)))
        .map(|(index, _)| index)?;
    let info = folded_info(drives.iter().map(|d| &d.info));
    let capacity_gb = sum_known(drives.iter().map(|d| d.capacity_gb));
    let best = drives.swap_remove(fastest);
    Some(Storage {
        info,
        capacity_gb,
        ..best
    })
}
