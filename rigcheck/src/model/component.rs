//! Canonical component records.
//!
//! Everything downstream of the normalizer works on these types only. Raw
//! catalog records never reach the remark, scoring or ranking code.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Component category, one slot of a build.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cpu,
    #[serde(alias = "motherboard")]
    Mobo,
    Ram,
    Gpu,
    Psu,
    #[serde(alias = "storage")]
    Mem,
    #[serde(alias = "case")]
    Chassis,
}

impl Category {
    /// All categories in build order.
    pub const ALL: [Category; 7] = [
        Category::Cpu,
        Category::Mobo,
        Category::Ram,
        Category::Gpu,
        Category::Psu,
        Category::Mem,
        Category::Chassis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Mobo => "mobo",
            Category::Ram => "ram",
            Category::Gpu => "gpu",
            Category::Psu => "psu",
            Category::Mem => "mem",
            Category::Chassis => "chassis",
        }
    }

    /// Human label used in remark texts.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Cpu => "CPU",
            Category::Mobo => "motherboard",
            Category::Ram => "RAM",
            Category::Gpu => "graphics card",
            Category::Psu => "power supply",
            Category::Mem => "storage drive",
            Category::Chassis => "case",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cpu" | "processor" => Ok(Category::Cpu),
            "mobo" | "motherboard" => Ok(Category::Mobo),
            "ram" | "memory" => Ok(Category::Ram),
            "gpu" | "graphics" => Ok(Category::Gpu),
            "psu" | "power_supply" => Ok(Category::Psu),
            "mem" | "storage" | "disk" => Ok(Category::Mem),
            "chassis" | "case" => Ok(Category::Chassis),
            other => Err(format!("unknown component category '{}'", other)),
        }
    }
}

/// DDR generation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RamType {
    #[serde(rename = "DDR3")]
    Ddr3,
    #[serde(rename = "DDR4")]
    Ddr4,
    #[serde(rename = "DDR5")]
    Ddr5,
}

impl RamType {
    pub fn from_generation(generation: char) -> Option<Self> {
        match generation {
            '3' => Some(RamType::Ddr3),
            '4' => Some(RamType::Ddr4),
            '5' => Some(RamType::Ddr5),
            _ => None,
        }
    }
}

impl fmt::Display for RamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RamType::Ddr3 => f.write_str("DDR3"),
            RamType::Ddr4 => f.write_str("DDR4"),
            RamType::Ddr5 => f.write_str("DDR5"),
        }
    }
}

/// A RAM standard: generation plus transfer rate in MT/s.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RamStandard {
    #[serde(rename = "type")]
    pub ram_type: RamType,
    pub speed_mts: u32,
}

impl RamStandard {
    pub fn new(ram_type: RamType, speed_mts: u32) -> Self {
        Self { ram_type, speed_mts }
    }
}

impl fmt::Display for RamStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.ram_type, self.speed_mts)
    }
}

/// Highest supported speed per RAM type.
pub type RamSupportMap = BTreeMap<RamType, u32>;

/// A multiset of power-connector pin counts, or unknown when the catalog
/// data is missing or could not be resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PinSet {
    Known(Vec<u32>),
    Unknown,
}

impl PinSet {
    pub fn is_known(&self) -> bool {
        matches!(self, PinSet::Known(_))
    }

    pub fn pins(&self) -> Option<&[u32]> {
        match self {
            PinSet::Known(pins) => Some(pins),
            PinSet::Unknown => None,
        }
    }
}

impl Default for PinSet {
    fn default() -> Self {
        PinSet::Unknown
    }
}

impl fmt::Display for PinSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinSet::Known(pins) if pins.is_empty() => f.write_str("none"),
            PinSet::Known(pins) => {
                let parts: Vec<String> = pins.iter().map(|p| format!("{}-pin", p)).collect();
                f.write_str(&parts.join(" + "))
            }
            PinSet::Unknown => f.write_str("unknown"),
        }
    }
}

/// EPS (CPU) and ATX (mainboard) power connectors.
///
/// On a motherboard these are the inputs it needs, on a power supply the
/// plugs it offers. `None` means the catalog record lists none of that kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardPower {
    pub eps: Option<PinSet>,
    pub atx: Option<PinSet>,
}

impl BoardPower {
    pub fn is_empty(&self) -> bool {
        self.eps.is_none() && self.atx.is_none()
    }
}

/// A physical connector or slot (`PCIe x16`, `M.2 PCIe`, `SATA`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Connector {
    pub category: String,
    #[serde(default)]
    pub version: Option<f64>,
    #[serde(default)]
    pub lanes: Option<u32>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl Connector {
    pub fn is_pcie_slot(&self) -> bool {
        self.category.trim().eq_ignore_ascii_case("pcie")
    }

    pub fn is_m2(&self) -> bool {
        self.category.to_lowercase().contains("m.2")
    }

    pub fn mentions_pcie(&self) -> bool {
        let lower = self.category.to_lowercase();
        lower.contains("pcie") || lower.contains("pci-e") || lower.contains("nvme")
    }
}

/// Fields every component carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ComponentInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cpu {
    #[serde(flatten)]
    pub info: ComponentInfo,
    pub socket: Option<String>,
    pub tdp_w: Option<u32>,
    pub p_cores: Option<u32>,
    pub e_cores: Option<u32>,
    #[serde(default)]
    pub ram_support: RamSupportMap,
    pub max_memory_gb: Option<u32>,
    pub pcie_version: Option<f64>,
    #[serde(default)]
    pub integrated_gpu: bool,
    pub tier_score: Option<f64>,
}

impl Cpu {
    pub fn total_cores(&self) -> Option<u32> {
        match (self.p_cores, self.e_cores) {
            (None, None) => None,
            (p, e) => Some(p.unwrap_or(0).saturating_add(e.unwrap_or(0))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Motherboard {
    #[serde(flatten)]
    pub info: ComponentInfo,
    pub socket: Option<String>,
    pub form_factor: Option<String>,
    #[serde(default)]
    pub ram_support: RamSupportMap,
    pub max_ram_gb: Option<u32>,
    pub dimm_slots: Option<u32>,
    #[serde(default)]
    pub connectors: Vec<Connector>,
    pub pcie_slot_version: Option<f64>,
    pub m2_pcie_version: Option<f64>,
    #[serde(default)]
    pub power_inputs: BoardPower,
}

impl Motherboard {
    /// Lane count of the widest PCIe expansion slot.
    pub fn widest_pcie_slot(&self) -> Option<u32> {
        self.connectors
            .iter()
            .filter(|c| c.is_pcie_slot())
            .filter_map(|c| c.lanes)
            .max()
    }

    /// Lane count of the widest M.2 slot wired to PCIe.
    pub fn widest_m2_slot(&self) -> Option<u32> {
        self.connectors
            .iter()
            .filter(|c| c.is_m2() && (c.mentions_pcie() || c.category.trim() == "M.2"))
            .filter_map(|c| c.lanes)
            .max()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ram {
    #[serde(flatten)]
    pub info: ComponentInfo,
    pub standard: Option<RamStandard>,
    pub modules: Option<u32>,
    pub total_gb: Option<u32>,
}

/// The graphics chip a card is built around.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphicsChip {
    pub name: Option<String>,
    pub pcie_version: Option<f64>,
    pub pcie_lanes: Option<u32>,
    pub tier_score: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Gpu {
    #[serde(flatten)]
    pub info: ComponentInfo,
    pub length_mm: Option<u32>,
    pub tdp_w: Option<u32>,
    pub recommended_psu_w: Option<u32>,
    #[serde(default)]
    pub power_pins: PinSet,
    #[serde(default)]
    pub chip: GraphicsChip,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Psu {
    #[serde(flatten)]
    pub info: ComponentInfo,
    pub wattage_w: Option<u32>,
    pub form_factor: Option<String>,
    #[serde(default)]
    pub pcie_power: PinSet,
    #[serde(default)]
    pub board_power: BoardPower,
}

/// Drive interface, ordered slowest to fastest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StorageInterface {
    #[serde(rename = "HDD")]
    Hdd,
    #[serde(rename = "SATA")]
    Sata,
    #[serde(rename = "NVMe")]
    Nvme,
}

impl fmt::Display for StorageInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageInterface::Hdd => f.write_str("HDD"),
            StorageInterface::Sata => f.write_str("SATA"),
            StorageInterface::Nvme => f.write_str("NVMe"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Storage {
    #[serde(flatten)]
    pub info: ComponentInfo,
    pub connector: Option<Connector>,
    pub capacity_gb: Option<u32>,
    pub interface: Option<StorageInterface>,
    pub pcie_version: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Chassis {
    #[serde(flatten)]
    pub info: ComponentInfo,
    #[serde(default)]
    pub mobo_form_factors: Vec<String>,
    #[serde(default)]
    pub psu_form_factors: Vec<String>,
    pub max_gpu_length_mm: Option<u32>,
}

/// A component of any category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum Component {
    Cpu(Cpu),
    Mobo(Motherboard),
    Ram(Ram),
    Gpu(Gpu),
    Psu(Psu),
    Mem(Storage),
    Chassis(Chassis),
}

impl Component {
    pub fn category(&self) -> Category {
        match self {
            Component::Cpu(_) => Category::Cpu,
            Component::Mobo(_) => Category::Mobo,
            Component::Ram(_) => Category::Ram,
            Component::Gpu(_) => Category::Gpu,
            Component::Psu(_) => Category::Psu,
            Component::Mem(_) => Category::Mem,
            Component::Chassis(_) => Category::Chassis,
        }
    }

    pub fn info(&self) -> &ComponentInfo {
        match self {
            Component::Cpu(c) => &c.info,
            Component::Mobo(c) => &c.info,
            Component::Ram(c) => &c.info,
            Component::Gpu(c) => &c.info,
            Component::Psu(c) => &c.info,
            Component::Mem(c) => &c.info,
            Component::Chassis(c) => &c.info,
        }
    }

    pub fn id(&self) -> &str {
        &self.info().id
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    pub fn price(&self) -> Option<f64> {
        self.info().price
    }
}
