//! Attribute normalizer.
//!
//! Turns loosely typed catalog records into the canonical types of
//! [`crate::model`]. Every function here is total: unparsable input yields
//! `None` or an unknown marker, never a guess and never a panic.

pub mod connectors;
pub mod pcie;
pub mod ram;
pub mod record;
pub mod values;

pub use connectors::{
    board_power_from_raw, extract_connector_pins, pcie_power_pins, power_connectors_from_raw,
    power_pins, ConnectorPins, PowerConnectorKind,
};
pub use pcie::{connector_from_raw, connectors_from_raw, extract_pcie_version, PcieRole};
pub use ram::{build_ram_support_map, parse_ram_standard, parse_ram_text, ram_support_from_raw};
pub use record::{fold_ram, fold_storage, form_factor_key, normalize_build, normalize_component};
