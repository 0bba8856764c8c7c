//! The in-progress build: at most one component per category.

use serde::{Deserialize, Serialize};

use super::component::*;

/// A snapshot of the user's selection.
///
/// RAM kits and storage drives may arrive as collections from the catalog
/// layer; the normalizer folds them into a single effective unit before they
/// land here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Build {
    #[serde(default)]
    pub cpu: Option<Cpu>,
    #[serde(default, alias = "motherboard")]
    pub mobo: Option<Motherboard>,
    #[serde(default)]
    pub ram: Option<Ram>,
    #[serde(default)]
    pub gpu: Option<Gpu>,
    #[serde(default)]
    pub psu: Option<Psu>,
    #[serde(default, alias = "storage")]
    pub mem: Option<Storage>,
    #[serde(default, alias = "case")]
    pub chassis: Option<Chassis>,
}

impl Build {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a raw build document (`{"cpu": {...}, "ram": [...], ...}`).
    pub fn from_raw(raw: &serde_json::Value) -> Self {
        crate::normalize::normalize_build(raw)
    }

    pub fn is_empty(&self) -> bool {
        self.cpu.is_none()
            && self.mobo.is_none()
            && self.ram.is_none()
            && self.gpu.is_none()
            && self.psu.is_none()
            && self.mem.is_none()
            && self.chassis.is_none()
    }

    /// Put a component into its slot, returning the one it replaced.
    pub fn select(&mut self, component: Component) -> Option<Component> {
        match component {
            Component::Cpu(c) => self.cpu.replace(c).map(Component::Cpu),
            Component::Mobo(c) => self.mobo.replace(c).map(Component::Mobo),
            Component::Ram(c) => self.ram.replace(c).map(Component::Ram),
            Component::Gpu(c) => self.gpu.replace(c).map(Component::Gpu),
            Component::Psu(c) => self.psu.replace(c).map(Component::Psu),
            Component::Mem(c) => self.mem.replace(c).map(Component::Mem),
            Component::Chassis(c) => self.chassis.replace(c).map(Component::Chassis),
        }
    }

    pub fn deselect(&mut self, category: Category) -> Option<Component> {
        match category {
            Category::Cpu => self.cpu.take().map(Component::Cpu),
            Category::Mobo => self.mobo.take().map(Component::Mobo),
            Category::Ram => self.ram.take().map(Component::Ram),
            Category::Gpu => self.gpu.take().map(Component::Gpu),
            Category::Psu => self.psu.take().map(Component::Psu),
            Category::Mem => self.mem.take().map(Component::Mem),
            Category::Chassis => self.chassis.take().map(Component::Chassis),
        }
    }

    /// Clone the selected component of a category, if any.
    pub fn get(&self, category: Category) -> Option<Component> {
        match category {
            Category::Cpu => self.cpu.clone().map(Component::Cpu),
            Category::Mobo => self.mobo.clone().map(Component::Mobo),
            Category::Ram => self.ram.clone().map(Component::Ram),
            Category::Gpu => self.gpu.clone().map(Component::Gpu),
            Category::Psu => self.psu.clone().map(Component::Psu),
            Category::Mem => self.mem.clone().map(Component::Mem),
            Category::Chassis => self.chassis.clone().map(Component::Chassis),
        }
    }

    /// Id of the selected component of a category.
    pub fn selected_id(&self, category: Category) -> Option<&str> {
        let info = match category {
            Category::Cpu => self.cpu.as_ref().map(|c| &c.info),
            Category::Mobo => self.mobo.as_ref().map(|c| &c.info),
            Category::Ram => self.ram.as_ref().map(|c| &c.info),
            Category::Gpu => self.gpu.as_ref().map(|c| &c.info),
            Category::Psu => self.psu.as_ref().map(|c| &c.info),
            Category::Mem => self.mem.as_ref().map(|c| &c.info),
            Category::Chassis => self.chassis.as_ref().map(|c| &c.info),
        };
        info.map(|i| i.id.as_str()).filter(|id| !id.is_empty())
    }

    /// Every selected component, in category order.
    pub fn components(&self) -> Vec<Component> {
        Category::ALL
            .iter()
            .filter_map(|category| self.get(*category))
            .collect()
    }
}
