//! Compatibility remark engine.
//!
//! For a component under inspection and the current build, produce one
//! [`Remark`] per checked attribute. Generators are pure functions of
//! `(component, build)`; remarks are recomputed on every call.
//!
//! A counterpart missing from the build never yields `bad`: the remark is
//! omitted or neutral. Missing or malformed data on a present counterpart
//! yields `unknown`.

mod chassis;
mod checks;
mod cpu;
mod gpu;
mod motherboard;
mod psu;
mod ram;
mod storage;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::model::{Build, Component};

pub use chassis::generate_chassis_remarks;
pub use cpu::generate_cpu_remarks;
pub use gpu::generate_gpu_remarks;
pub use motherboard::generate_motherboard_remarks;
pub use psu::generate_psu_remarks;
pub use ram::generate_ram_remarks;
pub use storage::generate_storage_remarks;

/// Verdict for one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemarkScore {
    Good,
    Ok,
    Bad,
    /// The data needed to decide is missing.
    Unknown,
}

impl fmt::Display for RemarkScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemarkScore::Good => write!(f, "good"),
            RemarkScore::Ok => write!(f, "ok"),
            RemarkScore::Bad => write!(f, "bad"),
            RemarkScore::Unknown => write!(f, "unknown"),
        }
    }
}

/// A verdict with its explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remark {
    pub score: RemarkScore,
    pub text: String,
}

impl Remark {
    pub fn new(score: RemarkScore, text: impl Into<String>) -> Self {
        Self {
            score,
            text: text.into(),
        }
    }

    pub fn good(text: impl Into<String>) -> Self {
        Self::new(RemarkScore::Good, text)
    }

    pub fn ok(text: impl Into<String>) -> Self {
        Self::new(RemarkScore::Ok, text)
    }

    pub fn bad(text: impl Into<String>) -> Self {
        Self::new(RemarkScore::Bad, text)
    }

    pub fn unknown(text: impl Into<String>) -> Self {
        Self::new(RemarkScore::Unknown, text)
    }
}

/// Attribute key to remark, in key order.
pub type Remarks = BTreeMap<String, Remark>;

/// Generate remarks for `component` against the rest of `build`.
///
/// The build slot of the component's own category is ignored; the
/// component is judged as if it replaced whatever is selected there.
pub fn generate_remarks(component: &Component, build: &Build) -> Remarks {
    match component {
        Component::Cpu(cpu) => generate_cpu_remarks(cpu, build),
        Component::Mobo(mobo) => generate_motherboard_remarks(mobo, build),
        Component::Ram(ram) => generate_ram_remarks(ram, build),
        Component::Gpu(gpu) => generate_gpu_remarks(gpu, build),
        Component::Psu(psu) => generate_psu_remarks(psu, build),
        Component::Mem(storage) => generate_storage_remarks(storage, build),
        Component::Chassis(chassis) => generate_chassis_remarks(chassis, build),
    }
}

/// Collects remarks, skipping checks that produced nothing.
#[derive(Debug, Default)]
pub(crate) struct RemarkSet {
    remarks: Remarks,
}

impl RemarkSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, key: &str, remark: Option<Remark>) {
        if let Some(remark) = remark {
            self.remarks.insert(key.to_string(), remark);
        }
    }

    pub(crate) fn finish(self) -> Remarks {
        self.remarks
    }
}
