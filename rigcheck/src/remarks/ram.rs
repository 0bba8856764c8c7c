use super::checks;
use super::{RemarkSet, Remarks};
use crate::model::{Build, Ram};

/// Remarks for a RAM candidate.
pub fn generate_ram_remarks(ram: &Ram, build: &Build) -> Remarks {
    let mut remarks = RemarkSet::new();
    let cpu = build.cpu.as_ref();
    let mobo = build.mobo.as_ref();

    remarks.add("base", checks::ram_chain(Some(ram), cpu, mobo));

    let mut capacity = Vec::new();
    if let Some(mobo) = mobo {
        capacity.push(checks::ram_capacity(ram, "motherboard", mobo.max_ram_gb));
    }
    if let Some(cpu) = cpu {
        capacity.push(checks::ram_capacity(ram, "CPU", cpu.max_memory_gb));
    }
    remarks.add("total_capacity", checks::combine(capacity));

    remarks.add(
        "modules_count",
        mobo.map(|mobo| checks::dimm_slots(ram, mobo)),
    );

    remarks.finish()
}
