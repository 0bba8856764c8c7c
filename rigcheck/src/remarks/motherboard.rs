use super::checks;
use super::{RemarkSet, Remarks};
use crate::model::{Build, Motherboard};

/// Remarks for a motherboard candidate.
///
/// Mirrors the CPU, RAM and storage views so that a pair of parts gets the
/// same verdict whichever of the two is being inspected.
pub fn generate_motherboard_remarks(mobo: &Motherboard, build: &Build) -> Remarks {
    let mut remarks = RemarkSet::new();
    let cpu = build.cpu.as_ref();

    remarks.add("socket", cpu.and_then(|cpu| checks::socket(cpu, mobo)));
    remarks.add(
        "form_factor",
        build.chassis.as_ref().map(|chassis| {
            checks::form_factor("motherboard", mobo.form_factor.as_deref(), &chassis.mobo_form_factors)
        }),
    );
    remarks.add(
        "supported_ram",
        checks::ram_chain(build.ram.as_ref(), cpu, Some(mobo)),
    );
    remarks.add("pcie", checks::pcie_chain(build, cpu, Some(mobo)));
    let lanes = [
        build.gpu.as_ref().and_then(|gpu| checks::gpu_lanes(gpu, mobo)),
        build.mem.as_ref().and_then(|storage| checks::storage_lanes(storage, mobo)),
    ];
    remarks.add("pcie_lanes", checks::combine(lanes.into_iter().flatten().collect()));
    remarks.add(
        "board_power",
        build.psu.as_ref().and_then(|psu| checks::board_power(psu, mobo)),
    );

    if let Some(ram) = &build.ram {
        remarks.add("dimm_slots", Some(checks::dimm_slots(ram, mobo)));
        remarks.add(
            "max_ram_capacity",
            Some(checks::ram_capacity(ram, "motherboard", mobo.max_ram_gb)),
        );
    }
    remarks.add(
        "connectors",
        build
            .mem
            .as_ref()
            .map(|storage| checks::storage_connector(storage, mobo)),
    );

    remarks.finish()
}
