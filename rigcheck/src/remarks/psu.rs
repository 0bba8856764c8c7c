use super::checks;
use super::{RemarkSet, Remarks};
use crate::model::{Build, Psu};

/// Remarks for a power supply candidate.
pub fn generate_psu_remarks(psu: &Psu, build: &Build) -> Remarks {
    let mut remarks = RemarkSet::new();
    let gpu = build.gpu.as_ref();

    remarks.add("wattage", checks::wattage(psu, gpu, build.cpu.as_ref()));
    remarks.add(
        "pcie_connectors",
        gpu.map(|gpu| checks::power_connectors(psu, gpu)),
    );
    remarks.add(
        "form_factor",
        build.chassis.as_ref().map(|chassis| {
            checks::form_factor("power supply", psu.form_factor.as_deref(), &chassis.psu_form_factors)
        }),
    );
    remarks.add(
        "board_power",
        build.mobo.as_ref().and_then(|mobo| checks::board_power(psu, mobo)),
    );

    remarks.finish()
}
