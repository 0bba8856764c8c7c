use super::checks;
use super::{RemarkSet, Remarks};
use crate::model::{Build, Chassis};

/// Remarks for a case candidate.
pub fn generate_chassis_remarks(chassis: &Chassis, build: &Build) -> Remarks {
    let mut remarks = RemarkSet::new();

    remarks.add(
        "mobo_form_factor_support",
        build.mobo.as_ref().map(|mobo| {
            checks::form_factor("motherboard", mobo.form_factor.as_deref(), &chassis.mobo_form_factors)
        }),
    );
    remarks.add(
        "psu_form_factor_support",
        build.psu.as_ref().map(|psu| {
            checks::form_factor("power supply", psu.form_factor.as_deref(), &chassis.psu_form_factors)
        }),
    );
    remarks.add(
        "max_gpu_length_mm",
        build.gpu.as_ref().map(|gpu| checks::gpu_length(gpu, chassis)),
    );

    remarks.finish()
}
