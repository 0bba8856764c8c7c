use super::checks;
use super::{RemarkSet, Remarks};
use crate::model::{Build, Gpu};

/// Remarks for a graphics card candidate.
pub fn generate_gpu_remarks(gpu: &Gpu, build: &Build) -> Remarks {
    let mut remarks = RemarkSet::new();
    let cpu = build.cpu.as_ref();

    remarks.add(
        "length_mm",
        build.chassis.as_ref().map(|chassis| checks::gpu_length(gpu, chassis)),
    );

    if let Some(psu) = &build.psu {
        remarks.add("power_connectors", Some(checks::power_connectors(psu, gpu)));
        remarks.add("recommended_system_power", checks::wattage(psu, Some(gpu), cpu));
    }

    remarks.add(
        "pcie",
        checks::pcie_link(
            "graphics card",
            gpu.chip.pcie_version,
            &checks::gpu_hosts(cpu, build.mobo.as_ref()),
        ),
    );
    remarks.add(
        "pcie_lanes",
        build.mobo.as_ref().and_then(|mobo| checks::gpu_lanes(gpu, mobo)),
    );

    remarks.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::remarks::RemarkScore;

    fn card() -> Gpu {
        Gpu {
            length_mm: Some(336),
            tdp_w: Some(320),
            recommended_psu_w: Some(750),
            power_pins: PinSet::Known(vec![16]),
            chip: GraphicsChip {
                pcie_version: Some(4.0),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_card_too_long() {
        let build = Build {
            chassis: Some(Chassis {
                max_gpu_length_mm: Some(320),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(generate_gpu_remarks(&card(), &build)["length_mm"].score, RemarkScore::Bad);
    }

    #[test]
    fn test_psu_checks() {
        let build = Build {
            psu: Some(Psu {
                wattage_w: Some(850),
                pcie_power: PinSet::Known(vec![8, 8, 8]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let remarks = generate_gpu_remarks(&card(), &build);
        assert_eq!(remarks["power_connectors"].score, RemarkScore::Good);
        assert_eq!(remarks["recommended_system_power"].score, RemarkScore::Good);
    }

    #[test]
    fn test_unknown_psu_connectors() {
        let build = Build {
            psu: Some(Psu {
                wattage_w: Some(850),
                pcie_power: PinSet::Unknown,
                ..Default::default()
            }),
            ..Default::default()
        };
        let remarks = generate_gpu_remarks(&card(), &build);
        assert_eq!(remarks["power_connectors"].score, RemarkScore::Unknown);
    }

    #[test]
    fn test_card_wider_than_slot() {
        let mut gpu = card();
        gpu.chip.pcie_lanes = Some(16);
        let build = Build {
            mobo: Some(Motherboard {
                connectors: vec![Connector {
                    category: "PCIe".to_string(),
                    version: Some(4.0),
                    lanes: Some(4),
                    quantity: 1,
                }],
                pcie_slot_version: Some(4.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let remarks = generate_gpu_remarks(&gpu, &build);
        assert_eq!(remarks["pcie"].score, RemarkScore::Good);
        assert_eq!(remarks["pcie_lanes"].score, RemarkScore::Bad);
    }

    #[test]
    fn test_no_counterparts() {
        assert!(generate_gpu_remarks(&card(), &Build::new()).is_empty());
    }
}
