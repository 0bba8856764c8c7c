use super::checks;
use super::{Remark, RemarkSet, Remarks};
use crate::model::{Build, Cpu};

/// TDP above which the cooler needs attention.
const HIGH_TDP_W: u32 = 120;

/// Remarks for a CPU candidate.
pub fn generate_cpu_remarks(cpu: &Cpu, build: &Build) -> Remarks {
    let mut remarks = RemarkSet::new();
    let mobo = build.mobo.as_ref();

    remarks.add("socket", mobo.and_then(|mobo| checks::socket(cpu, mobo)));
    remarks.add(
        "supported_ram",
        checks::ram_chain(build.ram.as_ref(), Some(cpu), mobo),
    );
    remarks.add("pcie", checks::pcie_chain(build, Some(cpu), mobo));

    // Independent of the build
    if let Some(tdp) = cpu.tdp_w.filter(|tdp| *tdp > HIGH_TDP_W) {
        remarks.add(
            "tdp",
            Some(Remark::ok(format!(
                "High TDP of {} W; a capable cooler is required.",
                tdp
            ))),
        );
    }

    remarks.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::remarks::RemarkScore;

    fn am5_cpu() -> Cpu {
        Cpu {
            socket: Some("AM5".to_string()),
            tdp_w: Some(170),
            pcie_version: Some(5.0),
            ram_support: [(RamType::Ddr5, 5200)].into_iter().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_socket_mismatch_is_bad() {
        let build = Build {
            mobo: Some(Motherboard {
                socket: Some("LGA1700".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let remarks = generate_cpu_remarks(&am5_cpu(), &build);
        assert_eq!(remarks["socket"].score, RemarkScore::Bad);
    }

    #[test]
    fn test_empty_build_has_no_bad_remarks() {
        let remarks = generate_cpu_remarks(&am5_cpu(), &Build::new());
        assert!(!remarks.contains_key("socket"));
        assert!(!remarks.contains_key("pcie"));
        assert_eq!(remarks["supported_ram"].score, RemarkScore::Good);
        assert_eq!(remarks["tdp"].score, RemarkScore::Ok);
        assert!(remarks.values().all(|r| r.score != RemarkScore::Bad));
    }

    #[test]
    fn test_low_tdp_has_no_remark() {
        let cpu = Cpu {
            tdp_w: Some(65),
            ..Default::default()
        };
        assert!(!generate_cpu_remarks(&cpu, &Build::new()).contains_key("tdp"));
    }

    #[test]
    fn test_pcie_chain_flags_slower_slot() {
        let build = Build {
            mobo: Some(Motherboard {
                socket: Some("AM5".to_string()),
                pcie_slot_version: Some(4.0),
                ..Default::default()
            }),
            gpu: Some(Gpu {
                chip: GraphicsChip {
                    pcie_version: Some(5.0),
                    ..Default::default()
                },
                ..Default::default()
            }),
            ..Default::default()
        };
        let remarks = generate_cpu_remarks(&am5_cpu(), &build);
        assert_eq!(remarks["pcie"].score, RemarkScore::Ok);
        assert_eq!(remarks["socket"].score, RemarkScore::Good);
    }

    #[test]
    fn test_ram_speed_above_cpu_limit() {
        let build = Build {
            ram: Some(Ram {
                standard: Some(RamStandard::new(RamType::Ddr5, 6000)),
                ..Default::default()
            }),
            ..Default::default()
        };
        let remarks = generate_cpu_remarks(&am5_cpu(), &build);
        assert_eq!(remarks["supported_ram"].score, RemarkScore::Ok);
    }
}
