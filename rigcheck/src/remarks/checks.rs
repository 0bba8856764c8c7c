//! Checks shared by several remark generators.
//!
//! Each check compares two concrete parts; the generators decide which part
//! is the candidate and which comes from the build.

use super::{Remark, RemarkScore};
use crate::model::*;
use crate::normalize::form_factor_key;
use crate::power::{match_power, PowerMatch};

/// Headroom added to CPU and GPU TDP when estimating system draw.
pub const SYSTEM_OVERHEAD_W: u32 = 100;
/// Recommended PSU wattage for a build without a graphics card, on top of
/// the CPU TDP.
pub const CPU_ONLY_HEADROOM_W: u32 = 250;
/// A card's TDP is assumed to be this share of the recommended PSU wattage.
pub const GPU_TDP_SHARE: f64 = 0.75;

/// Reduce several remarks for one attribute into one.
///
/// Precedence is `bad`, then `unknown`, then `ok`, then `good`, so a link
/// that could not be verified is never hidden behind a caveat. The texts of
/// the winning verdict are joined.
pub fn combine(remarks: Vec<Remark>) -> Option<Remark> {
    for score in [
        RemarkScore::Bad,
        RemarkScore::Unknown,
        RemarkScore::Ok,
        RemarkScore::Good,
    ] {
        let texts: Vec<&str> = remarks
            .iter()
            .filter(|r| r.score == score)
            .map(|r| r.text.as_str())
            .collect();
        if !texts.is_empty() {
            return Some(Remark::new(score, texts.join(" ")));
        }
    }
    None
}

fn socket_key(socket: &str) -> String {
    socket
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_uppercase()
}

/// CPU socket against motherboard socket; omitted when either is unknown.
pub fn socket(cpu: &Cpu, mobo: &Motherboard) -> Option<Remark> {
    let (cpu_socket, mobo_socket) = (cpu.socket.as_deref()?, mobo.socket.as_deref()?);
    if socket_key(cpu_socket) == socket_key(mobo_socket) {
        Some(Remark::good(format!("Socket {} is compatible.", cpu_socket)))
    } else {
        Some(Remark::bad(format!(
            "CPU socket {} does not fit the motherboard socket {}.",
            cpu_socket, mobo_socket
        )))
    }
}

fn ram_against_host(standard: RamStandard, host: &str, support: &RamSupportMap) -> Remark {
    if support.is_empty() {
        return Remark::unknown(format!("Supported memory of the {} is unknown.", host));
    }
    match support.get(&standard.ram_type) {
        None => Remark::bad(format!(
            "The {} does not support {} memory.",
            host, standard.ram_type
        )),
        Some(max) if standard.speed_mts > *max => Remark::ok(format!(
            "{} exceeds the {} limit of {} MT/s and will run at the lower speed.",
            standard, host, max
        )),
        Some(_) => Remark::good(format!("{} is supported by the {}.", standard, host)),
    }
}

/// The RAM support chain: the RAM standard against the CPU and motherboard
/// support maps of whichever of them are present.
///
/// With no RAM selected this is a neutral note; with neither host present
/// there is nothing to check.
pub fn ram_chain(ram: Option<&Ram>, cpu: Option<&Cpu>, mobo: Option<&Motherboard>) -> Option<Remark> {
    let Some(ram) = ram else {
        return Some(Remark::good(
            "RAM not selected; memory support is checked once a kit is chosen.",
        ));
    };
    if cpu.is_none() && mobo.is_none() {
        return None;
    }
    let Some(standard) = ram.standard else {
        return Some(Remark::unknown("The RAM standard could not be determined."));
    };

    let mut verdicts = Vec::new();
    if let Some(cpu) = cpu {
        verdicts.push(ram_against_host(standard, "CPU", &cpu.ram_support));
    }
    if let Some(mobo) = mobo {
        verdicts.push(ram_against_host(standard, "motherboard", &mobo.ram_support));
    }
    combine(verdicts)
}

/// A PCIe device against the weakest link of the hosts in front of it.
///
/// `hosts` holds the label and PCIe generation of every present host; an
/// empty list means there is nothing to compare against.
pub fn pcie_link(device: &str, version: Option<f64>, hosts: &[(&str, Option<f64>)]) -> Option<Remark> {
    if hosts.is_empty() {
        return None;
    }
    let Some(version) = version else {
        return Some(Remark::unknown(format!(
            "PCIe generation of the {} is unknown.",
            device
        )));
    };
    if let Some((host, _)) = hosts.iter().find(|(_, v)| v.is_none()) {
        return Some(Remark::unknown(format!(
            "PCIe generation of the {} is unknown; the {} link could not be verified.",
            host, device
        )));
    }

    let (weakest, ceiling) = hosts
        .iter()
        .filter_map(|(host, v)| v.map(|v| (*host, v)))
        .fold(None::<(&str, f64)>, |acc, (host, v)| match acc {
            Some((_, best)) if best <= v => acc,
            _ => Some((host, v)),
        })?;

    if version > ceiling {
        Some(Remark::ok(format!(
            "The {} supports PCIe {} but the {} limits the link to PCIe {}.",
            device,
            pcie_label(version),
            weakest,
            pcie_label(ceiling)
        )))
    } else {
        Some(Remark::good(format!(
            "The {} runs at its full PCIe {} speed.",
            device,
            pcie_label(version)
        )))
    }
}

/// A device's lane width against the widest slot that can take it.
///
/// Omitted when the device's width is unknown. A device wider than the
/// widest slot does not fit.
pub fn lane_width(device: &str, lanes: Option<u32>, slot: &str, slot_lanes: Option<u32>) -> Option<Remark> {
    let lanes = lanes?;
    let Some(slot_lanes) = slot_lanes else {
        return Some(Remark::unknown(format!(
            "Lane width of the {} is unknown; the x{} {} could not be verified.",
            slot, lanes, device
        )));
    };
    if lanes <= slot_lanes {
        Some(Remark::good(format!(
            "The x{} {} fits the x{} {}.",
            lanes, device, slot_lanes, slot
        )))
    } else {
        Some(Remark::bad(format!(
            "The {} needs x{} but the widest {} is x{}.",
            device, lanes, slot, slot_lanes
        )))
    }
}

/// Graphics card width against the board's widest expansion slot.
pub fn gpu_lanes(gpu: &Gpu, mobo: &Motherboard) -> Option<Remark> {
    lane_width("graphics card", gpu.chip.pcie_lanes, "PCIe slot", mobo.widest_pcie_slot())
}

/// M.2 drive width against the board's widest M.2 slot.
pub fn storage_lanes(storage: &Storage, mobo: &Motherboard) -> Option<Remark> {
    let drive = storage.connector.as_ref().filter(|c| c.is_m2())?;
    lane_width("storage drive", drive.lanes, "M.2 slot", mobo.widest_m2_slot())
}

/// PCIe generation with one decimal (`4.0`).
pub fn pcie_label(version: f64) -> String {
    format!("{:.1}", version)
}

/// Hosts in front of the graphics card slot.
pub fn gpu_hosts(cpu: Option<&Cpu>, mobo: Option<&Motherboard>) -> Vec<(&'static str, Option<f64>)> {
    let mut hosts = Vec::new();
    if let Some(cpu) = cpu {
        hosts.push(("CPU", cpu.pcie_version));
    }
    if let Some(mobo) = mobo {
        hosts.push(("motherboard slot", mobo.pcie_slot_version));
    }
    hosts
}

/// Hosts in front of an M.2 NVMe drive.
pub fn storage_hosts(cpu: Option<&Cpu>, mobo: Option<&Motherboard>) -> Vec<(&'static str, Option<f64>)> {
    let mut hosts = Vec::new();
    if let Some(cpu) = cpu {
        hosts.push(("CPU", cpu.pcie_version));
    }
    if let Some(mobo) = mobo {
        hosts.push(("motherboard M.2 slot", mobo.m2_pcie_version));
    }
    hosts
}

/// Whether a drive sits on PCIe lanes at all.
pub fn uses_pcie(storage: &Storage) -> bool {
    storage.pcie_version.is_some() || storage.interface == Some(StorageInterface::Nvme)
}

/// PCIe chain seen from a host (CPU or motherboard view): every downstream
/// device in the build against the given hosts.
pub fn pcie_chain(build: &Build, cpu: Option<&Cpu>, mobo: Option<&Motherboard>) -> Option<Remark> {
    let mut verdicts = Vec::new();
    if let Some(gpu) = &build.gpu {
        verdicts.extend(pcie_link("graphics card", gpu.chip.pcie_version, &gpu_hosts(cpu, mobo)));
    }
    if let Some(storage) = build.mem.as_ref().filter(|s| uses_pcie(s)) {
        verdicts.extend(pcie_link("storage drive", storage.pcie_version, &storage_hosts(cpu, mobo)));
    }
    combine(verdicts)
}

/// GPU PCIe power requirements against the PSU's offered connectors.
pub fn power_connectors(psu: &Psu, gpu: &Gpu) -> Remark {
    match match_power(&psu.pcie_power, &gpu.power_pins) {
        PowerMatch::Satisfied => match gpu.power_pins.pins() {
            Some([]) => Remark::good("The graphics card needs no PCIe power connectors."),
            _ => Remark::good(format!(
                "The power supply provides the required PCIe power connectors ({}).",
                gpu.power_pins
            )),
        },
        PowerMatch::Unsatisfied => Remark::bad(format!(
            "The power supply's PCIe connectors ({}) cannot serve the card's {}.",
            psu.pcie_power, gpu.power_pins
        )),
        PowerMatch::Undetermined => {
            Remark::unknown("PCIe power connector data is incomplete; compatibility could not be verified.")
        }
    }
}

/// PSU EPS and ATX plugs against the motherboard's power inputs.
///
/// Omitted when the board lists no power inputs. A PSU that lists none of a
/// needed kind is unknown rather than bad.
pub fn board_power(psu: &Psu, mobo: &Motherboard) -> Option<Remark> {
    let unlisted = PinSet::Unknown;
    let verdicts = [
        ("EPS", &mobo.power_inputs.eps, &psu.board_power.eps),
        ("ATX", &mobo.power_inputs.atx, &psu.board_power.atx),
    ]
    .into_iter()
    .filter_map(|(label, required, offered)| {
        let required = required.as_ref()?;
        let offered = offered.as_ref().unwrap_or(&unlisted);
        Some(match match_power(offered, required) {
            PowerMatch::Satisfied => Remark::good(format!(
                "The power supply provides the motherboard's {} power ({}).",
                label, required
            )),
            PowerMatch::Unsatisfied => Remark::bad(format!(
                "The power supply's {} connectors ({}) cannot serve the motherboard's {}.",
                label, offered, required
            )),
            PowerMatch::Undetermined => Remark::unknown(format!(
                "{} power connector data is incomplete; compatibility could not be verified.",
                label
            )),
        })
    })
    .collect();
    combine(verdicts)
}

/// Recommended PSU wattage for the build, if it can be determined.
///
/// The card's own recommendation wins; otherwise it is estimated from the
/// card's TDP. Without a card the CPU TDP plus headroom is used.
pub fn recommended_wattage(gpu: Option<&Gpu>, cpu: Option<&Cpu>) -> Option<u32> {
    match gpu {
        Some(gpu) => gpu
            .recommended_psu_w
            .or_else(|| gpu.tdp_w.map(|tdp| (f64::from(tdp) / GPU_TDP_SHARE).ceil() as u32)),
        None => cpu?.tdp_w.map(|tdp| tdp.saturating_add(CPU_ONLY_HEADROOM_W)),
    }
}

/// Estimated system draw from known TDPs.
pub fn estimated_draw(gpu: Option<&Gpu>, cpu: Option<&Cpu>) -> u32 {
    [cpu.and_then(|c| c.tdp_w), gpu.and_then(|g| g.tdp_w)]
        .into_iter()
        .flatten()
        .fold(SYSTEM_OVERHEAD_W, u32::saturating_add)
}

/// PSU wattage against what the build needs. Omitted when neither a CPU
/// nor a graphics card is present.
pub fn wattage(psu: &Psu, gpu: Option<&Gpu>, cpu: Option<&Cpu>) -> Option<Remark> {
    if gpu.is_none() && cpu.is_none() {
        return None;
    }
    let Some(watts) = psu.wattage_w else {
        return Some(Remark::unknown("Power supply wattage is unknown."));
    };
    let Some(recommended) = recommended_wattage(gpu, cpu) else {
        return Some(Remark::unknown(
            "Recommended system power could not be determined.",
        ));
    };
    let draw = estimated_draw(gpu, cpu);

    let remark = if watts >= recommended {
        Remark::good(format!("{} W meets the recommended {} W.", watts, recommended))
    } else if watts >= draw {
        Remark::ok(format!(
            "{} W is below the recommended {} W but covers the estimated draw of {} W.",
            watts, recommended, draw
        ))
    } else {
        Remark::bad(format!(
            "{} W is below the estimated draw of {} W.",
            watts, draw
        ))
    };
    Some(remark)
}

/// A form factor against a supported list.
pub fn form_factor(what: &str, value: Option<&str>, supported: &[String]) -> Remark {
    let Some(value) = value else {
        return Remark::unknown(format!("Form factor of the {} is unknown.", what));
    };
    if supported.is_empty() {
        return Remark::unknown(format!(
            "The case does not list supported {} form factors.",
            what
        ));
    }
    let key = form_factor_key(value);
    if supported.iter().any(|s| form_factor_key(s) == key) {
        Remark::good(format!("The case supports the {} {}.", value, what))
    } else {
        Remark::bad(format!(
            "The case does not support the {} {} (supports {}).",
            value,
            what,
            supported.join(", ")
        ))
    }
}

/// Card length against case clearance.
pub fn gpu_length(gpu: &Gpu, chassis: &Chassis) -> Remark {
    match (gpu.length_mm, chassis.max_gpu_length_mm) {
        (Some(length), Some(max)) if length <= max => Remark::good(format!(
            "The {} mm card fits the case (max {} mm).",
            length, max
        )),
        (Some(length), Some(max)) => Remark::bad(format!(
            "The card is {} mm long; the case fits at most {} mm.",
            length, max
        )),
        _ => Remark::unknown("Graphics card length or case clearance is unknown."),
    }
}

fn accepts(slot: &Connector, drive: &Connector) -> bool {
    let drive_category = drive.category.as_str();
    match drive_category {
        "M.2 PCIe" => slot.is_m2() && (slot.mentions_pcie() || slot.category == "M.2"),
        "M.2 SATA" => slot.category == "M.2 SATA" || slot.category == "M.2",
        "M.2" => slot.is_m2(),
        _ => slot.category.eq_ignore_ascii_case(drive_category),
    }
}

/// A drive's connector against the motherboard's connector list.
///
/// A PCIe-only M.2 slot does not take an M.2 SATA drive.
pub fn storage_connector(storage: &Storage, mobo: &Motherboard) -> Remark {
    let Some(drive) = &storage.connector else {
        return Remark::unknown("Connector of the storage drive is unknown.");
    };
    if mobo.connectors.is_empty() {
        return Remark::unknown("The motherboard's connector list is unknown.");
    }
    if mobo.connectors.iter().any(|slot| accepts(slot, drive)) {
        Remark::good(format!("The motherboard has a {} connector.", drive.category))
    } else {
        Remark::bad(format!(
            "The motherboard has no {} connector.",
            drive.category
        ))
    }
}

/// RAM module count against DIMM slots.
pub fn dimm_slots(ram: &Ram, mobo: &Motherboard) -> Remark {
    match (ram.modules, mobo.dimm_slots) {
        (Some(modules), Some(slots)) if modules <= slots => Remark::good(format!(
            "{} modules fit in {} DIMM slots.",
            modules, slots
        )),
        (Some(modules), Some(slots)) => Remark::bad(format!(
            "{} modules need more than the {} DIMM slots available.",
            modules, slots
        )),
        _ => Remark::unknown("RAM module count or DIMM slot count is unknown."),
    }
}

/// RAM capacity against a host's maximum.
pub fn ram_capacity(ram: &Ram, host: &str, limit: Option<u32>) -> Remark {
    match (ram.total_gb, limit) {
        (Some(total), Some(limit)) if total <= limit => Remark::good(format!(
            "{} GB is within the {} limit of {} GB.",
            total, host, limit
        )),
        (Some(total), Some(limit)) => Remark::bad(format!(
            "{} GB of RAM exceeds the {} limit of {} GB.",
            total, host, limit
        )),
        _ => Remark::unknown(format!(
            "RAM capacity or the {} memory limit is unknown.",
            host
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ram(standard: &str) -> Ram {
        Ram {
            standard: crate::normalize::parse_ram_text(standard),
            ..Default::default()
        }
    }

    fn support(entries: &[&str]) -> RamSupportMap {
        crate::normalize::build_ram_support_map(
            entries.iter().filter_map(|e| crate::normalize::parse_ram_text(e)),
        )
    }

    #[test]
    fn test_combine_precedence() {
        let combined = combine(vec![
            Remark::good("a"),
            Remark::ok("b"),
            Remark::ok("c"),
        ])
        .unwrap();
        assert_eq!(combined.score, RemarkScore::Ok);
        assert_eq!(combined.text, "b c");

        let unverified = combine(vec![Remark::ok("slow link"), Remark::unknown("no data")]).unwrap();
        assert_eq!(unverified.score, RemarkScore::Unknown);
        assert_eq!(unverified.text, "no data");

        let worst = combine(vec![Remark::unknown("x"), Remark::bad("y")]).unwrap();
        assert_eq!(worst.score, RemarkScore::Bad);
        assert!(combine(Vec::new()).is_none());
    }

    #[test]
    fn test_pcie_chain_keeps_unverified_link() {
        let build = Build {
            gpu: Some(Gpu {
                chip: GraphicsChip {
                    pcie_version: Some(5.0),
                    ..Default::default()
                },
                ..Default::default()
            }),
            mem: Some(Storage {
                interface: Some(StorageInterface::Nvme),
                pcie_version: Some(4.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mobo = Motherboard {
            pcie_slot_version: Some(4.0),
            m2_pcie_version: None,
            ..Default::default()
        };
        let cpu = Cpu {
            pcie_version: Some(5.0),
            ..Default::default()
        };
        let remark = pcie_chain(&build, Some(&cpu), Some(&mobo)).unwrap();
        assert_eq!(remark.score, RemarkScore::Unknown);
    }

    #[test]
    fn test_lane_width() {
        let mobo = Motherboard {
            connectors: vec![
                Connector {
                    category: "PCIe".to_string(),
                    version: Some(4.0),
                    lanes: Some(4),
                    quantity: 1,
                },
                Connector {
                    category: "M.2 PCIe".to_string(),
                    version: Some(4.0),
                    lanes: Some(2),
                    quantity: 1,
                },
            ],
            ..Default::default()
        };
        let wide = Gpu {
            chip: GraphicsChip {
                pcie_lanes: Some(16),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(gpu_lanes(&wide, &mobo).unwrap().score, RemarkScore::Bad);
        assert!(gpu_lanes(&Gpu::default(), &mobo).is_none());
        assert_eq!(
            gpu_lanes(&wide, &Motherboard::default()).unwrap().score,
            RemarkScore::Unknown
        );

        let drive = |lanes| Storage {
            connector: Some(Connector {
                category: "M.2 PCIe".to_string(),
                version: Some(4.0),
                lanes: Some(lanes),
                quantity: 1,
            }),
            ..Default::default()
        };
        assert_eq!(storage_lanes(&drive(4), &mobo).unwrap().score, RemarkScore::Bad);
        assert_eq!(storage_lanes(&drive(2), &mobo).unwrap().score, RemarkScore::Good);
    }

    #[test]
    fn test_board_power() {
        let mobo = Motherboard {
            power_inputs: BoardPower {
                eps: Some(PinSet::Known(vec![8, 4])),
                atx: Some(PinSet::Known(vec![24])),
            },
            ..Default::default()
        };
        let psu = |eps: Option<PinSet>| Psu {
            board_power: BoardPower {
                eps,
                atx: Some(PinSet::Known(vec![24])),
            },
            ..Default::default()
        };

        let full = psu(Some(PinSet::Known(vec![8, 8])));
        assert_eq!(board_power(&full, &mobo).unwrap().score, RemarkScore::Good);
        let short = psu(Some(PinSet::Known(vec![8])));
        assert_eq!(board_power(&short, &mobo).unwrap().score, RemarkScore::Bad);
        let unlisted = psu(None);
        assert_eq!(board_power(&unlisted, &mobo).unwrap().score, RemarkScore::Unknown);

        assert!(board_power(&full, &Motherboard::default()).is_none());
    }

    #[test]
    fn test_wattage_saturates_on_huge_tdp() {
        let cpu = Cpu {
            tdp_w: Some(u32::MAX),
            ..Default::default()
        };
        let gpu = Gpu {
            tdp_w: Some(u32::MAX),
            ..Default::default()
        };
        assert_eq!(recommended_wattage(None, Some(&cpu)), Some(u32::MAX));
        assert_eq!(estimated_draw(Some(&gpu), Some(&cpu)), u32::MAX);

        let psu = Psu {
            wattage_w: Some(750),
            ..Default::default()
        };
        assert_eq!(wattage(&psu, None, Some(&cpu)).unwrap().score, RemarkScore::Bad);
    }

    #[test]
    fn test_socket_normalizes_spacing() {
        let cpu = Cpu {
            socket: Some("LGA 1700".to_string()),
            ..Default::default()
        };
        let mobo = Motherboard {
            socket: Some("lga1700".to_string()),
            ..Default::default()
        };
        assert_eq!(socket(&cpu, &mobo).unwrap().score, RemarkScore::Good);
        assert!(socket(&Cpu::default(), &mobo).is_none());
    }

    #[test]
    fn test_ram_chain_verdicts() {
        let cpu = Cpu {
            ram_support: support(&["DDR5-5200"]),
            ..Default::default()
        };
        let mobo = Motherboard {
            ram_support: support(&["DDR5-6400", "DDR4-3200"]),
            ..Default::default()
        };

        let within = ram_chain(Some(&ram("DDR5-5200")), Some(&cpu), Some(&mobo)).unwrap();
        assert_eq!(within.score, RemarkScore::Good);

        let fast = ram_chain(Some(&ram("DDR5-6000")), Some(&cpu), Some(&mobo)).unwrap();
        assert_eq!(fast.score, RemarkScore::Ok);
        assert!(fast.text.contains("5200"));

        let wrong_type = ram_chain(Some(&ram("DDR4-3200")), Some(&cpu), Some(&mobo)).unwrap();
        assert_eq!(wrong_type.score, RemarkScore::Bad);

        let unknown = ram_chain(Some(&Ram::default()), Some(&cpu), None).unwrap();
        assert_eq!(unknown.score, RemarkScore::Unknown);
    }

    #[test]
    fn test_ram_chain_without_ram_is_neutral() {
        let remark = ram_chain(None, Some(&Cpu::default()), None).unwrap();
        assert_eq!(remark.score, RemarkScore::Good);
        assert!(remark.text.contains("not selected"));
    }

    #[test]
    fn test_pcie_link_weakest_host() {
        let hosts = [("CPU", Some(5.0)), ("motherboard slot", Some(4.0))];
        let remark = pcie_link("graphics card", Some(5.0), &hosts).unwrap();
        assert_eq!(remark.score, RemarkScore::Ok);
        assert!(remark.text.contains("motherboard slot"));
        assert!(remark.text.contains("PCIe 4.0"));

        let fits = pcie_link("graphics card", Some(4.0), &hosts).unwrap();
        assert_eq!(fits.score, RemarkScore::Good);

        assert!(pcie_link("graphics card", Some(4.0), &[]).is_none());
        let missing = pcie_link("graphics card", Some(4.0), &[("CPU", None)]).unwrap();
        assert_eq!(missing.score, RemarkScore::Unknown);
    }

    #[test]
    fn test_wattage_fallbacks() {
        let cpu = Cpu {
            tdp_w: Some(125),
            ..Default::default()
        };
        let gpu = Gpu {
            tdp_w: Some(300),
            ..Default::default()
        };
        assert_eq!(recommended_wattage(Some(&gpu), Some(&cpu)), Some(400));
        assert_eq!(recommended_wattage(None, Some(&cpu)), Some(375));
        assert_eq!(estimated_draw(Some(&gpu), Some(&cpu)), 525);

        let psu = |w| Psu {
            wattage_w: Some(w),
            ..Default::default()
        };
        let card = Gpu {
            tdp_w: Some(200),
            recommended_psu_w: Some(650),
            ..Default::default()
        };
        assert_eq!(wattage(&psu(650), Some(&card), Some(&cpu)).unwrap().score, RemarkScore::Good);
        assert_eq!(wattage(&psu(500), Some(&card), Some(&cpu)).unwrap().score, RemarkScore::Ok);
        assert_eq!(wattage(&psu(400), Some(&card), Some(&cpu)).unwrap().score, RemarkScore::Bad);
        assert!(wattage(&psu(400), None, None).is_none());
    }

    #[test]
    fn test_m2_sata_needs_sata_capable_slot() {
        let drive = Storage {
            connector: Some(Connector {
                category: "M.2 SATA".to_string(),
                version: None,
                lanes: None,
                quantity: 1,
            }),
            ..Default::default()
        };
        let pcie_only = Motherboard {
            connectors: vec![Connector {
                category: "M.2 PCIe".to_string(),
                version: Some(4.0),
                lanes: Some(4),
                quantity: 2,
            }],
            ..Default::default()
        };
        assert_eq!(storage_connector(&drive, &pcie_only).score, RemarkScore::Bad);

        let generic = Motherboard {
            connectors: vec![Connector {
                category: "M.2".to_string(),
                version: None,
                lanes: None,
                quantity: 1,
            }],
            ..Default::default()
        };
        assert_eq!(storage_connector(&drive, &generic).score, RemarkScore::Good);
    }

    #[test]
    fn test_form_factor_aliases() {
        let supported = vec!["ATX".to_string(), "Micro-ATX".to_string()];
        assert_eq!(form_factor("motherboard", Some("mATX"), &supported).score, RemarkScore::Good);
        assert_eq!(form_factor("motherboard", Some("E-ATX"), &supported).score, RemarkScore::Bad);
        assert_eq!(form_factor("motherboard", None, &supported).score, RemarkScore::Unknown);
    }
}
