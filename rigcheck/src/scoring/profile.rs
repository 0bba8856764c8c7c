//! Profiles, rules and rule evaluation.
//!
//! A rule is plain data: its `check` names the rule kind and carries the
//! thresholds and feedback texts, so profiles can be written as JSON.

use serde::{Deserialize, Serialize};

use crate::model::{Build, StorageInterface};

/// A named usage intent with its own rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub rules: Vec<Rule>,
}

/// One scoring rule of a profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    pub id: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub check: RuleCheck,
}

fn default_true() -> bool {
    true
}

/// Score and feedback produced by a rule. A zero score with empty feedback
/// means the rule did not apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outcome {
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub feedback: String,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    fn render(&self, vars: &[(&str, String)]) -> Outcome {
        Outcome {
            score: self.score,
            feedback: fill(&self.feedback, vars),
        }
    }
}

/// A value range with its outcome. Both ends are inclusive; a missing end
/// is open.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Band {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    pub score: i32,
    #[serde(default)]
    pub feedback: String,
}

impl Band {
    fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Outcome of a CPU/GPU gap band; the text depends on which side is ahead.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GapOutcome {
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub cpu_ahead: String,
    #[serde(default)]
    pub gpu_ahead: String,
}

/// Which core count a core rule reads.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CoreCount {
    /// Performance cores only.
    Performance,
    #[default]
    Total,
}

/// Rule kinds.
///
/// Feedback texts may use `{value}` (band rules), `{cpu_tier}`,
/// `{gpu_tier}` and `{gap}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleCheck {
    /// Dedicated graphics tier. `missing` applies only once a CPU is
    /// selected and it has no integrated graphics.
    GraphicsTier {
        weak_max_tier: f64,
        #[serde(default)]
        capable: Outcome,
        #[serde(default)]
        weak: Outcome,
        #[serde(default)]
        integrated_only: Outcome,
        #[serde(default)]
        missing: Outcome,
    },

    /// Any way to drive a display, dedicated or integrated.
    GraphicsOutput {
        #[serde(default)]
        present: Outcome,
        #[serde(default)]
        missing: Outcome,
    },

    /// Integrated graphics with no dedicated card.
    IntegratedGraphicsOnly { outcome: Outcome },

    /// Total RAM in GB.
    RamCapacity { bands: Vec<Band> },

    /// CPU tier score.
    CpuTier { bands: Vec<Band> },

    /// CPU core count.
    CpuCores {
        #[serde(default)]
        count: CoreCount,
        bands: Vec<Band>,
    },

    /// CPU/GPU tier gap. The band follows the gap size only; the sign of
    /// the gap picks the text.
    Balance {
        balanced_max_gap: f64,
        severe_min_gap: f64,
        #[serde(default)]
        balanced: Outcome,
        #[serde(default)]
        moderate: GapOutcome,
        #[serde(default)]
        severe: GapOutcome,
    },

    /// Storage interface.
    StorageType {
        #[serde(default)]
        nvme: Outcome,
        #[serde(default)]
        sata: Outcome,
        #[serde(default)]
        hdd: Outcome,
        #[serde(default)]
        missing: Outcome,
    },

    /// Storage capacity in GB.
    StorageCapacity { bands: Vec<Band> },
}

impl RuleCheck {
    /// Evaluate against a build. Pure.
    pub fn evaluate(&self, build: &Build) -> Outcome {
        match self {
            RuleCheck::GraphicsTier {
                weak_max_tier,
                capable,
                weak,
                integrated_only,
                missing,
            } => match (&build.gpu, &build.cpu) {
                (Some(gpu), _) => match gpu.chip.tier_score {
                    Some(tier) if tier > *weak_max_tier => capable.render(&tiers(build)),
                    Some(_) => weak.render(&tiers(build)),
                    None => Outcome::none(),
                },
                (None, Some(cpu)) if cpu.integrated_gpu => integrated_only.clone(),
                (None, Some(_)) => missing.clone(),
                (None, None) => Outcome::none(),
            },

            RuleCheck::GraphicsOutput { present, missing } => {
                match (&build.gpu, &build.cpu) {
                    (Some(_), _) => present.clone(),
                    (None, Some(cpu)) if cpu.integrated_gpu => present.clone(),
                    (None, Some(_)) => missing.clone(),
                    (None, None) => Outcome::none(),
                }
            }

            RuleCheck::IntegratedGraphicsOnly { outcome } => {
                let integrated = build.cpu.as_ref().map_or(false, |cpu| cpu.integrated_gpu);
                if integrated && build.gpu.is_none() {
                    outcome.clone()
                } else {
                    Outcome::none()
                }
            }

            RuleCheck::RamCapacity { bands } => {
                banded(bands, build.ram.as_ref().and_then(|ram| ram.total_gb).map(f64::from))
            }

            RuleCheck::CpuTier { bands } => {
                banded(bands, build.cpu.as_ref().and_then(|cpu| cpu.tier_score))
            }

            RuleCheck::CpuCores { count, bands } => {
                let cores = build.cpu.as_ref().and_then(|cpu| match count {
                    CoreCount::Performance => cpu.p_cores,
                    CoreCount::Total => cpu.total_cores(),
                });
                banded(bands, cores.map(f64::from))
            }

            RuleCheck::Balance {
                balanced_max_gap,
                severe_min_gap,
                balanced,
                moderate,
                severe,
            } => {
                let cpu_tier = build.cpu.as_ref().and_then(|cpu| cpu.tier_score);
                let gpu_tier = build.gpu.as_ref().and_then(|gpu| gpu.chip.tier_score);
                let (Some(cpu_tier), Some(gpu_tier)) = (cpu_tier, gpu_tier) else {
                    return Outcome::none();
                };

                let gap = (cpu_tier - gpu_tier).abs();
                let vars = tiers(build);
                if gap <= *balanced_max_gap {
                    return balanced.render(&vars);
                }
                let band = if gap >= *severe_min_gap { severe } else { moderate };
                let text = if cpu_tier > gpu_tier {
                    &band.cpu_ahead
                } else {
                    &band.gpu_ahead
                };
                Outcome {
                    score: band.score,
                    feedback: fill(text, &vars),
                }
            }

            RuleCheck::StorageType {
                nvme,
                sata,
                hdd,
                missing,
            } => match &build.mem {
                None => missing.clone(),
                Some(storage) => match storage.interface {
                    Some(StorageInterface::Nvme) => nvme.clone(),
                    Some(StorageInterface::Sata) => sata.clone(),
                    Some(StorageInterface::Hdd) => hdd.clone(),
                    None => Outcome::none(),
                },
            },

            RuleCheck::StorageCapacity { bands } => {
                banded(bands, build.mem.as_ref().and_then(|mem| mem.capacity_gb).map(f64::from))
            }
        }
    }
}

/// First band containing the value; no value or no band means the rule
/// does not apply.
fn banded(bands: &[Band], value: Option<f64>) -> Outcome {
    let Some(value) = value else {
        return Outcome::none();
    };
    bands
        .iter()
        .find(|band| band.contains(value))
        .map(|band| Outcome {
            score: band.score,
            feedback: fill(&band.feedback, &[("value", number(value))]),
        })
        .unwrap_or_default()
}

fn tiers(build: &Build) -> Vec<(&'static str, String)> {
    let cpu_tier = build.cpu.as_ref().and_then(|cpu| cpu.tier_score);
    let gpu_tier = build.gpu.as_ref().and_then(|gpu| gpu.chip.tier_score);
    let mut vars = Vec::new();
    if let Some(tier) = cpu_tier {
        vars.push(("cpu_tier", number(tier)));
    }
    if let Some(tier) = gpu_tier {
        vars.push(("gpu_tier", number(tier)));
    }
    if let (Some(cpu), Some(gpu)) = (cpu_tier, gpu_tier) {
        vars.push(("gap", number((cpu - gpu).abs())));
    }
    vars
}

fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn fill(template: &str, vars: &[(&str, String)]) -> String {
    vars.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{}}}", name), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;

    fn band(min: Option<f64>, max: Option<f64>, score: i32) -> Band {
        Band {
            min,
            max,
            score,
            feedback: "{value} GB".to_string(),
        }
    }

    fn with_tiers(cpu: f64, gpu: f64) -> Build {
        Build {
            cpu: Some(Cpu {
                tier_score: Some(cpu),
                ..Default::default()
            }),
            gpu: Some(Gpu {
                chip: GraphicsChip {
                    tier_score: Some(gpu),
                    ..Default::default()
                },
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn balance() -> RuleCheck {
        RuleCheck::Balance {
            balanced_max_gap: 2.0,
            severe_min_gap: 4.0,
            balanced: Outcome {
                score: 5,
                feedback: "balanced {cpu_tier}/{gpu_tier}".to_string(),
            },
            moderate: GapOutcome {
                score: -2,
                cpu_ahead: "cpu ahead".to_string(),
                gpu_ahead: "gpu ahead".to_string(),
            },
            severe: GapOutcome {
                score: -8,
                cpu_ahead: "cpu far ahead by {gap}".to_string(),
                gpu_ahead: "gpu far ahead by {gap}".to_string(),
            },
        }
    }

    #[test]
    fn test_bands_are_inclusive() {
        let check = RuleCheck::RamCapacity {
            bands: vec![band(None, Some(15.0), -5), band(Some(16.0), Some(32.0), 8)],
        };
        let build = |gb| Build {
            ram: Some(Ram {
                total_gb: Some(gb),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(check.evaluate(&build(16)).score, 8);
        assert_eq!(check.evaluate(&build(32)).score, 8);
        assert_eq!(check.evaluate(&build(8)).feedback, "8 GB");
        assert_eq!(check.evaluate(&build(64)), Outcome::none());
        assert_eq!(check.evaluate(&Build::new()), Outcome::none());
    }

    #[test]
    fn test_balance_score_depends_on_gap_only() {
        let check = balance();
        assert_eq!(check.evaluate(&with_tiers(6.0, 5.0)).feedback, "balanced 6/5");
        assert_eq!(check.evaluate(&with_tiers(9.0, 3.0)).score, -8);
        assert_eq!(check.evaluate(&with_tiers(3.0, 9.0)).score, -8);
        assert_eq!(check.evaluate(&with_tiers(9.0, 3.0)).feedback, "cpu far ahead by 6");
        assert_eq!(check.evaluate(&with_tiers(3.0, 9.0)).feedback, "gpu far ahead by 6");
        assert_eq!(check.evaluate(&with_tiers(5.0, 8.0)).score, -2);
    }

    #[test]
    fn test_balance_needs_both_tiers() {
        let build = Build {
            cpu: Some(Cpu {
                tier_score: Some(5.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(balance().evaluate(&build), Outcome::none());
    }

    #[test]
    fn test_graphics_tier_branches() {
        let check = RuleCheck::GraphicsTier {
            weak_max_tier: 3.0,
            capable: Outcome {
                score: 15,
                feedback: "capable".to_string(),
            },
            weak: Outcome {
                score: -20,
                feedback: "weak tier {gpu_tier}".to_string(),
            },
            integrated_only: Outcome {
                score: -100,
                feedback: "igpu".to_string(),
            },
            missing: Outcome {
                score: -200,
                feedback: "none".to_string(),
            },
        };
        assert_eq!(check.evaluate(&with_tiers(5.0, 7.0)).score, 15);
        assert_eq!(check.evaluate(&with_tiers(5.0, 3.0)).feedback, "weak tier 3");

        let igpu = Build {
            cpu: Some(Cpu {
                integrated_gpu: true,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(check.evaluate(&igpu).score, -100);

        let no_graphics = Build {
            cpu: Some(Cpu::default()),
            ..Default::default()
        };
        assert_eq!(check.evaluate(&no_graphics).score, -200);
        assert_eq!(check.evaluate(&Build::new()), Outcome::none());
    }

    #[test]
    fn test_rule_check_json_shape() {
        let json = r#"{"type": "cpu_cores", "count": "performance", "bands": [{"min": 8, "score": 10}]}"#;
        let check: RuleCheck = serde_json::from_str(json).unwrap();
        assert_eq!(
            check,
            RuleCheck::CpuCores {
                count: CoreCount::Performance,
                bands: vec![Band {
                    min: Some(8.0),
                    max: None,
                    score: 10,
                    feedback: String::new(),
                }],
            }
        );
    }
}
