//! Connector power matcher.
//!
//! Decides whether the PCIe power connectors a PSU offers can serve the
//! connectors a graphics card requires. Each requirement may be served by
//! several whole connectors whose pin counts add up; a connector serves at
//! most one requirement.

use serde::{Deserialize, Serialize};

use crate::model::PinSet;

/// Largest offered connector list the matcher will search.
pub const MAX_MATCH_CONNECTORS: usize = 24;

/// Search nodes allowed per requirement before settling for the best
/// subset found so far.
pub const MATCH_NODE_BUDGET: usize = 100_000;

/// Outcome of a power match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerMatch {
    Satisfied,
    Unsatisfied,
    /// Data missing or search bounds exceeded.
    Undetermined,
}

/// Match offered pins against required pins.
///
/// Requirements are served largest first. For each one the smallest-sum
/// subset of the remaining offered connectors that reaches it is consumed;
/// ties go to the subset with fewer connectors.
///
/// ```
/// use rigcheck::model::PinSet;
/// use rigcheck::power::{match_power, PowerMatch};
///
/// let psu = PinSet::Known(vec![8, 8, 6]);
/// let gpu = PinSet::Known(vec![8, 8]);
/// assert_eq!(match_power(&psu, &gpu), PowerMatch::Satisfied);
/// ```
pub fn match_power(available: &PinSet, required: &PinSet) -> PowerMatch {
    let required = match required {
        PinSet::Known(pins) if pins.is_empty() => return PowerMatch::Satisfied,
        PinSet::Known(pins) => pins,
        PinSet::Unknown => return PowerMatch::Undetermined,
    };
    let available = match available {
        PinSet::Known(pins) => pins,
        PinSet::Unknown => return PowerMatch::Undetermined,
    };
    if available.len() > MAX_MATCH_CONNECTORS {
        tracing::warn!(
            "Power match skipped: {} offered connectors exceed the limit of {}",
            available.len(),
            MAX_MATCH_CONNECTORS
        );
        return PowerMatch::Undetermined;
    }

    let mut remaining = available.clone();
    remaining.sort_unstable_by(|a, b| b.cmp(a));
    let mut requirements = required.clone();
    requirements.sort_unstable_by(|a, b| b.cmp(a));

    for requirement in requirements {
        match best_subset(&remaining, requirement, MATCH_NODE_BUDGET) {
            SubsetSearch::Found(mut chosen) => {
                chosen.sort_unstable_by(|a, b| b.cmp(a));
                for index in chosen {
                    remaining.remove(index);
                }
            }
            SubsetSearch::NotFound => return PowerMatch::Unsatisfied,
            SubsetSearch::Exhausted => return PowerMatch::Undetermined,
        }
    }
    PowerMatch::Satisfied
}

#[derive(Debug, PartialEq)]
enum SubsetSearch {
    Found(Vec<usize>),
    NotFound,
    /// Budget ran out before any subset was found.
    Exhausted,
}

#[derive(Debug, Clone)]
struct Best {
    sum: u64,
    indices: Vec<usize>,
}

struct Search<'a> {
    pins: &'a [u32],
    /// `suffix[i]` is the sum of `pins[i..]`.
    suffix: Vec<u64>,
    target: u64,
    budget: usize,
    nodes: usize,
    exhausted: bool,
    best: Option<Best>,
    chosen: Vec<usize>,
}

impl Search<'_> {
    fn visit(&mut self, index: usize, sum: u64) {
        if self.nodes >= self.budget {
            self.exhausted = true;
            return;
        }
        self.nodes += 1;

        if sum >= self.target {
            let better = match &self.best {
                None => true,
                Some(best) => {
                    sum < best.sum || (sum == best.sum && self.chosen.len() < best.indices.len())
                }
            };
            if better {
                self.best = Some(Best {
                    sum,
                    indices: self.chosen.clone(),
                });
            }
            return;
        }
        if index == self.pins.len() || sum + self.suffix[index] < self.target {
            return;
        }

        let value = self.pins[index];
        let with = sum + u64::from(value);
        let worth_taking = match &self.best {
            None => true,
            Some(best) => {
                with < best.sum || (with == best.sum && self.chosen.len() + 1 < best.indices.len())
            }
        };
        if worth_taking {
            self.chosen.push(index);
            self.visit(index + 1, with);
            self.chosen.pop();
        }

        // Skipping a value skips its duplicates too; taking k copies is
        // already covered by the include branch.
        let mut next = index + 1;
        while next < self.pins.len() && self.pins[next] == value {
            next += 1;
        }
        self.visit(next, sum);
    }
}

/// Smallest-sum subset of `pins` (sorted descending) reaching `target`.
fn best_subset(pins: &[u32], target: u32, budget: usize) -> SubsetSearch {
    let mut suffix = vec![0u64; pins.len() + 1];
    for i in (0..pins.len()).rev() {
        suffix[i] = suffix[i + 1] + u64::from(pins[i]);
    }
    if suffix[0] < u64::from(target) {
        return SubsetSearch::NotFound;
    }

    let mut search = Search {
        pins,
        suffix,
        target: u64::from(target),
        budget,
        nodes: 0,
        exhausted: false,
        best: None,
        chosen: Vec::new(),
    };
    search.visit(0, 0);

    match (search.best, search.exhausted) {
        (Some(best), exhausted) => {
            if exhausted {
                tracing::warn!(
                    "Power match search budget of {} nodes exhausted; using best subset found",
                    budget
                );
            }
            SubsetSearch::Found(best.indices)
        }
        (None, true) => {
            tracing::warn!("Power match search budget of {} nodes exhausted", budget);
            SubsetSearch::Exhausted
        }
        (None, false) => SubsetSearch::NotFound,
    }
}
