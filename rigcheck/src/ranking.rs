//! Candidate Ranker
//!
//! Orders the candidates of one category by how well they fit the current
//! build: compatibility first, then price.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

use crate::catalog::{CatalogError, CatalogMemo, CatalogQuery, CatalogSource};
use crate::model::{Build, Category, Component};
use crate::normalize::normalize_component;
use crate::remarks::{generate_remarks, RemarkScore, Remarks};

/// A candidate with its remarks and place in the ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedCandidate {
    pub component: Component,
    pub remarks: Remarks,
    /// `1` compatible, `0` compatible with caveats, `-1` incompatible or
    /// not enough data.
    pub score: i8,
    /// Zero-based index in the ranking.
    pub position: usize,
}

/// Collapse remarks into a sort key.
pub fn compatibility_score(remarks: &Remarks) -> i8 {
    let scores = || remarks.values().map(|remark| remark.score);
    if scores().any(|s| matches!(s, RemarkScore::Bad | RemarkScore::Unknown)) {
        -1
    } else if scores().any(|s| s == RemarkScore::Ok) {
        0
    } else {
        1
    }
}

/// Rank normalized components against a build.
///
/// Score descending, then price ascending with unpriced candidates last.
/// The sort is stable, so full ties keep catalog order.
pub fn rank_components(components: Vec<Component>, build: &Build) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = components
        .into_iter()
        .map(|component| {
            let remarks = generate_remarks(&component, build);
            RankedCandidate {
                score: compatibility_score(&remarks),
                component,
                remarks,
                position: 0,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| cmp_price(a.component.price(), b.component.price()))
    });
    for (position, candidate) in ranked.iter_mut().enumerate() {
        candidate.position = position;
    }
    ranked
}

/// Normalize a raw catalog page and rank it.
pub fn rank_candidates(category: Category, candidates: &[Value], build: &Build) -> Vec<RankedCandidate> {
    let components = candidates
        .iter()
        .map(|raw| normalize_component(category, raw))
        .collect();
    rank_components(components, build)
}

fn cmp_price(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Fetches candidate pages from a catalog and ranks them.
pub struct CandidateRanker {
    source: Box<dyn CatalogSource>,
}

impl CandidateRanker {
    pub fn new(source: Box<dyn CatalogSource>) -> Self {
        Self { source }
    }

    /// Rank the `category` page matching the build's selections. Pages are
    /// looked up in `memo` first.
    pub async fn rank_page(
        &self,
        category: Category,
        build: &Build,
        memo: &mut CatalogMemo,
    ) -> Result<Vec<RankedCandidate>, CatalogError> {
        let query = CatalogQuery::for_build(category, build);
        let page = memo.page(self.source.as_ref(), &query).await?;
        Ok(rank_components(page, build))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn am5_board() -> Build {
        Build::from_raw(&json!({
            "mobo": {"id": 10, "name": "B650", "socket": "AM5"}
        }))
    }

    #[test]
    fn test_compatibility_score() {
        use crate::remarks::Remark;

        let mut remarks = Remarks::new();
        assert_eq!(compatibility_score(&remarks), 1);
        remarks.insert("a".into(), Remark::good("fine"));
        remarks.insert("b".into(), Remark::ok("mostly"));
        assert_eq!(compatibility_score(&remarks), 0);
        remarks.insert("c".into(), Remark::unknown("no data"));
        assert_eq!(compatibility_score(&remarks), -1);
    }

    #[test]
    fn test_incompatible_sinks_below_cheaper_price() {
        let page = vec![
            json!({"id": 1, "name": "Core i5", "socket": "LGA1700", "price": 150.0}),
            json!({"id": 2, "name": "Ryzen 7", "socket": "AM5", "price": 300.0}),
            json!({"id": 3, "name": "Ryzen 5", "socket": "AM5", "price": 200.0}),
        ];
        let ranked = rank_candidates(Category::Cpu, &page, &am5_board());
        let ids: Vec<&str> = ranked.iter().map(|c| c.component.id()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
        assert_eq!(ranked[2].score, -1);
        assert_eq!(ranked[2].position, 2);
    }

    #[test]
    fn test_missing_price_last_and_stable() {
        let page = vec![
            json!({"id": "a", "name": "A", "socket": "AM5"}),
            json!({"id": "b", "name": "B", "socket": "AM5", "price": 99.0}),
            json!({"id": "c", "name": "C", "socket": "AM5"}),
        ];
        let ranked = rank_candidates(Category::Cpu, &page, &am5_board());
        let ids: Vec<&str> = ranked.iter().map(|c| c.component.id()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_unverified_pcie_link_is_insufficient_data() {
        let build = Build::from_raw(&json!({
            "mobo": {
                "id": 10,
                "socket": "AM5",
                "connectors": [
                    {"category": "PCIe", "version": "4.0", "lanes": 16},
                    {"category": "M.2 PCIe", "lanes": 4}
                ]
            },
            "gpu": {"id": 20, "graphics_chip": {"pcie_max_gen": 5}},
            "mem": {"id": 30, "type": "NVMe SSD", "connector": {"category": "M.2 PCIe", "version": "4.0", "lanes": 4}}
        }));
        let page = vec![json!({"id": 1, "name": "Ryzen 5", "socket": "AM5", "pcie_version": "5.0", "price": 199.0})];
        let ranked = rank_candidates(Category::Cpu, &page, &build);
        assert_eq!(ranked[0].remarks["pcie"].score, RemarkScore::Unknown);
        assert_eq!(ranked[0].score, -1);
    }

    #[test]
    fn test_empty_build_ranks_by_price() {
        let page = vec![
            json!({"id": 1, "name": "Big", "wattage": 1000, "price": 180}),
            json!({"id": 2, "name": "Small", "wattage": 550, "price": 60}),
        ];
        let ranked = rank_candidates(Category::Psu, &page, &Build::new());
        assert!(ranked.iter().all(|c| c.score == 1 && c.remarks.is_empty()));
        assert_eq!(ranked[0].component.id(), "2");
    }
}
