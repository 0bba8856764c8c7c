//! Tests for profile scoring

use rigcheck::scoring::{load_profiles, ScoringEngine};
use rigcheck::{evaluate_build, load_build, Build};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_gaming_build_scores() {
    let build = load_build(&fixture_path("gaming_build.json")).unwrap();
    let scores = evaluate_build(&build);

    let ids: Vec<&str> = scores.iter().map(|s| s.profile_id.as_str()).collect();
    assert_eq!(ids, vec!["gaming", "professional", "office"]);

    let totals: Vec<i32> = scores.iter().map(|s| s.total_score).collect();
    assert_eq!(totals, vec![56, 47, 29]);
}

#[test]
fn test_totals_match_contributions() {
    for fixture in ["gaming_build.json", "mismatched_build.json", "office_build.json"] {
        let build = load_build(&fixture_path(fixture)).unwrap();
        for score in evaluate_build(&build) {
            let sum: i32 = score.contributions.iter().map(|c| c.score).sum();
            assert_eq!(score.total_score, sum, "{} / {}", fixture, score.profile_id);
        }
    }
}

#[test]
fn test_balance_feedback_names_the_bottleneck() {
    let build = load_build(&fixture_path("mismatched_build.json")).unwrap();
    let scores = evaluate_build(&build);
    let gaming = scores.iter().find(|s| s.profile_id == "gaming").unwrap();

    let balance = gaming
        .contributions
        .iter()
        .find(|c| c.rule_id == "cpu_gpu_balance")
        .unwrap();
    // CPU tier 6, GPU tier 9
    assert_eq!(balance.score, -2);
    assert!(balance.feedback.contains("graphics card (tier 9)"));
}

#[test]
fn test_empty_build_sentinel() {
    let scores = evaluate_build(&Build::new());
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].profile_id, "no_build");
    assert_eq!(scores[0].total_score, 0);
}

#[test]
fn test_user_profile_overrides_builtin() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("gaming.json"),
        r#"{
            "id": "gaming",
            "name": "Gaming (RAM only)",
            "rules": [
                {
                    "id": "ram",
                    "name": "RAM",
                    "check": {"type": "ram_capacity", "bands": [{"min": 32, "score": 100, "feedback": "{value} GB"}]}
                },
                {
                    "id": "off",
                    "name": "Disabled",
                    "enabled": false,
                    "check": {"type": "cpu_tier", "bands": [{"score": -1000}]}
                }
            ]
        }"#,
    )
    .unwrap();

    let engine = ScoringEngine::with_profiles(load_profiles(Some(dir.path())));
    assert_eq!(engine.profiles().len(), 3);

    let build = load_build(&fixture_path("gaming_build.json")).unwrap();
    let scores = engine.evaluate(&build);
    assert_eq!(scores[0].name, "Gaming (RAM only)");
    assert_eq!(scores[0].total_score, 100);
    assert_eq!(scores[0].feedback, vec!["32 GB".to_string()]);
}
