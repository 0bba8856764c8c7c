//! rigcheck - PC build compatibility checking and profile scoring
//!
//! This library checks a PC build part by part, telling which parts fit
//! together, scores the build against usage profiles (gaming, office,
//! professional work) and ranks catalog candidates for an empty slot.
//!
//! # Quick Start
//!
//! ```no_run
//! use rigcheck::{CheckOptions, RigCheckCore};
//! use std::path::Path;
//!
//! let report = RigCheckCore::check_file(
//!     Path::new("build.json"),
//!     &CheckOptions::default(),
//! ).unwrap();
//!
//! for component in &report.components {
//!     for (key, remark) in &component.remarks {
//!         println!("{} {}: {} {}", component.category, key, remark.score, remark.text);
//!     }
//! }
//! ```
//!
//! # Features
//!
//! - **Normalization**: free-form catalog records into typed components
//! - **Power matching**: PSU PCIe connectors against graphics card needs
//! - **Remarks**: per-attribute good/ok/bad/unknown verdicts
//! - **Scoring**: JSON-defined profiles, user-overridable
//! - **Ranking**: catalog candidates ordered by fit and price

pub mod catalog;
pub mod core;
pub mod model;
pub mod normalize;
pub mod power;
pub mod ranking;
pub mod remarks;
pub mod scoring;

// Re-export main types
pub use crate::core::{
    BuildReport, CheckOptions, ComponentReport, RemarkStats, RigCheckCore, RigCheckError,
};
pub use catalog::{CatalogMemo, CatalogQuery, CatalogSource, FileCatalog, HttpCatalog};
pub use model::{BoardPower, Build, Category, Component, PinSet, RamStandard, RamType};
pub use power::{match_power, PowerMatch};
pub use ranking::{compatibility_score, rank_candidates, rank_components, CandidateRanker, RankedCandidate};
pub use remarks::{generate_remarks, Remark, RemarkScore, Remarks};
pub use scoring::{evaluate_build, Profile, ProfileScore, Rule, RuleCheck, ScoringEngine};

/// Read a build file (convenience wrapper).
pub fn load_build(path: &std::path::Path) -> Result<Build, RigCheckError> {
    RigCheckCore::load_build(path)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        evaluate_build, generate_remarks, match_power, rank_candidates, Build, BuildReport,
        Category, CheckOptions, Component, PowerMatch, ProfileScore, Remark, RemarkScore,
        RigCheckCore, RigCheckError,
    };
}
