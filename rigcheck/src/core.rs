//! Core build checking shared by the CLI and library users.
//! Reads a build, runs every remark generator and scores the profiles.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::CatalogError;
use crate::model::{Build, Category};
use crate::remarks::{generate_remarks, RemarkScore, Remarks};
use crate::scoring::{load_profiles, ProfileError, ProfileScore, ScoringEngine};

#[derive(Debug, thiserror::Error)]
pub enum RigCheckError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("{0}")]
    Other(String),
}

/// Options for check runs.
#[derive(Clone, Debug, Default)]
pub struct CheckOptions {
    /// Treat `ok` remarks as failures.
    pub strict_mode: bool,
    /// Directory of user profile JSON files layered over the built-ins.
    pub profiles_dir: Option<PathBuf>,
    /// Categories to report on; empty means all.
    pub categories: Vec<Category>,
}

/// Remarks for one selected component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentReport {
    pub category: Category,
    pub id: String,
    pub name: String,
    pub remarks: Remarks,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemarkStats {
    pub good: usize,
    pub ok: usize,
    pub bad: usize,
    pub unknown: usize,
}

impl RemarkStats {
    pub fn total(&self) -> usize {
        self.good + self.ok + self.bad + self.unknown
    }
}

/// Full result of checking a build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub source: Option<PathBuf>,
    pub strict_mode: bool,
    pub components: Vec<ComponentReport>,
    pub profiles: Vec<ProfileScore>,
    pub stats: RemarkStats,
}

impl BuildReport {
    pub fn has_bad(&self) -> bool {
        self.stats.bad > 0
    }

    pub fn has_ok_or_bad(&self) -> bool {
        self.stats.bad > 0 || self.stats.ok > 0
    }

    /// No `bad` remark, and in strict mode no `ok` remark either.
    pub fn passes(&self) -> bool {
        if self.strict_mode {
            !self.has_ok_or_bad()
        } else {
            !self.has_bad()
        }
    }

    /// Best matching profile, absent for an empty build.
    pub fn best_profile(&self) -> Option<&ProfileScore> {
        self.profiles.first().filter(|score| !score.is_no_build())
    }
}

fn remarks_to_stats(components: &[ComponentReport]) -> RemarkStats {
    let mut stats = RemarkStats::default();
    for remark in components.iter().flat_map(|c| c.remarks.values()) {
        match remark.score {
            RemarkScore::Good => stats.good += 1,
            RemarkScore::Ok => stats.ok += 1,
            RemarkScore::Bad => stats.bad += 1,
            RemarkScore::Unknown => stats.unknown += 1,
        }
    }
    stats
}

/// Core checking API used by the CLI.
pub struct RigCheckCore;

impl RigCheckCore {
    /// Read and normalize a build JSON document.
    pub fn load_build(path: &Path) -> Result<Build, RigCheckError> {
        let content = std::fs::read_to_string(path)?;
        let raw: serde_json::Value = serde_json::from_str(&content)?;
        if !raw.is_object() {
            return Err(RigCheckError::Parse(format!(
                "{}: a build must be a JSON object keyed by category",
                path.display()
            )));
        }
        Ok(Build::from_raw(&raw))
    }

    /// Check every selected component against the rest of the build and
    /// score the build's profiles.
    pub fn check_build(build: &Build, options: &CheckOptions) -> BuildReport {
        let components: Vec<ComponentReport> = build
            .components()
            .into_iter()
            .filter(|component| {
                options.categories.is_empty() || options.categories.contains(&component.category())
            })
            .map(|component| ComponentReport {
                category: component.category(),
                id: component.id().to_string(),
                name: component.name().to_string(),
                remarks: generate_remarks(&component, build),
            })
            .collect();

        let engine = ScoringEngine::with_profiles(load_profiles(options.profiles_dir.as_deref()));
        let profiles = engine.evaluate(build);
        let stats = remarks_to_stats(&components);

        tracing::info!(
            "Checked {} components: {} good, {} ok, {} bad, {} unknown",
            components.len(),
            stats.good,
            stats.ok,
            stats.bad,
            stats.unknown
        );

        BuildReport {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            source: None,
            strict_mode: options.strict_mode,
            components,
            profiles,
            stats,
        }
    }

    /// Load a build file and check it.
    pub fn check_file(path: &Path, options: &CheckOptions) -> Result<BuildReport, RigCheckError> {
        let build = Self::load_build(path)?;
        let mut report = Self::check_build(&build, options);
        report.source = Some(path.to_path_buf());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::NamedTempFile;

    fn mismatched_build() -> Build {
        Build::from_raw(&json!({
            "cpu": {"id": 1, "name": "Ryzen 5 7600", "socket": "AM5", "tdp": 65},
            "mobo": {"id": 2, "name": "Z790", "socket": "LGA1700"}
        }))
    }

    #[test]
    fn test_socket_mismatch_fails() {
        let report = RigCheckCore::check_build(&mismatched_build(), &CheckOptions::default());
        assert_eq!(report.components.len(), 2);
        assert_eq!(report.stats.bad, 2);
        assert!(!report.passes());
    }

    #[test]
    fn test_category_filter() {
        let options = CheckOptions {
            categories: vec![Category::Cpu],
            ..Default::default()
        };
        let report = RigCheckCore::check_build(&mismatched_build(), &options);
        assert_eq!(report.components.len(), 1);
        assert_eq!(report.components[0].category, Category::Cpu);
    }

    #[test]
    fn test_strict_mode_fails_on_ok() {
        let build = Build::from_raw(&json!({
            "cpu": {"id": 1, "name": "Core i9", "socket": "LGA1700", "tdp": 125}
        }));
        let lenient = RigCheckCore::check_build(&build, &CheckOptions::default());
        assert!(lenient.passes());

        let strict = RigCheckCore::check_build(
            &build,
            &CheckOptions {
                strict_mode: true,
                ..Default::default()
            },
        );
        assert_eq!(strict.stats.ok, 1);
        assert!(!strict.passes());
    }

    #[test]
    fn test_empty_build_report() {
        let report = RigCheckCore::check_build(&Build::new(), &CheckOptions::default());
        assert!(report.components.is_empty());
        assert_eq!(report.profiles.len(), 1);
        assert!(report.best_profile().is_none());
        assert!(report.passes());
    }

    #[test]
    fn test_check_file_rejects_non_object() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[1, 2, 3]").unwrap();
        let err = RigCheckCore::check_file(file.path(), &CheckOptions::default()).unwrap_err();
        assert!(matches!(err, RigCheckError::Parse(_)));
    }

    #[test]
    fn test_check_file_records_source() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"gpu": {"id": 3, "name": "RTX 4070"}}"#).unwrap();
        let report = RigCheckCore::check_file(file.path(), &CheckOptions::default()).unwrap();
        assert_eq!(report.source.as_deref(), Some(file.path()));
    }
}
