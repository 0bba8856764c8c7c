//! Build Scoring Engine
//!
//! Evaluates a build against every profile and ranks the profiles by how
//! well the build suits them. Each profile's total is the plain sum of its
//! enabled rules' scores.

pub mod builtin;
pub mod profile;

pub use builtin::*;
pub use profile::*;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::model::Build;

/// Id of the entry returned for an empty build.
pub const NO_BUILD_ID: &str = "no_build";

lazy_static! {
    static ref DEFAULT_ENGINE: ScoringEngine = ScoringEngine::with_default_profiles();
}

/// Score and feedback one rule contributed to a profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleContribution {
    pub rule_id: String,
    pub score: i32,
    pub feedback: String,
}

/// A profile's evaluation result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileScore {
    pub profile_id: String,
    pub name: String,
    pub description: String,
    pub total_score: i32,
    pub feedback: Vec<String>,
    pub contributions: Vec<RuleContribution>,
}

impl ProfileScore {
    fn no_build() -> Self {
        Self {
            profile_id: NO_BUILD_ID.to_string(),
            name: "Start your build".to_string(),
            description: String::new(),
            total_score: 0,
            feedback: vec!["Select any component to start evaluating the build.".to_string()],
            contributions: Vec::new(),
        }
    }

    pub fn is_no_build(&self) -> bool {
        self.profile_id == NO_BUILD_ID
    }
}

/// Profile registry and evaluator.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    profiles: Vec<Profile>,
}

impl ScoringEngine {
    /// An engine with no profiles.
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine with the built-in profiles.
    pub fn with_default_profiles() -> Self {
        Self::with_profiles(builtin_profiles())
    }

    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    /// Add a profile, replacing one with the same id in place.
    pub fn add_profile(&mut self, profile: Profile) {
        match self.profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn profile(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Score the build against every profile, best first. Profiles with
    /// equal totals keep their declaration order.
    pub fn evaluate(&self, build: &Build) -> Vec<ProfileScore> {
        if build.is_empty() {
            return vec![ProfileScore::no_build()];
        }

        let mut scores: Vec<ProfileScore> = self
            .profiles
            .iter()
            .map(|profile| score_profile(profile, build))
            .collect();
        scores.sort_by(|a, b| b.total_score.cmp(&a.total_score));

        tracing::debug!(
            "Evaluated {} profiles, best: {:?}",
            scores.len(),
            scores.first().map(|s| s.profile_id.as_str())
        );
        scores
    }
}

fn score_profile(profile: &Profile, build: &Build) -> ProfileScore {
    let contributions: Vec<RuleContribution> = profile
        .rules
        .iter()
        .filter(|rule| rule.enabled)
        .map(|rule| {
            let outcome = rule.check.evaluate(build);
            RuleContribution {
                rule_id: rule.id.clone(),
                score: outcome.score,
                feedback: outcome.feedback,
            }
        })
        .collect();

    ProfileScore {
        profile_id: profile.id.clone(),
        name: profile.name.clone(),
        description: profile.description.clone(),
        total_score: contributions
            .iter()
            .fold(0i32, |total, c| total.saturating_add(c.score)),
        feedback: contributions
            .iter()
            .filter(|c| !c.feedback.is_empty())
            .map(|c| c.feedback.clone())
            .collect(),
        contributions,
    }
}

/// Evaluate a build with the built-in profiles.
pub fn evaluate_build(build: &Build) -> Vec<ProfileScore> {
    DEFAULT_ENGINE.evaluate(build)
}
