//! Built-in and user scoring profiles
//!
//! Profiles come from:
//! 1. JSON files compiled into the binary (`profiles/*.json`)
//! 2. A user directory of JSON files, loaded at runtime
//!
//! A user profile with the id of a built-in one replaces it in place, so
//! declaration order (and with it the tie order of the ranking) stays put.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::profile::Profile;

const EMBEDDED_GAMING: &str = include_str!("../../profiles/gaming.json");
const EMBEDDED_OFFICE: &str = include_str!("../../profiles/office.json");
const EMBEDDED_PROFESSIONAL: &str = include_str!("../../profiles/professional.json");

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to read profile {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse profile {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Profiles compiled into the binary, in declaration order.
pub fn builtin_profiles() -> Vec<Profile> {
    let embedded_jsons = [EMBEDDED_GAMING, EMBEDDED_OFFICE, EMBEDDED_PROFESSIONAL];

    let mut profiles = Vec::new();
    for json_str in embedded_jsons {
        match serde_json::from_str::<Profile>(json_str) {
            Ok(profile) => profiles.push(profile),
            Err(e) => {
                tracing::warn!("Failed to parse embedded profile: {}", e);
            }
        }
    }
    profiles
}

/// Load a single profile from a JSON file
pub fn load_profile_from_file(path: &Path) -> Result<Profile, ProfileError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ProfileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load profiles from a directory of JSON files.
/// Returns the loaded profiles and one message per file that failed.
pub fn load_profiles_from_directory(dir: &Path) -> (Vec<Profile>, Vec<String>) {
    let mut profiles = Vec::new();
    let mut errors = Vec::new();

    if !dir.is_dir() {
        return (profiles, errors);
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            errors.push(format!("Failed to read directory {:?}: {}", dir, e));
            return (profiles, errors);
        }
    };

    // read_dir order is platform dependent
    let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
    paths.sort();

    for path in paths {
        if path.extension().map(|e| e != "json").unwrap_or(true) {
            continue;
        }

        match load_profile_from_file(&path) {
            Ok(profile) => {
                tracing::info!("Loaded profile '{}' from {:?}", profile.id, path.file_name());
                profiles.push(profile);
            }
            Err(e) => {
                let error_msg = e.to_string();
                tracing::warn!("{}", error_msg);
                errors.push(error_msg);
            }
        }
    }

    (profiles, errors)
}

/// Built-in profiles overlaid with the profiles found in `user_dir`.
pub fn load_profiles(user_dir: Option<&Path>) -> Vec<Profile> {
    let mut profiles = builtin_profiles();

    let Some(dir) = user_dir else {
        return profiles;
    };

    let (user_profiles, errors) = load_profiles_from_directory(dir);
    for error in errors {
        tracing::warn!("User profile loading error: {}", error);
    }

    for profile in user_profiles {
        match profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile,
            None => profiles.push(profile),
        }
    }

    tracing::info!("Total profiles available: {}", profiles.len());
    profiles
}
