//! Profile documents: a named model specification loaded from JSON or YAML

use super::spec::ModelSpecification;
use crate::priority::CompileError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or activating a profile
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported profile format '{0}', expected .json, .yml or .yaml")]
    UnsupportedFormat(String),

    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// Result type for profile operations
pub type ProfileResult<T> = Result<T, ProfileError>;

/// File extensions tried, in order, when resolving a profile by name
const EXTENSIONS: [&str; 3] = ["yml", "yaml", "json"];

/// A routing profile document
///
/// ```yaml
/// name: car_quiet
/// priority:
///   road_class:
///     MOTORWAY: 0.4
///     PRIMARY: 0.7
///   max_speed:
///     "<30": 0.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile name, used as the activation key
    pub name: String,
    /// Priority rules
    #[serde(default)]
    pub priority: ModelSpecification,
}

impl Profile {
    /// Create a profile with no rules
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: ModelSpecification::new(),
        }
    }

    /// Replace the priority rules
    pub fn with_priority(mut self, priority: ModelSpecification) -> Self {
        self.priority = priority;
        self
    }

    pub fn from_json_str(text: &str) -> ProfileResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml_str(text: &str) -> ProfileResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a profile, choosing the parser from the file extension
    pub fn from_path(path: impl AsRef<Path>) -> ProfileResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let text = match extension.as_str() {
            "json" | "yml" | "yaml" => std::fs::read_to_string(path)?,
            _ => return Err(ProfileError::UnsupportedFormat(path.display().to_string())),
        };

        let profile = if extension == "json" {
            Self::from_json_str(&text)?
        } else {
            Self::from_yaml_str(&text)?
        };
        tracing::debug!(path = %path.display(), profile = %profile.name, "loaded profile");
        Ok(profile)
    }

    /// Resolve a profile argument to a file
    ///
    /// An existing path is used as is; otherwise `name.{yml,yaml,json}` is
    /// looked up in `dir`.
    pub fn locate(name_or_path: &str, dir: &Path) -> ProfileResult<PathBuf> {
        let direct = PathBuf::from(name_or_path);
        if direct.is_file() {
            return Ok(direct);
        }

        EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{}.{}", name_or_path, ext)))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| ProfileError::NotFound(name_or_path.to_string()))
    }
}

/// Default per-user profile directory (`<config dir>/edge-priority/profiles`)
pub fn default_profiles_dir() -> PathBuf {
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".config"));
    config_dir.join("edge-priority").join("profiles")
}
