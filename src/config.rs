//! Environment-driven settings.
//!
//! `.env` is loaded first (missing file is fine), then process variables are
//! read. CLI flags are applied on top by the caller.

use std::path::PathBuf;

pub const ARTIFACT_DIR_VAR: &str = "PE_ARTIFACT_DIR";
pub const LOG_VAR: &str = "PE_LOG";
pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub artifact_dir: PathBuf,
    pub log_filter: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
            log_filter: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            artifact_dir: read(ARTIFACT_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT_DIR)),
            log_filter: read(LOG_VAR),
        }
    }

    /// Apply `--artifacts` if given.
    pub fn with_artifact_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.artifact_dir = dir;
        }
        self
    }
}
