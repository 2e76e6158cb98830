//! Feature schema descriptor (`feature_info.json`).
//!
//! Self-description only: the numeric pipeline always uses the built-in
//! `FEATURE_NAMES` order and never reads names from here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{FEATURE_COUNT, FEATURE_NAMES};

use super::ArtifactError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub feature_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_on: Option<NaiveDate>,
}

impl FeatureSchema {
    /// Schema describing the built-in feature order.
    pub fn pipeline() -> Self {
        Self {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            model_name: None,
            trained_on: None,
        }
    }

    pub fn validate_width(&self) -> Result<(), ArtifactError> {
        if self.feature_names.len() != FEATURE_COUNT {
            return Err(ArtifactError::Width {
                artifact: "feature schema",
                expected: FEATURE_COUNT,
                found: self.feature_names.len(),
            });
        }
        Ok(())
    }

    /// Positions where the stored names disagree with the pipeline order.
    pub fn mismatches(&self) -> Vec<usize> {
        self.feature_names
            .iter()
            .zip(FEATURE_NAMES)
            .enumerate()
            .filter(|(_, (stored, expected))| stored.as_str() != *expected)
            .map(|(idx, _)| idx)
            .collect()
    }
}
