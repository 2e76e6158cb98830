//! Label encoder for neighborhood names.
//!
//! The code of a class is its position in the trained `classes` list, the
//! same convention a fitted label encoder persists.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::FALLBACK_NEIGHBORHOOD;

use super::ArtifactError;

const ARTIFACT: &str = "category encoder";

/// On-disk encoder representation (`area_encoder.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderFile {
    pub classes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CategoryEncoder {
    classes: Vec<String>,
    codes: HashMap<String, i64>,
}

impl CategoryEncoder {
    /// Build from the trained vocabulary.
    ///
    /// The vocabulary must contain `Other`: unknown names are encoded as
    /// `Other`, so an encoder without it could not serve every request.
    pub fn from_classes(classes: Vec<String>) -> Result<Self, ArtifactError> {
        let mut codes = HashMap::with_capacity(classes.len());
        for (idx, class) in classes.iter().enumerate() {
            if codes.insert(class.clone(), idx as i64).is_some() {
                return Err(ArtifactError::Invalid {
                    artifact: ARTIFACT,
                    reason: format!("duplicate class '{class}'"),
                });
            }
        }
        if !codes.contains_key(FALLBACK_NEIGHBORHOOD) {
            return Err(ArtifactError::Invalid {
                artifact: ARTIFACT,
                reason: format!("vocabulary has no '{FALLBACK_NEIGHBORHOOD}' class"),
            });
        }
        Ok(Self { classes, codes })
    }

    /// Trained code for an exact vocabulary member.
    pub fn encode(&self, name: &str) -> Option<i64> {
        self.codes.get(name).copied()
    }

    pub fn decode(&self, code: i64) -> Option<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| self.classes.get(idx))
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.codes.contains_key(name)
    }

    /// The known vocabulary, in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Code of the `Other` class; present by construction.
    pub fn fallback_code(&self) -> i64 {
        self.codes.get(FALLBACK_NEIGHBORHOOD).copied().unwrap_or_default()
    }

    pub fn to_file(&self) -> EncoderFile {
        EncoderFile {
            classes: self.classes.clone(),
        }
    }
}

impl TryFrom<EncoderFile> for CategoryEncoder {
    type Error = ArtifactError;

    fn try_from(file: EncoderFile) -> Result<Self, Self::Error> {
        Self::from_classes(file.classes)
    }
}
