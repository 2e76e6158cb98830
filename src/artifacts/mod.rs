//! Pre-trained artifact bundle: model, scaler, category encoder, feature schema.
//!
//! The four pieces are loaded together from one directory, validated once,
//! and then shared read-only for the life of the process. Any failure here is
//! fatal: the caller must not accept input without a complete bundle.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::domain::FEATURE_NAMES;

pub mod demo;
pub mod encoder;
pub mod model;
pub mod scaler;
pub mod schema;

pub use encoder::{CategoryEncoder, EncoderFile};
pub use model::{Aggregation, LinearRegressor, Model, ModelFile, RegressionTree, TreeEnsemble, TreeNode};
pub use scaler::{AffineScaler, Scaler, ScalerFile};
pub use schema::FeatureSchema;

pub const MODEL_FILE: &str = "model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const ENCODER_FILE: &str = "area_encoder.json";
pub const SCHEMA_FILE: &str = "feature_info.json";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("cannot read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("cannot parse '{}': {source}", .path.display())]
    Parse { path: PathBuf, source: serde_json::Error },

    #[error("cannot write '{}': {source}", .path.display())]
    Write { path: PathBuf, source: std::io::Error },

    #[error("{artifact} expects {found} features, the pipeline uses {expected}")]
    Width {
        artifact: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{artifact} is invalid: {reason}")]
    Invalid { artifact: &'static str, reason: String },
}

/// The serialized form of a bundle, one value per file.
#[derive(Debug, Clone)]
pub struct BundleFiles {
    pub model: ModelFile,
    pub scaler: ScalerFile,
    pub encoder: EncoderFile,
    pub schema: FeatureSchema,
}

impl BundleFiles {
    pub fn read_from(dir: &Path) -> Result<Self, ArtifactError> {
        Ok(Self {
            model: read_json(&dir.join(MODEL_FILE))?,
            scaler: read_json(&dir.join(SCALER_FILE))?,
            encoder: read_json(&dir.join(ENCODER_FILE))?,
            schema: read_json(&dir.join(SCHEMA_FILE))?,
        })
    }

    pub fn write_to(&self, dir: &Path) -> Result<(), ArtifactError> {
        fs::create_dir_all(dir).map_err(|source| ArtifactError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
        write_json(&dir.join(MODEL_FILE), &self.model)?;
        write_json(&dir.join(SCALER_FILE), &self.scaler)?;
        write_json(&dir.join(ENCODER_FILE), &self.encoder)?;
        write_json(&dir.join(SCHEMA_FILE), &self.schema)?;
        Ok(())
    }

    /// Validate every component and assemble the inference bundle.
    pub fn into_bundle(self) -> Result<ArtifactBundle, ArtifactError> {
        self.schema.validate_width()?;
        let model = self.model.into_model()?;
        let scaler = self.scaler.into_scaler()?;
        let encoder = CategoryEncoder::try_from(self.encoder)?;

        let mismatches = self.schema.mismatches();
        if !mismatches.is_empty() {
            // Not fatal: the numeric pipeline never reads these names.
            let columns: Vec<String> = mismatches
                .iter()
                .map(|&i| format!("{i}:{}!={}", self.schema.feature_names[i], FEATURE_NAMES[i]))
                .collect();
            warn!(columns = %columns.join(", "), "feature schema names differ from pipeline order");
        }

        Ok(ArtifactBundle {
            model,
            scaler,
            encoder,
            schema: self.schema,
        })
    }
}

/// Immutable, load-once inference context.
#[derive(Debug)]
pub struct ArtifactBundle {
    model: Box<dyn Model>,
    scaler: Box<dyn Scaler>,
    encoder: CategoryEncoder,
    schema: FeatureSchema,
}

impl ArtifactBundle {
    /// Assemble a bundle from already-built parts (e.g. test doubles).
    pub fn new(
        model: Box<dyn Model>,
        scaler: Box<dyn Scaler>,
        encoder: CategoryEncoder,
        schema: FeatureSchema,
    ) -> Self {
        Self {
            model,
            scaler,
            encoder,
            schema,
        }
    }

    /// Load `model.json`, `scaler.json`, `area_encoder.json` and
    /// `feature_info.json` from `dir`.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let bundle = BundleFiles::read_from(dir)?.into_bundle()?;
        info!(
            dir = %dir.display(),
            model = %bundle.model.describe(),
            scaler = %bundle.scaler.describe(),
            classes = bundle.encoder.classes().len(),
            "artifact bundle loaded"
        );
        Ok(bundle)
    }

    pub fn model(&self) -> &dyn Model {
        self.model.as_ref()
    }

    pub fn scaler(&self) -> &dyn Scaler {
        self.scaler.as_ref()
    }

    pub fn encoder(&self) -> &CategoryEncoder {
        &self.encoder
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(std::io::BufReader::new(file)).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let file = File::create(path).map_err(|source| ArtifactError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer_pretty(file, value).map_err(|source| ArtifactError::Write {
        path: path.to_path_buf(),
        source: source.into(),
    })
}

/// Test doubles shared by unit tests across the crate.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::domain::FeatureVector;

    /// Always predicts the same price.
    #[derive(Debug)]
    pub struct ConstantModel(pub f64);

    impl Model for ConstantModel {
        fn predict(&self, _features: &FeatureVector) -> f64 {
            self.0
        }

        fn describe(&self) -> String {
            "constant".to_string()
        }
    }

    /// Passes features through untouched.
    #[derive(Debug)]
    pub struct IdentityScaler;

    impl Scaler for IdentityScaler {
        fn transform(&self, raw: &FeatureVector) -> FeatureVector {
            *raw
        }

        fn describe(&self) -> String {
            "identity".to_string()
        }
    }

    pub fn encoder(names: &[&str]) -> CategoryEncoder {
        CategoryEncoder::from_classes(names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    /// Constant-price bundle over a small vocabulary that includes
    /// "Bandra West" but not every reference-table name.
    pub fn constant_bundle(price: f64) -> ArtifactBundle {
        ArtifactBundle::new(
            Box::new(ConstantModel(price)),
            Box::new(IdentityScaler),
            encoder(&["Andheri West", "Bandra West", "Juhu", "Other", "Powai"]),
            FeatureSchema::pipeline(),
        )
    }
}
