//! Feature scalers fixed at training time.

use std::fmt;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::domain::{FEATURE_COUNT, FeatureVector};

use super::ArtifactError;

const ARTIFACT: &str = "scaler";

/// Maps a raw feature vector to the normalized space the model was fitted in.
pub trait Scaler: Send + Sync + fmt::Debug {
    fn transform(&self, raw: &FeatureVector) -> FeatureVector;

    fn describe(&self) -> String;
}

/// On-disk scaler representation (`scaler.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerFile {
    /// `z = (x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `z = (x - data_min) / (data_max - data_min)`
    MinMax { data_min: Vec<f64>, data_max: Vec<f64> },
}

impl ScalerFile {
    pub fn into_scaler(self) -> Result<Box<dyn Scaler>, ArtifactError> {
        match self {
            ScalerFile::Standard { mean, scale } => Ok(Box::new(AffineScaler::new("standard", mean, scale)?)),
            ScalerFile::MinMax { data_min, data_max } => {
                check_width(&data_max)?;
                let range = data_min.iter().zip(&data_max).map(|(lo, hi)| hi - lo).collect();
                Ok(Box::new(AffineScaler::new("min-max", data_min, range)?))
            }
        }
    }
}

/// Both scaler kinds reduce to `(x - offset) / divisor` per column.
#[derive(Debug, Clone)]
pub struct AffineScaler {
    kind: &'static str,
    offset: DVector<f64>,
    divisor: DVector<f64>,
}

impl AffineScaler {
    /// Zero divisors (constant training columns) are replaced with `1`.
    pub fn new(kind: &'static str, offset: Vec<f64>, divisor: Vec<f64>) -> Result<Self, ArtifactError> {
        check_width(&offset)?;
        check_width(&divisor)?;
        if offset.iter().chain(&divisor).any(|v| !v.is_finite()) {
            return Err(ArtifactError::Invalid {
                artifact: ARTIFACT,
                reason: format!("{kind} scaler parameters must be finite"),
            });
        }

        let divisor = divisor.into_iter().map(|d| if d == 0.0 { 1.0 } else { d }).collect();
        Ok(Self {
            kind,
            offset: DVector::from_vec(offset),
            divisor: DVector::from_vec(divisor),
        })
    }
}

impl Scaler for AffineScaler {
    fn transform(&self, raw: &FeatureVector) -> FeatureVector {
        let x = DVector::from_row_slice(raw);
        let z = (x - &self.offset).component_div(&self.divisor);
        let mut out = [0.0; FEATURE_COUNT];
        out.copy_from_slice(z.as_slice());
        out
    }

    fn describe(&self) -> String {
        format!("{} ({} columns)", self.kind, self.offset.len())
    }
}

fn check_width(values: &[f64]) -> Result<(), ArtifactError> {
    if values.len() != FEATURE_COUNT {
        return Err(ArtifactError::Width {
            artifact: ARTIFACT,
            expected: FEATURE_COUNT,
            found: values.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_scaler_centers_and_scales() {
        let mut mean = vec![0.0; FEATURE_COUNT];
        let mut scale = vec![1.0; FEATURE_COUNT];
        mean[2] = 1000.0;
        scale[2] = 500.0;
        let scaler = ScalerFile::Standard { mean, scale }.into_scaler().unwrap();

        let mut x = [1.0; FEATURE_COUNT];
        x[2] = 1500.0;
        let z = scaler.transform(&x);
        assert_eq!(z.len(), FEATURE_COUNT);
        assert_eq!(z[2], 1.0);
        assert_eq!(z[0], 1.0);
    }

    #[test]
    fn zero_scale_is_treated_as_one() {
        let mean = vec![5.0; FEATURE_COUNT];
        let scale = vec![0.0; FEATURE_COUNT];
        let scaler = ScalerFile::Standard { mean, scale }.into_scaler().unwrap();
        let z = scaler.transform(&[7.0; FEATURE_COUNT]);
        assert!(z.iter().all(|&v| v == 2.0));
    }

    #[test]
    fn min_max_maps_range_to_unit_interval() {
        let data_min = vec![0.0; FEATURE_COUNT];
        let data_max = vec![10.0; FEATURE_COUNT];
        let scaler = ScalerFile::MinMax { data_min, data_max }.into_scaler().unwrap();
        let z = scaler.transform(&[5.0; FEATURE_COUNT]);
        assert!(z.iter().all(|&v| (v - 0.5).abs() < 1e-12));
        assert!(scaler.describe().starts_with("min-max"));
    }

    #[test]
    fn width_mismatch_is_rejected() {
        let err = ScalerFile::Standard {
            mean: vec![0.0; 13],
            scale: vec![1.0; 13],
        }
        .into_scaler()
        .unwrap_err();
        assert!(matches!(err, ArtifactError::Width { found: 13, .. }));
    }
}
