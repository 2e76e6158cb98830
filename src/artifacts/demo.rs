//! Synthetic demo bundle.
//!
//! Generates listings from the reference table, fits a standard scaler and a
//! linear model on them, and returns the four artifact files. The result is
//! a valid bundle for local runs and tests; it is not a market model.

use chrono::NaiveDate;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use tracing::info;

use crate::domain::{AmenityScores, FEATURE_COUNT, FeatureDefaults, FeatureVector, PredictionRequest};
use crate::estimator::features::assemble_features;
use crate::math::fit_with_intercept;
use crate::reference::ReferenceTable;

use super::{ArtifactError, BundleFiles, CategoryEncoder, EncoderFile, FeatureSchema, ModelFile, ScalerFile};

const ARTIFACT: &str = "demo bundle";

/// Log-scale price noise around `area × avg_rate`.
const PRICE_NOISE_SIGMA: f64 = 0.12;

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub seed: u64,
    pub samples: usize,
    pub model_name: String,
    pub trained_on: Option<NaiveDate>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            samples: 2000,
            model_name: "demo-linear".to_string(),
            trained_on: None,
        }
    }
}

pub fn generate(config: &DemoConfig) -> Result<BundleFiles, ArtifactError> {
    if config.samples < FEATURE_COUNT + 1 {
        return Err(ArtifactError::Invalid {
            artifact: ARTIFACT,
            reason: format!("need at least {} samples (got {})", FEATURE_COUNT + 1, config.samples),
        });
    }

    let table = ReferenceTable::builtin();
    let mut classes: Vec<String> = table.names().map(str::to_string).collect();
    classes.sort();
    let encoder = CategoryEncoder::from_classes(classes)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, PRICE_NOISE_SIGMA).map_err(|e| ArtifactError::Invalid {
        artifact: ARTIFACT,
        reason: format!("noise distribution: {e}"),
    })?;

    let mut rows: Vec<FeatureVector> = Vec::with_capacity(config.samples);
    let mut prices = Vec::with_capacity(config.samples);

    for _ in 0..config.samples {
        let position = rng.gen_range(0..table.len());
        let Some(profile) = table.get(position) else {
            continue;
        };
        let bedrooms: u8 = rng.gen_range(1..=6);
        let bathrooms = f64::from(rng.gen_range(2u8..=10)) * 0.5;
        let floor_area = rng.gen_range(6u32..=100) * 50;

        let amenities = AmenityScores {
            basic: f64::from(rng.gen_range(2u8..=8)),
            standard: f64::from(rng.gen_range(0u8..=6)),
            premium: f64::from(rng.gen_range(0u8..=4)),
            luxury: f64::from(rng.gen_range(0u8..=2)),
        };
        let defaults = FeatureDefaults::default()
            .with_amenities(amenities)
            .with_furnished_code(f64::from(rng.gen_range(0u8..=2)));

        let request = PredictionRequest::new(profile.name.as_str(), bedrooms, bathrooms, floor_area).map_err(|e| {
            ArtifactError::Invalid {
                artifact: ARTIFACT,
                reason: e.to_string(),
            }
        })?;
        let code = encoder.encode(&profile.name).unwrap_or_else(|| encoder.fallback_code());

        let amenity_lift = 1.0 + 0.01 * amenities.total() + 0.03 * f64::from(bedrooms.saturating_sub(2));
        let price = f64::from(floor_area) * profile.avg_rate * amenity_lift * rng.sample(noise).exp();

        rows.push(assemble_features(&request, profile, &defaults, code));
        prices.push(price);
    }

    let (mean, scale) = column_moments(&rows);
    let scaled: Vec<Vec<f64>> = rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(mean.iter().zip(&scale))
                .map(|(x, (m, s))| (x - m) / s)
                .collect()
        })
        .collect();

    let (intercept, coefficients) = fit_with_intercept(&scaled, &prices).ok_or_else(|| ArtifactError::Invalid {
        artifact: ARTIFACT,
        reason: "least squares fit did not converge".to_string(),
    })?;

    info!(
        samples = rows.len(),
        seed = config.seed,
        intercept,
        "demo model fitted"
    );

    Ok(BundleFiles {
        model: ModelFile::Linear {
            intercept,
            coefficients,
        },
        scaler: ScalerFile::Standard { mean, scale },
        encoder: EncoderFile {
            classes: encoder.classes().to_vec(),
        },
        schema: FeatureSchema {
            model_name: Some(config.model_name.clone()),
            trained_on: config.trained_on,
            ..FeatureSchema::pipeline()
        },
    })
}

/// Per-column mean and population standard deviation; zero spread maps to `1`.
fn column_moments(rows: &[FeatureVector]) -> (Vec<f64>, Vec<f64>) {
    let n = rows.len().max(1) as f64;
    let mut mean = vec![0.0; FEATURE_COUNT];
    for row in rows {
        for (acc, x) in mean.iter_mut().zip(row) {
            *acc += x;
        }
    }
    for m in &mut mean {
        *m /= n;
    }

    let mut scale = vec![0.0; FEATURE_COUNT];
    for row in rows {
        for ((acc, x), m) in scale.iter_mut().zip(row).zip(&mean) {
            *acc += (x - m).powi(2);
        }
    }
    for s in &mut scale {
        *s = (*s / n).sqrt();
        if *s < 1e-12 {
            *s = 1.0;
        }
    }

    (mean, scale)
}
