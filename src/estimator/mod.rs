//! Inference request builder.
//!
//! Turns a validated request plus its neighborhood profile into the exact
//! feature vector the bundle was trained on, runs scaler and model, and
//! derives the price breakdown.
//!
//! The caller resolves the profile: `table.lookup(name)` falling back to
//! `table.fallback()`. Resolution is kept out of here so the estimator never
//! owns reference data.

use std::sync::Arc;

use serde::Serialize;

use crate::artifacts::ArtifactBundle;
use crate::domain::{FeatureDefaults, FeatureVector, NeighborhoodProfile, PredictionRequest, PredictionResult};

pub mod encoding;
pub mod features;

pub use encoding::{EncodedNeighborhood, encode_neighborhood};
pub use features::assemble_features;

/// Every intermediate of one estimate, for diagnostics and export.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateTrace {
    pub neighborhood_code: i64,
    pub encoder_fallback: bool,
    pub raw_features: FeatureVector,
    pub scaled_features: FeatureVector,
    pub result: PredictionResult,
}

#[derive(Debug, Clone)]
pub struct Estimator {
    bundle: Arc<ArtifactBundle>,
    defaults: FeatureDefaults,
}

impl Estimator {
    pub fn new(bundle: Arc<ArtifactBundle>) -> Self {
        Self {
            bundle,
            defaults: FeatureDefaults::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: FeatureDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn bundle(&self) -> &ArtifactBundle {
        &self.bundle
    }

    pub fn defaults(&self) -> &FeatureDefaults {
        &self.defaults
    }

    /// Encoder code for `name`, or the `Other` code if unseen in training.
    pub fn encode_neighborhood(&self, name: &str) -> EncodedNeighborhood {
        encode_neighborhood(self.bundle.encoder(), name)
    }

    /// Raw (unscaled) model input for `request`.
    pub fn build_features(&self, request: &PredictionRequest, profile: &NeighborhoodProfile) -> FeatureVector {
        let encoded = self.encode_neighborhood(request.neighborhood());
        assemble_features(request, profile, &self.defaults, encoded.code)
    }

    /// Predict a price and derive the breakdown.
    ///
    /// Infallible: the request is validated at construction and the bundle at
    /// load. The same inputs always give the same result.
    pub fn estimate(&self, request: &PredictionRequest, profile: &NeighborhoodProfile) -> PredictionResult {
        self.estimate_detailed(request, profile).result
    }

    pub fn estimate_detailed(&self, request: &PredictionRequest, profile: &NeighborhoodProfile) -> EstimateTrace {
        let encoded = self.encode_neighborhood(request.neighborhood());
        let raw_features = assemble_features(request, profile, &self.defaults, encoded.code);
        let scaled_features = self.bundle.scaler().transform(&raw_features);
        let predicted = self.bundle.model().predict(&scaled_features);

        EstimateTrace {
            neighborhood_code: encoded.code,
            encoder_fallback: encoded.fell_back,
            raw_features,
            scaled_features,
            result: PredictionResult::from_prediction(predicted, request.floor_area(), profile.avg_rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::testing::constant_bundle;
    use crate::artifacts::{FeatureSchema, LinearRegressor, demo};
    use crate::domain::{FEATURE_COUNT, Tier};
    use crate::reference::ReferenceTable;

    fn constant(price: f64) -> Estimator {
        Estimator::new(Arc::new(constant_bundle(price)))
    }

    fn resolve<'a>(table: &'a ReferenceTable, name: &str) -> &'a NeighborhoodProfile {
        table.lookup(name).unwrap_or_else(|| table.fallback())
    }

    #[test]
    fn bandra_west_breakdown() {
        let table = ReferenceTable::builtin();
        let profile = resolve(&table, "Bandra West");
        let request = PredictionRequest::new("Bandra West", 2, 2.0, 1000).unwrap();
        let estimator = constant(50_000_000.0);

        let features = estimator.build_features(&request, profile);
        let code = estimator.encode_neighborhood("Bandra West").code;
        assert_eq!(
            features,
            [2.0, 2.0, 1000.0, 40000.0, 5.0, 3.0, 1.0, 0.0, 9.0, 1.0, 0.0, code as f64]
        );

        let result = estimator.estimate(&request, profile);
        assert_eq!(result.predicted_price, 50_000_000.0);
        assert_eq!(result.base_price, 40_000_000.0);
        assert_eq!(result.premium, 10_000_000.0);
        assert_eq!(result.effective_rate, 50_000.0);
    }

    #[test]
    fn unknown_neighborhood_uses_other_everywhere() {
        let table = ReferenceTable::builtin();
        let estimator = constant(1.0);
        let profile = resolve(&table, "Atlantis");
        assert_eq!(profile.name, "Other");
        assert_eq!(profile.avg_rate, 15000.0);

        let atlantis = PredictionRequest::new("Atlantis", 2, 2.0, 1000).unwrap();
        let other = PredictionRequest::new("Other", 2, 2.0, 1000).unwrap();
        assert_eq!(
            estimator.build_features(&atlantis, profile),
            estimator.build_features(&other, table.fallback())
        );
        assert!(estimator.estimate_detailed(&atlantis, profile).encoder_fallback);
    }

    #[test]
    fn table_name_unknown_to_encoder_keeps_its_own_rate() {
        let table = ReferenceTable::builtin();
        let estimator = constant(1.0);
        assert!(!estimator.bundle().encoder().contains("Worli"));

        let profile = resolve(&table, "Worli");
        let request = PredictionRequest::new("Worli", 3, 2.0, 1200).unwrap();
        let trace = estimator.estimate_detailed(&request, profile);

        assert!(trace.encoder_fallback);
        assert_eq!(trace.neighborhood_code, estimator.bundle().encoder().fallback_code());
        assert_eq!(trace.raw_features[3], profile.avg_rate);
        assert_ne!(profile.avg_rate, table.fallback().avg_rate);
    }

    #[test]
    fn repeated_estimates_are_identical() {
        let estimator = Estimator::new(Arc::new(demo::generate(&demo::DemoConfig::default()).unwrap().into_bundle().unwrap()));
        let table = ReferenceTable::builtin();
        let request = PredictionRequest::new("Powai", 3, 2.5, 1450).unwrap();
        let profile = resolve(&table, "Powai");

        let first = estimator.estimate_detailed(&request, profile);
        for _ in 0..5 {
            let again = estimator.estimate_detailed(&request, profile);
            assert_eq!(again.result, first.result);
            assert_eq!(again.scaled_features, first.scaled_features);
        }
    }

    #[test]
    fn base_price_scales_linearly_with_area() {
        let table = ReferenceTable::builtin();
        let profile = resolve(&table, "Juhu");
        let estimator = constant(1.0);
        let base = |area| {
            let request = PredictionRequest::new("Juhu", 2, 2.0, area).unwrap();
            estimator.estimate(&request, profile).base_price
        };
        assert_eq!(base(2000), 2.0 * base(1000));
        assert_eq!(base(1000), 1000.0 * profile.avg_rate);
    }

    #[test]
    fn below_baseline_prediction_has_negative_premium() {
        let profile = NeighborhoodProfile::new("Bandra West", 35000.0, 45000.0, 40000.0, Tier::UltraPremium);
        let request = PredictionRequest::new("Bandra West", 1, 1.0, 500).unwrap();
        let result = constant(10_000_000.0).estimate(&request, &profile);
        assert!(result.premium < 0.0);
        assert_eq!(result.premium, 10_000_000.0 - 20_000_000.0);
    }

    #[test]
    fn linear_model_sees_scaled_not_raw_features() {
        use crate::artifacts::ScalerFile;

        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[2] = 1.0;
        let model = LinearRegressor::new(0.0, coefficients).unwrap();
        let mut scale = vec![1.0; FEATURE_COUNT];
        scale[2] = 100.0;
        let scaler = ScalerFile::Standard {
            mean: vec![0.0; FEATURE_COUNT],
            scale,
        }
        .into_scaler()
        .unwrap();
        let bundle = ArtifactBundle::new(
            Box::new(model),
            scaler,
            crate::artifacts::testing::encoder(&["Juhu", "Other"]),
            FeatureSchema::pipeline(),
        );

        let table = ReferenceTable::builtin();
        let request = PredictionRequest::new("Juhu", 2, 2.0, 1500).unwrap();
        let trace = Estimator::new(Arc::new(bundle)).estimate_detailed(&request, resolve(&table, "Juhu"));
        assert_eq!(trace.raw_features[2], 1500.0);
        assert_eq!(trace.scaled_features[2], 15.0);
        assert_eq!(trace.result.predicted_price, 15.0);
    }
}
