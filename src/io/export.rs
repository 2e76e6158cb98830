//! Export a single estimate as JSON.
//!
//! The record carries everything needed to reproduce the number: the request,
//! the resolved profile, the raw feature row in pipeline order and the
//! breakdown, stamped with the time of export.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector, NeighborhoodProfile, PredictionRequest, PredictionResult};
use crate::error::AppError;
use crate::estimator::EstimateTrace;

#[derive(Debug, Clone, Serialize)]
pub struct EstimateRecord<'a> {
    pub tool: &'static str,
    pub generated_at: DateTime<Utc>,
    pub request: &'a PredictionRequest,
    pub profile: &'a NeighborhoodProfile,
    pub neighborhood_code: i64,
    pub encoder_fallback: bool,
    pub feature_names: [&'static str; FEATURE_COUNT],
    pub features: FeatureVector,
    pub result: PredictionResult,
}

impl<'a> EstimateRecord<'a> {
    pub fn new(
        request: &'a PredictionRequest,
        profile: &'a NeighborhoodProfile,
        trace: &EstimateTrace,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tool: "pe",
            generated_at,
            request,
            profile,
            neighborhood_code: trace.neighborhood_code,
            encoder_fallback: trace.encoder_fallback,
            feature_names: FEATURE_NAMES,
            features: trace.raw_features,
            result: trace.result,
        }
    }
}

/// Write an estimate record as pretty-printed JSON.
pub fn write_estimate_json(path: &Path, record: &EstimateRecord<'_>) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::runtime(format!("Failed to create export file '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, record)
        .map_err(|e| AppError::runtime(format!("Failed to write estimate JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::TimeZone;

    use crate::artifacts::testing::constant_bundle;
    use crate::estimator::Estimator;
    use crate::reference::ReferenceTable;

    #[test]
    fn record_round_trips_through_json() {
        let table = ReferenceTable::builtin();
        let profile = table.lookup("Bandra West").unwrap();
        let request = PredictionRequest::new("Bandra West", 2, 2.0, 1000).unwrap();
        let trace = Estimator::new(Arc::new(constant_bundle(50_000_000.0))).estimate_detailed(&request, profile);
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("estimate.json");
        write_estimate_json(&path, &EstimateRecord::new(&request, profile, &trace, at)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["tool"], "pe");
        assert_eq!(value["generated_at"], "2024-03-01T09:30:00Z");
        assert_eq!(value["request"]["neighborhood"], "Bandra West");
        assert_eq!(value["profile"]["tier"], "ultra-premium");
        assert_eq!(value["feature_names"][2], "Carpet Area");
        assert_eq!(value["features"][2], 1000.0);
        assert_eq!(value["result"]["premium"], 10_000_000.0);
        assert_eq!(value["encoder_fallback"], false);
    }

    #[test]
    fn unwritable_path_is_a_runtime_error() {
        let dir = tempfile::tempdir().unwrap();
        let table = ReferenceTable::builtin();
        let profile = table.fallback();
        let request = PredictionRequest::new("Other", 2, 2.0, 1000).unwrap();
        let trace = Estimator::new(Arc::new(constant_bundle(1.0))).estimate_detailed(&request, profile);

        let path = dir.path().join("missing").join("estimate.json");
        let err = write_estimate_json(&path, &EstimateRecord::new(&request, profile, &trace, Utc::now())).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_RUNTIME);
    }
}
