//! Shared estimate pipeline used by the CLI, the wizard and the TUI.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! resolve profile -> encode -> assemble features -> scale -> predict -> breakdown
//!
//! The front-ends can then focus on presentation (printing vs widgets).

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::artifacts::ArtifactBundle;
use crate::domain::{NeighborhoodProfile, PredictionRequest};
use crate::error::AppError;
use crate::estimator::{EstimateTrace, Estimator};
use crate::reference::ReferenceTable;

/// Reference data and a loaded estimator, built once per process.
#[derive(Debug, Clone)]
pub struct Session {
    table: ReferenceTable,
    estimator: Estimator,
}

/// All computed outputs of a single estimate.
#[derive(Debug, Clone)]
pub struct EstimateOutput {
    pub profile: NeighborhoodProfile,
    pub trace: EstimateTrace,
}

impl Session {
    /// Load the bundle from `dir` alongside the built-in table.
    ///
    /// Fails with the artifact exit code; no input should be accepted after
    /// that.
    pub fn load(dir: &Path) -> Result<Self, AppError> {
        let bundle = ArtifactBundle::load(dir)?;
        Ok(Self::new(ReferenceTable::builtin(), bundle))
    }

    pub fn new(table: ReferenceTable, bundle: ArtifactBundle) -> Self {
        Self {
            table,
            estimator: Estimator::new(Arc::new(bundle)),
        }
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    pub fn estimator(&self) -> &Estimator {
        &self.estimator
    }

    /// The exact profile for `name`, or the `Other` profile.
    pub fn resolve(&self, name: &str) -> &NeighborhoodProfile {
        self.table.lookup(name).unwrap_or_else(|| self.table.fallback())
    }

    pub fn run_estimate(&self, request: &PredictionRequest) -> EstimateOutput {
        let profile = self.resolve(request.neighborhood());
        let trace = self.estimator.estimate_detailed(request, profile);

        debug!(
            neighborhood = request.neighborhood(),
            profile = %profile.name,
            bedrooms = request.bedrooms(),
            bathrooms = request.bathrooms(),
            floor_area = request.floor_area(),
            code = trace.neighborhood_code,
            price = trace.result.predicted_price,
            "estimate"
        );

        EstimateOutput {
            profile: profile.clone(),
            trace,
        }
    }
}
