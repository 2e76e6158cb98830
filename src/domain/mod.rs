//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the fixed feature layout the trained pipeline expects (`FEATURE_NAMES`)
//! - neighborhood reference profiles (`NeighborhoodProfile`, `Tier`)
//! - per-estimate inputs and outputs (`PredictionRequest`, `PredictionResult`)
//! - the defaulted, non-user features (`FeatureDefaults`)

pub mod types;

pub use types::*;
