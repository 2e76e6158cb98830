//! Shared domain types.
//!
//! These types are intentionally small and serializable so they can be:
//!
//! - used in-memory by the estimator
//! - exported to JSON alongside an estimate
//! - rendered by any of the front-ends

use std::ops::RangeInclusive;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Number of model input columns.
pub const FEATURE_COUNT: usize = 12;

/// One fully assembled model input row, in `FEATURE_NAMES` order.
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Column order the scaler and model were trained against.
///
/// Reordering these silently corrupts predictions; nothing downstream can
/// detect it.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "bedroom",
    "Bathroom",
    "Carpet Area",
    "price_per_sqft_capped",
    "basic_amenities_score",
    "standard_amenities_score",
    "premium_amenities_score",
    "luxury_amenities_score",
    "total_amenities_score",
    "property_type_encoded",
    "furnished_encoded",
    "Area_Encoded",
];

/// Reference-table key and encoder label used when a neighborhood is unknown.
pub const FALLBACK_NEIGHBORHOOD: &str = "Other";

pub const BEDROOMS: RangeInclusive<u8> = 1..=6;
pub const BATHROOMS_MIN: f64 = 1.0;
pub const BATHROOMS_MAX: f64 = 5.0;
pub const BATHROOMS_STEP: f64 = 0.5;
pub const FLOOR_AREA_MIN: u32 = 300;
pub const FLOOR_AREA_MAX: u32 = 5000;
pub const FLOOR_AREA_STEP: u32 = 50;

/// Initial form values (2 bed, 2 bath, 1000 sq ft).
pub const DEFAULT_BEDROOMS: u8 = 2;
pub const DEFAULT_BATHROOMS: f64 = 2.0;
pub const DEFAULT_FLOOR_AREA: u32 = 1000;

/// Coarse price category of a neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    UltraPremium,
    Premium,
    MidRange,
    Affordable,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::UltraPremium, Tier::Premium, Tier::MidRange, Tier::Affordable];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Tier::UltraPremium => "Ultra Premium",
            Tier::Premium => "Premium",
            Tier::MidRange => "Mid-Range",
            Tier::Affordable => "Affordable",
        }
    }
}

/// Price-per-unit-area reference data for one neighborhood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodProfile {
    pub name: String,
    pub min_rate: f64,
    pub max_rate: f64,
    pub avg_rate: f64,
    pub tier: Tier,
}

impl NeighborhoodProfile {
    pub fn new(name: impl Into<String>, min_rate: f64, max_rate: f64, avg_rate: f64, tier: Tier) -> Self {
        Self {
            name: name.into(),
            min_rate,
            max_rate,
            avg_rate,
            tier,
        }
    }

    /// `min_rate <= avg_rate <= max_rate`, all finite.
    pub fn rates_are_ordered(&self) -> bool {
        [self.min_rate, self.avg_rate, self.max_rate].iter().all(|v| v.is_finite())
            && self.min_rate <= self.avg_rate
            && self.avg_rate <= self.max_rate
    }
}

/// One user action's worth of input.
///
/// Fields are private: the only way in is [`PredictionRequest::new`], which
/// enforces the form bounds. In particular `floor_area > 0` always holds, so
/// the effective-rate division downstream cannot fault.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    neighborhood: String,
    bedrooms: u8,
    bathrooms: f64,
    floor_area: u32,
}

impl PredictionRequest {
    pub fn new(
        neighborhood: impl Into<String>,
        bedrooms: u8,
        bathrooms: f64,
        floor_area: u32,
    ) -> Result<Self, AppError> {
        let neighborhood = neighborhood.into();
        if neighborhood.trim().is_empty() {
            return Err(AppError::usage("Neighborhood must not be empty."));
        }
        if !BEDROOMS.contains(&bedrooms) {
            return Err(AppError::usage(format!(
                "Bedrooms must be between {} and {} (got {bedrooms}).",
                BEDROOMS.start(),
                BEDROOMS.end()
            )));
        }
        if !(BATHROOMS_MIN..=BATHROOMS_MAX).contains(&bathrooms)
            || (bathrooms / BATHROOMS_STEP).fract() != 0.0
        {
            return Err(AppError::usage(format!(
                "Bathrooms must be between {BATHROOMS_MIN:.1} and {BATHROOMS_MAX:.1} in steps of {BATHROOMS_STEP} (got {bathrooms})."
            )));
        }
        if !(FLOOR_AREA_MIN..=FLOOR_AREA_MAX).contains(&floor_area) || floor_area % FLOOR_AREA_STEP != 0 {
            return Err(AppError::usage(format!(
                "Carpet area must be between {FLOOR_AREA_MIN} and {FLOOR_AREA_MAX} sq ft in steps of {FLOOR_AREA_STEP} (got {floor_area})."
            )));
        }

        Ok(Self {
            neighborhood,
            bedrooms,
            bathrooms,
            floor_area,
        })
    }

    pub fn neighborhood(&self) -> &str {
        &self.neighborhood
    }

    pub fn bedrooms(&self) -> u8 {
        self.bedrooms
    }

    pub fn bathrooms(&self) -> f64 {
        self.bathrooms
    }

    pub fn floor_area(&self) -> u32 {
        self.floor_area
    }
}

/// Amenity scores broken into four fixed tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmenityScores {
    pub basic: f64,
    pub standard: f64,
    pub premium: f64,
    pub luxury: f64,
}

impl AmenityScores {
    pub fn total(&self) -> f64 {
        self.basic + self.standard + self.premium + self.luxury
    }
}

impl Default for AmenityScores {
    fn default() -> Self {
        Self {
            basic: 5.0,
            standard: 3.0,
            premium: 1.0,
            luxury: 0.0,
        }
    }
}

/// Features the model needs but the form never asks for.
///
/// Defaults: amenities 5/3/1/0 (total 9), property type `1` (apartment),
/// furnished `0` (unfurnished).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureDefaults {
    pub amenities: AmenityScores,
    pub property_type_code: f64,
    pub furnished_code: f64,
}

impl Default for FeatureDefaults {
    fn default() -> Self {
        Self {
            amenities: AmenityScores::default(),
            property_type_code: 1.0,
            furnished_code: 0.0,
        }
    }
}

impl FeatureDefaults {
    pub fn with_amenities(mut self, amenities: AmenityScores) -> Self {
        self.amenities = amenities;
        self
    }

    pub fn with_property_type_code(mut self, code: f64) -> Self {
        self.property_type_code = code;
        self
    }

    pub fn with_furnished_code(mut self, code: f64) -> Self {
        self.furnished_code = code;
        self
    }
}

/// Model output plus the derived breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_price: f64,
    /// `floor_area × avg_rate`, using the same rate fed to the model.
    pub base_price: f64,
    /// `predicted_price − base_price`; negative when the model lands below the baseline.
    pub premium: f64,
    /// `predicted_price ÷ floor_area`.
    pub effective_rate: f64,
}

impl PredictionResult {
    pub fn from_prediction(predicted_price: f64, floor_area: u32, avg_rate: f64) -> Self {
        let area = f64::from(floor_area);
        let base_price = area * avg_rate;
        Self {
            predicted_price,
            base_price,
            premium: predicted_price - base_price,
            effective_rate: predicted_price / area,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_accepts_form_bounds() {
        assert!(PredictionRequest::new("Juhu", 1, 1.0, 300).is_ok());
        assert!(PredictionRequest::new("Juhu", 6, 5.0, 5000).is_ok());
        assert!(PredictionRequest::new("Juhu", 3, 2.5, 1250).is_ok());
    }

    #[test]
    fn request_rejects_out_of_range_values() {
        assert!(PredictionRequest::new("Juhu", 0, 2.0, 1000).is_err());
        assert!(PredictionRequest::new("Juhu", 7, 2.0, 1000).is_err());
        assert!(PredictionRequest::new("Juhu", 2, 0.5, 1000).is_err());
        assert!(PredictionRequest::new("Juhu", 2, 2.25, 1000).is_err());
        assert!(PredictionRequest::new("Juhu", 2, 2.0, 0).is_err());
        assert!(PredictionRequest::new("Juhu", 2, 2.0, 5050).is_err());
        assert!(PredictionRequest::new("Juhu", 2, 2.0, 1025).is_err());
        assert!(PredictionRequest::new("  ", 2, 2.0, 1000).is_err());
    }

    #[test]
    fn request_errors_are_usage_errors() {
        let err = PredictionRequest::new("Juhu", 9, 2.0, 1000).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_USAGE);
        assert!(err.message().contains("Bedrooms"));
    }

    #[test]
    fn default_amenities_total_nine() {
        let defaults = FeatureDefaults::default();
        assert_eq!(defaults.amenities.total(), 9.0);
        assert_eq!(defaults.property_type_code, 1.0);
        assert_eq!(defaults.furnished_code, 0.0);
    }

    #[test]
    fn breakdown_allows_negative_premium() {
        let r = PredictionResult::from_prediction(30_000_000.0, 1000, 40_000.0);
        assert_eq!(r.base_price, 40_000_000.0);
        assert_eq!(r.premium, -10_000_000.0);
        assert_eq!(r.effective_rate, 30_000.0);
    }
}
