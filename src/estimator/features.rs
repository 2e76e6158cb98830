//! Feature vector assembly.
//!
//! The output layout must match `FEATURE_NAMES` exactly; the scaler and model
//! were fitted against this column order.

use crate::domain::{FeatureDefaults, FeatureVector, NeighborhoodProfile, PredictionRequest};

pub fn assemble_features(
    request: &PredictionRequest,
    profile: &NeighborhoodProfile,
    defaults: &FeatureDefaults,
    neighborhood_code: i64,
) -> FeatureVector {
    let amenities = &defaults.amenities;
    [
        f64::from(request.bedrooms()),
        request.bathrooms(),
        f64::from(request.floor_area()),
        profile.avg_rate,
        amenities.basic,
        amenities.standard,
        amenities.premium,
        amenities.luxury,
        amenities.total(),
        defaults.property_type_code,
        defaults.furnished_code,
        neighborhood_code as f64,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AmenityScores, FEATURE_COUNT, Tier};

    fn profile(avg: f64) -> NeighborhoodProfile {
        NeighborhoodProfile::new("Somewhere", avg / 2.0, avg * 2.0, avg, Tier::Premium)
    }

    #[test]
    fn layout_matches_pipeline_order() {
        let request = PredictionRequest::new("Bandra West", 2, 2.0, 1000).unwrap();
        let features = assemble_features(&request, &profile(40000.0), &FeatureDefaults::default(), 7);
        assert_eq!(features.len(), FEATURE_COUNT);
        assert_eq!(
            features,
            [2.0, 2.0, 1000.0, 40000.0, 5.0, 3.0, 1.0, 0.0, 9.0, 1.0, 0.0, 7.0]
        );
    }

    #[test]
    fn overridden_defaults_flow_through() {
        let defaults = FeatureDefaults::default()
            .with_amenities(AmenityScores {
                basic: 6.0,
                standard: 4.0,
                premium: 2.0,
                luxury: 1.0,
            })
            .with_property_type_code(2.0)
            .with_furnished_code(1.0);
        let request = PredictionRequest::new("Juhu", 4, 3.5, 2500).unwrap();
        let features = assemble_features(&request, &profile(50000.0), &defaults, 3);

        assert_eq!(&features[4..9], &[6.0, 4.0, 2.0, 1.0, 13.0]);
        assert_eq!(features[9], 2.0);
        assert_eq!(features[10], 1.0);
        assert_eq!(features[11], 3.0);
    }
}
