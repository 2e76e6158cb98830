//! Neighborhood encoding with the `Other` fallback.
//!
//! Any name outside the encoder vocabulary is encoded as `Other`. This
//! includes names that *are* in the reference table but were never seen in
//! training: the two lists are maintained independently and may disagree.
//! The substitution is silent.

use tracing::debug;

use crate::artifacts::CategoryEncoder;
use crate::domain::FALLBACK_NEIGHBORHOOD;

/// Encoded neighborhood and whether the fallback was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedNeighborhood {
    pub code: i64,
    pub fell_back: bool,
}

pub fn encode_neighborhood(encoder: &CategoryEncoder, name: &str) -> EncodedNeighborhood {
    match encoder.encode(name) {
        Some(code) => EncodedNeighborhood { code, fell_back: false },
        None => {
            debug!(neighborhood = name, fallback = FALLBACK_NEIGHBORHOOD, "neighborhood not in encoder vocabulary");
            EncodedNeighborhood {
                code: encoder.fallback_code(),
                fell_back: true,
            }
        }
    }
}
