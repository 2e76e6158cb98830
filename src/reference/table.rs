//! Neighborhood name -> rate profile lookup.
//!
//! Lookups are exact. Missing names are not an error here: callers decide
//! when to fall back and ask for [`ReferenceTable::fallback`] explicitly.

use std::collections::HashMap;

use crate::domain::{FALLBACK_NEIGHBORHOOD, NeighborhoodProfile, Tier};
use crate::error::AppError;

use super::builtin::MUMBAI;

#[derive(Debug, Clone)]
pub struct ReferenceTable {
    profiles: Vec<NeighborhoodProfile>,
    index: HashMap<String, usize>,
    fallback: usize,
}

impl ReferenceTable {
    /// The shipped Mumbai table.
    pub fn builtin() -> Self {
        let profiles: Vec<NeighborhoodProfile> = MUMBAI
            .iter()
            .map(|&(name, min, max, avg, tier)| NeighborhoodProfile::new(name, min, max, avg, tier))
            .collect();
        let index = build_index(&profiles);
        // `MUMBAI` always carries an `Other` row, so the index hit is the only path.
        let fallback = index
            .get(FALLBACK_NEIGHBORHOOD)
            .copied()
            .unwrap_or(profiles.len().saturating_sub(1));

        Self {
            profiles,
            index,
            fallback,
        }
    }

    /// Build a table from arbitrary profiles.
    ///
    /// Rejects duplicate names, unordered rates, and tables without an
    /// `Other` entry.
    pub fn from_profiles(profiles: Vec<NeighborhoodProfile>) -> Result<Self, AppError> {
        for p in &profiles {
            if !p.rates_are_ordered() {
                return Err(AppError::usage(format!(
                    "Reference rates for '{}' must satisfy min <= avg <= max (got {} / {} / {}).",
                    p.name, p.min_rate, p.avg_rate, p.max_rate
                )));
            }
        }

        let index = build_index(&profiles);
        if index.len() != profiles.len() {
            return Err(AppError::usage("Reference table contains duplicate neighborhood names."));
        }

        let fallback = *index.get(FALLBACK_NEIGHBORHOOD).ok_or_else(|| {
            AppError::usage(format!(
                "Reference table must contain a '{FALLBACK_NEIGHBORHOOD}' entry."
            ))
        })?;

        Ok(Self {
            profiles,
            index,
            fallback,
        })
    }

    /// Exact-match lookup.
    pub fn lookup(&self, name: &str) -> Option<&NeighborhoodProfile> {
        self.index.get(name).map(|&idx| &self.profiles[idx])
    }

    /// The `Other` profile. Always present.
    pub fn fallback(&self) -> &NeighborhoodProfile {
        &self.profiles[self.fallback]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Neighborhood names in display order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &NeighborhoodProfile> {
        self.profiles.iter()
    }

    pub fn by_tier(&self, tier: Tier) -> impl Iterator<Item = &NeighborhoodProfile> {
        self.profiles.iter().filter(move |p| p.tier == tier)
    }

    /// Profile at a display position (used by numbered prompts).
    pub fn get(&self, position: usize) -> Option<&NeighborhoodProfile> {
        self.profiles.get(position)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn build_index(profiles: &[NeighborhoodProfile]) -> HashMap<String, usize> {
    profiles
        .iter()
        .enumerate()
        .map(|(idx, p)| (p.name.clone(), idx))
        .collect()
}
