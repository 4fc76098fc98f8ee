//! Configured timing entries, normalized and ready for lookup

use crate::core::config::FallbackTiming;
use crate::core::types::{normalize_individual_key, ReplacementKey};
use crate::timing::profile::{EventFractions, TimingProfile};
use ahash::AHashMap;

#[derive(Debug, Clone, Default)]
pub struct TimingTable {
    /// Profile used when the replacement clip has no usable length
    pub default: TimingProfile,
    /// Tier 2: per weapon type and mode
    pub weapon_types: AHashMap<ReplacementKey, TimingProfile>,
    /// Tier 1: exact keys, either `{Type}_{mode}` or `{Item}_{mode}`
    pub individual: AHashMap<String, TimingProfile>,
    /// Pinned event fractions for the computed tier
    pub fractions: AHashMap<ReplacementKey, EventFractions>,
}

impl TimingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback(fallback: &FallbackTiming) -> Self {
        Self {
            default: TimingProfile::fallback(fallback),
            ..Self::default()
        }
    }

    pub fn individual(&self, key: &str) -> Option<&TimingProfile> {
        self.individual.get(key)
    }

    pub fn weapon_type(&self, key: &ReplacementKey) -> Option<&TimingProfile> {
        self.weapon_types.get(key)
    }

    pub fn insert_weapon_type(&mut self, key: ReplacementKey, profile: TimingProfile) {
        self.weapon_types.insert(key, profile);
    }

    /// Insert an individual entry; the key's mode suffix is normalized
    pub fn insert_individual(&mut self, key: &str, profile: TimingProfile) {
        self.individual.insert(normalize_individual_key(key), profile);
    }

    pub fn insert_fractions(&mut self, key: ReplacementKey, fractions: EventFractions) {
        self.fractions.insert(key, fractions.clamped());
    }

    /// Number of configured entries across both lookup tiers
    pub fn len(&self) -> usize {
        self.weapon_types.len() + self.individual.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
