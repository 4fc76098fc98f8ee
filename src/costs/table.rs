//! Configured cost entries, same shape as the timing table

use crate::core::types::{normalize_individual_key, ReplacementKey};
use crate::costs::profile::AttackCostProfile;
use ahash::AHashMap;

#[derive(Debug, Clone, Default)]
pub struct CostTable {
    pub default: AttackCostProfile,
    pub weapon_types: AHashMap<ReplacementKey, AttackCostProfile>,
    /// Exact keys, mode suffix normalized
    pub individual: AHashMap<String, AttackCostProfile>,
}

impl CostTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(default: AttackCostProfile) -> Self {
        Self {
            default,
            ..Self::default()
        }
    }

    pub fn insert_weapon_type(&mut self, key: ReplacementKey, cost: AttackCostProfile) {
        self.weapon_types.insert(key, cost);
    }

    pub fn insert_individual(&mut self, key: &str, cost: AttackCostProfile) {
        self.individual.insert(normalize_individual_key(key), cost);
    }

    pub fn individual(&self, key: &str) -> Option<&AttackCostProfile> {
        self.individual.get(key)
    }

    pub fn weapon_type(&self, key: &ReplacementKey) -> Option<&AttackCostProfile> {
        self.weapon_types.get(key)
    }

    pub fn len(&self) -> usize {
        self.weapon_types.len() + self.individual.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
