//! Cost and cooldown lookup
//!
//! Individual exact key, then weapon type/mode, then the table default.
//! Mode strings are normalized before any lookup so `T`, `secondary_T` and
//! `ea_secondary_T` all hit the same entry.

use crate::core::published::Published;
use crate::core::types::{normalize_mode_key, AttackMode, ReplacementKey, WeaponTypeTag};
use crate::costs::profile::AttackCostProfile;
use crate::costs::table::CostTable;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct CostResolver {
    table: Published<CostTable>,
}

impl CostResolver {
    pub fn new(table: CostTable) -> Self {
        Self {
            table: Published::new(table),
        }
    }

    pub fn publish_table(&self, table: CostTable) {
        self.table.publish(table);
    }

    pub fn table(&self) -> Arc<CostTable> {
        self.table.load()
    }

    pub fn cost(&self, weapon_type: WeaponTypeTag, mode: AttackMode) -> AttackCostProfile {
        let table = self.table.load();
        Self::lookup(&table, ReplacementKey::new(weapon_type, mode))
    }

    pub fn cooldown(&self, weapon_type: WeaponTypeTag, mode: AttackMode) -> f32 {
        self.cost(weapon_type, mode).cooldown_seconds
    }

    /// Cost for a specific item; `{item}_{mode}` is tried before the type tiers
    pub fn cost_for_item(&self, item: &str, weapon_type: WeaponTypeTag, mode: AttackMode) -> AttackCostProfile {
        let key = ReplacementKey::new(weapon_type, mode);
        let table = self.table.load();
        if !item.trim().is_empty() {
            if let Some(cost) = table.individual(&key.item_key(item)) {
                return *cost;
            }
        }
        Self::lookup(&table, key)
    }

    /// Cost from raw type and mode strings
    ///
    /// Unknown weapon types or modes still consult the individual table
    /// under the normalized key, then fall back to the default.
    pub fn cost_str(&self, weapon_type: &str, mode: &str) -> AttackCostProfile {
        let table = self.table.load();
        let parsed_type = WeaponTypeTag::parse(weapon_type);
        let parsed_mode = AttackMode::from_key(mode);

        match (parsed_type, parsed_mode) {
            (Some(weapon_type), Some(mode)) => Self::lookup(&table, ReplacementKey::new(weapon_type, mode)),
            _ => {
                let key = format!("{}_{}", weapon_type.trim(), normalize_mode_key(mode));
                match table.individual(&key) {
                    Some(cost) => *cost,
                    None => {
                        tracing::debug!("No cost entry for '{}', using default", key);
                        table.default
                    }
                }
            }
        }
    }

    pub fn cooldown_str(&self, weapon_type: &str, mode: &str) -> f32 {
        self.cost_str(weapon_type, mode).cooldown_seconds
    }

    fn lookup(table: &CostTable, key: ReplacementKey) -> AttackCostProfile {
        if let Some(cost) = table.individual(&key.canonical()) {
            tracing::debug!("Cost for {} from individual entry", key);
            return *cost;
        }
        if let Some(cost) = table.weapon_type(&key) {
            tracing::debug!("Cost for {} from weapon type table", key);
            return *cost;
        }
        table.default
    }
}
