//! (weapon type, mode) -> replacement clip name
//!
//! Configured entries take precedence; every extra-attack pair also has a
//! built-in name so the system keeps full coverage with no config at all.

use crate::core::published::Published;
use crate::core::types::{AttackMode, ReplacementKey, WeaponTypeTag};
use crate::timing::baseline::BaselineEntry;
use ahash::AHashMap;

pub type ReplacementTable = AHashMap<ReplacementKey, String>;

/// Built-in replacement clip for a pair; `None` for the normal attack
pub fn builtin_clip_name(weapon_type: WeaponTypeTag, mode: AttackMode) -> Option<&'static str> {
    use AttackMode::*;
    use WeaponTypeTag::*;

    let name = match (weapon_type, mode) {
        (_, Normal) => return None,
        (Sword, SecondaryQ) => "Sword_Flurry",
        (Sword, SecondaryT) => "Sword_Lunge",
        (Sword, SecondaryG) => "Sword_Whirlwind",
        (Axe, SecondaryQ) => "Axe_Cleave",
        (Axe, SecondaryT) => "Axe_Hook",
        (Axe, SecondaryG) => "Axe_Overhead",
        (Club, SecondaryQ) => "Mace_Uppercut",
        (Club, SecondaryT) => "Mace_Bash",
        (Club, SecondaryG) => "Mace_Slam",
        (Spear, SecondaryQ) => "Spear_Thrust",
        (Spear, SecondaryT) => "Spear_Sweep",
        (Spear, SecondaryG) => "Spear_Vault",
        (Greatsword, SecondaryQ) => "Greatsword_Spin",
        (Greatsword, SecondaryT) => "Greatsword_Thrust",
        (Greatsword, SecondaryG) => "Greatsword_Overhead",
        (Battleaxe, SecondaryQ) => "Battleaxe_Spin",
        (Battleaxe, SecondaryT) => "Battleaxe_Chop",
        (Battleaxe, SecondaryG) => "Battleaxe_Leap",
        (Polearm, SecondaryQ) => "Atgeir_Sweep",
        (Polearm, SecondaryT) => "Atgeir_Thrust",
        (Polearm, SecondaryG) => "Atgeir_Vault",
        (Knife, SecondaryQ) => "Knife_Flurry",
        (Knife, SecondaryT) => "Knife_Backstab",
        (Knife, SecondaryG) => "Knife_Leap",
        (Fist, SecondaryQ) => "Fist_Combo",
        (Fist, SecondaryT) => "Fist_Kick",
        (Fist, SecondaryG) => "Fist_Slam",
    };
    Some(name)
}

/// Full built-in table: every weapon type x {Q, T, G}
pub fn builtin_table() -> ReplacementTable {
    let mut table = ReplacementTable::new();
    for weapon_type in WeaponTypeTag::ALL {
        for mode in AttackMode::EXTRA {
            if let Some(name) = builtin_clip_name(weapon_type, mode) {
                table.insert(ReplacementKey::new(weapon_type, mode), name.to_string());
            }
        }
    }
    table
}

#[derive(Debug, Default)]
pub struct ReplacementMap {
    entries: Published<ReplacementTable>,
}

impl ReplacementMap {
    /// Empty map; lookups fall back to the built-in names
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: ReplacementTable) -> Self {
        Self {
            entries: Published::new(table),
        }
    }

    /// Replacement clip for a pair, configured or built-in
    pub fn get(&self, key: ReplacementKey) -> Option<String> {
        if !key.mode.is_extra() {
            return None;
        }
        if let Some(name) = self.entries.load().get(&key) {
            return Some(name.clone());
        }
        builtin_clip_name(key.weapon_type, key.mode).map(str::to_string)
    }

    /// Configured entry only, no built-in fallback
    pub fn configured(&self, key: ReplacementKey) -> Option<String> {
        self.entries.load().get(&key).cloned()
    }

    pub fn set(&self, key: ReplacementKey, clip_name: impl Into<String>) {
        let clip_name = clip_name.into();
        self.entries.update(|current| {
            let mut next = current.clone();
            next.insert(key, clip_name);
            next
        });
    }

    /// Swap in a whole new table
    pub fn publish(&self, table: ReplacementTable) {
        self.entries.publish(table);
    }

    /// Publish `table`, or the built-in table when `table` is empty, in one swap
    ///
    /// Returns true if the built-in table was published.
    pub fn publish_or_defaults(&self, table: ReplacementTable) -> bool {
        let use_builtin = table.is_empty();
        self.entries.publish(if use_builtin { builtin_table() } else { table });
        if use_builtin {
            tracing::info!("No replacement entries configured, using built-in defaults");
        }
        use_builtin
    }

    /// Fill every weapon type with Q/T/G entries when the table is empty
    ///
    /// Returns true if defaults were written.
    pub fn ensure_defaults(&self) -> bool {
        let mut wrote = false;
        self.entries.update(|current| {
            if current.is_empty() {
                wrote = true;
                builtin_table()
            } else {
                current.clone()
            }
        });
        if wrote {
            tracing::info!("Replacement map empty, populated built-in defaults");
        }
        wrote
    }

    /// Snapshot of the configured entries
    pub fn snapshot(&self) -> ReplacementTable {
        (*self.entries.load()).clone()
    }

    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.load().is_empty()
    }

    /// Clip-slot mapping for the override builder: built-in slot -> replacement
    pub fn slot_mapping(&self, key: ReplacementKey, baseline: &BaselineEntry) -> AHashMap<String, String> {
        let mut mapping = AHashMap::new();
        if let Some(replacement) = self.get(key) {
            mapping.insert(baseline.clip_name.clone(), replacement);
        }
        mapping
    }
}
