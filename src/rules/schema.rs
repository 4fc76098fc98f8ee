//! On-disk shapes of the configuration files
//!
//! Keys stay as raw strings here; the loader validates and normalizes them.

use crate::clips::ClipRecord;
use crate::costs::AttackCostProfile;
use crate::timing::{EventFractions, TimingProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weapon type name -> mode key -> value
pub type TypeModeTree<T> = BTreeMap<String, BTreeMap<String, T>>;

/// Timing entries stay raw so the loader can layer them over a per-type base
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingFile {
    pub default: Option<TimingProfile>,
    pub weapon_types: TypeModeTree<toml::Table>,
    pub individual_weapons: BTreeMap<String, toml::Table>,
    /// Pinned event fractions for the computed tier
    pub fractions: TypeModeTree<EventFractions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CostFile {
    pub default: Option<AttackCostProfile>,
    pub weapon_types: TypeModeTree<AttackCostProfile>,
    pub individual_weapons: BTreeMap<String, AttackCostProfile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplacementFile {
    pub replacements: TypeModeTree<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipFile {
    pub clip: Vec<ClipRecord>,
}
