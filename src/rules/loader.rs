//! Load timing, cost and replacement tables from TOML
//!
//! `parse_*` functions surface malformed text as [`ExtraAttackError::ConfigParse`].
//! `load_*` functions never fail: a missing table yields defaults and a broken
//! one is logged and replaced by defaults.

use crate::clips::ClipRecord;
use crate::core::config::{EngineConfig, FallbackTiming};
use crate::core::error::{ExtraAttackError, Result};
use crate::core::types::{AttackMode, ReplacementKey, WeaponTypeTag};
use crate::costs::CostTable;
use crate::overrides::ReplacementTable;
use crate::rules::schema::{ClipFile, CostFile, ReplacementFile, TimingFile, TypeModeTree};
use crate::rules::source::{ConfigSource, ConfigTable};
use crate::timing::{infer_weapon_type, BaselineProvider, TimingProfile, TimingTable};
use std::collections::BTreeMap;

/// Everything a reload publishes
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub timing: TimingTable,
    pub costs: CostTable,
    pub replacements: ReplacementTable,
}

fn parse_error(source_name: &str, err: impl std::fmt::Display) -> ExtraAttackError {
    ExtraAttackError::ConfigParse {
        source_name: source_name.to_string(),
        message: err.to_string(),
    }
}

/// Walk a `[Type.mode]` tree, skipping names that do not parse
fn for_each_key<T, F>(tree: TypeModeTree<T>, source_name: &str, mut f: F)
where
    F: FnMut(ReplacementKey, T),
{
    for (type_name, modes) in tree {
        let Some(weapon_type) = WeaponTypeTag::parse(&type_name) else {
            tracing::warn!("{}: unknown weapon type '{}', entry skipped", source_name, type_name);
            continue;
        };
        for (mode_name, value) in modes {
            match AttackMode::from_key(&mode_name) {
                Some(mode) => f(ReplacementKey::new(weapon_type, mode), value),
                None => {
                    tracing::warn!(
                        "{}: unknown attack mode '{}' for {}, entry skipped",
                        source_name,
                        mode_name,
                        weapon_type
                    );
                }
            }
        }
    }
}

/// Layer one raw entry over `base`; fields the entry omits keep the base value
fn overlay_profile(base: &TimingProfile, entry: toml::Table, source_name: &str) -> Result<TimingProfile> {
    let mut merged = toml::Value::try_from(base).map_err(|e| parse_error(source_name, e))?;
    if let toml::Value::Table(fields) = &mut merged {
        fields.extend(entry);
    }
    merged.try_into().map_err(|e| parse_error(source_name, e))
}

/// Parse `timing.toml`
///
/// Weapon-type and individual entries may be partial. Missing event fields
/// come from `fallback`; missing attack-shape fields come from the baseline
/// shape of the entry's weapon type. Individual keys take their weapon type
/// from a type-name prefix, else from keywords in the item name.
pub fn parse_timing_table(
    content: &str,
    source_name: &str,
    fallback: &FallbackTiming,
    baseline: &BaselineProvider,
) -> Result<TimingTable> {
    let file: TimingFile = toml::from_str(content).map_err(|e| parse_error(source_name, e))?;
    let base_for = |weapon_type: WeaponTypeTag| {
        let mut base = TimingProfile::fallback(fallback);
        base.apply_shape(&baseline.get(weapon_type).shape);
        base
    };

    let mut table = TimingTable::with_fallback(fallback);
    if let Some(default) = file.default {
        table.default = default;
    }

    let mut typed = Vec::new();
    for_each_key(file.weapon_types, source_name, |key, entry| typed.push((key, entry)));
    for (key, entry) in typed {
        let profile = overlay_profile(&base_for(key.weapon_type), entry, source_name)?;
        table.insert_weapon_type(key, profile);
    }

    for (key, entry) in file.individual_weapons {
        let weapon_type = key
            .split('_')
            .next()
            .and_then(WeaponTypeTag::parse)
            .unwrap_or_else(|| infer_weapon_type(&key));
        let profile = overlay_profile(&base_for(weapon_type), entry, source_name)?;
        table.insert_individual(&key, profile);
    }

    for_each_key(file.fractions, source_name, |key, fractions| {
        table.insert_fractions(key, fractions);
    });

    Ok(table)
}

pub fn parse_cost_table(content: &str, source_name: &str) -> Result<CostTable> {
    let file: CostFile = toml::from_str(content).map_err(|e| parse_error(source_name, e))?;

    let mut table = CostTable::new();
    if let Some(default) = file.default {
        table.default = default;
    }

    for_each_key(file.weapon_types, source_name, |key, cost| {
        table.insert_weapon_type(key, cost);
    });

    for (key, cost) in file.individual_weapons {
        table.insert_individual(&key, cost);
    }

    Ok(table)
}

pub fn parse_replacement_table(content: &str, source_name: &str) -> Result<ReplacementTable> {
    let file: ReplacementFile = toml::from_str(content).map_err(|e| parse_error(source_name, e))?;

    let mut table = ReplacementTable::new();
    for_each_key(file.replacements, source_name, |key, clip_name| {
        if !key.mode.is_extra() {
            tracing::warn!("{}: normal attack has no replacement clip, '{}' ignored", source_name, clip_name);
            return;
        }
        let clip_name = clip_name.trim().to_string();
        if !clip_name.is_empty() {
            table.insert(key, clip_name);
        }
    });

    Ok(table)
}

/// `[[clip]]` records standing in for an asset source
pub fn parse_clip_file(content: &str, source_name: &str) -> Result<Vec<ClipRecord>> {
    let file: ClipFile = toml::from_str(content).map_err(|e| parse_error(source_name, e))?;
    Ok(file.clip)
}

/// Serialize a replacement table in the shape `parse_replacement_table` reads
pub fn render_replacements(table: &ReplacementTable) -> Result<String> {
    let mut replacements: TypeModeTree<String> = BTreeMap::new();
    for (key, clip_name) in table {
        replacements
            .entry(key.weapon_type.to_string())
            .or_default()
            .insert(key.mode.key().to_string(), clip_name.clone());
    }
    toml::to_string(&ReplacementFile { replacements }).map_err(|e| parse_error("replacements", e))
}

/// Read one table, then parse it; `Ok(None)` when the source has no such table
fn read_and_parse<T, F>(source: &dyn ConfigSource, which: ConfigTable, parse: F) -> Option<T>
where
    F: FnOnce(&str, &str) -> Result<T>,
{
    let name = source.describe(which);
    let outcome = source
        .read(which)
        .and_then(|text| text.map(|text| parse(&text, &name)).transpose());

    match outcome {
        Ok(Some(table)) => Some(table),
        Ok(None) => {
            tracing::debug!("No {} table at {}, using defaults", which, name);
            None
        }
        Err(e) => {
            tracing::warn!("Failed to load {} table: {}. Using defaults", which, e);
            None
        }
    }
}

pub fn load_timing_table(
    source: &dyn ConfigSource,
    fallback: &FallbackTiming,
    baseline: &BaselineProvider,
) -> TimingTable {
    read_and_parse(source, ConfigTable::Timing, |text, name| {
        parse_timing_table(text, name, fallback, baseline)
    })
        .unwrap_or_else(|| TimingTable::with_fallback(fallback))
}

pub fn load_cost_table(source: &dyn ConfigSource) -> CostTable {
    read_and_parse(source, ConfigTable::Costs, parse_cost_table).unwrap_or_default()
}

pub fn load_replacement_table(source: &dyn ConfigSource) -> ReplacementTable {
    read_and_parse(source, ConfigTable::Replacements, parse_replacement_table).unwrap_or_default()
}

/// Build every table off to the side, ready to publish
pub fn load_config(source: &dyn ConfigSource, config: &EngineConfig, baseline: &BaselineProvider) -> LoadedConfig {
    LoadedConfig {
        timing: load_timing_table(source, &config.fallback, baseline),
        costs: load_cost_table(source),
        replacements: load_replacement_table(source),
    }
}
