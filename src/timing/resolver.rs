//! Timing resolution
//!
//! Keyed path, three tiers, first hit wins:
//! 1. individual entry (exact key)
//! 2. weapon-type/mode entry
//! 3. computed from the replacement clip's length and per-event fractions
//!
//! The clip-name path infers a weapon type from the name and scales the
//! baseline event times by one uniform ratio instead.

use crate::clips::{ClipAsset, ClipRecord, ClipRegistry};
use crate::core::published::Published;
use crate::core::types::{AttackMode, ReplacementKey, WeaponTypeTag};
use crate::overrides::replacement_map::ReplacementMap;
use crate::timing::baseline::BaselineProvider;
use crate::timing::fractions::FractionTable;
use crate::timing::profile::TimingProfile;
use crate::timing::table::TimingTable;
use std::sync::Arc;

/// Ordered keyword list for clip-name inference; first match wins
const CLIP_NAME_KEYWORDS: &[(&str, WeaponTypeTag)] = &[
    ("sword", WeaponTypeTag::Sword),
    ("axe", WeaponTypeTag::Axe),
    ("club", WeaponTypeTag::Club),
    ("spear", WeaponTypeTag::Spear),
    ("knife", WeaponTypeTag::Knife),
    ("fist", WeaponTypeTag::Fist),
    ("great", WeaponTypeTag::Greatsword),
    ("battle", WeaponTypeTag::Battleaxe),
    ("pole", WeaponTypeTag::Polearm),
];

/// Which tier produced a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingSource {
    Individual,
    WeaponType,
    Computed,
    /// Computed tier with no usable clip length
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTiming {
    pub profile: TimingProfile,
    pub source: TimingSource,
}

/// Weapon type guessed from a clip name (case-insensitive containment)
pub fn infer_weapon_type(clip_name: &str) -> WeaponTypeTag {
    let lowered = clip_name.to_lowercase();
    CLIP_NAME_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|&(_, tag)| tag)
        .unwrap_or(WeaponTypeTag::Sword)
}

pub struct TimingResolver<A: ClipAsset = ClipRecord> {
    table: Published<TimingTable>,
    fractions: FractionTable,
    clips: Arc<ClipRegistry<A>>,
    replacements: Arc<ReplacementMap>,
    baseline: Arc<BaselineProvider>,
}

impl<A: ClipAsset> TimingResolver<A> {
    pub fn new(
        clips: Arc<ClipRegistry<A>>,
        replacements: Arc<ReplacementMap>,
        baseline: Arc<BaselineProvider>,
    ) -> Self {
        Self {
            table: Published::new(TimingTable::new()),
            fractions: FractionTable::builtin(),
            clips,
            replacements,
            baseline,
        }
    }

    /// Replace the per-mode shifts used by the computed tier
    pub fn with_fractions(mut self, fractions: FractionTable) -> Self {
        self.fractions = fractions;
        self
    }

    pub fn with_table(self, table: TimingTable) -> Self {
        self.table.publish(table);
        self
    }

    /// Swap in a freshly loaded table
    pub fn publish_table(&self, table: TimingTable) {
        self.table.publish(table);
    }

    pub fn table(&self) -> Arc<TimingTable> {
        self.table.load()
    }

    pub fn resolve_timing(&self, weapon_type: WeaponTypeTag, mode: AttackMode) -> TimingProfile {
        self.resolve_with_source(weapon_type, mode).profile
    }

    /// Keyed resolution, reporting which tier answered
    pub fn resolve_with_source(&self, weapon_type: WeaponTypeTag, mode: AttackMode) -> ResolvedTiming {
        let key = ReplacementKey::new(weapon_type, mode);
        let table = self.table.load();
        self.resolve_key(&table, key)
    }

    /// Like [`resolve_timing`](Self::resolve_timing) but an entry for the
    /// specific item (`{item}_{mode}`) is tried first
    pub fn resolve_for_item(&self, item: &str, weapon_type: WeaponTypeTag, mode: AttackMode) -> ResolvedTiming {
        let key = ReplacementKey::new(weapon_type, mode);
        let table = self.table.load();

        if !item.trim().is_empty() {
            if let Some(profile) = table.individual(&key.item_key(item)) {
                tracing::debug!("Timing for {} from individual item entry '{}'", key, item);
                return ResolvedTiming {
                    profile: profile.clone(),
                    source: TimingSource::Individual,
                };
            }
        }

        self.resolve_key(&table, key)
    }

    fn resolve_key(&self, table: &TimingTable, key: ReplacementKey) -> ResolvedTiming {
        if let Some(profile) = table.individual(&key.canonical()) {
            tracing::debug!("Timing for {} from individual entry", key);
            return ResolvedTiming {
                profile: profile.clone(),
                source: TimingSource::Individual,
            };
        }

        if let Some(profile) = table.weapon_type(&key) {
            tracing::debug!("Timing for {} from weapon type table", key);
            return ResolvedTiming {
                profile: profile.clone(),
                source: TimingSource::WeaponType,
            };
        }

        self.computed(table, key)
    }

    /// Tier 3: scale per-event fractions to the replacement clip's length
    fn computed(&self, table: &TimingTable, key: ReplacementKey) -> ResolvedTiming {
        let baseline = self.baseline.get(key.weapon_type);

        let duration = match key.mode {
            AttackMode::Normal => baseline.duration,
            _ => self
                .replacements
                .get(key)
                .and_then(|clip| self.clips.duration_of(&clip))
                .unwrap_or(0.0),
        };

        if duration.is_nan() || duration <= 0.0 {
            tracing::debug!("No usable clip length for {}, using fallback timing", key);
            let mut profile = table.default.clone();
            profile.apply_shape(&baseline.shape);
            return ResolvedTiming {
                profile,
                source: TimingSource::Fallback,
            };
        }

        let fractions = match table.fractions.get(&key) {
            Some(pinned) => *pinned,
            None => self.fractions.shifted(key.mode, &baseline.fractions),
        };

        ResolvedTiming {
            profile: TimingProfile::from_times(fractions.times(duration), duration, 1.0, &baseline.shape),
            source: TimingSource::Computed,
        }
    }

    /// Timing for a raw clip name, scaled by one uniform ratio
    ///
    /// ratio = replacement length / baseline length of the inferred type;
    /// every baseline event time is multiplied by it.
    pub fn resolve_from_clip_name(&self, clip_name: &str) -> TimingProfile {
        let weapon_type = infer_weapon_type(clip_name);
        let baseline = self.baseline.get(weapon_type);
        let duration = self.clips.duration_of(clip_name).unwrap_or(0.0);

        if duration.is_nan() || duration <= 0.0 {
            tracing::debug!("Clip '{}' has no usable length, using fallback timing", clip_name);
            let mut profile = self.table.load().default.clone();
            profile.apply_shape(&baseline.shape);
            return profile;
        }

        let ratio = if baseline.duration > 0.0 {
            duration / baseline.duration
        } else {
            1.0
        };

        let times = baseline
            .fractions
            .clamped()
            .times(baseline.duration)
            .scaled(ratio);
        TimingProfile::from_times(times, duration, 1.0, &baseline.shape)
    }

    /// Replacement clip for a pair
    pub fn clip_name_for(&self, weapon_type: WeaponTypeTag, mode: AttackMode) -> Option<String> {
        self.replacements.get(ReplacementKey::new(weapon_type, mode))
    }

    /// Every weapon type x mode, in table order
    pub fn resolve_all(&self) -> Vec<(ReplacementKey, ResolvedTiming)> {
        let table = self.table.load();
        ReplacementKey::all()
            .map(|key| (key, self.resolve_key(&table, key)))
            .collect()
    }
}
