//! Extra-attack engine: wires classification, cost gating, override
//! controllers and timing into one attack-trigger call

use crate::clips::ClipRegistry;
use crate::combat::{classify, Classification, WeaponSnapshot};
use crate::core::config::EngineConfig;
use crate::core::types::{AttackMode, ReplacementKey, WeaponTypeTag};
use crate::costs::{AttackCostProfile, CooldownTracker, CostResolver};
use crate::overrides::{AnimationHost, OverrideCache, ReplacementMap};
use crate::rules::{load_config, ConfigSource, ConfigTable};
use crate::timing::{BaselineProvider, ResolvedTiming, TimingProfile, TimingResolver};
use std::sync::Arc;
use thiserror::Error;

/// One attack-trigger event
#[derive(Debug, Clone)]
pub struct AttackRequest {
    pub player: String,
    pub weapon: WeaponSnapshot,
    pub mode: AttackMode,
    /// Current stamina of the player
    pub stamina: f32,
    /// Current eitr of the player
    pub eitr: f32,
    /// Game time in seconds
    pub now: f64,
}

impl AttackRequest {
    pub fn new(player: impl Into<String>, weapon: WeaponSnapshot, mode: AttackMode, now: f64) -> Self {
        Self {
            player: player.into(),
            weapon,
            mode,
            stamina: f32::MAX,
            eitr: f32::MAX,
            now,
        }
    }

    pub fn with_resources(mut self, stamina: f32, eitr: f32) -> Self {
        self.stamina = stamina;
        self.eitr = eitr;
        self
    }
}

/// Everything the caller needs to play an accepted attack
#[derive(Debug, Clone)]
pub struct AttackPlan<C> {
    pub key: ReplacementKey,
    pub classification: Classification,
    /// `None` for the normal attack
    pub replacement_clip: Option<String>,
    /// Controller now active on the animator
    pub controller: Arc<C>,
    pub timing: ResolvedTiming,
    pub cost: AttackCostProfile,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttackRejection {
    #[error("No override for this weapon")]
    NoOverride,

    #[error("On cooldown for {remaining:.2}s")]
    OnCooldown { remaining: f64 },

    #[error("Insufficient resources (needs {stamina_needed} stamina, {eitr_needed} eitr)")]
    InsufficientResources { stamina_needed: f32, eitr_needed: f32 },
}

pub struct ExtraAttackEngine<H: AnimationHost> {
    config: EngineConfig,
    source: Box<dyn ConfigSource>,
    host: H,
    base_controller: Arc<H::Controller>,
    clips: Arc<ClipRegistry<H::Clip>>,
    replacements: Arc<ReplacementMap>,
    baseline: Arc<BaselineProvider>,
    timing: TimingResolver<H::Clip>,
    costs: CostResolver,
    cooldowns: CooldownTracker,
    overrides: OverrideCache<H::Controller>,
}

impl<H: AnimationHost> ExtraAttackEngine<H> {
    pub fn new(
        config: EngineConfig,
        source: impl ConfigSource + 'static,
        host: H,
        base_controller: H::Controller,
        clips: ClipRegistry<H::Clip>,
    ) -> Self {
        Self::with_baseline(config, source, host, base_controller, clips, BaselineProvider::builtin())
    }

    pub fn with_baseline(
        config: EngineConfig,
        source: impl ConfigSource + 'static,
        host: H,
        base_controller: H::Controller,
        clips: ClipRegistry<H::Clip>,
        baseline: BaselineProvider,
    ) -> Self {
        let clips = Arc::new(clips);
        let replacements = Arc::new(ReplacementMap::new());
        let baseline = Arc::new(baseline);
        let timing = TimingResolver::new(Arc::clone(&clips), Arc::clone(&replacements), Arc::clone(&baseline));

        Self {
            config,
            source: Box::new(source),
            host,
            base_controller: Arc::new(base_controller),
            clips,
            replacements,
            baseline,
            timing,
            costs: CostResolver::default(),
            cooldowns: CooldownTracker::new(),
            overrides: OverrideCache::new(),
        }
    }

    /// Load every table, fill replacement defaults, precompute clip lengths
    /// and register the unmodified controller
    pub fn initialize(&self) {
        self.publish_config();
        self.clips.precompute_all();
        self.overrides.insert_baseline(Arc::clone(&self.base_controller));
        tracing::info!(
            "Extra attacks initialized: {} clips, {} replacement entries",
            self.clips.len(),
            self.replacements.len()
        );
    }

    /// Re-read configuration and republish every table atomically
    ///
    /// Readers on other threads see either the old tables or the new ones.
    /// Built overrides are dropped and clip lengths are recomputed.
    pub fn reload(&self) {
        self.publish_config();
        self.clear_override_cache(self.config.keep_baseline_on_reload);
        self.clips.precompute_all();
        tracing::info!("Configuration reloaded from {}", self.source.describe(ConfigTable::Timing));
    }

    fn publish_config(&self) {
        let loaded = load_config(self.source.as_ref(), &self.config, &self.baseline);
        self.timing.publish_table(loaded.timing);
        self.costs.publish_table(loaded.costs);
        self.replacements.publish_or_defaults(loaded.replacements);
    }

    /// Drop built override controllers and every cached clip length
    pub fn clear_override_cache(&self, keep_baseline: bool) -> usize {
        let removed = self.overrides.clear(keep_baseline);
        self.clips.invalidate();
        tracing::info!("Override cache cleared ({} entries removed, baseline kept: {})", removed, keep_baseline);
        removed
    }

    /// Run one attack trigger through the full pipeline
    ///
    /// On success the animator is already playing the returned controller
    /// and the cooldown is recorded.
    pub fn trigger_attack(
        &self,
        request: &AttackRequest,
        animator: &mut H::Animator,
    ) -> std::result::Result<AttackPlan<H::Controller>, AttackRejection> {
        let classification = classify(&request.weapon).ok_or(AttackRejection::NoOverride)?;
        let key = ReplacementKey::new(classification.weapon_type, request.mode);
        let item = request.weapon.item_key();

        let cost = self.costs.cost_for_item(item, key.weapon_type, key.mode);
        if key.mode.is_extra() {
            let remaining = self.cooldowns.remaining(&request.player, key, request.now);
            if remaining > 0.0 {
                return Err(AttackRejection::OnCooldown { remaining });
            }
            if !cost.affordable(request.stamina, request.eitr) {
                return Err(AttackRejection::InsufficientResources {
                    stamina_needed: cost.stamina_cost,
                    eitr_needed: cost.eitr_cost,
                });
            }
            self.cooldowns
                .try_begin(&request.player, key, request.now, cost.cooldown_seconds)
                .map_err(|remaining| AttackRejection::OnCooldown { remaining })?;
        }

        let replacement_clip = self.replacements.get(key);
        let controller = self.controller_for(key);
        self.host.swap_controller(animator, Arc::clone(&controller));

        let timing = self.timing.resolve_for_item(item, key.weapon_type, key.mode);

        tracing::debug!("{} triggered {} ({})", request.player, key, classification.trigger);

        Ok(AttackPlan {
            key,
            classification,
            replacement_clip,
            controller,
            timing,
            cost,
        })
    }

    /// Override controller for a key; the normal attack gets the baseline
    pub fn controller_for(&self, key: ReplacementKey) -> Arc<H::Controller> {
        if !key.mode.is_extra() {
            return match self.overrides.baseline() {
                Some(original) => original,
                None => {
                    self.overrides.insert_baseline(Arc::clone(&self.base_controller));
                    Arc::clone(&self.base_controller)
                }
            };
        }

        let mapping = self
            .replacements
            .slot_mapping(key, self.baseline.get(key.weapon_type));
        self.overrides
            .build_or_get(&self.host, &key.canonical(), &self.base_controller, &mapping, &self.clips)
    }

    pub fn resolve_timing(&self, weapon_type: WeaponTypeTag, mode: AttackMode) -> TimingProfile {
        self.timing.resolve_timing(weapon_type, mode)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn clips(&self) -> &ClipRegistry<H::Clip> {
        &self.clips
    }

    pub fn replacements(&self) -> &ReplacementMap {
        &self.replacements
    }

    pub fn baseline(&self) -> &BaselineProvider {
        &self.baseline
    }

    pub fn timing(&self) -> &TimingResolver<H::Clip> {
        &self.timing
    }

    pub fn costs(&self) -> &CostResolver {
        &self.costs
    }

    pub fn cooldowns(&self) -> &CooldownTracker {
        &self.cooldowns
    }

    pub fn overrides(&self) -> &OverrideCache<H::Controller> {
        &self.overrides
    }
}
