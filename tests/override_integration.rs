//! Override controller integration tests
//!
//! Builds controllers through the engine with the in-memory host and checks
//! memoization, slot replacement, and clear/reload behavior.

use extra_attacks::clips::{ClipRecord, ClipRegistry};
use extra_attacks::core::config::EngineConfig;
use extra_attacks::core::error::Result;
use extra_attacks::core::types::{AttackMode, ReplacementKey, WeaponTypeTag};
use extra_attacks::overrides::{AnimationHost, MemoryAnimator, MemoryController, MemoryHost, ORIGINAL_KEY};
use extra_attacks::rules::{ConfigSource, ConfigTable, StaticConfigSource};
use extra_attacks::timing::BaselineProvider;
use extra_attacks::ExtraAttackEngine;
use parking_lot::{Mutex, RwLock};
use std::sync::{Arc, Barrier};
use std::thread;

fn engine_with(source: StaticConfigSource, clips: Vec<ClipRecord>) -> ExtraAttackEngine<MemoryHost> {
    let base = MemoryController::from_baseline("Player", &BaselineProvider::builtin());
    let engine = ExtraAttackEngine::new(
        EngineConfig::default(),
        source,
        MemoryHost::new(),
        base,
        ClipRegistry::from_records(clips),
    );
    engine.initialize();
    engine
}

fn sword_q() -> ReplacementKey {
    ReplacementKey::new(WeaponTypeTag::Sword, AttackMode::SecondaryQ)
}

/// Clearing with keep_baseline leaves only the Original entry, same handle
#[test]
fn test_clear_keeps_only_original() {
    let engine = engine_with(StaticConfigSource::new(), vec![ClipRecord::new("Sword_Flurry", 2.2)]);
    let original = engine.overrides().baseline().unwrap();
    engine.controller_for(sword_q());

    assert_eq!(engine.overrides().keys(), vec![ORIGINAL_KEY.to_string(), "Sword_secondary_Q".to_string()]);

    engine.clear_override_cache(true);
    assert_eq!(engine.overrides().keys(), vec![ORIGINAL_KEY.to_string()]);
    assert!(Arc::ptr_eq(&engine.overrides().baseline().unwrap(), &original));
}

#[test]
fn test_clear_without_baseline_empties_cache() {
    let engine = engine_with(StaticConfigSource::new(), vec![]);
    engine.controller_for(sword_q());
    engine.clear_override_cache(false);
    assert!(engine.overrides().is_empty());
}

#[test]
fn test_identical_requests_do_not_rebuild() {
    let engine = engine_with(StaticConfigSource::new(), vec![ClipRecord::new("Sword_Flurry", 2.2)]);

    let first = engine.controller_for(sword_q());
    let second = engine.controller_for(sword_q());
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(engine.host().builds(), 1);

    engine.controller_for(ReplacementKey::new(WeaponTypeTag::Sword, AttackMode::SecondaryG));
    assert_eq!(engine.host().builds(), 2);
}

#[test]
fn test_only_targeted_slot_changes() {
    let engine = engine_with(StaticConfigSource::new(), vec![ClipRecord::new("Sword_Flurry", 2.2)]);
    let base = MemoryController::from_baseline("Player", &BaselineProvider::builtin());

    let built = engine.controller_for(sword_q());
    for (slot, clip) in &built.slots {
        if slot == "sword_secondary" {
            assert_eq!(clip.logical_name, "sword_secondary");
            assert!((clip.duration_seconds - 2.2).abs() < 0.0001);
        } else {
            assert_eq!(Some(clip), base.slot(slot));
        }
    }
}

#[test]
fn test_configured_replacement_used_by_builder() {
    let source = StaticConfigSource::new().with(ConfigTable::Replacements, "[replacements.Sword]\nQ = \"CustomSpin\"\n");
    let engine = engine_with(source, vec![ClipRecord::new("CustomSpin", 3.0), ClipRecord::new("Sword_Flurry", 2.2)]);

    let built = engine.controller_for(sword_q());
    assert!((built.slot("sword_secondary").unwrap().duration_seconds - 3.0).abs() < 0.0001);
}

#[test]
fn test_reload_forces_rebuild_and_keeps_original() {
    let engine = engine_with(StaticConfigSource::new(), vec![ClipRecord::new("Sword_Flurry", 2.2)]);
    let first = engine.controller_for(sword_q());

    engine.reload();
    assert!(engine.overrides().contains(ORIGINAL_KEY));
    assert!(!engine.overrides().contains("Sword_secondary_Q"));

    let rebuilt = engine.controller_for(sword_q());
    assert!(!Arc::ptr_eq(&first, &rebuilt));
    // The old handle stays usable after the clear
    assert_eq!(first.slots.len(), rebuilt.slots.len());
}

/// Mapping edits made at runtime take effect on the next request
#[test]
fn test_runtime_mapping_change_rebuilds() {
    let engine = engine_with(
        StaticConfigSource::new(),
        vec![ClipRecord::new("Sword_Flurry", 2.2), ClipRecord::new("CustomSpin", 3.0)],
    );
    let first = engine.controller_for(sword_q());
    assert!((first.slot("sword_secondary").unwrap().duration_seconds - 2.2).abs() < 0.0001);

    engine.replacements().set(sword_q(), "CustomSpin");
    let second = engine.controller_for(sword_q());

    assert!(!Arc::ptr_eq(&first, &second));
    assert!((second.slot("sword_secondary").unwrap().duration_seconds - 3.0).abs() < 0.0001);
    assert!(Arc::ptr_eq(&engine.controller_for(sword_q()), &second));
    assert_eq!(engine.host().builds(), 2);
}

/// Replacement source that can be rewritten between reloads
#[derive(Clone, Default)]
struct SwappableSource {
    replacements: Arc<RwLock<String>>,
}

impl SwappableSource {
    fn set(&self, text: &str) {
        *self.replacements.write() = text.to_string();
    }
}

impl ConfigSource for SwappableSource {
    fn read(&self, table: ConfigTable) -> Result<Option<String>> {
        match table {
            ConfigTable::Replacements => Ok(Some(self.replacements.read().clone())),
            _ => Ok(None),
        }
    }
}

/// Host whose first build parks until the test releases it
struct GatedHost {
    inner: MemoryHost,
    gate: Mutex<Option<(Arc<Barrier>, Arc<Barrier>)>>,
}

impl GatedHost {
    fn new(entered: Arc<Barrier>, release: Arc<Barrier>) -> Self {
        Self {
            inner: MemoryHost::new(),
            gate: Mutex::new(Some((entered, release))),
        }
    }
}

impl AnimationHost for GatedHost {
    type Clip = ClipRecord;
    type Controller = MemoryController;
    type Animator = MemoryAnimator;

    fn clips_by_slot(&self, controller: &MemoryController) -> Vec<(String, ClipRecord)> {
        self.inner.clips_by_slot(controller)
    }

    fn clone_renamed(&self, clip: &ClipRecord, slot_name: &str) -> ClipRecord {
        self.inner.clone_renamed(clip, slot_name)
    }

    fn build_controller(&self, base: &MemoryController, slots: Vec<(String, ClipRecord)>) -> MemoryController {
        let gate = self.gate.lock().take();
        if let Some((entered, release)) = gate {
            entered.wait();
            release.wait();
        }
        self.inner.build_controller(base, slots)
    }

    fn swap_controller(&self, animator: &mut MemoryAnimator, controller: Arc<MemoryController>) {
        self.inner.swap_controller(animator, controller);
    }
}

/// A build that straddles a reload must not leave its controller cached
#[test]
fn test_build_overlapping_reload_is_not_cached() {
    let source = SwappableSource::default();
    source.set("[replacements.Sword]\nQ = \"OldSpin\"\n");
    let entered = Arc::new(Barrier::new(2));
    let release = Arc::new(Barrier::new(2));

    let base = MemoryController::from_baseline("Player", &BaselineProvider::builtin());
    let engine = Arc::new(ExtraAttackEngine::new(
        EngineConfig::default(),
        source.clone(),
        GatedHost::new(Arc::clone(&entered), Arc::clone(&release)),
        base,
        ClipRegistry::from_records([ClipRecord::new("OldSpin", 1.0), ClipRecord::new("NewSpin", 3.0)]),
    ));
    engine.initialize();

    let builder = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || engine.controller_for(sword_q()))
    };

    entered.wait();
    source.set("[replacements.Sword]\nQ = \"NewSpin\"\n");
    engine.reload();
    release.wait();

    let in_flight = builder.join().unwrap();
    assert!((in_flight.slot("sword_secondary").unwrap().duration_seconds - 1.0).abs() < 0.0001);
    assert!(!engine.overrides().contains("Sword_secondary_Q"));

    let current = engine.controller_for(sword_q());
    assert!((current.slot("sword_secondary").unwrap().duration_seconds - 3.0).abs() < 0.0001);
    assert!(engine.overrides().contains("Sword_secondary_Q"));
}
