//! Cost and cooldown integration tests

use extra_attacks::clips::ClipRegistry;
use extra_attacks::combat::{Handedness, SkillCategory, WeaponSnapshot};
use extra_attacks::core::config::EngineConfig;
use extra_attacks::core::types::{AttackMode, WeaponTypeTag};
use extra_attacks::costs::{AttackCostProfile, CostResolver};
use extra_attacks::overrides::{MemoryAnimator, MemoryController, MemoryHost};
use extra_attacks::rules::{parse_cost_table, ConfigTable, StaticConfigSource};
use extra_attacks::timing::BaselineProvider;
use extra_attacks::{AttackRejection, AttackRequest, ExtraAttackEngine};
use std::sync::{Arc, Barrier};
use std::thread;

const COSTS: &str = r#"
[default]
stamina_cost = 20.0
eitr_cost = 0.0
cooldown_seconds = 2.0

[weapon_types.Fist.secondary_T]
stamina_cost = 15.0
eitr_cost = 0.0
cooldown_seconds = 3.0

[individual_weapons."Knife_secondary_G"]
stamina_cost = 30.0
eitr_cost = 10.0
cooldown_seconds = 5.0
"#;

/// The trigger prefix on the mode string must not drop the configured entry
#[test]
fn test_fist_t_with_trigger_prefix() {
    let resolver = CostResolver::new(parse_cost_table(COSTS, "costs").unwrap());

    let cost = resolver.cost_str("Fist", "ea_secondary_T");
    assert!((cost.stamina_cost - 15.0).abs() < 0.0001);
    assert!((cost.cooldown_seconds - 3.0).abs() < 0.0001);
    assert!((resolver.cooldown_str("Fist", "ea_secondary_T") - 3.0).abs() < 0.0001);
    assert_eq!(resolver.cost_str("Fist", "T"), resolver.cost_str("Fist", "secondary_T"));
}

#[test]
fn test_default_cost_for_unconfigured_pair() {
    let resolver = CostResolver::new(parse_cost_table(COSTS, "costs").unwrap());
    assert_eq!(resolver.cost(WeaponTypeTag::Polearm, AttackMode::SecondaryQ), AttackCostProfile::new(20.0, 0.0, 2.0));
}

#[test]
fn test_individual_type_key_is_found() {
    let resolver = CostResolver::new(parse_cost_table(COSTS, "costs").unwrap());
    assert!((resolver.cooldown(WeaponTypeTag::Knife, AttackMode::SecondaryG) - 5.0).abs() < 0.0001);
}

/// Weapon-type prefixes of individual keys are case-insensitive
#[test]
fn test_lowercase_type_prefix_in_individual_key() {
    let text = "[individual_weapons.\"fist_secondary_T\"]\nstamina_cost = 12.0\n";
    let resolver = CostResolver::new(parse_cost_table(text, "costs").unwrap());
    assert!((resolver.cost(WeaponTypeTag::Fist, AttackMode::SecondaryT).stamina_cost - 12.0).abs() < 0.0001);
}

#[test]
fn test_engine_gates_on_cost_and_cooldown() {
    let source = StaticConfigSource::new().with(ConfigTable::Costs, COSTS);
    let base = MemoryController::from_baseline("Player", &BaselineProvider::builtin());
    let engine = ExtraAttackEngine::new(EngineConfig::default(), source, MemoryHost::new(), base, ClipRegistry::new());
    engine.initialize();

    let fists = WeaponSnapshot::new(SkillCategory::Unarmed, Handedness::OneHanded);
    let mut animator = MemoryAnimator::default();

    let poor = AttackRequest::new("carol", fists.clone(), AttackMode::SecondaryT, 0.0).with_resources(14.0, 0.0);
    assert!(matches!(
        engine.trigger_attack(&poor, &mut animator),
        Err(AttackRejection::InsufficientResources { .. })
    ));

    let ok = AttackRequest::new("carol", fists.clone(), AttackMode::SecondaryT, 0.0).with_resources(15.0, 0.0);
    let plan = engine.trigger_attack(&ok, &mut animator).unwrap();
    assert!((plan.cost.cooldown_seconds - 3.0).abs() < 0.0001);

    let again = AttackRequest::new("carol", fists, AttackMode::SecondaryT, 2.5).with_resources(100.0, 0.0);
    match engine.trigger_attack(&again, &mut animator) {
        Err(AttackRejection::OnCooldown { remaining }) => assert!((remaining - 0.5).abs() < 1e-6),
        _ => panic!("expected cooldown rejection"),
    }
}

/// Simultaneous triggers by one player on one key: exactly one starts
#[test]
fn test_concurrent_triggers_admit_one() {
    let source = StaticConfigSource::new().with(ConfigTable::Costs, COSTS);
    let base = MemoryController::from_baseline("Player", &BaselineProvider::builtin());
    let engine = Arc::new(ExtraAttackEngine::new(
        EngineConfig::default(),
        source,
        MemoryHost::new(),
        base,
        ClipRegistry::new(),
    ));
    engine.initialize();
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let sword = WeaponSnapshot::new(SkillCategory::Swords, Handedness::OneHanded);
                let mut animator = MemoryAnimator::default();
                barrier.wait();
                engine
                    .trigger_attack(&AttackRequest::new("alice", sword, AttackMode::SecondaryQ, 0.0), &mut animator)
                    .is_ok()
            })
        })
        .collect();

    let started = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|ok| *ok)
        .count();
    assert_eq!(started, 1);
}
