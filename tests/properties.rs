//! Property tests for key normalization and timing bounds

use extra_attacks::clips::{ClipRecord, ClipRegistry};
use extra_attacks::core::types::{normalize_mode_key, AttackMode, ReplacementKey, WeaponTypeTag};
use extra_attacks::overrides::{builtin_clip_name, ReplacementMap};
use extra_attacks::timing::{BaselineProvider, TimingProfile, TimingResolver};
use proptest::prelude::*;
use std::sync::Arc;

fn weapon_type() -> impl Strategy<Value = WeaponTypeTag> {
    (0..WeaponTypeTag::ALL.len()).prop_map(|i| WeaponTypeTag::ALL[i])
}

fn attack_mode() -> impl Strategy<Value = AttackMode> {
    (0..AttackMode::ALL.len()).prop_map(|i| AttackMode::ALL[i])
}

fn mode_spelling() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["", "ea_", "EA_"]),
        prop::sample::select(vec!["", "secondary_", "Secondary_"]),
        prop::sample::select(vec!["Q", "q", "T", "t", "G", "g"]),
        prop::sample::select(vec!["", " ", "\t"]),
    )
        .prop_map(|(trigger, prefix, letter, pad)| format!("{pad}{trigger}{prefix}{letter}{pad}"))
}

fn assert_bounded(profile: &TimingProfile) {
    let t = profile.event_times();
    for event in [t.hit, t.trail_on, t.trail_off, t.chain, t.speed, t.dodge_mortal] {
        assert!(event >= 0.0, "negative event time {event}");
        if profile.clip_length > 0.0 {
            assert!(event <= profile.clip_length + 1e-4, "event {event} past clip end {}", profile.clip_length);
        }
    }
}

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(raw in ".{0,24}") {
        let once = normalize_mode_key(&raw);
        prop_assert_eq!(normalize_mode_key(&once), once);
    }

    #[test]
    fn prop_every_spelling_reaches_canonical_key(raw in mode_spelling()) {
        let normalized = normalize_mode_key(&raw);
        prop_assert!(["secondary_Q", "secondary_T", "secondary_G"].contains(&normalized.as_str()));
        prop_assert_eq!(AttackMode::from_key(&raw).map(|m| m.key()), Some(normalized.as_str()));
    }

    #[test]
    fn prop_keyed_timing_stays_within_clip(
        weapon_type in weapon_type(),
        mode in attack_mode(),
        duration in 0.05f32..30.0,
    ) {
        let clips: Vec<ClipRecord> = builtin_clip_name(weapon_type, mode)
            .map(|name| ClipRecord::new(name, duration))
            .into_iter()
            .collect();
        let resolver: TimingResolver = TimingResolver::new(
            Arc::new(ClipRegistry::from_records(clips)),
            Arc::new(ReplacementMap::new()),
            Arc::new(BaselineProvider::builtin()),
        );

        let profile = resolver.resolve_timing(weapon_type, mode);
        assert_bounded(&profile);
        if mode.is_extra() {
            prop_assert!((profile.clip_length - duration).abs() < 1e-4);
        }
    }

    #[test]
    fn prop_clip_name_timing_stays_within_clip(
        name in "[A-Za-z_]{1,16}",
        duration in 0.05f32..30.0,
    ) {
        let resolver: TimingResolver = TimingResolver::new(
            Arc::new(ClipRegistry::from_records([ClipRecord::new(name.clone(), duration)])),
            Arc::new(ReplacementMap::new()),
            Arc::new(BaselineProvider::builtin()),
        );
        assert_bounded(&resolver.resolve_from_clip_name(&name));
    }

    #[test]
    fn prop_missing_clip_never_panics(weapon_type in weapon_type(), mode in attack_mode()) {
        let resolver: TimingResolver = TimingResolver::new(
            Arc::new(ClipRegistry::new()),
            Arc::new(ReplacementMap::new()),
            Arc::new(BaselineProvider::builtin()),
        );
        let key = ReplacementKey::new(weapon_type, mode);
        let profile = resolver.resolve_timing(key.weapon_type, key.mode);
        assert_bounded(&profile);
    }
}
