//! Per-player extra-attack cooldowns
//!
//! Time is supplied by the caller in seconds; nothing here reads a clock.

use crate::core::types::ReplacementKey;
use ahash::AHashMap;
use parking_lot::RwLock;

/// Entry count above which [`CooldownTracker::try_begin`] drops expired entries
const PRUNE_THRESHOLD: usize = 256;

#[derive(Debug, Default)]
pub struct CooldownTracker {
    /// (player, key) -> time the attack becomes available again
    ready_at: RwLock<AHashMap<(String, ReplacementKey), f64>>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a use at `now` if the pair is off cooldown
    ///
    /// The check and the record happen under one write lock, so of two
    /// concurrent callers only one gets `Ok`. `Err` carries the seconds left.
    pub fn try_begin(&self, player: &str, key: ReplacementKey, now: f64, cooldown_seconds: f32) -> Result<(), f64> {
        let mut ready_at = self.ready_at.write();
        let entry = (player.to_string(), key);
        if let Some(ready) = ready_at.get(&entry) {
            let remaining = ready - now;
            if remaining > 0.0 {
                return Err(remaining);
            }
        }
        if ready_at.len() >= PRUNE_THRESHOLD {
            ready_at.retain(|_, ready| *ready > now);
        }
        let cooldown = f64::from(cooldown_seconds.max(0.0));
        if cooldown > 0.0 {
            ready_at.insert(entry, now + cooldown);
        } else {
            ready_at.remove(&entry);
        }
        Ok(())
    }

    /// Seconds left before the pair is usable again (0 when ready)
    pub fn remaining(&self, player: &str, key: ReplacementKey, now: f64) -> f64 {
        self.ready_at
            .read()
            .get(&(player.to_string(), key))
            .map(|ready| (ready - now).max(0.0))
            .unwrap_or(0.0)
    }

    pub fn is_ready(&self, player: &str, key: ReplacementKey, now: f64) -> bool {
        self.remaining(player, key, now) <= 0.0
    }

    pub fn len(&self) -> usize {
        self.ready_at.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ready_at.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AttackMode, WeaponTypeTag};

    fn key() -> ReplacementKey {
        ReplacementKey::new(WeaponTypeTag::Axe, AttackMode::SecondaryQ)
    }

    #[test]
    fn test_unused_pair_is_ready() {
        let tracker = CooldownTracker::new();
        assert!(tracker.is_ready("alice", key(), 0.0));
        assert_eq!(tracker.remaining("alice", key(), 0.0), 0.0);
    }

    #[test]
    fn test_cooldown_counts_down() {
        let tracker = CooldownTracker::new();
        tracker.try_begin("alice", key(), 10.0, 3.0).unwrap();

        assert!(!tracker.is_ready("alice", key(), 11.0));
        assert!((tracker.remaining("alice", key(), 11.0) - 2.0).abs() < 1e-9);
        assert!(tracker.is_ready("alice", key(), 13.0));
        // Other players and modes are unaffected
        assert!(tracker.is_ready("bob", key(), 11.0));
        let other = ReplacementKey::new(WeaponTypeTag::Axe, AttackMode::SecondaryG);
        assert!(tracker.is_ready("alice", other, 11.0));
    }

    #[test]
    fn test_try_begin_checks_and_records() {
        let tracker = CooldownTracker::new();
        assert_eq!(tracker.try_begin("alice", key(), 0.0, 2.0), Ok(()));
        let remaining = tracker.try_begin("alice", key(), 0.5, 2.0).unwrap_err();
        assert!((remaining - 1.5).abs() < 1e-9);
        assert_eq!(tracker.try_begin("alice", key(), 2.0, 2.0), Ok(()));
        assert!((tracker.remaining("alice", key(), 2.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_try_begin_admits_one_concurrent_caller() {
        use std::sync::{Arc, Barrier};
        use std::thread;

        let tracker = Arc::new(CooldownTracker::new());
        let barrier = Arc::new(Barrier::new(8));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    tracker.try_begin("alice", key(), 0.0, 2.0).is_ok()
                })
            })
            .collect();

        let admitted = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(admitted, 1);
    }

    #[test]
    fn test_try_begin_prunes_expired_entries() {
        let tracker = CooldownTracker::new();
        for i in 0..PRUNE_THRESHOLD {
            tracker.try_begin(&format!("player{i}"), key(), 0.0, 1.0).unwrap();
        }
        assert_eq!(tracker.len(), PRUNE_THRESHOLD);

        tracker.try_begin("late", key(), 10.0, 1.0).unwrap();
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_zero_cooldown_leaves_no_entry() {
        let tracker = CooldownTracker::new();
        tracker.try_begin("alice", key(), 0.0, 0.0).unwrap();
        assert!(tracker.is_empty());
    }
}
