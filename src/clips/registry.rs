//! Replacement clip registry and its length cache
//!
//! Clips are registered once at load time from whatever asset source the host
//! provides. Durations are served through a derived length index that can be
//! precomputed up front, invalidated on reload, and refilled lazily on miss.

use ahash::AHashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Anything the registry can hold: it only needs a duration
pub trait ClipAsset: Clone + Send + Sync {
    fn duration_seconds(&self) -> f32;
}

/// Plain name + duration record, used when no engine asset is attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipRecord {
    #[serde(alias = "name")]
    pub logical_name: String,
    #[serde(alias = "duration")]
    pub duration_seconds: f32,
}

impl ClipRecord {
    pub fn new(logical_name: impl Into<String>, duration_seconds: f32) -> Self {
        Self {
            logical_name: logical_name.into(),
            duration_seconds,
        }
    }
}

impl ClipAsset for ClipRecord {
    fn duration_seconds(&self) -> f32 {
        self.duration_seconds
    }
}

/// Logical clip name -> duration index over the registry
#[derive(Debug, Clone, Default)]
pub struct ClipLengthCache {
    lengths: AHashMap<String, f32>,
    initialized: bool,
}

impl ClipLengthCache {
    pub fn get(&self, name: &str) -> Option<f32> {
        self.lengths.get(name).copied()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}

/// Registry of replacement clips keyed by unique logical name
///
/// Lock order is always `clips` then `lengths`.
pub struct ClipRegistry<A: ClipAsset = ClipRecord> {
    clips: RwLock<AHashMap<String, A>>,
    lengths: RwLock<ClipLengthCache>,
}

impl<A: ClipAsset> ClipRegistry<A> {
    pub fn new() -> Self {
        Self {
            clips: RwLock::new(AHashMap::new()),
            lengths: RwLock::new(ClipLengthCache::default()),
        }
    }

    /// Register a clip; a second registration under the same name replaces the first
    ///
    /// Returns true if an existing clip was replaced.
    pub fn register(&self, name: impl Into<String>, asset: A) -> bool {
        let name = name.into();
        let mut clips = self.clips.write();
        let replaced = clips.insert(name.clone(), asset).is_some();

        if replaced {
            tracing::warn!("Clip '{}' registered twice, keeping the latest", name);
            self.lengths.write().lengths.remove(&name);
        }

        replaced
    }

    /// Register every (name, asset) pair from an asset source
    pub fn register_all<I, S>(&self, assets: I) -> usize
    where
        I: IntoIterator<Item = (S, A)>,
        S: Into<String>,
    {
        let mut count = 0;
        for (name, asset) in assets {
            self.register(name, asset);
            count += 1;
        }
        count
    }

    /// Duration of a registered clip
    ///
    /// Hits take only the cache read lock. A miss reads the asset directly
    /// and writes the result back.
    pub fn duration_of(&self, name: &str) -> Option<f32> {
        if let Some(duration) = self.lengths.read().get(name) {
            return Some(duration);
        }

        let clips = self.clips.read();
        let duration = clips.get(name)?.duration_seconds();
        tracing::debug!("Clip length cache miss for '{}' ({:.3}s)", name, duration);
        self.lengths.write().lengths.insert(name.to_string(), duration);
        Some(duration)
    }

    /// Fill the length cache from every registered clip
    ///
    /// Idempotent. The new index is built before the cache lock is taken.
    pub fn precompute_all(&self) -> usize {
        let clips = self.clips.read();
        let lengths: AHashMap<String, f32> = clips
            .iter()
            .map(|(name, asset)| (name.clone(), asset.duration_seconds()))
            .collect();
        let count = lengths.len();

        *self.lengths.write() = ClipLengthCache {
            lengths,
            initialized: true,
        };

        tracing::info!("Precomputed lengths for {} clips", count);
        count
    }

    /// Drop every cached length; registered clips stay registered
    pub fn invalidate(&self) {
        *self.lengths.write() = ClipLengthCache::default();
    }

    pub fn is_initialized(&self) -> bool {
        self.lengths.read().initialized
    }

    pub fn cached_len(&self) -> usize {
        self.lengths.read().len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.read().contains_key(name)
    }

    /// Clone of a registered asset
    pub fn get(&self, name: &str) -> Option<A> {
        self.clips.read().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.clips.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.read().is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.clips.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl<A: ClipAsset> Default for ClipRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipRegistry<ClipRecord> {
    /// Build a registry from plain records
    pub fn from_records(records: impl IntoIterator<Item = ClipRecord>) -> Self {
        let registry = Self::new();
        for record in records {
            registry.register(record.logical_name.clone(), record);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> ClipRegistry {
        ClipRegistry::from_records([
            ClipRecord::new("Sword_Flurry", 1.6),
            ClipRecord::new("Axe_Cleave", 2.1),
        ])
    }

    #[test]
    fn test_duration_without_precompute() {
        let registry = sample_registry();
        assert!(!registry.is_initialized());
        assert_eq!(registry.duration_of("Sword_Flurry"), Some(1.6));
        assert_eq!(registry.duration_of("Missing"), None);
    }

    #[test]
    fn test_precompute_is_idempotent() {
        let registry = sample_registry();
        assert_eq!(registry.precompute_all(), 2);
        let first = registry.duration_of("Axe_Cleave");
        assert_eq!(registry.precompute_all(), 2);
        let second = registry.duration_of("Axe_Cleave");

        assert!(registry.is_initialized());
        assert_eq!(first, second);
        assert_eq!(registry.cached_len(), 2);
    }

    #[test]
    fn test_invalidate_keeps_clips() {
        let registry = sample_registry();
        registry.precompute_all();
        registry.invalidate();

        assert!(!registry.is_initialized());
        assert_eq!(registry.cached_len(), 0);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.duration_of("Sword_Flurry"), Some(1.6));
    }

    #[test]
    fn test_miss_populates_cache() {
        let registry = sample_registry();
        registry.duration_of("Axe_Cleave");
        assert_eq!(registry.cached_len(), 1);
    }

    #[test]
    fn test_uninitialized_cache_still_serves_hits() {
        let registry = sample_registry();
        registry.precompute_all();
        registry.invalidate();

        registry.duration_of("Sword_Flurry");
        registry.duration_of("Sword_Flurry");
        assert!(!registry.is_initialized());
        assert_eq!(registry.lengths.read().get("Sword_Flurry"), Some(1.6));
        assert_eq!(registry.cached_len(), 1);
    }

    #[test]
    fn test_reregister_last_write_wins() {
        let registry = sample_registry();
        registry.precompute_all();

        let replaced = registry.register("Sword_Flurry", ClipRecord::new("Sword_Flurry", 0.9));
        assert!(replaced);
        assert_eq!(registry.duration_of("Sword_Flurry"), Some(0.9));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_names_sorted() {
        let registry = sample_registry();
        assert_eq!(registry.names(), vec!["Axe_Cleave".to_string(), "Sword_Flurry".to_string()]);
    }
}
