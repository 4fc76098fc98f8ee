//! Derived-controller cache
//!
//! One override controller per replacement key, built on first request and
//! shared afterwards. Each entry remembers the slot mapping it was built from
//! and is only served for that mapping. The host's unmodified controller is
//! kept under [`ORIGINAL_KEY`] so a normal attack can swap straight back to it.

use crate::clips::{ClipAsset, ClipRegistry};
use crate::overrides::host::AnimationHost;
use ahash::AHashMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Cache key of the unmodified controller
pub const ORIGINAL_KEY: &str = "Original";

/// Sorted (slot, clip) pairs a controller was built from
type MappingSignature = Vec<(String, String)>;

fn signature_of(mapping: &AHashMap<String, String>) -> MappingSignature {
    let mut pairs: MappingSignature = mapping
        .iter()
        .map(|(slot, clip)| (slot.clone(), clip.clone()))
        .collect();
    pairs.sort();
    pairs
}

struct CachedController<C> {
    mapping: MappingSignature,
    controller: Arc<C>,
}

pub struct OverrideCache<C> {
    entries: RwLock<AHashMap<String, CachedController<C>>>,
    /// Bumped by every clear; builds started before a clear are not cached
    generation: AtomicU64,
}

impl<C> OverrideCache<C> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(AHashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<C>> {
        self.entries.read().get(key).map(|cached| Arc::clone(&cached.controller))
    }

    /// Record the host's unmodified controller
    pub fn insert_baseline(&self, controller: Arc<C>) {
        self.entries.write().insert(
            ORIGINAL_KEY.to_string(),
            CachedController {
                mapping: Vec::new(),
                controller,
            },
        );
    }

    pub fn baseline(&self) -> Option<Arc<C>> {
        self.get(ORIGINAL_KEY)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Cached keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Times the cache has been cleared
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Drop every derived controller; returns how many were removed
    pub fn clear(&self, keep_baseline: bool) -> usize {
        let mut entries = self.entries.write();
        self.generation.fetch_add(1, Ordering::AcqRel);
        let before = entries.len();
        let original = if keep_baseline {
            entries.remove(ORIGINAL_KEY)
        } else {
            None
        };
        entries.clear();
        if let Some(original) = original {
            entries.insert(ORIGINAL_KEY.to_string(), original);
        }
        before - entries.len()
    }

    /// Controller for `key` built from `mapping`, building it on first request
    ///
    /// Slots named in `mapping` are replaced with the mapped clip, cloned and
    /// renamed to the slot, provided the registry holds that clip. Every
    /// other slot keeps its base clip. An entry built from a different
    /// mapping is never returned; it is rebuilt and replaced. A build that
    /// overlaps a [`clear`](Self::clear) is handed to its caller but not
    /// cached. Concurrent first requests may both build; the first insert
    /// wins and both callers get that instance.
    pub fn build_or_get<H>(
        &self,
        host: &H,
        key: &str,
        base: &C,
        mapping: &AHashMap<String, String>,
        clips: &ClipRegistry<H::Clip>,
    ) -> Arc<C>
    where
        H: AnimationHost<Controller = C>,
        H::Clip: ClipAsset,
    {
        let signature = signature_of(mapping);
        if let Some(existing) = self.entries.read().get(key) {
            if existing.mapping == signature {
                return Arc::clone(&existing.controller);
            }
            tracing::debug!("Override '{}' was built from another mapping, rebuilding", key);
        }
        let generation = self.generation();

        let mut replaced = 0usize;
        let slots: Vec<(String, H::Clip)> = host
            .clips_by_slot(base)
            .into_iter()
            .map(|(slot, clip)| {
                let replacement = mapping.get(&slot).and_then(|name| clips.get(name));
                match replacement {
                    Some(replacement) => {
                        replaced += 1;
                        let renamed = host.clone_renamed(&replacement, &slot);
                        (slot, renamed)
                    }
                    None => (slot, clip),
                }
            })
            .collect();

        if replaced == 0 && !mapping.is_empty() {
            tracing::warn!("Override '{}' replaced no slots, replacement clips missing", key);
        }

        let built = Arc::new(host.build_controller(base, slots));
        let mut entries = self.entries.write();
        if self.generation() != generation {
            tracing::debug!("Override cache cleared during build of '{}', not caching", key);
            return built;
        }
        if let Some(existing) = entries.get(key) {
            if existing.mapping == signature {
                return Arc::clone(&existing.controller);
            }
        }
        tracing::debug!("Built override controller '{}' ({} slots replaced)", key, replaced);
        entries.insert(
            key.to_string(),
            CachedController {
                mapping: signature,
                controller: Arc::clone(&built),
            },
        );
        built
    }
}

impl<C> Default for OverrideCache<C> {
    fn default() -> Self {
        Self::new()
    }
}
