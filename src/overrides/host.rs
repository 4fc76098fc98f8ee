//! Host animation-graph adapter
//!
//! The override builder needs exactly four things from the engine: list a
//! controller's clips by slot, clone a clip under a new name, build a derived
//! controller from a full slot list, and make an animator use a controller.

use crate::clips::{ClipAsset, ClipRecord};
use crate::core::types::WeaponTypeTag;
use crate::timing::baseline::BaselineProvider;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub trait AnimationHost: Send + Sync {
    type Clip: ClipAsset;
    type Controller: Send + Sync;
    type Animator;

    /// Every (slot name, clip) pair the controller plays
    fn clips_by_slot(&self, controller: &Self::Controller) -> Vec<(String, Self::Clip)>;

    /// Copy of `clip` renamed to `slot_name`
    fn clone_renamed(&self, clip: &Self::Clip, slot_name: &str) -> Self::Clip;

    /// Derived controller playing `slots` on top of `base`
    fn build_controller(&self, base: &Self::Controller, slots: Vec<(String, Self::Clip)>) -> Self::Controller;

    /// Make `animator` play through `controller`
    fn swap_controller(&self, animator: &mut Self::Animator, controller: Arc<Self::Controller>);
}

/// Controller held entirely in memory: a name and its slots
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryController {
    pub name: String,
    pub slots: Vec<(String, ClipRecord)>,
}

impl MemoryController {
    pub fn new(name: impl Into<String>, slots: Vec<(String, ClipRecord)>) -> Self {
        Self {
            name: name.into(),
            slots,
        }
    }

    /// One slot per entry, each slot playing a clip of the same name
    pub fn from_clips(name: impl Into<String>, clips: impl IntoIterator<Item = ClipRecord>) -> Self {
        let slots = clips
            .into_iter()
            .map(|clip| (clip.logical_name.clone(), clip))
            .collect();
        Self::new(name, slots)
    }

    /// Controller playing every built-in secondary-attack clip
    pub fn from_baseline(name: impl Into<String>, baseline: &BaselineProvider) -> Self {
        let clips = WeaponTypeTag::ALL.into_iter().map(|weapon_type| {
            let entry = baseline.get(weapon_type);
            ClipRecord::new(entry.clip_name.clone(), entry.duration)
        });
        Self::from_clips(name, clips)
    }

    pub fn slot(&self, slot_name: &str) -> Option<&ClipRecord> {
        self.slots
            .iter()
            .find(|(name, _)| name == slot_name)
            .map(|(_, clip)| clip)
    }
}

#[derive(Debug, Default)]
pub struct MemoryAnimator {
    pub active: Option<Arc<MemoryController>>,
    pub swaps: usize,
}

/// Host adapter over [`MemoryController`]; counts builds
#[derive(Debug, Default)]
pub struct MemoryHost {
    builds: AtomicUsize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derived controllers built so far
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

impl AnimationHost for MemoryHost {
    type Clip = ClipRecord;
    type Controller = MemoryController;
    type Animator = MemoryAnimator;

    fn clips_by_slot(&self, controller: &MemoryController) -> Vec<(String, ClipRecord)> {
        controller.slots.clone()
    }

    fn clone_renamed(&self, clip: &ClipRecord, slot_name: &str) -> ClipRecord {
        ClipRecord::new(slot_name, clip.duration_seconds)
    }

    fn build_controller(&self, base: &MemoryController, slots: Vec<(String, ClipRecord)>) -> MemoryController {
        let n = self.builds.fetch_add(1, Ordering::SeqCst) + 1;
        MemoryController::new(format!("{}#override{}", base.name, n), slots)
    }

    fn swap_controller(&self, animator: &mut MemoryAnimator, controller: Arc<MemoryController>) {
        animator.active = Some(controller);
        animator.swaps += 1;
    }
}
