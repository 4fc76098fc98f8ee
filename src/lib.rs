//! Extra Attacks - combat animation overrides with clip-scaled timing

pub mod clips;
pub mod combat;
pub mod core;
pub mod costs;
pub mod engine;
pub mod overrides;
pub mod rules;
pub mod timing;

pub use engine::{AttackPlan, AttackRejection, AttackRequest, ExtraAttackEngine};
