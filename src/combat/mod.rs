pub mod classifier;
pub mod weapons;

pub use classifier::{classify, classify_weapon_type, Classification};
pub use weapons::{Handedness, OffHandItem, SkillCategory, WeaponSnapshot};
