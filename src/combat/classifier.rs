//! Weapon classification: skill + handedness + identity -> weapon type and trigger
//!
//! Rule order matters. The dual-wield and built-in identity checks run before
//! the generic skill table; otherwise paired or vanilla-dual items fall
//! through to the plain two-handed trigger.

use crate::combat::weapons::{SkillCategory, WeaponSnapshot};
use crate::core::types::WeaponTypeTag;

pub const SWORD_SECONDARY: &str = "sword_secondary";
pub const AXE_SECONDARY: &str = "axe_secondary";
pub const CLUB_SECONDARY: &str = "mace_secondary";
pub const SPEAR_SECONDARY: &str = "spear_throw";
pub const GREATSWORD_SECONDARY: &str = "greatsword_secondary";
pub const BATTLEAXE_SECONDARY: &str = "battleaxe_secondary";
pub const ATGEIR_SECONDARY: &str = "atgeir_secondary";
pub const KNIFE_SECONDARY: &str = "knife_secondary";
pub const FIST_SECONDARY: &str = "unarmed_kick";
pub const DUAL_AXES_SECONDARY: &str = "dual_axes_secondary";
pub const DUAL_KNIVES_SECONDARY: &str = "dual_knives_secondary";
pub const DUAL_AXES_CLEAVE: &str = "dual_axes_cleave";
pub const KNIFE_JUMP_ATTACK: &str = "knife_jump_attack";

/// Built-in two-handed axes that are really a pair of axes
const DUAL_AXE_IDENTITIES: &[&str] = &["berzerkr", "berserkir"];

/// Built-in two-handed knife pair
const DUAL_KNIFE_IDENTITIES: &[&str] = &["skollandhati", "skoll and hati"];

/// Result of classifying an equipped weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub weapon_type: WeaponTypeTag,
    /// Animation trigger the host fires for this weapon's extra attacks
    pub trigger: &'static str,
}

impl Classification {
    const fn new(weapon_type: WeaponTypeTag, trigger: &'static str) -> Self {
        Self { weapon_type, trigger }
    }
}

/// Classify a weapon; `None` means "no override" (ranged weapons)
pub fn classify(weapon: &WeaponSnapshot) -> Option<Classification> {
    if weapon.skill.is_ranged() {
        return None;
    }

    if let Some(dual) = dual_wield(weapon) {
        return Some(dual);
    }

    if weapon.skill == SkillCategory::Polearms {
        return Some(Classification::new(WeaponTypeTag::Polearm, ATGEIR_SECONDARY));
    }

    if weapon.is_two_handed() {
        if let Some(two_handed) = two_handed_variant(weapon) {
            return Some(two_handed);
        }
    }

    Some(generic(weapon.skill))
}

/// Convenience wrapper returning only the weapon type
pub fn classify_weapon_type(weapon: &WeaponSnapshot) -> Option<WeaponTypeTag> {
    classify(weapon).map(|c| c.weapon_type)
}

/// One-handed main hand paired with a matching one-handed off hand
fn dual_wield(weapon: &WeaponSnapshot) -> Option<Classification> {
    if weapon.is_two_handed() {
        return None;
    }
    let off_hand = weapon.off_hand.as_ref()?;
    if !off_hand.pairs_with(weapon.skill) {
        return None;
    }

    match weapon.skill {
        SkillCategory::Axes => Some(Classification::new(WeaponTypeTag::Axe, DUAL_AXES_SECONDARY)),
        SkillCategory::Knives => Some(Classification::new(WeaponTypeTag::Knife, DUAL_KNIVES_SECONDARY)),
        _ => None,
    }
}

fn two_handed_variant(weapon: &WeaponSnapshot) -> Option<Classification> {
    match weapon.skill {
        SkillCategory::Swords => Some(Classification::new(WeaponTypeTag::Greatsword, GREATSWORD_SECONDARY)),
        SkillCategory::Axes => {
            if weapon.identity_matches(DUAL_AXE_IDENTITIES) {
                Some(Classification::new(WeaponTypeTag::Axe, DUAL_AXES_CLEAVE))
            } else {
                Some(Classification::new(WeaponTypeTag::Battleaxe, BATTLEAXE_SECONDARY))
            }
        }
        SkillCategory::Knives => {
            if weapon.identity_matches(DUAL_KNIFE_IDENTITIES) {
                Some(Classification::new(WeaponTypeTag::Knife, DUAL_KNIVES_SECONDARY))
            } else {
                Some(Classification::new(WeaponTypeTag::Knife, KNIFE_JUMP_ATTACK))
            }
        }
        _ => None,
    }
}

fn generic(skill: SkillCategory) -> Classification {
    match skill {
        SkillCategory::Swords => Classification::new(WeaponTypeTag::Sword, SWORD_SECONDARY),
        SkillCategory::Axes => Classification::new(WeaponTypeTag::Axe, AXE_SECONDARY),
        SkillCategory::Clubs => Classification::new(WeaponTypeTag::Club, CLUB_SECONDARY),
        SkillCategory::Spears => Classification::new(WeaponTypeTag::Spear, SPEAR_SECONDARY),
        SkillCategory::Polearms => Classification::new(WeaponTypeTag::Polearm, ATGEIR_SECONDARY),
        SkillCategory::Knives => Classification::new(WeaponTypeTag::Knife, KNIFE_SECONDARY),
        SkillCategory::Unarmed => Classification::new(WeaponTypeTag::Fist, FIST_SECONDARY),
        // Ranged is filtered out before this point
        SkillCategory::Bows | SkillCategory::Crossbows | SkillCategory::Other => {
            Classification::new(WeaponTypeTag::Sword, SWORD_SECONDARY)
        }
    }
}
