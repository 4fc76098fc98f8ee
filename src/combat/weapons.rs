//! Equipped-weapon snapshot handed in by the host game
//!
//! The classifier only looks at the skill category, handedness, identity
//! tokens and what sits in the off hand. Everything else about an item is the
//! host's business.

use serde::{Deserialize, Serialize};

/// Skill category the host assigns to a weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    Swords,
    Axes,
    Clubs,
    Spears,
    Polearms,
    Knives,
    Unarmed,
    Bows,
    Crossbows,
    /// Anything the classifier has no dedicated rule for
    Other,
}

impl SkillCategory {
    /// Ranged categories never get a melee override
    pub fn is_ranged(&self) -> bool {
        matches!(self, SkillCategory::Bows | SkillCategory::Crossbows)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    OneHanded,
    TwoHanded,
}

/// Whatever the player holds in the off hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffHandItem {
    pub skill: SkillCategory,
    pub handedness: Handedness,
    pub is_shield: bool,
    pub is_torch: bool,
}

impl OffHandItem {
    /// A one-handed weapon in the off hand
    pub fn weapon(skill: SkillCategory) -> Self {
        Self {
            skill,
            handedness: Handedness::OneHanded,
            is_shield: false,
            is_torch: false,
        }
    }

    pub fn shield() -> Self {
        Self {
            skill: SkillCategory::Other,
            handedness: Handedness::OneHanded,
            is_shield: true,
            is_torch: false,
        }
    }

    pub fn torch() -> Self {
        Self {
            skill: SkillCategory::Clubs,
            handedness: Handedness::OneHanded,
            is_shield: false,
            is_torch: true,
        }
    }

    /// One-handed weapon of the same skill, not a shield or torch
    pub fn pairs_with(&self, main_skill: SkillCategory) -> bool {
        !self.is_shield
            && !self.is_torch
            && self.handedness == Handedness::OneHanded
            && self.skill == main_skill
    }
}

/// Main-hand weapon as seen at the moment of the attack request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponSnapshot {
    pub skill: SkillCategory,
    pub handedness: Handedness,
    /// Prefab identifier, e.g. `AxeBerzerkr`
    pub prefab_name: String,
    /// Player-facing name
    pub display_name: String,
    pub off_hand: Option<OffHandItem>,
}

impl WeaponSnapshot {
    pub fn new(skill: SkillCategory, handedness: Handedness) -> Self {
        Self {
            skill,
            handedness,
            prefab_name: String::new(),
            display_name: String::new(),
            off_hand: None,
        }
    }

    pub fn with_identity(mut self, prefab_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        self.prefab_name = prefab_name.into();
        self.display_name = display_name.into();
        self
    }

    pub fn with_off_hand(mut self, off_hand: OffHandItem) -> Self {
        self.off_hand = Some(off_hand);
        self
    }

    pub fn is_two_handed(&self) -> bool {
        self.handedness == Handedness::TwoHanded
    }

    /// Case-insensitive containment test of any token against prefab or display name
    pub fn identity_matches(&self, tokens: &[&str]) -> bool {
        let prefab = self.prefab_name.to_lowercase();
        let display = self.display_name.to_lowercase();
        tokens.iter().any(|token| {
            let token = token.to_lowercase();
            !token.is_empty() && (prefab.contains(&token) || display.contains(&token))
        })
    }

    /// Item key used for individual-weapon lookups
    pub fn item_key(&self) -> &str {
        if self.prefab_name.is_empty() {
            &self.display_name
        } else {
            &self.prefab_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_match_is_case_insensitive() {
        let axe = WeaponSnapshot::new(SkillCategory::Axes, Handedness::TwoHanded)
            .with_identity("AxeBerzerkr", "Berserkir Axes");
        assert!(axe.identity_matches(&["berzerkr"]));
        assert!(axe.identity_matches(&["BERSERKIR"]));
        assert!(!axe.identity_matches(&["skoll"]));
        assert!(!axe.identity_matches(&[""]));
    }

    #[test]
    fn test_off_hand_pairing() {
        assert!(OffHandItem::weapon(SkillCategory::Axes).pairs_with(SkillCategory::Axes));
        assert!(!OffHandItem::weapon(SkillCategory::Clubs).pairs_with(SkillCategory::Axes));
        assert!(!OffHandItem::shield().pairs_with(SkillCategory::Other));
        assert!(!OffHandItem::torch().pairs_with(SkillCategory::Clubs));
    }

    #[test]
    fn test_ranged_categories() {
        assert!(SkillCategory::Bows.is_ranged());
        assert!(SkillCategory::Crossbows.is_ranged());
        assert!(!SkillCategory::Spears.is_ranged());
    }

    #[test]
    fn test_item_key_prefers_prefab() {
        let sword = WeaponSnapshot::new(SkillCategory::Swords, Handedness::OneHanded)
            .with_identity("SwordIron", "Iron sword");
        assert_eq!(sword.item_key(), "SwordIron");

        let unnamed = WeaponSnapshot::new(SkillCategory::Swords, Handedness::OneHanded)
            .with_identity("", "Iron sword");
        assert_eq!(unnamed.item_key(), "Iron sword");
    }
}
