//! Core type definitions used by every lookup table
//!
//! Weapon types and attack modes are closed enums. Every table in the crate is
//! keyed by them (through [`ReplacementKey`]) rather than by free-form strings;
//! strings only appear at the configuration boundary and are normalized there.

use crate::core::error::ExtraAttackError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical weapon category used for all lookup tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponTypeTag {
    Sword,
    Axe,
    Club,
    Spear,
    Greatsword,
    Battleaxe,
    Polearm,
    Knife,
    Fist,
}

impl WeaponTypeTag {
    pub const ALL: [WeaponTypeTag; 9] = [
        WeaponTypeTag::Sword,
        WeaponTypeTag::Axe,
        WeaponTypeTag::Club,
        WeaponTypeTag::Spear,
        WeaponTypeTag::Greatsword,
        WeaponTypeTag::Battleaxe,
        WeaponTypeTag::Polearm,
        WeaponTypeTag::Knife,
        WeaponTypeTag::Fist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponTypeTag::Sword => "Sword",
            WeaponTypeTag::Axe => "Axe",
            WeaponTypeTag::Club => "Club",
            WeaponTypeTag::Spear => "Spear",
            WeaponTypeTag::Greatsword => "Greatsword",
            WeaponTypeTag::Battleaxe => "Battleaxe",
            WeaponTypeTag::Polearm => "Polearm",
            WeaponTypeTag::Knife => "Knife",
            WeaponTypeTag::Fist => "Fist",
        }
    }

    /// Case-insensitive parse of a weapon type name
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for WeaponTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeaponTypeTag {
    type Err = ExtraAttackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ExtraAttackError::UnknownWeaponType(s.to_string()))
    }
}

/// Selected attack variant
///
/// `Normal` is the built-in secondary attack and never has a replacement
/// clip. The lettered modes are the extra-attack slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttackMode {
    Normal,
    SecondaryQ,
    SecondaryT,
    SecondaryG,
}

impl AttackMode {
    pub const ALL: [AttackMode; 4] = [
        AttackMode::Normal,
        AttackMode::SecondaryQ,
        AttackMode::SecondaryT,
        AttackMode::SecondaryG,
    ];

    /// Modes that carry a replacement clip
    pub const EXTRA: [AttackMode; 3] = [
        AttackMode::SecondaryQ,
        AttackMode::SecondaryT,
        AttackMode::SecondaryG,
    ];

    pub fn letter(&self) -> Option<char> {
        match self {
            AttackMode::Normal => None,
            AttackMode::SecondaryQ => Some('Q'),
            AttackMode::SecondaryT => Some('T'),
            AttackMode::SecondaryG => Some('G'),
        }
    }

    /// Canonical mode key as it appears in configuration tables
    pub fn key(&self) -> &'static str {
        match self {
            AttackMode::Normal => NORMAL_KEY,
            AttackMode::SecondaryQ => "secondary_Q",
            AttackMode::SecondaryT => "secondary_T",
            AttackMode::SecondaryG => "secondary_G",
        }
    }

    /// Parse any accepted mode spelling (`Q`, `secondary_Q`, `ea_secondary_Q`)
    pub fn from_key(raw: &str) -> Option<Self> {
        let canonical = normalize_mode_key(raw);
        Self::ALL.iter().copied().find(|mode| mode.key() == canonical)
    }

    pub fn is_extra(&self) -> bool {
        self.letter().is_some()
    }
}

impl fmt::Display for AttackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AttackMode {
    type Err = ExtraAttackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| ExtraAttackError::UnknownAttackMode(s.to_string()))
    }
}

const NORMAL_KEY: &str = "normal";
const MODE_PREFIX: &str = "secondary_";
const TRIGGER_PREFIX: &str = "ea_";

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

/// Normalize a mode string to its canonical key
///
/// Total and idempotent: recognised spellings map to `secondary_{Q|T|G}` or
/// `normal`; anything else comes back trimmed but otherwise untouched.
pub fn normalize_mode_key(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_trigger = strip_prefix_ignore_case(trimmed, TRIGGER_PREFIX).unwrap_or(trimmed);
    let letter_part =
        strip_prefix_ignore_case(without_trigger, MODE_PREFIX).unwrap_or(without_trigger);

    let mut chars = letter_part.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        let upper = letter.to_ascii_uppercase();
        if matches!(upper, 'Q' | 'T' | 'G') {
            return format!("{}{}", MODE_PREFIX, upper);
        }
    }

    if without_trigger.eq_ignore_ascii_case(NORMAL_KEY) {
        return NORMAL_KEY.to_string();
    }

    trimmed.to_string()
}

/// Rewrite the mode suffix of an individual-weapon key to canonical form
///
/// `SwordIron_ea_secondary_q` becomes `SwordIron_secondary_Q`, and a prefix
/// naming a weapon type takes its canonical casing (`fist_secondary_t`
/// becomes `Fist_secondary_T`). Keys without a recognisable mode suffix are
/// returned trimmed.
pub fn normalize_individual_key(raw: &str) -> String {
    let trimmed = raw.trim();
    let lowered = trimmed.to_ascii_lowercase();
    let split_at = lowered
        .rfind("_ea_secondary_")
        .or_else(|| lowered.rfind("_secondary_"));

    match split_at {
        Some(idx) => {
            let (item, suffix) = trimmed.split_at(idx);
            let item = WeaponTypeTag::parse(item).map_or(item, |tag| tag.as_str());
            format!("{}_{}", item, normalize_mode_key(&suffix[1..]))
        }
        None => trimmed.to_string(),
    }
}

/// Composite (weapon type, mode) key shared by every table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReplacementKey {
    pub weapon_type: WeaponTypeTag,
    pub mode: AttackMode,
}

impl ReplacementKey {
    pub fn new(weapon_type: WeaponTypeTag, mode: AttackMode) -> Self {
        Self { weapon_type, mode }
    }

    /// `{WeaponType}_secondary_{Letter}` (or `{WeaponType}_normal`)
    pub fn canonical(&self) -> String {
        format!("{}_{}", self.weapon_type, self.mode.key())
    }

    /// Individual-weapon key for a specific item under this mode
    pub fn item_key(&self, item: &str) -> String {
        format!("{}_{}", item.trim(), self.mode.key())
    }

    /// Parse `{WeaponType}_{mode}` where mode is any accepted spelling
    pub fn parse(raw: &str) -> Option<Self> {
        let (type_part, mode_part) = raw.trim().split_once('_')?;
        let weapon_type = WeaponTypeTag::parse(type_part)?;
        let mode = AttackMode::from_key(mode_part)?;
        Some(Self::new(weapon_type, mode))
    }

    /// Every weapon type crossed with every mode
    pub fn all() -> impl Iterator<Item = ReplacementKey> {
        WeaponTypeTag::ALL
            .into_iter()
            .flat_map(|weapon_type| AttackMode::ALL.into_iter().map(move |mode| Self::new(weapon_type, mode)))
    }
}

impl fmt::Display for ReplacementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.weapon_type, self.mode.key())
    }
}
