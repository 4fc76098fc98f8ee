//! Built-in ("vanilla") reference data per weapon type
//!
//! Each weapon type has the clip it normally plays for its secondary attack,
//! that clip's length, where its events sit as fractions of the clip, and the
//! hit-volume shape. Replacement timings are scaled against these numbers.

use crate::core::types::WeaponTypeTag;
use crate::timing::profile::{AttackShape, EventFractions};

/// Reference data for one weapon type
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineEntry {
    /// Built-in clip slot the replacement goes into
    pub clip_name: String,
    /// Built-in clip length in seconds
    pub duration: f32,
    pub fractions: EventFractions,
    pub shape: AttackShape,
}

impl BaselineEntry {
    pub fn new(clip_name: impl Into<String>, duration: f32, fractions: EventFractions) -> Self {
        Self {
            clip_name: clip_name.into(),
            duration,
            fractions,
            shape: AttackShape::default(),
        }
    }

    pub fn with_shape(mut self, shape: AttackShape) -> Self {
        self.shape = shape;
        self
    }
}

/// Read-only baseline table, one entry per [`WeaponTypeTag`]
#[derive(Debug, Clone)]
pub struct BaselineProvider {
    /// Indexed by `WeaponTypeTag as usize`, always complete
    entries: Vec<BaselineEntry>,
}

impl BaselineProvider {
    /// The shipped reference table
    pub fn builtin() -> Self {
        Self {
            entries: WeaponTypeTag::ALL.iter().map(|&tag| builtin_entry(tag)).collect(),
        }
    }

    /// Replace one weapon type's entry
    pub fn with_entry(mut self, weapon_type: WeaponTypeTag, entry: BaselineEntry) -> Self {
        self.entries[weapon_type as usize] = entry;
        self
    }

    pub fn get(&self, weapon_type: WeaponTypeTag) -> &BaselineEntry {
        &self.entries[weapon_type as usize]
    }

    /// Built-in clip slot names for every weapon type
    pub fn clip_names(&self) -> impl Iterator<Item = (WeaponTypeTag, &str)> {
        WeaponTypeTag::ALL
            .iter()
            .map(move |&tag| (tag, self.get(tag).clip_name.as_str()))
    }
}

impl Default for BaselineProvider {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_entry(weapon_type: WeaponTypeTag) -> BaselineEntry {
    match weapon_type {
        WeaponTypeTag::Sword => BaselineEntry::new(
            "sword_secondary",
            1.60,
            EventFractions::new(0.45, 0.30, 0.62, 0.80, 0.40, 0.70),
        )
        .with_shape(AttackShape {
            range: 2.4,
            height: 1.0,
            angle: 90.0,
            ray_width: 0.4,
            ray_width_char_extra: 0.2,
            height_char1: 0.6,
            height_char2: 1.4,
            max_y_angle: 45.0,
            ..AttackShape::default()
        }),
        WeaponTypeTag::Axe => BaselineEntry::new(
            "axe_secondary",
            1.80,
            EventFractions::new(0.48, 0.32, 0.64, 0.82, 0.42, 0.72),
        )
        .with_shape(AttackShape {
            range: 2.3,
            height: 1.0,
            angle: 80.0,
            ray_width: 0.45,
            ray_width_char_extra: 0.2,
            height_char1: 0.6,
            height_char2: 1.4,
            max_y_angle: 45.0,
            ..AttackShape::default()
        }),
        WeaponTypeTag::Club => BaselineEntry::new(
            "mace_secondary",
            1.90,
            EventFractions::new(0.52, 0.36, 0.66, 0.84, 0.45, 0.74),
        )
        .with_shape(AttackShape {
            range: 2.2,
            height: 1.0,
            angle: 70.0,
            ray_width: 0.5,
            ray_width_char_extra: 0.25,
            height_char1: 0.5,
            height_char2: 1.3,
            max_y_angle: 40.0,
            ..AttackShape::default()
        }),
        WeaponTypeTag::Spear => BaselineEntry::new(
            "spear_throw",
            1.40,
            EventFractions::new(0.40, 0.28, 0.55, 0.78, 0.35, 0.65),
        )
        .with_shape(AttackShape {
            range: 3.0,
            height: 1.2,
            angle: 30.0,
            ray_width: 0.25,
            ray_width_char_extra: 0.1,
            height_char1: 0.8,
            height_char2: 1.5,
            max_y_angle: 60.0,
            ..AttackShape::default()
        }),
        WeaponTypeTag::Greatsword => BaselineEntry::new(
            "greatsword_secondary",
            2.20,
            EventFractions::new(0.50, 0.34, 0.68, 0.86, 0.44, 0.76),
        )
        .with_shape(AttackShape {
            range: 3.0,
            height: 1.1,
            angle: 110.0,
            ray_width: 0.6,
            ray_width_char_extra: 0.3,
            height_char1: 0.6,
            height_char2: 1.6,
            max_y_angle: 45.0,
            ..AttackShape::default()
        }),
        WeaponTypeTag::Battleaxe => BaselineEntry::new(
            "battleaxe_secondary",
            2.40,
            EventFractions::new(0.55, 0.38, 0.70, 0.88, 0.46, 0.78),
        )
        .with_shape(AttackShape {
            range: 3.1,
            height: 1.1,
            angle: 120.0,
            ray_width: 0.6,
            ray_width_char_extra: 0.3,
            height_char1: 0.5,
            height_char2: 1.6,
            max_y_angle: 40.0,
            ..AttackShape::default()
        }),
        WeaponTypeTag::Polearm => BaselineEntry::new(
            "atgeir_secondary",
            2.00,
            EventFractions::new(0.46, 0.25, 0.72, 0.85, 0.40, 0.75),
        )
        .with_shape(AttackShape {
            range: 3.4,
            height: 1.0,
            angle: 360.0,
            ray_width: 0.35,
            ray_width_char_extra: 0.2,
            height_char1: 0.6,
            height_char2: 1.4,
            max_y_angle: 30.0,
            ..AttackShape::default()
        }),
        WeaponTypeTag::Knife => BaselineEntry::new(
            "knife_secondary",
            1.20,
            EventFractions::new(0.42, 0.30, 0.58, 0.76, 0.38, 0.66),
        )
        .with_shape(AttackShape {
            range: 1.8,
            height: 1.0,
            angle: 45.0,
            ray_width: 0.3,
            ray_width_char_extra: 0.15,
            height_char1: 0.7,
            height_char2: 1.3,
            max_y_angle: 50.0,
            ..AttackShape::default()
        }),
        WeaponTypeTag::Fist => BaselineEntry::new(
            "unarmed_kick",
            1.10,
            EventFractions::new(0.40, 0.30, 0.55, 0.75, 0.35, 0.65),
        )
        .with_shape(AttackShape {
            range: 1.6,
            height: 0.8,
            angle: 60.0,
            ray_width: 0.3,
            ray_width_char_extra: 0.15,
            height_char1: 0.3,
            height_char2: 1.0,
            max_y_angle: 40.0,
            ..AttackShape::default()
        }),
    }
}
