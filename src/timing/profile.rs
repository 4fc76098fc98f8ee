//! Timing profile: when gameplay events fire inside an attack clip
//!
//! Event times are seconds from clip start. Attack-shape fields describe the
//! hit volume and are never scaled with clip length.

use crate::core::config::FallbackTiming;
use serde::{Deserialize, Serialize};

/// Hit-volume parameters copied verbatim from the baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackShape {
    pub range: f32,
    pub height: f32,
    pub offset: f32,
    pub angle: f32,
    pub ray_width: f32,
    pub ray_width_char_extra: f32,
    pub height_char1: f32,
    pub height_char2: f32,
    pub max_y_angle: f32,
    pub enable_hit: bool,
    pub enable_sound: bool,
}

impl Default for AttackShape {
    fn default() -> Self {
        Self {
            range: 2.0,
            height: 1.0,
            offset: 0.0,
            angle: 90.0,
            ray_width: 0.0,
            ray_width_char_extra: 0.0,
            height_char1: 0.0,
            height_char2: 0.0,
            max_y_angle: 0.0,
            enable_hit: true,
            enable_sound: true,
        }
    }
}

/// Event positions as fractions of a clip (0.0 = start, 1.0 = end)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventFractions {
    pub hit: f32,
    pub trail_on: f32,
    pub trail_off: f32,
    pub chain: f32,
    pub speed: f32,
    pub dodge_mortal: f32,
}

impl Default for EventFractions {
    fn default() -> Self {
        let fb = FallbackTiming::default();
        Self {
            hit: fb.hit,
            trail_on: fb.trail_on,
            trail_off: fb.trail_off,
            chain: fb.chain,
            speed: fb.speed,
            dodge_mortal: fb.dodge_mortal,
        }
    }
}

impl EventFractions {
    pub fn new(hit: f32, trail_on: f32, trail_off: f32, chain: f32, speed: f32, dodge_mortal: f32) -> Self {
        Self {
            hit,
            trail_on,
            trail_off,
            chain,
            speed,
            dodge_mortal,
        }
    }

    /// Every fraction forced into [0, 1]; NaN becomes 0
    pub fn clamped(self) -> Self {
        fn unit(v: f32) -> f32 {
            if v.is_nan() {
                0.0
            } else {
                v.clamp(0.0, 1.0)
            }
        }
        Self {
            hit: unit(self.hit),
            trail_on: unit(self.trail_on),
            trail_off: unit(self.trail_off),
            chain: unit(self.chain),
            speed: unit(self.speed),
            dodge_mortal: unit(self.dodge_mortal),
        }
    }

    /// Absolute event times for a clip of `duration` seconds
    pub fn times(&self, duration: f32) -> EventTimes {
        EventTimes {
            hit: self.hit * duration,
            trail_on: self.trail_on * duration,
            trail_off: self.trail_off * duration,
            chain: self.chain * duration,
            speed: self.speed * duration,
            dodge_mortal: self.dodge_mortal * duration,
        }
    }
}

/// Event times in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventTimes {
    pub hit: f32,
    pub trail_on: f32,
    pub trail_off: f32,
    pub chain: f32,
    pub speed: f32,
    pub dodge_mortal: f32,
}

impl EventTimes {
    /// Uniform scaling of every event by one ratio
    pub fn scaled(&self, ratio: f32) -> Self {
        Self {
            hit: self.hit * ratio,
            trail_on: self.trail_on * ratio,
            trail_off: self.trail_off * ratio,
            chain: self.chain * ratio,
            speed: self.speed * ratio,
            dodge_mortal: self.dodge_mortal * ratio,
        }
    }
}

/// Fully resolved timing for one attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingProfile {
    pub hit_timing: f32,
    pub trail_on_timing: f32,
    pub trail_off_timing: f32,
    pub chain_timing: f32,
    pub speed_timing: f32,
    pub dodge_mortal_timing: f32,
    pub speed_multiplier: f32,
    /// Clip length in seconds; negative when no valid clip backs the profile
    pub clip_length: f32,
    pub attack_range: f32,
    pub attack_height: f32,
    pub attack_offset: f32,
    pub attack_angle: f32,
    pub attack_ray_width: f32,
    pub attack_ray_width_char_extra: f32,
    pub attack_height_char1: f32,
    pub attack_height_char2: f32,
    pub max_y_angle: f32,
    pub enable_hit: bool,
    pub enable_sound: bool,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self::fallback(&FallbackTiming::default())
    }
}

impl TimingProfile {
    /// Absolute fallback profile; the constants are used as seconds, unscaled
    pub fn fallback(fb: &FallbackTiming) -> Self {
        let times = EventTimes {
            hit: fb.hit,
            trail_on: fb.trail_on,
            trail_off: fb.trail_off,
            chain: fb.chain,
            speed: fb.speed,
            dodge_mortal: fb.dodge_mortal,
        };
        Self::from_times(times, fb.clip_length, 1.0, &AttackShape::default())
    }

    pub fn from_times(times: EventTimes, clip_length: f32, speed_multiplier: f32, shape: &AttackShape) -> Self {
        let mut profile = Self {
            hit_timing: times.hit,
            trail_on_timing: times.trail_on,
            trail_off_timing: times.trail_off,
            chain_timing: times.chain,
            speed_timing: times.speed,
            dodge_mortal_timing: times.dodge_mortal,
            speed_multiplier,
            clip_length,
            attack_range: 0.0,
            attack_height: 0.0,
            attack_offset: 0.0,
            attack_angle: 0.0,
            attack_ray_width: 0.0,
            attack_ray_width_char_extra: 0.0,
            attack_height_char1: 0.0,
            attack_height_char2: 0.0,
            max_y_angle: 0.0,
            enable_hit: true,
            enable_sound: true,
        };
        profile.apply_shape(shape);
        profile
    }

    /// Overwrite every attack-shape field
    pub fn apply_shape(&mut self, shape: &AttackShape) {
        self.attack_range = shape.range;
        self.attack_height = shape.height;
        self.attack_offset = shape.offset;
        self.attack_angle = shape.angle;
        self.attack_ray_width = shape.ray_width;
        self.attack_ray_width_char_extra = shape.ray_width_char_extra;
        self.attack_height_char1 = shape.height_char1;
        self.attack_height_char2 = shape.height_char2;
        self.max_y_angle = shape.max_y_angle;
        self.enable_hit = shape.enable_hit;
        self.enable_sound = shape.enable_sound;
    }

    pub fn shape(&self) -> AttackShape {
        AttackShape {
            range: self.attack_range,
            height: self.attack_height,
            offset: self.attack_offset,
            angle: self.attack_angle,
            ray_width: self.attack_ray_width,
            ray_width_char_extra: self.attack_ray_width_char_extra,
            height_char1: self.attack_height_char1,
            height_char2: self.attack_height_char2,
            max_y_angle: self.max_y_angle,
            enable_hit: self.enable_hit,
            enable_sound: self.enable_sound,
        }
    }

    pub fn event_times(&self) -> EventTimes {
        EventTimes {
            hit: self.hit_timing,
            trail_on: self.trail_on_timing,
            trail_off: self.trail_off_timing,
            chain: self.chain_timing,
            speed: self.speed_timing,
            dodge_mortal: self.dodge_mortal_timing,
        }
    }

    /// True when backed by a clip of known positive length
    pub fn has_valid_clip(&self) -> bool {
        self.clip_length > 0.0
    }

    /// Every event time is non-negative and, with a valid clip, within it
    pub fn events_within_clip(&self) -> bool {
        let t = self.event_times();
        let events = [t.hit, t.trail_on, t.trail_off, t.chain, t.speed, t.dodge_mortal];
        events.iter().all(|&e| {
            e >= 0.0 && (!self.has_valid_clip() || e <= self.clip_length + f32::EPSILON * self.clip_length.max(1.0))
        })
    }
}
