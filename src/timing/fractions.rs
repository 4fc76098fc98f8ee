//! Per-mode event-fraction shifts
//!
//! The keyed timing path places each event at `fraction * clip_length`.
//! Unless the timing table pins fractions for the pair, the fraction is the
//! weapon type's baseline fraction moved by the shift for the attack mode.

use crate::core::types::AttackMode;
use crate::timing::profile::EventFractions;

/// Additive adjustment applied to baseline fractions for one mode
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModeShift {
    pub hit: f32,
    pub trail_on: f32,
    pub trail_off: f32,
    pub chain: f32,
    pub speed: f32,
    pub dodge_mortal: f32,
}

impl ModeShift {
    fn apply(&self, base: &EventFractions) -> EventFractions {
        EventFractions {
            hit: base.hit + self.hit,
            trail_on: base.trail_on + self.trail_on,
            trail_off: base.trail_off + self.trail_off,
            chain: base.chain + self.chain,
            speed: base.speed + self.speed,
            dodge_mortal: base.dodge_mortal + self.dodge_mortal,
        }
        .clamped()
    }
}

#[derive(Debug, Clone)]
pub struct FractionTable {
    /// Indexed by `AttackMode as usize`
    shifts: [ModeShift; 4],
}

impl FractionTable {
    /// Shipped shifts: Q keeps the baseline rhythm, T is a quicker jab,
    /// G is a heavy wind-up with a late hit and a late chain window.
    pub fn builtin() -> Self {
        let mut shifts = [ModeShift::default(); 4];
        shifts[AttackMode::SecondaryT as usize] = ModeShift {
            hit: -0.05,
            trail_on: -0.05,
            trail_off: -0.05,
            chain: -0.03,
            speed: -0.05,
            dodge_mortal: -0.05,
        };
        shifts[AttackMode::SecondaryG as usize] = ModeShift {
            hit: 0.08,
            trail_on: 0.06,
            trail_off: 0.08,
            chain: 0.05,
            speed: 0.06,
            dodge_mortal: 0.05,
        };
        Self { shifts }
    }

    pub fn with_shift(mut self, mode: AttackMode, shift: ModeShift) -> Self {
        self.shifts[mode as usize] = shift;
        self
    }

    /// Baseline fractions moved by the shift for `mode`, clamped to [0, 1]
    pub fn shifted(&self, mode: AttackMode, baseline: &EventFractions) -> EventFractions {
        self.shifts[mode as usize].apply(baseline)
    }
}

impl Default for FractionTable {
    fn default() -> Self {
        Self::builtin()
    }
}
