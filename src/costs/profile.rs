//! Per-attack resource cost and cooldown

use serde::{Deserialize, Serialize};

/// Stamina/eitr cost and cooldown of one extra attack
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackCostProfile {
    pub stamina_cost: f32,
    pub eitr_cost: f32,
    pub cooldown_seconds: f32,
}

impl AttackCostProfile {
    pub fn new(stamina_cost: f32, eitr_cost: f32, cooldown_seconds: f32) -> Self {
        Self {
            stamina_cost,
            eitr_cost,
            cooldown_seconds,
        }
    }

    /// Whether a player with these resources may start the attack
    pub fn affordable(&self, stamina: f32, eitr: f32) -> bool {
        stamina >= self.stamina_cost && eitr >= self.eitr_cost
    }
}

impl Default for AttackCostProfile {
    fn default() -> Self {
        Self {
            stamina_cost: 20.0,
            eitr_cost: 0.0,
            cooldown_seconds: 2.0,
        }
    }
}
