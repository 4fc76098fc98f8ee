//! Engine configuration with documented constants
//!
//! The fallback timing constants live here so every tier of the timing
//! resolver agrees on what "no usable clip" means.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Absolute fallback timings used when a replacement clip has no usable length
///
/// These are seconds, not ratios: they are applied as-is and never scaled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackTiming {
    /// Moment the hit check fires
    pub hit: f32,
    /// Weapon trail switched on
    pub trail_on: f32,
    /// Weapon trail switched off
    pub trail_off: f32,
    /// Combo-chain window opens
    pub chain: f32,
    /// Movement speed change applies
    pub speed: f32,
    /// Knockdown (dodge-mortal) window
    pub dodge_mortal: f32,
    /// Marker clip length; negative means "no valid clip"
    pub clip_length: f32,
}

impl Default for FallbackTiming {
    fn default() -> Self {
        Self {
            hit: 0.45,
            trail_on: 0.35,
            trail_off: 0.70,
            chain: 0.85,
            speed: 0.50,
            dodge_mortal: 0.70,
            clip_length: -1.0,
        }
    }
}

/// Configuration for the override engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === FILES ===
    /// Directory holding the TOML tables
    pub config_dir: PathBuf,

    /// Timing table (`default`, `weapon_types`, `individual_weapons`)
    pub timing_file: String,

    /// Cost/cooldown table, same shape as the timing table
    pub cost_file: String,

    /// Replacement clip names per weapon type and mode
    pub replacement_file: String,

    // === CACHES ===
    /// Keep the "Original" override entry when a reload clears the cache
    ///
    /// Reverting to unmodified animations then never needs a rebuild.
    pub keep_baseline_on_reload: bool,

    // === TIMING ===
    /// Timings used when the replacement clip is missing or zero length
    pub fallback: FallbackTiming,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from("config"),
            timing_file: "timing.toml".to_string(),
            cost_file: "costs.toml".to_string(),
            replacement_file: "replacements.toml".to_string(),
            keep_baseline_on_reload: true,
            fallback: FallbackTiming::default(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Same defaults, different config directory
    pub fn with_config_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: dir.into(),
            ..Self::default()
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        let fb = &self.fallback;
        let fractions = [
            ("hit", fb.hit),
            ("trail_on", fb.trail_on),
            ("trail_off", fb.trail_off),
            ("chain", fb.chain),
            ("speed", fb.speed),
            ("dodge_mortal", fb.dodge_mortal),
        ];

        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("fallback {} ({}) must lie in [0, 1]", name, value));
            }
        }

        if fb.trail_on > fb.trail_off {
            return Err(format!(
                "fallback trail_on ({}) should be <= trail_off ({})",
                fb.trail_on, fb.trail_off
            ));
        }

        if self.timing_file.is_empty() || self.cost_file.is_empty() || self.replacement_file.is_empty() {
            return Err("Config file names must not be empty".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_fallback_constants() {
        let fb = FallbackTiming::default();
        assert!((fb.hit - 0.45).abs() < 0.0001);
        assert!((fb.chain - 0.85).abs() < 0.0001);
        assert!(fb.clip_length < 0.0);
    }

    #[test]
    fn test_validate_rejects_out_of_range_fraction() {
        let mut config = EngineConfig::default();
        config.fallback.hit = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_trail() {
        let mut config = EngineConfig::default();
        config.fallback.trail_on = 0.9;
        config.fallback.trail_off = 0.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_config_dir() {
        let config = EngineConfig::with_config_dir("/tmp/ea");
        assert_eq!(config.config_dir, PathBuf::from("/tmp/ea"));
        assert_eq!(config.timing_file, "timing.toml");
    }
}
