pub mod config;
pub mod error;
pub mod published;
pub mod types;

pub use config::{EngineConfig, FallbackTiming};
pub use error::{ExtraAttackError, Result};
pub use published::Published;
pub use types::{normalize_individual_key, normalize_mode_key, AttackMode, ReplacementKey, WeaponTypeTag};
