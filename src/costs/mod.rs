//! Attack cost, cooldown lookup and cooldown tracking

pub mod cooldown;
pub mod profile;
pub mod resolver;
pub mod table;

pub use cooldown::CooldownTracker;
pub use profile::AttackCostProfile;
pub use resolver::CostResolver;
pub use table::CostTable;
