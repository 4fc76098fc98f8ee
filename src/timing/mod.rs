//! Attack timing: baseline reference data, configured tables and the resolver

pub mod baseline;
pub mod fractions;
pub mod profile;
pub mod resolver;
pub mod table;

pub use baseline::{BaselineEntry, BaselineProvider};
pub use fractions::{FractionTable, ModeShift};
pub use profile::{AttackShape, EventFractions, EventTimes, TimingProfile};
pub use resolver::{infer_weapon_type, ResolvedTiming, TimingResolver, TimingSource};
pub use table::TimingTable;
