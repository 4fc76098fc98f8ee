//! Animation override building and caching

pub mod cache;
pub mod host;
pub mod replacement_map;

pub use cache::{OverrideCache, ORIGINAL_KEY};
pub use host::{AnimationHost, MemoryAnimator, MemoryController, MemoryHost};
pub use replacement_map::{builtin_clip_name, builtin_table, ReplacementMap, ReplacementTable};
