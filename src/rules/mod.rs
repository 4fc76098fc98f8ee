//! Runtime configuration tables loaded from TOML

mod loader;
pub mod schema;
pub mod source;

pub use loader::{
    load_config, load_cost_table, load_replacement_table, load_timing_table, parse_clip_file, parse_cost_table,
    parse_replacement_table, parse_timing_table, render_replacements, LoadedConfig,
};
pub use schema::{ClipFile, CostFile, ReplacementFile, TimingFile};
pub use source::{ConfigSource, ConfigTable, DirectoryConfigSource, StaticConfigSource};
