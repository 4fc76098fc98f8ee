//! Where configuration text comes from

use crate::core::config::EngineConfig;
use crate::core::error::Result;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// The three reloadable tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigTable {
    Timing,
    Costs,
    Replacements,
}

impl ConfigTable {
    pub const ALL: [ConfigTable; 3] = [ConfigTable::Timing, ConfigTable::Costs, ConfigTable::Replacements];

    pub fn name(&self) -> &'static str {
        match self {
            ConfigTable::Timing => "timing",
            ConfigTable::Costs => "costs",
            ConfigTable::Replacements => "replacements",
        }
    }
}

impl fmt::Display for ConfigTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Supplies raw text per table
///
/// `Ok(None)` means the table does not exist and defaults apply.
pub trait ConfigSource: Send + Sync {
    fn read(&self, table: ConfigTable) -> Result<Option<String>>;

    /// Human-readable origin of a table, used in log and error messages
    fn describe(&self, table: ConfigTable) -> String {
        table.name().to_string()
    }
}

/// Reads the tables from files in one directory
#[derive(Debug, Clone)]
pub struct DirectoryConfigSource {
    dir: PathBuf,
    timing_file: String,
    cost_file: String,
    replacement_file: String,
}

impl DirectoryConfigSource {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            dir: config.config_dir.clone(),
            timing_file: config.timing_file.clone(),
            cost_file: config.cost_file.clone(),
            replacement_file: config.replacement_file.clone(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, table: ConfigTable) -> PathBuf {
        let file = match table {
            ConfigTable::Timing => &self.timing_file,
            ConfigTable::Costs => &self.cost_file,
            ConfigTable::Replacements => &self.replacement_file,
        };
        self.dir.join(file)
    }
}

impl ConfigSource for DirectoryConfigSource {
    fn read(&self, table: ConfigTable) -> Result<Option<String>> {
        let path = self.path_of(table);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn describe(&self, table: ConfigTable) -> String {
        self.path_of(table).display().to_string()
    }
}

/// In-memory tables, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct StaticConfigSource {
    timing: Option<String>,
    costs: Option<String>,
    replacements: Option<String>,
}

impl StaticConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, table: ConfigTable, text: impl Into<String>) -> Self {
        let slot = match table {
            ConfigTable::Timing => &mut self.timing,
            ConfigTable::Costs => &mut self.costs,
            ConfigTable::Replacements => &mut self.replacements,
        };
        *slot = Some(text.into());
        self
    }
}

impl ConfigSource for StaticConfigSource {
    fn read(&self, table: ConfigTable) -> Result<Option<String>> {
        let text = match table {
            ConfigTable::Timing => &self.timing,
            ConfigTable::Costs => &self.costs,
            ConfigTable::Replacements => &self.replacements,
        };
        Ok(text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_an_error() {
        let config = EngineConfig::with_config_dir("/nonexistent/extra-attacks");
        let source = DirectoryConfigSource::new(&config);
        assert!(source.read(ConfigTable::Timing).unwrap().is_none());
        assert!(source.describe(ConfigTable::Costs).ends_with("costs.toml"));
    }

    #[test]
    fn test_static_source_returns_text() {
        let source = StaticConfigSource::new().with(ConfigTable::Costs, "[default]\nstamina_cost = 1.0\n");
        assert!(source.read(ConfigTable::Costs).unwrap().is_some());
        assert!(source.read(ConfigTable::Timing).unwrap().is_none());
    }
}
