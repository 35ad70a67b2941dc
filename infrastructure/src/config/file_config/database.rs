//! Database configuration from TOML (`[database]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw database configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDatabaseConfig {
    /// SQLite file holding teams, decisions and evaluations
    pub path: Option<PathBuf>,
}

impl FileDatabaseConfig {
    /// `<data_dir>/tally/tally.db`, if the platform has a data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("tally").join("tally.db"))
    }

    /// The configured path, or the default when unset or empty.
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(Self::default_path)
            .unwrap_or_else(|| PathBuf::from("tally.db"))
    }
}
