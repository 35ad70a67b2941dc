//! Raw TOML configuration data types
//!
//! These structs mirror the config file layout and are deserialized directly.

mod database;
mod output;

pub use database::FileDatabaseConfig;
pub use output::{FileOutputConfig, FileOutputFormat};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration problems that do not stop the program but deserve a warning
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("database.path is empty, falling back to {0}")]
    EmptyDatabasePath(String),

    #[error("no data directory available for the default database, using ./tally.db")]
    NoDataDir,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Evaluation store settings
    pub database: FileDatabaseConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration, returning every issue found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if FileDatabaseConfig::default_path().is_none() && self.database.path.is_none() {
            issues.push(ConfigValidationError::NoDataDir);
        }
        if self.database.path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            issues.push(ConfigValidationError::EmptyDatabasePath(
                self.database.resolved_path().display().to_string(),
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[database]
path = "/var/lib/tally/team.db"

[output]
format = "json"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.database.path,
            Some(PathBuf::from("/var/lib/tally/team.db"))
        );
        assert_eq!(config.output.format, Some(FileOutputFormat::Json));
        assert!(!config.output.color);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[output]
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.database.path.is_none());
        assert!(config.output.format.is_none());
        assert!(!config.output.color);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.database.path.is_none());
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_empty_database_path() {
        let toml_str = r#"
[database]
path = ""
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert!(
            issues
                .iter()
                .any(|i| matches!(i, ConfigValidationError::EmptyDatabasePath(_)))
        );
    }

    #[test]
    fn test_validate_explicit_path_is_clean() {
        let mut config = FileConfig::default();
        config.database.path = Some(PathBuf::from("tally.db"));
        assert!(config.validate().is_empty());
    }
}
