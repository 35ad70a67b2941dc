//! Infrastructure layer for tally
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod config;
pub mod sqlite;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDatabaseConfig, FileOutputConfig,
    FileOutputFormat,
};
pub use sqlite::{CatalogError, SCHEMA_VERSION, SqliteStore};
