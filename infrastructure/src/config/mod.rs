//! Configuration file loading for tally
//!
//! Sources are merged lowest to highest priority:
//!
//! 1. Default values
//! 2. Global: `$XDG_CONFIG_HOME/tally/config.toml`
//! 3. Project root: `./tally.toml` or `./.tally.toml`
//! 4. `--config <path>` specified file
//! 5. `TALLY_*` environment variables (`__` separates sections)

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileDatabaseConfig, FileOutputConfig, FileOutputFormat,
};
pub use loader::ConfigLoader;
