//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod access_policy;
pub mod evaluation_store;
pub mod team_directory;
