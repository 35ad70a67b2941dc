//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`] - UUID-backed identifiers for every entity
//! - [`error::ValidationError`] - rejected input
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod ids;
