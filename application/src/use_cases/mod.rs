//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod error;
pub mod export_results;
pub mod get_results;
pub mod participation;
pub mod submit_evaluation;
pub(crate) mod shared;
#[cfg(test)]
pub(crate) mod test_support;
