//! Decisions and the catalogue of criteria and options they own

pub mod entities;

pub use entities::{Criterion, Decision, DecisionStatus, ResponseOption, TeamMember};
