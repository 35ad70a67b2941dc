//! Consensus scoring
//!
//! Pure functions that turn anonymous score rows into a ranked, conflict
//! annotated summary.
//!
//! ```text
//!   AnonymousScore rows ──► aggregate() ──► Vec<OptionScore>
//!                                              │       │
//!                       ConflictLevel::classify┘       ├──► recommend()
//!   TeamMember roster ──► ParticipationStatus ─────────┴──► EvaluationResults
//! ```

pub mod aggregate;
pub mod conflict;
pub mod participation;
pub mod recommend;
pub mod results;

pub use aggregate::{OptionScore, aggregate, consensus_from_dispersion};
pub use conflict::ConflictLevel;
pub use participation::{ParticipationStatus, participation_rate};
pub use recommend::recommend;
pub use results::EvaluationResults;
