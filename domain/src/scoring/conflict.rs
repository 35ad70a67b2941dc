//! Conflict classification
//!
//! The dispersion thresholds below are a single global policy. Every place
//! that needs a conflict level goes through [`ConflictLevel::classify`].

use serde::{Deserialize, Serialize};

/// Dispersion above which disagreement is high.
pub const HIGH_CONFLICT_DISPERSION: f64 = 4.0;
/// Dispersion above which disagreement is medium.
pub const MEDIUM_CONFLICT_DISPERSION: f64 = 2.0;
/// Dispersion above which disagreement is low.
pub const LOW_CONFLICT_DISPERSION: f64 = 1.0;

/// How strongly the team disagrees about an option
///
/// # Example
///
/// ```
/// use tally_domain::scoring::ConflictLevel;
///
/// assert_eq!(ConflictLevel::classify(0.5), ConflictLevel::None);
/// assert_eq!(ConflictLevel::classify(4.0), ConflictLevel::Medium);
/// assert!(ConflictLevel::classify(4.5).requires_discussion());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictLevel {
    None,
    Low,
    Medium,
    High,
}

impl ConflictLevel {
    /// Map a dispersion (population variance) to a conflict level.
    ///
    /// Each band is exclusive at the bottom and inclusive at the top, so a
    /// dispersion of exactly 1.0 is still `None`.
    pub fn classify(dispersion: f64) -> Self {
        if dispersion > HIGH_CONFLICT_DISPERSION {
            ConflictLevel::High
        } else if dispersion > MEDIUM_CONFLICT_DISPERSION {
            ConflictLevel::Medium
        } else if dispersion > LOW_CONFLICT_DISPERSION {
            ConflictLevel::Low
        } else {
            ConflictLevel::None
        }
    }

    /// Whether the team should talk before this option is acted on
    pub fn requires_discussion(&self) -> bool {
        matches!(self, ConflictLevel::Medium | ConflictLevel::High)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictLevel::None => "none",
            ConflictLevel::Low => "low",
            ConflictLevel::Medium => "medium",
            ConflictLevel::High => "high",
        }
    }
}

impl std::fmt::Display for ConflictLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
