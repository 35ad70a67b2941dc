//! Decision catalogue entities
//!
//! A [`Decision`] owns exactly one set of [`Criterion`] and [`ResponseOption`]
//! rows at any time. Both sets may be replaced wholesale; scores that point
//! at a replaced row become stale and are ignored by aggregation.

use crate::core::error::{DomainError, ValidationError};
use crate::core::ids::{CriterionId, DecisionId, EvaluatorId, OptionId, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle state of a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    /// Criteria and options are still being prepared
    #[default]
    Draft,
    /// Open for evaluation
    Active,
    /// A response has been chosen
    Completed,
}

impl DecisionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::Draft => "draft",
            DecisionStatus::Active => "active",
            DecisionStatus::Completed => "completed",
        }
    }
}

impl FromStr for DecisionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(DecisionStatus::Draft),
            "active" => Ok(DecisionStatus::Active),
            "completed" => Ok(DecisionStatus::Completed),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scoring round owned by a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: DecisionId,
    pub team_id: TeamId,
    pub title: String,
    pub status: DecisionStatus,
    pub created_at: DateTime<Utc>,
}

impl Decision {
    /// Create a new draft decision
    pub fn new(team_id: TeamId, title: impl Into<String>) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyField("Decision title"));
        }
        Ok(Self {
            id: DecisionId::generate(),
            team_id,
            title,
            status: DecisionStatus::Draft,
            created_at: Utc::now(),
        })
    }
}

/// A weighted criterion options are scored against
///
/// Weights are independent per criterion and are never normalized when
/// stored; normalization happens during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub decision_id: DecisionId,
    pub name: String,
    pub weight: f64,
    /// Creation order within the decision (0-based)
    pub position: usize,
}

impl Criterion {
    pub fn new(
        decision_id: DecisionId,
        name: impl Into<String>,
        weight: f64,
        position: usize,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyField("Criterion name"));
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ValidationError::InvalidWeight(weight));
        }
        Ok(Self {
            id: CriterionId::generate(),
            decision_id,
            name,
            weight,
            position,
        })
    }
}

/// A candidate response being scored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseOption {
    pub id: OptionId,
    pub decision_id: DecisionId,
    pub title: String,
    /// Creation order within the decision (0-based); the stable tie-break
    /// when two options score the same.
    pub position: usize,
}

impl ResponseOption {
    pub fn new(
        decision_id: DecisionId,
        title: impl Into<String>,
        position: usize,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyField("Option title"));
        }
        Ok(Self {
            id: OptionId::generate(),
            decision_id,
            title,
            position,
        })
    }
}

/// A team member eligible to evaluate the team's decisions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: EvaluatorId,
    pub team_id: TeamId,
    /// Role label, the only member attribute shown in participation output
    pub role: String,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_decision_starts_as_draft() {
        let decision = Decision::new(TeamId::generate(), "Refund request #42").unwrap();
        assert_eq!(decision.status, DecisionStatus::Draft);
    }

    #[test]
    fn test_decision_requires_title() {
        assert_eq!(
            Decision::new(TeamId::generate(), "  ").unwrap_err(),
            ValidationError::EmptyField("Decision title")
        );
    }

    #[test]
    fn test_criterion_rejects_non_positive_weight() {
        let decision = DecisionId::generate();
        assert!(Criterion::new(decision, "Cost", 0.0, 0).is_err());
        assert!(Criterion::new(decision, "Cost", -1.0, 0).is_err());
        assert!(Criterion::new(decision, "Cost", f64::NAN, 0).is_err());
        assert!(Criterion::new(decision, "Cost", 0.1, 0).is_ok());
    }

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!("Active".parse::<DecisionStatus>().unwrap(), DecisionStatus::Active);
        assert_eq!(DecisionStatus::Completed.to_string(), "completed");
        assert!("archived".parse::<DecisionStatus>().is_err());
    }
}
