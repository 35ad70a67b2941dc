//! Identifier value objects
//!
//! Every entity in the scoring model is keyed by a UUID. Each kind gets its
//! own newtype so a criterion id can never be passed where an option id is
//! expected.

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wrap an existing UUID.
            pub fn new(id: Uuid) -> Self {
                Self(id)
            }

            /// Generate a fresh random id.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// The underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| DomainError::InvalidId {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Identifies a scoring round.
    DecisionId,
    "decision"
);
uuid_id!(
    /// Identifies the team that owns decisions and supplies evaluators.
    TeamId,
    "team"
);
uuid_id!(
    /// Identifies a weighted criterion of a decision.
    CriterionId,
    "criterion"
);
uuid_id!(
    /// Identifies a candidate response option of a decision.
    OptionId,
    "option"
);
uuid_id!(
    /// Identifies a team member acting as an evaluator.
    EvaluatorId,
    "evaluator"
);
uuid_id!(
    /// Identifies one stored evaluation (ballot).
    ///
    /// Aggregation uses it to count distinct evaluators without learning
    /// who they are.
    EvaluationId,
    "evaluation"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_display() {
        let id = OptionId::generate();
        let parsed: OptionId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "not-a-uuid".parse::<DecisionId>().unwrap_err();
        assert!(err.to_string().contains("decision"));
        assert!(err.to_string().contains("not-a-uuid"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = CriterionId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
