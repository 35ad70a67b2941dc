//! Score value objects and evaluation drafts

use crate::core::error::{
    CONFIDENCE_MAX, CONFIDENCE_MIN, SCORE_MAX, SCORE_MIN, ValidationError,
};
use crate::core::ids::{CriterionId, DecisionId, EvaluationId, EvaluatorId, OptionId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A score in the range 1-10
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ScoreValue(u8);

impl ScoreValue {
    pub fn get(&self) -> u8 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }
}

impl TryFrom<i64> for ScoreValue {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (SCORE_MIN..=SCORE_MAX).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::ScoreOutOfRange(value))
        }
    }
}

impl From<ScoreValue> for i64 {
    fn from(value: ScoreValue) -> Self {
        i64::from(value.0)
    }
}

/// An evaluator's confidence in a score, in the range 1-5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Confidence(u8);

impl Confidence {
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Confidence {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (CONFIDENCE_MIN..=CONFIDENCE_MAX).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::ConfidenceOutOfRange(value))
        }
    }
}

impl From<Confidence> for i64 {
    fn from(value: Confidence) -> Self {
        i64::from(value.0)
    }
}

/// Raw, unvalidated score as supplied by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreInput {
    pub option_id: OptionId,
    #[serde(alias = "criteria_id")]
    pub criterion_id: CriterionId,
    #[serde(alias = "score")]
    pub value: i64,
    pub confidence: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ScoreInput {
    pub fn new(option_id: OptionId, criterion_id: CriterionId, value: i64, confidence: i64) -> Self {
        Self {
            option_id,
            criterion_id,
            value,
            confidence,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A validated score belonging to an evaluation draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub option_id: OptionId,
    pub criterion_id: CriterionId,
    pub value: ScoreValue,
    pub confidence: Confidence,
    pub comment: Option<String>,
}

impl TryFrom<ScoreInput> for Score {
    type Error = ValidationError;

    fn try_from(input: ScoreInput) -> Result<Self, Self::Error> {
        Ok(Self {
            option_id: input.option_id,
            criterion_id: input.criterion_id,
            value: ScoreValue::try_from(input.value)?,
            confidence: Confidence::try_from(input.confidence)?,
            comment: input
                .comment
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        })
    }
}

/// A complete, validated evaluation ready to replace whatever the evaluator
/// had on file for the decision
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationDraft {
    pub decision_id: DecisionId,
    pub evaluator_id: EvaluatorId,
    pub scores: Vec<Score>,
}

impl EvaluationDraft {
    /// Validate raw inputs into a draft.
    ///
    /// Rejects an empty list, out-of-range values or confidences, and more
    /// than one score for the same (option, criterion) pair.
    pub fn new(
        decision_id: DecisionId,
        evaluator_id: EvaluatorId,
        inputs: Vec<ScoreInput>,
    ) -> Result<Self, ValidationError> {
        if inputs.is_empty() {
            return Err(ValidationError::EmptySubmission);
        }

        let mut seen = HashSet::with_capacity(inputs.len());
        let mut scores = Vec::with_capacity(inputs.len());
        for input in inputs {
            if !seen.insert((input.option_id, input.criterion_id)) {
                return Err(ValidationError::DuplicateScore {
                    option: input.option_id.to_string(),
                    criterion: input.criterion_id.to_string(),
                });
            }
            scores.push(Score::try_from(input)?);
        }

        Ok(Self {
            decision_id,
            evaluator_id,
            scores,
        })
    }
}

/// A stored score with the evaluator's identity stripped
///
/// `ballot` distinguishes one evaluation from another so distinct evaluators
/// can be counted, but it never resolves to a person on this read path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnonymousScore {
    pub ballot: EvaluationId,
    pub option_id: OptionId,
    pub criterion_id: CriterionId,
    pub value: ScoreValue,
    pub confidence: Confidence,
}
