//! Evaluations: one validated set of scores per (decision, evaluator)

pub mod score;

pub use score::{AnonymousScore, Confidence, EvaluationDraft, Score, ScoreInput, ScoreValue};
