//! Recommendation selection

use super::aggregate::OptionScore;
use crate::core::ids::OptionId;

/// Pick the best option among those with at least one evaluator.
///
/// Expects `option_scores` in the order produced by
/// [`aggregate`](super::aggregate::aggregate); on equal weighted scores the
/// first one encountered wins. Returns `None` when no option qualifies,
/// which callers should read as "not enough data" rather than an error.
pub fn recommend(option_scores: &[OptionScore]) -> Option<OptionId> {
    let mut best: Option<&OptionScore> = None;
    for candidate in option_scores.iter().filter(|s| s.evaluator_count > 0) {
        match best {
            Some(current) if candidate.weighted_score <= current.weighted_score => {}
            _ => best = Some(candidate),
        }
    }
    best.map(|s| s.option_id)
}
