//! Per-option aggregation of anonymous scores
//!
//! Turns the raw score rows of a decision into one [`OptionScore`] per
//! option: an unweighted mean, a weight-adjusted mean, the number of
//! distinct evaluators, and the dispersion that drives conflict detection.

use super::conflict::ConflictLevel;
use crate::core::ids::{CriterionId, OptionId};
use crate::decision::{Criterion, ResponseOption};
use crate::evaluation::AnonymousScore;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Aggregate result for a single option (derived, never stored)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionScore {
    pub option_id: OptionId,
    pub option_title: String,
    /// 1-based position in the weighted-score ordering
    pub rank: usize,
    /// Plain mean of every score value, ignoring weights
    pub average_score: f64,
    /// Σ(value × weight) / Σ(weight)
    pub weighted_score: f64,
    /// Distinct evaluators who scored this option on at least one criterion
    pub evaluator_count: usize,
    /// Population variance of the score values
    pub dispersion: f64,
    /// 1.0 for perfect agreement, falling linearly to 0.0 at dispersion 10
    pub consensus: f64,
    pub conflict_level: ConflictLevel,
}

/// Aggregate every option that has at least one valid score.
///
/// Scores pointing at an option or criterion outside the supplied sets are
/// stale and skipped. Options without any valid score are left out of the
/// result entirely. The result is ordered by weighted score, highest first;
/// equal scores keep option creation order.
pub fn aggregate(
    options: &[ResponseOption],
    criteria: &[Criterion],
    scores: &[AnonymousScore],
) -> Vec<OptionScore> {
    let weights: HashMap<CriterionId, f64> = criteria.iter().map(|c| (c.id, c.weight)).collect();

    let mut rows: HashMap<OptionId, Vec<(f64, f64, &AnonymousScore)>> = HashMap::new();
    for score in scores {
        let Some(weight) = weights.get(&score.criterion_id) else {
            continue;
        };
        rows.entry(score.option_id)
            .or_default()
            .push((score.value.as_f64(), *weight, score));
    }

    let mut ordered: Vec<&ResponseOption> = options.iter().collect();
    ordered.sort_by_key(|o| o.position);

    let mut results: Vec<OptionScore> = ordered
        .into_iter()
        .filter_map(|option| {
            let rows = rows.get(&option.id)?;

            let values: Vec<f64> = rows.iter().map(|(v, _, _)| *v).collect();
            let average_score = mean(&values);

            let total_weight: f64 = rows.iter().map(|(_, w, _)| w).sum();
            let weighted_score = if total_weight > 0.0 {
                rows.iter().map(|(v, w, _)| v * w).sum::<f64>() / total_weight
            } else {
                average_score
            };

            let evaluator_count = rows
                .iter()
                .map(|(_, _, s)| s.ballot)
                .collect::<HashSet<_>>()
                .len();

            let dispersion = population_variance(&values, average_score);

            Some(OptionScore {
                option_id: option.id,
                option_title: option.title.clone(),
                rank: 0,
                average_score,
                weighted_score,
                evaluator_count,
                dispersion,
                consensus: consensus_from_dispersion(dispersion),
                conflict_level: ConflictLevel::classify(dispersion),
            })
        })
        .collect();

    // Vec::sort_by is stable, so ties keep creation order.
    results.sort_by(|a, b| b.weighted_score.total_cmp(&a.weighted_score));
    for (index, result) in results.iter_mut().enumerate() {
        result.rank = index + 1;
    }
    results
}

/// `max(0, 1 - dispersion / 10)`
pub fn consensus_from_dispersion(dispersion: f64) -> f64 {
    (1.0 - dispersion / 10.0).max(0.0)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_variance(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}
