//! Variant generation and de-duplication.
//!
//! Runs the solve pipeline many times — once per ordering strategy per
//! round, with seeded `random` rounds for diversity — scores every
//! candidate, and returns the top unique schedules. Uniqueness is by
//! full assignment signature, not score: two schedules with equal score
//! but different staff on a requirement are different to the user.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::ScheduleResult;

use super::context::SolveContext;
use super::engine::run_pipeline;
use super::ordering::OrderingStrategy;
use super::score::score;

/// Splitmix-style increment for deriving per-run sub-seeds.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// The outcome of variant generation: unique candidates, best first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSet {
    /// Schedules in non-increasing score order.
    pub variants: Vec<ScheduleResult>,
    /// Index of the best variant (always 0).
    pub best_index: usize,
}

/// Sorted multiset of `(requirementId, staffId)` pairs identifying a
/// schedule up to shift ids and timestamps.
pub fn signature(result: &ScheduleResult) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = result
        .schedule
        .shifts
        .iter()
        .map(|s| (s.requirement_id.clone(), s.staff_id.clone()))
        .collect();
    pairs.sort();
    pairs
}

/// Generates `num_candidates` candidates and returns the
/// `num_top_variants` best unique ones (padded with the best remaining
/// duplicates when uniqueness runs out).
pub(crate) fn generate_variants(
    ctx: &SolveContext,
    num_candidates: usize,
    num_top_variants: usize,
    seed: u64,
) -> VariantSet {
    let rounds = num_candidates.div_ceil(OrderingStrategy::ALL.len()).max(1);
    let mut candidates: Vec<ScheduleResult> = Vec::new();
    let mut random_runs: u64 = 0;

    for strategy in OrderingStrategy::ALL {
        for _ in 0..rounds {
            // Deterministic strategies reuse the base seed so their
            // repeat runs are bitwise duplicates; random rounds get a
            // distinct sub-seed each.
            let run_seed = if strategy == OrderingStrategy::Random {
                random_runs += 1;
                seed.wrapping_add(random_runs.wrapping_mul(SEED_STRIDE))
            } else {
                seed
            };
            candidates.push(run_pipeline(ctx, strategy, run_seed));
        }
    }
    while candidates.len() < num_candidates {
        random_runs += 1;
        let run_seed = seed.wrapping_add(random_runs.wrapping_mul(SEED_STRIDE));
        candidates.push(run_pipeline(ctx, OrderingStrategy::Random, run_seed));
    }

    let scores: Vec<f64> = candidates
        .iter()
        .map(|c| score(c, &ctx.problem.staff))
        .collect();
    let mut by_score: Vec<usize> = (0..candidates.len()).collect();
    by_score.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));

    let mut seen: HashSet<Vec<(String, String)>> = HashSet::new();
    let mut picked: Vec<usize> = Vec::new();
    let mut duplicates: Vec<usize> = Vec::new();
    for idx in by_score {
        if picked.len() >= num_top_variants {
            break;
        }
        if seen.insert(signature(&candidates[idx])) {
            picked.push(idx);
        } else {
            duplicates.push(idx);
        }
    }
    // Fewer unique signatures than requested: pad with the
    // highest-scored remaining candidates.
    for idx in duplicates {
        if picked.len() >= num_top_variants {
            break;
        }
        picked.push(idx);
    }
    picked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));

    info!(
        "generated {} candidates, {} unique signatures, returning top {}",
        candidates.len(),
        seen.len(),
        picked.len()
    );

    VariantSet {
        variants: picked.into_iter().map(|i| candidates[i].clone()).collect(),
        best_index: 0,
    }
}
