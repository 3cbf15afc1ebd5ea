//! Single-flip neighborhood.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::evaluator::ObjectiveEvaluator;
use crate::solution::Solution;

/// A feasible single-bit flip and the value it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipMove {
    /// Item being toggled.
    pub index: usize,
    /// True when the flip selects the item, false when it drops it.
    pub adds: bool,
    /// Objective change.
    pub delta: i64,
    /// Objective value after the flip.
    pub value: i64,
}

/// Enumerates every budget-feasible flip of `solution`, in index order.
///
/// Flips that would overrun the budget are left out entirely. When
/// `parallel` is set and the `parallel` feature is enabled, the candidates
/// are evaluated on the rayon pool; the result is identical either way.
pub fn explore(
    evaluator: &ObjectiveEvaluator<'_>,
    solution: &Solution,
    current_value: i64,
    parallel: bool,
) -> Vec<FlipMove> {
    let candidate = |index: usize| {
        evaluator.flip_delta(solution, index).map(|delta| FlipMove {
            index,
            adds: !solution.is_selected(index),
            delta,
            value: current_value + delta,
        })
    };

    collect_candidates(solution.len(), parallel, candidate)
}

#[cfg(feature = "parallel")]
fn collect_candidates<F>(n: usize, parallel: bool, candidate: F) -> Vec<FlipMove>
where
    F: Fn(usize) -> Option<FlipMove> + Send + Sync,
{
    if parallel {
        (0..n).into_par_iter().filter_map(candidate).collect()
    } else {
        (0..n).filter_map(candidate).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn collect_candidates<F>(n: usize, _parallel: bool, candidate: F) -> Vec<FlipMove>
where
    F: Fn(usize) -> Option<FlipMove>,
{
    (0..n).filter_map(candidate).collect()
}
