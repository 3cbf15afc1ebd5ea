//! Greedy seed: fill the budget by descending power-to-cost ratio.

use crate::instance::ProblemInstance;
use crate::solution::Solution;

/// Power-to-cost ratio of item `i`; 0 for zero-cost items.
#[inline]
pub fn efficiency(instance: &ProblemInstance, i: usize) -> f64 {
    let cost = instance.cost(i);
    if cost == 0 {
        0.0
    } else {
        instance.power(i) as f64 / cost as f64
    }
}

/// Item indices by descending efficiency; equal ratios keep ascending index.
pub fn efficiency_order(instance: &ProblemInstance) -> Vec<usize> {
    let ratios: Vec<f64> = (0..instance.n()).map(|i| efficiency(instance, i)).collect();
    let mut order: Vec<usize> = (0..instance.n()).collect();
    // stable sort
    order.sort_by(|&a, &b| ratios[b].total_cmp(&ratios[a]));
    order
}

/// Builds a feasible starting selection.
///
/// Walks [`efficiency_order`] and takes every item that still fits. Synergy
/// is ignored; the search refines the seed. A non-positive budget yields the
/// empty selection.
///
/// ```
/// use synergy_tabu::instance::ProblemInstance;
/// use synergy_tabu::tabu::greedy_construct;
///
/// let inst = ProblemInstance::new(
///     6,
///     vec![4, 2, 3],
///     vec![4, 6, 6],
///     vec![vec![0; 3], vec![0; 3], vec![0; 3]],
/// )
/// .unwrap();
/// let seed = greedy_construct(&inst);
/// assert_eq!(seed.selected_indices(), vec![1, 2]);
/// assert_eq!(seed.total_cost(), 5);
/// ```
pub fn greedy_construct(instance: &ProblemInstance) -> Solution {
    let mut solution = Solution::empty(instance.n());
    if instance.is_degenerate() {
        return solution;
    }

    for i in efficiency_order(instance) {
        if solution.total_cost() + instance.cost(i) <= instance.budget() {
            solution.flip(instance, i);
        }
    }

    tracing::debug!(
        selected = solution.count(),
        cost = solution.total_cost(),
        budget = instance.budget(),
        "greedy seed built"
    );
    solution
}
