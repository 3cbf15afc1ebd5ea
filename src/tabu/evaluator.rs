//! Objective evaluation: full O(n²) and single-flip O(n) deltas.

use crate::instance::ProblemInstance;
use crate::solution::Solution;

/// Evaluates selections of one instance.
///
/// The objective is the sum of selected powers plus `synergy(i, j)` once per
/// selected pair `i < j`.
#[derive(Debug, Clone, Copy)]
pub struct ObjectiveEvaluator<'a> {
    instance: &'a ProblemInstance,
}

impl<'a> ObjectiveEvaluator<'a> {
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> &'a ProblemInstance {
        self.instance
    }

    /// Objective value from scratch. Feasibility is not checked.
    pub fn evaluate(&self, solution: &Solution) -> i64 {
        let selected = solution.selected_indices();
        let mut value = 0;
        for (k, &i) in selected.iter().enumerate() {
            value += self.instance.power(i);
            let row = self.instance.synergy_row(i);
            for &j in &selected[k + 1..] {
                value += row[j];
            }
        }
        value
    }

    /// Objective change from flipping item `i`, ignoring the budget.
    ///
    /// Synergy with every other selected item counts, whatever its index.
    pub fn raw_delta(&self, solution: &Solution, i: usize) -> i64 {
        let row = self.instance.synergy_row(i);
        let pair: i64 = solution
            .iter_selected()
            .filter(|&j| j != i)
            .map(|j| row[j])
            .sum();
        let gain = self.instance.power(i) + pair;
        if solution.is_selected(i) {
            -gain
        } else {
            gain
        }
    }

    /// Objective change from flipping item `i`, or `None` when adding it
    /// would exceed the budget. Removals are always feasible.
    pub fn flip_delta(&self, solution: &Solution, i: usize) -> Option<i64> {
        if !solution.is_selected(i)
            && solution.total_cost() + self.instance.cost(i) > self.instance.budget()
        {
            return None;
        }
        Some(self.raw_delta(solution, i))
    }

    /// Objective value after flipping item `i`, given the current value.
    pub fn flip_value(&self, solution: &Solution, current: i64, i: usize) -> Option<i64> {
        self.flip_delta(solution, i).map(|d| current + d)
    }
}
