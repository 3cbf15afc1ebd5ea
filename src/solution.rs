//! Bit-vector selection with a tracked running cost.

use std::fmt;

use crate::instance::ProblemInstance;

/// A selection of items: `selected[i]` is true iff item `i` is chosen.
///
/// The total cost of the selection is kept up to date on every flip, so
/// budget checks are O(1). A `Solution` on its own may exceed the budget;
/// the search only ever exposes feasible ones as current or best.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    selected: Vec<bool>,
    total_cost: i64,
}

impl Solution {
    /// The empty selection over `n` items.
    pub fn empty(n: usize) -> Self {
        Self {
            selected: vec![false; n],
            total_cost: 0,
        }
    }

    /// Builds a selection from a boolean vector, computing its cost.
    ///
    /// # Panics
    ///
    /// Panics if `selected.len() != instance.n()`.
    pub fn from_selected(instance: &ProblemInstance, selected: Vec<bool>) -> Self {
        assert_eq!(
            selected.len(),
            instance.n(),
            "selection length must match item count"
        );
        let total_cost = selected
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s)
            .map(|(i, _)| instance.cost(i))
            .sum();
        Self {
            selected,
            total_cost,
        }
    }

    /// Builds a selection from a list of chosen indices.
    pub fn from_indices(instance: &ProblemInstance, indices: &[usize]) -> Self {
        let mut sol = Self::empty(instance.n());
        for &i in indices {
            if !sol.selected[i] {
                sol.flip(instance, i);
            }
        }
        sol
    }

    /// Number of items (selected or not).
    #[inline]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    #[inline]
    pub fn is_selected(&self, i: usize) -> bool {
        self.selected[i]
    }

    /// Sum of the costs of selected items.
    #[inline]
    pub fn total_cost(&self) -> i64 {
        self.total_cost
    }

    /// Number of selected items.
    pub fn count(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    /// Indices of selected items in ascending order.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.iter_selected().collect()
    }

    pub fn iter_selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s)
            .map(|(i, _)| i)
    }

    /// Whether the selection respects the instance budget.
    #[inline]
    pub fn is_feasible(&self, instance: &ProblemInstance) -> bool {
        self.total_cost <= instance.budget()
    }

    /// Toggles item `i`, keeping the running cost in sync.
    pub fn flip(&mut self, instance: &ProblemInstance, i: usize) {
        if self.selected[i] {
            self.total_cost -= instance.cost(i);
        } else {
            self.total_cost += instance.cost(i);
        }
        self.selected[i] = !self.selected[i];
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (k, i) in self.iter_selected().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{i}")?;
        }
        write!(f, "]")
    }
}
