//! Problem instance data.

use crate::error::{Error, Result};

/// An equipment-selection instance: a budget, per-item cost and power, and a
/// symmetric pairwise synergy matrix.
///
/// The objective of a selection is the sum of selected powers plus
/// `synergy(i, j)` once for every unordered selected pair `i < j`. Diagonal
/// entries never contribute.
///
/// Instances are immutable once built.
///
/// # Examples
///
/// ```
/// use synergy_tabu::instance::ProblemInstance;
///
/// let instance = ProblemInstance::new(
///     10,
///     vec![5, 5, 5],
///     vec![10, 10, 10],
///     vec![vec![0, 3, 0], vec![3, 0, 0], vec![0, 0, 0]],
/// )
/// .unwrap();
/// assert_eq!(instance.n(), 3);
/// assert_eq!(instance.synergy(1, 0), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProblemInstance {
    budget: i64,
    cost: Vec<i64>,
    power: Vec<i64>,
    /// Row-major `n * n` matrix.
    synergy: Vec<i64>,
}

impl ProblemInstance {
    /// Builds an instance, rejecting mismatched dimensions, negative costs
    /// and asymmetric synergy matrices.
    pub fn new(
        budget: i64,
        cost: Vec<i64>,
        power: Vec<i64>,
        synergy: Vec<Vec<i64>>,
    ) -> Result<Self> {
        let instance = Self::assemble(budget, cost, power, synergy)?;
        instance.check_symmetric()?;
        Ok(instance)
    }

    /// Builds an instance from a matrix whose two halves are both meant to
    /// count: each off-diagonal pair becomes `s[i][j] + s[j][i]`, stored in
    /// both halves.
    ///
    /// Symmetric input has every pair doubled; only use this for data whose
    /// producer split a pair bonus across the two triangles.
    pub fn symmetrized(
        budget: i64,
        cost: Vec<i64>,
        power: Vec<i64>,
        synergy: Vec<Vec<i64>>,
    ) -> Result<Self> {
        let mut instance = Self::assemble(budget, cost, power, synergy)?;
        let n = instance.n();
        for i in 0..n {
            for j in (i + 1)..n {
                let sum = instance.synergy[i * n + j] + instance.synergy[j * n + i];
                instance.synergy[i * n + j] = sum;
                instance.synergy[j * n + i] = sum;
            }
        }
        Ok(instance)
    }

    fn assemble(
        budget: i64,
        cost: Vec<i64>,
        power: Vec<i64>,
        synergy: Vec<Vec<i64>>,
    ) -> Result<Self> {
        let n = cost.len();
        if power.len() != n {
            return Err(Error::Dimension {
                what: "power vector".into(),
                expected: n,
                found: power.len(),
            });
        }
        if synergy.len() != n {
            return Err(Error::Dimension {
                what: "synergy matrix rows".into(),
                expected: n,
                found: synergy.len(),
            });
        }
        if let Some(index) = cost.iter().position(|&c| c < 0) {
            return Err(Error::NegativeCost {
                index,
                cost: cost[index],
            });
        }
        // Every partial selection cost is then bounded by the total, so
        // running-cost arithmetic cannot overflow.
        cost.iter()
            .try_fold(0i64, |acc, &c| acc.checked_add(c))
            .ok_or(Error::CostOverflow)?;

        let mut flat = Vec::with_capacity(n * n);
        for (i, row) in synergy.into_iter().enumerate() {
            if row.len() != n {
                return Err(Error::Dimension {
                    what: format!("synergy row {i}"),
                    expected: n,
                    found: row.len(),
                });
            }
            flat.extend(row);
        }

        Ok(Self {
            budget,
            cost,
            power,
            synergy: flat,
        })
    }

    fn check_symmetric(&self) -> Result<()> {
        let n = self.n();
        for i in 0..n {
            for j in (i + 1)..n {
                let ij = self.synergy[i * n + j];
                let ji = self.synergy[j * n + i];
                if ij != ji {
                    return Err(Error::Asymmetric { i, j, ij, ji });
                }
            }
        }
        Ok(())
    }

    /// Number of items.
    #[inline]
    pub fn n(&self) -> usize {
        self.cost.len()
    }

    /// Spending limit for a selection.
    #[inline]
    pub fn budget(&self) -> i64 {
        self.budget
    }

    /// Cost of item `i`.
    #[inline]
    pub fn cost(&self, i: usize) -> i64 {
        self.cost[i]
    }

    /// Power of item `i`.
    #[inline]
    pub fn power(&self, i: usize) -> i64 {
        self.power[i]
    }

    /// Synergy bonus earned when both `i` and `j` are selected.
    #[inline]
    pub fn synergy(&self, i: usize, j: usize) -> i64 {
        self.synergy[i * self.n() + j]
    }

    /// Row `i` of the synergy matrix.
    #[inline]
    pub fn synergy_row(&self, i: usize) -> &[i64] {
        let n = self.n();
        &self.synergy[i * n..(i + 1) * n]
    }

    pub fn costs(&self) -> &[i64] {
        &self.cost
    }

    pub fn powers(&self) -> &[i64] {
        &self.power
    }

    /// True when the instance admits no selection at all: no items, or a
    /// non-positive budget.
    pub fn is_degenerate(&self) -> bool {
        self.n() == 0 || self.budget <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> ProblemInstance {
        ProblemInstance::new(
            10,
            vec![5, 5, 5],
            vec![10, 10, 10],
            vec![vec![0, 3, 0], vec![3, 0, 0], vec![0, 0, 0]],
        )
        .unwrap()
    }

    #[test]
    fn test_accessors() {
        let inst = small();
        assert_eq!(inst.n(), 3);
        assert_eq!(inst.budget(), 10);
        assert_eq!(inst.cost(2), 5);
        assert_eq!(inst.power(0), 10);
        assert_eq!(inst.synergy(0, 1), 3);
        assert_eq!(inst.synergy_row(1), &[3, 0, 0]);
        assert!(!inst.is_degenerate());
    }

    #[test]
    fn test_rejects_asymmetric() {
        let err = ProblemInstance::new(
            10,
            vec![1, 1],
            vec![1, 1],
            vec![vec![0, 2], vec![5, 0]],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Asymmetric { i: 0, j: 1, ij: 2, ji: 5 }));
    }

    #[test]
    fn test_symmetrized_sums_halves() {
        let inst = ProblemInstance::symmetrized(
            10,
            vec![1, 1],
            vec![1, 1],
            vec![vec![7, 2], vec![5, 9]],
        )
        .unwrap();
        assert_eq!(inst.synergy(0, 1), 7);
        assert_eq!(inst.synergy(1, 0), 7);
        // diagonal untouched
        assert_eq!(inst.synergy(0, 0), 7);
        assert_eq!(inst.synergy(1, 1), 9);
    }

    #[test]
    fn test_rejects_short_power() {
        let err = ProblemInstance::new(10, vec![1, 1], vec![1], vec![vec![0, 0], vec![0, 0]])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Dimension {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_ragged_row() {
        let err = ProblemInstance::new(10, vec![1, 1], vec![1, 1], vec![vec![0, 0], vec![0]])
            .unwrap_err();
        assert!(matches!(err, Error::Dimension { found: 1, .. }));
    }

    #[test]
    fn test_rejects_negative_cost() {
        let err = ProblemInstance::new(10, vec![1, -4], vec![1, 1], vec![vec![0, 0], vec![0, 0]])
            .unwrap_err();
        assert!(matches!(err, Error::NegativeCost { index: 1, cost: -4 }));
    }

    #[test]
    fn test_rejects_overflowing_total_cost() {
        let err = ProblemInstance::new(10, vec![5, i64::MAX], vec![1, 100], vec![vec![0; 2]; 2])
            .unwrap_err();
        assert!(matches!(err, Error::CostOverflow));

        let single = ProblemInstance::new(10, vec![i64::MAX], vec![1], vec![vec![0]]).unwrap();
        assert_eq!(single.cost(0), i64::MAX);
    }

    #[test]
    fn test_degenerate() {
        let empty = ProblemInstance::new(10, vec![], vec![], vec![]).unwrap();
        assert!(empty.is_degenerate());
        let broke = ProblemInstance::new(0, vec![1], vec![1], vec![vec![0]]).unwrap();
        assert!(broke.is_degenerate());
    }
}
