//! Short-term memory keyed by item index.

use std::collections::HashMap;

/// Remaining-tenure counters for recently flipped items.
///
/// An item is tabu while its counter is positive. Each iteration calls
/// [`advance`](Self::advance) once, then [`record`](Self::record) for the
/// item that was flipped, so a move made at iteration `t` stays tabu for
/// iterations `t + 1 ..= t + tenure`.
#[derive(Debug, Clone)]
pub struct TabuMemory {
    tenure: usize,
    remaining: HashMap<usize, usize>,
}

impl TabuMemory {
    pub fn new(tenure: usize) -> Self {
        Self {
            tenure,
            remaining: HashMap::new(),
        }
    }

    #[inline]
    pub fn is_tabu(&self, index: usize) -> bool {
        self.remaining(index) > 0
    }

    /// Iterations left before `index` is free again; 0 if not tabu.
    #[inline]
    pub fn remaining(&self, index: usize) -> usize {
        self.remaining.get(&index).copied().unwrap_or(0)
    }

    /// Ages every entry by one iteration and forgets the expired ones.
    pub fn advance(&mut self) {
        self.remaining.retain(|_, left| {
            *left = left.saturating_sub(1);
            *left > 0
        });
    }

    /// Marks `index` as tabu for a fresh tenure.
    pub fn record(&mut self, index: usize) {
        if self.tenure > 0 {
            self.remaining.insert(index, self.tenure);
        }
    }
}
