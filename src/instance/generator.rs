//! Seeded random instances for benchmarks and property tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::ProblemInstance;

/// Value ranges used by [`generate`].
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Inclusive cost range. The lower bound must be non-negative.
    pub cost: (i64, i64),
    /// Inclusive power range.
    pub power: (i64, i64),
    /// Inclusive off-diagonal synergy range.
    pub synergy: (i64, i64),
    /// Budget as a fraction of the total item cost.
    pub budget_ratio: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            cost: (1, 20),
            power: (-5, 30),
            synergy: (-10, 10),
            budget_ratio: 0.35,
        }
    }
}

/// Generates a symmetric instance with `n` items using default ranges.
///
/// The same `(n, seed)` pair always yields the same instance.
///
/// ```
/// use synergy_tabu::instance::generate;
///
/// let a = generate(12, 7);
/// let b = generate(12, 7);
/// assert_eq!(a, b);
/// ```
pub fn generate(n: usize, seed: u64) -> ProblemInstance {
    generate_with(n, seed, &GeneratorConfig::default())
}

/// Generates a symmetric instance with `n` items using the given ranges.
pub fn generate_with(n: usize, seed: u64, config: &GeneratorConfig) -> ProblemInstance {
    let mut rng = StdRng::seed_from_u64(seed);

    let cost_lo = config.cost.0.max(0);
    let cost_hi = config.cost.1.max(cost_lo);
    let cost: Vec<i64> = (0..n).map(|_| rng.random_range(cost_lo..=cost_hi)).collect();
    let power: Vec<i64> = (0..n)
        .map(|_| rng.random_range(config.power.0..=config.power.1))
        .collect();

    let mut synergy = vec![vec![0i64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let s = rng.random_range(config.synergy.0..=config.synergy.1);
            synergy[i][j] = s;
            synergy[j][i] = s;
        }
    }

    let total: i64 = cost.iter().sum();
    let budget = ((total as f64) * config.budget_ratio).round() as i64;

    // Cost vector is non-negative and the matrix symmetric by construction.
    match ProblemInstance::new(budget.max(1), cost, power, synergy) {
        Ok(instance) => instance,
        Err(e) => unreachable!("generated instance is well-formed: {e}"),
    }
}
