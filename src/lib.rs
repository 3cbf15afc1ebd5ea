//! Budget-constrained equipment selection with pairwise synergy.
//!
//! Given a budget and items with a cost and a power each, plus a synergy
//! bonus for every pair of items selected together, choose an affordable
//! subset maximizing total power plus synergy. This is a quadratic knapsack
//! problem and NP-hard in general.
//!
//! - **Instances** ([`instance`]): the problem data, its plain-text format
//!   and a seeded random generator.
//! - **Tabu Search** ([`tabu`]): greedy seed, incremental single-flip
//!   evaluation, tenure-based tabu memory with aspiration, and a
//!   step-wise search loop bounded by iterations and/or wall-clock time.
//! - **Exhaustive baseline** ([`exhaustive`]): exact enumeration for small
//!   instances.
//!
//! # Example
//!
//! ```
//! use synergy_tabu::instance::ProblemInstance;
//! use synergy_tabu::tabu::{TabuConfig, TabuRunner};
//!
//! let instance = ProblemInstance::new(
//!     10,
//!     vec![5, 5, 5],
//!     vec![10, 10, 10],
//!     vec![vec![0, 3, 0], vec![3, 0, 0], vec![0, 0, 0]],
//! )?;
//! let result = TabuRunner::run(&instance, &TabuConfig::default().with_max_iterations(50))?;
//! assert_eq!(result.best_value, 23);
//! # Ok::<(), synergy_tabu::Error>(())
//! ```

pub mod error;
pub mod exhaustive;
pub mod instance;
pub mod solution;
pub mod tabu;

pub use error::{Error, Result};
pub use solution::Solution;
