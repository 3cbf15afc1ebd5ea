//! Tabu Search (TS) for equipment selection with pairwise synergy.
//!
//! A single-solution trajectory metaheuristic. The search starts from a
//! greedy seed, moves by flipping one item at a time, and keeps recently
//! flipped items tabu for a fixed tenure so it can climb out of local
//! optima without cycling. Objective values are updated incrementally in
//! O(n) per candidate flip.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod evaluator;
mod greedy;
mod memory;
mod neighborhood;
mod runner;
mod sink;

pub use config::TabuConfig;
pub use evaluator::ObjectiveEvaluator;
pub use greedy::{efficiency, efficiency_order, greedy_construct};
pub use memory::TabuMemory;
pub use neighborhood::{explore, FlipMove};
pub use runner::{Step, TabuResult, TabuRunner, TabuSearch, Termination};
pub use sink::{
    ChannelSink, ImprovementEvent, ImprovementSink, NoopSink, Tee, TracingSink, VecSink,
};
