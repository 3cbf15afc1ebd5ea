//! Equipment-selection instances.
//!
//! An instance is a budget, `n` items with a cost and a power each, and a
//! symmetric synergy matrix rewarding selected pairs. Instances come from the
//! plain-text format handled by [`InstanceParser`], from
//! [`ProblemInstance::new`], or from the seeded [`generate`] helper.

mod generator;
mod parser;
mod types;

pub use generator::{generate, generate_with, GeneratorConfig};
pub use parser::InstanceParser;
pub use types::ProblemInstance;
