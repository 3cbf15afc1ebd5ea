//! Error types for instance loading and search configuration.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading an instance or configuring a search.
///
/// Running out of feasible moves is not an error; it is reported through
/// [`Termination::NoFeasibleMove`](crate::tabu::Termination).
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying I/O failure while reading an instance file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed instance text.
    #[error("parse error{}: {cause}", at_line(.line))]
    Parse {
        /// 1-based line number, when the failure is tied to a line.
        line: Option<usize>,
        /// What went wrong.
        cause: String,
    },

    /// A vector or matrix row does not match the declared item count.
    #[error("dimension mismatch in {what}: expected {expected}, found {found}")]
    Dimension {
        /// Which part of the instance is malformed.
        what: String,
        /// Declared length.
        expected: usize,
        /// Actual length.
        found: usize,
    },

    /// Synergy matrix is not symmetric.
    #[error("synergy matrix is asymmetric at ({i}, {j}): {ij} != {ji}")]
    Asymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
        /// Value at `(i, j)`.
        ij: i64,
        /// Value at `(j, i)`.
        ji: i64,
    },

    /// An item carries a negative cost.
    #[error("item {index} has negative cost {cost}")]
    NegativeCost {
        /// Item index.
        index: usize,
        /// Offending cost.
        cost: i64,
    },

    /// Total item cost does not fit in an `i64`.
    #[error("total item cost overflows i64")]
    CostOverflow,

    /// Search configuration rejected by [`TabuConfig::validate`](crate::tabu::TabuConfig::validate).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Instance too large for exhaustive enumeration.
    #[error("instance with {n} items exceeds the exhaustive limit of {max}")]
    TooLarge {
        /// Item count.
        n: usize,
        /// Largest supported item count.
        max: usize,
    },
}

fn at_line(line: &Option<usize>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

impl Error {
    pub(crate) fn parse(line: Option<usize>, cause: impl Into<String>) -> Self {
        Error::Parse {
            line,
            cause: cause.into(),
        }
    }
}
