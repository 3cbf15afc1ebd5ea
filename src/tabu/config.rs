//! Tabu Search configuration.

use std::time::Duration;

use crate::error::{Error, Result};

/// Configuration parameters for Tabu Search.
///
/// At least one of `max_iterations` and `time_limit` must be set; both may
/// be, in which case whichever is hit first ends the search.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use synergy_tabu::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_iterations(1000)
///     .with_time_limit(Duration::from_secs(5))
///     .with_tabu_tenure(7)
///     .with_aspiration(true);
/// assert_eq!(config.max_iterations, Some(1000));
/// assert_eq!(config.tabu_tenure, 7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct TabuConfig {
    /// Maximum number of iterations.
    pub max_iterations: Option<usize>,
    /// Wall-clock limit, checked between iterations.
    pub time_limit: Option<Duration>,
    /// How many iterations a flipped item stays tabu.
    pub tabu_tenure: usize,
    /// Whether a tabu move may still be taken when it produces a new
    /// global best.
    pub aspiration: bool,
    /// Stop after this many iterations without improving the best value.
    pub max_no_improve: Option<usize>,
    /// Re-evaluate the current solution from scratch every this many
    /// iterations and compare it with the incrementally tracked value.
    /// 0 disables the check.
    pub recompute_interval: usize,
    /// Evaluate the neighborhood with rayon. Only effective with the
    /// `parallel` feature.
    pub parallel: bool,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: Some(1000),
            time_limit: None,
            tabu_tenure: 7,
            aspiration: true,
            max_no_improve: None,
            recompute_interval: 100,
            parallel: false,
        }
    }
}

impl TabuConfig {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Removes the iteration bound (a time limit must then be set).
    pub fn without_iteration_limit(mut self) -> Self {
        self.max_iterations = None;
        self
    }

    /// Sets the wall-clock time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the tabu tenure (number of iterations a move remains tabu).
    pub fn with_tabu_tenure(mut self, tenure: usize) -> Self {
        self.tabu_tenure = tenure;
        self
    }

    /// Enables or disables aspiration criterion.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    /// Sets maximum iterations without improvement.
    pub fn with_max_no_improve(mut self, n: usize) -> Self {
        self.max_no_improve = Some(n);
        self
    }

    /// Sets the drift-check interval.
    pub fn with_recompute_interval(mut self, n: usize) -> Self {
        self.recompute_interval = n;
        self
    }

    /// Enables or disables parallel neighborhood evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks that the configuration can terminate.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations.is_none() && self.time_limit.is_none() {
            return Err(Error::InvalidConfig(
                "either max_iterations or time_limit must be set".into(),
            ));
        }
        if self.time_limit == Some(Duration::ZERO) {
            return Err(Error::InvalidConfig(
                "time_limit must be positive or None".into(),
            ));
        }
        Ok(())
    }
}
