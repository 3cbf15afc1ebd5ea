//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Build the greedy seed and evaluate it from scratch
//! 2. At each iteration:
//!    a. Enumerate every budget-feasible single flip
//!    b. Pick the highest-valued admissible flip (non-tabu, or tabu but
//!       beating the global best); ties go to the lowest index
//!    c. Apply it, age the tabu memory, make the flipped item tabu
//!    d. Update the global best if improved and notify the sink
//! 3. Terminate on the iteration limit, the time limit, stagnation, or when
//!    no flip is feasible
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

use std::fmt;
use std::time::{Duration, Instant};

use super::config::TabuConfig;
use super::evaluator::ObjectiveEvaluator;
use super::greedy::greedy_construct;
use super::memory::TabuMemory;
use super::neighborhood::{explore, FlipMove};
use super::sink::{ImprovementEvent, ImprovementSink, NoopSink};
use crate::error::Result;
use crate::instance::ProblemInstance;
use crate::solution::Solution;

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    IterationLimit,
    TimeLimit,
    /// No single flip keeps the selection within budget.
    NoFeasibleMove,
    /// `max_no_improve` iterations passed without a new best.
    Stagnation,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Termination::IterationLimit => "iteration limit reached",
            Termination::TimeLimit => "time limit reached",
            Termination::NoFeasibleMove => "no feasible move",
            Termination::Stagnation => "no improvement",
        };
        f.write_str(s)
    }
}

/// Outcome of one [`TabuSearch::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A flip was applied.
    Moved(FlipMove),
    /// Feasible flips exist but all are tabu without aspiration; the
    /// iteration only aged the tabu memory.
    Blocked,
    /// The search is over.
    Terminated(Termination),
}

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuResult {
    /// Best solution found.
    pub best: Solution,
    /// Objective value of the best solution.
    pub best_value: i64,
    /// Total iterations executed.
    pub iterations: usize,
    /// Iteration at which the best solution was found (0 = greedy seed).
    pub best_iteration: usize,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
    /// Why the run stopped.
    pub termination: Termination,
    /// Best value after each iteration.
    pub value_history: Vec<i64>,
}

/// In-progress search over one instance.
///
/// Created in its initial state by [`TabuSearch::new`], advanced one
/// iteration at a time by [`step`](Self::step), and consumed by
/// [`finish`](Self::finish). [`TabuRunner`] drives it to completion.
#[derive(Debug, Clone)]
pub struct TabuSearch<'a> {
    evaluator: ObjectiveEvaluator<'a>,
    config: TabuConfig,
    memory: TabuMemory,
    current: Solution,
    current_value: i64,
    best: Solution,
    best_value: i64,
    iteration: usize,
    best_iteration: usize,
    no_improve: usize,
    value_history: Vec<i64>,
    start: Instant,
    termination: Option<Termination>,
}

impl<'a> TabuSearch<'a> {
    /// Seeds the search with the greedy construction.
    pub fn new(instance: &'a ProblemInstance, config: &TabuConfig) -> Result<Self> {
        config.validate()?;
        let seed = greedy_construct(instance);
        Ok(Self::from_solution(instance, config.clone(), seed))
    }

    /// Seeds the search with a given feasible selection.
    fn from_solution(instance: &'a ProblemInstance, config: TabuConfig, seed: Solution) -> Self {
        let evaluator = ObjectiveEvaluator::new(instance);
        let value = evaluator.evaluate(&seed);
        tracing::debug!(
            n = instance.n(),
            budget = instance.budget(),
            value,
            tenure = config.tabu_tenure,
            "tabu search initialized"
        );
        Self {
            evaluator,
            memory: TabuMemory::new(config.tabu_tenure),
            value_history: Vec::with_capacity(config.max_iterations.unwrap_or(0).min(1 << 16)),
            config,
            best: seed.clone(),
            current: seed,
            current_value: value,
            best_value: value,
            iteration: 0,
            best_iteration: 0,
            no_improve: 0,
            start: Instant::now(),
            termination: None,
        }
    }

    pub fn current(&self) -> &Solution {
        &self.current
    }

    pub fn current_value(&self) -> i64 {
        self.current_value
    }

    pub fn best(&self) -> &Solution {
        &self.best
    }

    pub fn best_value(&self) -> i64 {
        self.best_value
    }

    /// Iterations executed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn memory(&self) -> &TabuMemory {
        &self.memory
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn limit_reached(&self) -> Option<Termination> {
        if let Some(max) = self.config.max_iterations {
            if self.iteration >= max {
                return Some(Termination::IterationLimit);
            }
        }
        if let Some(limit) = self.config.time_limit {
            if self.start.elapsed() >= limit {
                return Some(Termination::TimeLimit);
            }
        }
        if let Some(max) = self.config.max_no_improve {
            if self.no_improve >= max {
                return Some(Termination::Stagnation);
            }
        }
        None
    }

    /// Highest-valued admissible move; ties keep the lowest index.
    fn select(&self, moves: &[FlipMove]) -> Option<FlipMove> {
        let mut chosen: Option<FlipMove> = None;
        for mv in moves {
            if self.memory.is_tabu(mv.index) {
                // Aspiration: override tabu if this produces a new global best
                if !(self.config.aspiration && mv.value > self.best_value) {
                    continue;
                }
            }
            if chosen.map_or(true, |c| mv.value > c.value) {
                chosen = Some(*mv);
            }
        }
        chosen
    }

    fn terminate(&mut self, reason: Termination) -> Step {
        tracing::debug!(
            iterations = self.iteration,
            best = self.best_value,
            %reason,
            "tabu search terminated"
        );
        self.termination = Some(reason);
        Step::Terminated(reason)
    }

    /// Runs one iteration.
    pub fn step<S: ImprovementSink + ?Sized>(&mut self, sink: &mut S) -> Step {
        if let Some(reason) = self.termination {
            return Step::Terminated(reason);
        }
        if let Some(reason) = self.limit_reached() {
            return self.terminate(reason);
        }

        let moves = explore(
            &self.evaluator,
            &self.current,
            self.current_value,
            self.config.parallel,
        );
        if moves.is_empty() {
            return self.terminate(Termination::NoFeasibleMove);
        }

        let chosen = self.select(&moves);
        self.iteration += 1;
        self.memory.advance();

        let step = match chosen {
            Some(mv) => {
                self.current.flip(self.evaluator.instance(), mv.index);
                self.current_value = mv.value;
                self.memory.record(mv.index);
                debug_assert!(self.current.is_feasible(self.evaluator.instance()));
                tracing::trace!(
                    iteration = self.iteration,
                    index = mv.index,
                    adds = mv.adds,
                    value = mv.value,
                    "move applied"
                );
                Step::Moved(mv)
            }
            None => {
                tracing::trace!(iteration = self.iteration, "all feasible moves tabu");
                Step::Blocked
            }
        };

        self.check_drift();

        if self.current_value > self.best_value {
            self.best = self.current.clone();
            self.best_value = self.current_value;
            self.best_iteration = self.iteration;
            self.no_improve = 0;
            sink.notify(&ImprovementEvent {
                iteration: self.iteration,
                value: self.best_value,
                elapsed: self.start.elapsed(),
                solution: self.best.clone(),
            });
        } else {
            self.no_improve += 1;
        }
        self.value_history.push(self.best_value);

        step
    }

    fn check_drift(&mut self) {
        let interval = self.config.recompute_interval;
        if interval == 0 || self.iteration % interval != 0 {
            return;
        }
        let exact = self.evaluator.evaluate(&self.current);
        if exact != self.current_value {
            tracing::warn!(
                iteration = self.iteration,
                tracked = self.current_value,
                exact,
                "objective drift detected, resynchronizing"
            );
            debug_assert_eq!(exact, self.current_value, "incremental objective drifted");
            self.current_value = exact;
        }
    }

    /// Steps until a termination condition fires.
    pub fn run<S: ImprovementSink + ?Sized>(mut self, sink: &mut S) -> TabuResult {
        while !matches!(self.step(sink), Step::Terminated(_)) {}
        self.finish()
    }

    /// Consumes the search and reports the best solution.
    ///
    /// A search that has not terminated yet is reported as stopped by the
    /// iteration limit.
    pub fn finish(self) -> TabuResult {
        TabuResult {
            elapsed: self.start.elapsed(),
            termination: self.termination.unwrap_or(Termination::IterationLimit),
            best: self.best,
            best_value: self.best_value,
            iterations: self.iteration,
            best_iteration: self.best_iteration,
            value_history: self.value_history,
        }
    }
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Executes Tabu Search on the given instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use synergy_tabu::instance::ProblemInstance;
    /// use synergy_tabu::tabu::{TabuConfig, TabuRunner};
    ///
    /// let instance: ProblemInstance = "10 3\n5 10\n5 10\n5 10\n0 3 0\n3 0 0\n0 0 0\n"
    ///     .parse()
    ///     .unwrap();
    /// let config = TabuConfig::default().with_max_iterations(20).with_tabu_tenure(2);
    /// let result = TabuRunner::run(&instance, &config).unwrap();
    /// assert_eq!(result.best_value, 23);
    /// assert_eq!(result.best.selected_indices(), vec![0, 1]);
    /// ```
    pub fn run(instance: &ProblemInstance, config: &TabuConfig) -> Result<TabuResult> {
        Self::run_with_sink(instance, config, &mut NoopSink)
    }

    /// Executes Tabu Search, reporting every new best to `sink`.
    pub fn run_with_sink<S: ImprovementSink + ?Sized>(
        instance: &ProblemInstance,
        config: &TabuConfig,
        sink: &mut S,
    ) -> Result<TabuResult> {
        Ok(TabuSearch::new(instance, config)?.run(sink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::generate;
    use crate::tabu::VecSink;

    fn scenario() -> ProblemInstance {
        ProblemInstance::new(
            10,
            vec![5, 5, 5],
            vec![10, 10, 10],
            vec![vec![0, 3, 0], vec![3, 0, 0], vec![0, 0, 0]],
        )
        .unwrap()
    }

    #[test]
    fn test_scenario_reaches_optimum() {
        let inst = scenario();
        let config = TabuConfig::default()
            .with_max_iterations(10)
            .with_tabu_tenure(1);
        let result = TabuRunner::run(&inst, &config).unwrap();
        assert!(result.best_value >= 23);
        assert_eq!(result.best.selected_indices(), vec![0, 1]);
        assert_eq!(result.termination, Termination::IterationLimit);
        assert_eq!(result.iterations, 10);
    }

    #[test]
    fn test_single_item_ends_selected() {
        let inst = ProblemInstance::new(5, vec![3], vec![8], vec![vec![0]]).unwrap();
        let config = TabuConfig::default().with_max_iterations(25).with_tabu_tenure(3);
        let result = TabuRunner::run(&inst, &config).unwrap();
        assert_eq!(result.best.selected_indices(), vec![0]);
        assert_eq!(result.best_value, 8);
    }

    #[test]
    fn test_single_item_from_empty_seed() {
        let inst = ProblemInstance::new(5, vec![3], vec![8], vec![vec![0]]).unwrap();
        let config = TabuConfig::default().with_max_iterations(5);
        let mut search = TabuSearch::from_solution(&inst, config, Solution::empty(1));
        let mut sink = VecSink::default();
        let first = search.step(&mut sink);
        assert!(matches!(first, Step::Moved(FlipMove { index: 0, adds: true, .. })));
        let result = search.run(&mut sink);
        assert_eq!(result.best.selected_indices(), vec![0]);
        assert_eq!(result.best_iteration, 1);
        assert_eq!(sink.events.len(), 1);
    }

    #[test]
    fn test_nothing_affordable() {
        let inst = ProblemInstance::new(
            4,
            vec![5, 6, 7],
            vec![1, 2, 3],
            vec![vec![0; 3], vec![0; 3], vec![0; 3]],
        )
        .unwrap();
        let result = TabuRunner::run(&inst, &TabuConfig::default()).unwrap();
        assert_eq!(result.best.count(), 0);
        assert_eq!(result.best_value, 0);
        assert_eq!(result.termination, Termination::NoFeasibleMove);
        assert_eq!(result.iterations, 0);
        assert!(result.value_history.is_empty());
    }

    #[test]
    fn test_huge_cost_stays_out_of_budget() {
        let inst = ProblemInstance::new(
            10,
            vec![5, i64::MAX - 5],
            vec![1, 100],
            vec![vec![0; 2]; 2],
        )
        .unwrap();
        assert_eq!(greedy_construct(&inst).selected_indices(), vec![0]);
        let result = TabuRunner::run(&inst, &TabuConfig::default().with_max_iterations(20)).unwrap();
        assert!(result.best.is_feasible(&inst));
        assert_eq!(result.best.selected_indices(), vec![0]);
        assert_eq!(result.best_value, 1);
    }

    #[test]
    fn test_empty_instance() {
        let inst = ProblemInstance::new(10, vec![], vec![], vec![]).unwrap();
        let result = TabuRunner::run(&inst, &TabuConfig::default()).unwrap();
        assert_eq!(result.best_value, 0);
        assert_eq!(result.termination, Termination::NoFeasibleMove);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let inst = scenario();
        let config = TabuConfig::default().without_iteration_limit();
        assert!(TabuRunner::run(&inst, &config).is_err());
    }

    #[test]
    fn test_time_limit_terminates() {
        let inst = generate(40, 3);
        let config = TabuConfig::default()
            .without_iteration_limit()
            .with_time_limit(Duration::from_millis(30));
        let result = TabuRunner::run(&inst, &config).unwrap();
        assert_eq!(result.termination, Termination::TimeLimit);
        assert!(result.elapsed >= Duration::from_millis(30));
    }

    #[test]
    fn test_stagnation_termination() {
        let inst = generate(30, 8);
        let config = TabuConfig::default()
            .with_max_iterations(10_000)
            .with_max_no_improve(25);
        let result = TabuRunner::run(&inst, &config).unwrap();
        assert_eq!(result.termination, Termination::Stagnation);
        assert!(result.iterations < 10_000);
        assert_eq!(result.iterations - result.best_iteration, 25);
    }

    #[test]
    fn test_value_history_non_decreasing() {
        let inst = generate(50, 21);
        let config = TabuConfig::default().with_max_iterations(300);
        let result = TabuRunner::run(&inst, &config).unwrap();
        assert_eq!(result.value_history.len(), result.iterations);
        for window in result.value_history.windows(2) {
            assert!(window[1] >= window[0]);
        }
        assert_eq!(result.value_history.last(), Some(&result.best_value));
    }

    #[test]
    fn test_tracked_value_matches_full_evaluation() {
        let inst = generate(35, 17);
        let config = TabuConfig::default()
            .with_max_iterations(200)
            .with_recompute_interval(0);
        let mut search = TabuSearch::new(&inst, &config).unwrap();
        let eval = ObjectiveEvaluator::new(&inst);
        while !matches!(search.step(&mut NoopSink), Step::Terminated(_)) {
            assert_eq!(eval.evaluate(search.current()), search.current_value());
            assert!(search.current().is_feasible(&inst));
            assert!(search.best().is_feasible(&inst));
            assert_eq!(eval.evaluate(search.best()), search.best_value());
        }
    }

    #[test]
    fn test_tabu_moves_not_repeated_within_tenure() {
        let inst = generate(20, 5);
        let tenure = 4;
        let config = TabuConfig::default()
            .with_max_iterations(300)
            .with_tabu_tenure(tenure);
        let mut search = TabuSearch::new(&inst, &config).unwrap();
        let mut last_flip: Vec<Option<usize>> = vec![None; inst.n()];
        loop {
            let best_before = search.best_value();
            match search.step(&mut NoopSink) {
                Step::Moved(mv) => {
                    let t = search.iteration();
                    if let Some(prev) = last_flip[mv.index] {
                        assert!(
                            t - prev > tenure || mv.value > best_before,
                            "item {} flipped at {} and again at {}",
                            mv.index,
                            prev,
                            t
                        );
                    }
                    last_flip[mv.index] = Some(t);
                }
                Step::Blocked => {}
                Step::Terminated(_) => break,
            }
        }
    }

    #[test]
    fn test_aspiration_overrides_tabu() {
        let inst = scenario();
        let config = TabuConfig::default()
            .with_max_iterations(5)
            .with_tabu_tenure(10);

        // Every add reaches 10 > best 0; tabu item 0 still wins the tie.
        let mut search = TabuSearch::from_solution(&inst, config.clone(), Solution::empty(3));
        search.memory.record(0);
        assert!(matches!(
            search.step(&mut NoopSink),
            Step::Moved(FlipMove { index: 0, .. })
        ));

        let mut search =
            TabuSearch::from_solution(&inst, config.with_aspiration(false), Solution::empty(3));
        search.memory.record(0);
        assert!(matches!(
            search.step(&mut NoopSink),
            Step::Moved(FlipMove { index: 1, .. })
        ));
    }

    #[test]
    fn test_tabu_blocks_non_improving_move() {
        let inst = ProblemInstance::new(5, vec![3], vec![8], vec![vec![0]]).unwrap();
        let config = TabuConfig::default()
            .with_max_iterations(3)
            .with_tabu_tenure(10);
        let mut search = TabuSearch::from_solution(&inst, config, Solution::empty(1));
        // add improves, then dropping the tabu item does not aspire
        assert!(matches!(search.step(&mut NoopSink), Step::Moved(_)));
        assert_eq!(search.step(&mut NoopSink), Step::Blocked);
        assert!(search.memory().is_tabu(0));
        assert_eq!(search.best_value(), 8);
    }

    #[test]
    fn test_blocked_iteration_ages_memory() {
        let inst = ProblemInstance::new(5, vec![3], vec![8], vec![vec![0]]).unwrap();
        let config = TabuConfig::default().with_max_iterations(10).with_tabu_tenure(2);
        let mut search = TabuSearch::from_solution(&inst, config, Solution::empty(1));
        assert!(matches!(search.step(&mut NoopSink), Step::Moved(_)));
        assert_eq!(search.memory().remaining(0), 2);
        assert_eq!(search.step(&mut NoopSink), Step::Blocked);
        assert_eq!(search.memory().remaining(0), 1);
        assert_eq!(search.step(&mut NoopSink), Step::Blocked);
        assert!(!search.memory().is_tabu(0));
        // free again: the only move is dropping the item
        assert!(matches!(
            search.step(&mut NoopSink),
            Step::Moved(FlipMove { index: 0, adds: false, .. })
        ));
        assert_eq!(search.best_value(), 8);
    }

    #[test]
    fn test_sink_sees_every_improvement() {
        let inst = generate(40, 2);
        let config = TabuConfig::default().with_max_iterations(200);
        let mut sink = VecSink::default();
        let result = TabuRunner::run_with_sink(&inst, &config, &mut sink).unwrap();
        for pair in sink.events.windows(2) {
            assert!(pair[1].value > pair[0].value);
            assert!(pair[1].iteration > pair[0].iteration);
        }
        match sink.events.last() {
            Some(last) => {
                assert_eq!(last.value, result.best_value);
                assert_eq!(last.solution, result.best);
                assert_eq!(last.iteration, result.best_iteration);
            }
            None => assert_eq!(result.best_iteration, 0),
        }
    }

    #[test]
    fn test_deterministic() {
        let inst = generate(45, 13);
        let config = TabuConfig::default().with_max_iterations(250).with_tabu_tenure(5);
        let a = TabuRunner::run(&inst, &config).unwrap();
        let b = TabuRunner::run(&inst, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.best_value, b.best_value);
        assert_eq!(a.value_history, b.value_history);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let inst = generate(45, 14);
        let config = TabuConfig::default().with_max_iterations(150);
        let seq = TabuRunner::run(&inst, &config).unwrap();
        let par = TabuRunner::run(&inst, &config.clone().with_parallel(true)).unwrap();
        assert_eq!(seq.best, par.best);
        assert_eq!(seq.value_history, par.value_history);
    }

    #[test]
    fn test_improves_on_greedy_seed() {
        let inst = generate(60, 31);
        let eval = ObjectiveEvaluator::new(&inst);
        let seed_value = eval.evaluate(&greedy_construct(&inst));
        let result = TabuRunner::run(&inst, &TabuConfig::default()).unwrap();
        assert!(result.best_value >= seed_value);
    }
}
