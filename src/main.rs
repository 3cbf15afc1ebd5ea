//! synergy-tabu CLI: tabu search on an equipment-selection instance file.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use synergy_tabu::exhaustive::{solve_exhaustive, MAX_EXHAUSTIVE_ITEMS};
use synergy_tabu::instance::InstanceParser;
use synergy_tabu::tabu::{
    ChannelSink, ImprovementEvent, TabuConfig, TabuResult, TabuRunner, Tee, TracingSink,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "synergy-tabu")]
#[command(about = "Tabu search for budget-constrained equipment selection with synergy")]
#[command(version)]
struct Cli {
    /// Instance file (budget/n header, cost-power lines, synergy matrix)
    instance: PathBuf,

    /// Iteration limit, or seconds when --time is given
    limit: u64,

    /// Number of iterations a flipped item stays tabu
    tabu_tenure: usize,

    /// Interpret LIMIT as a wall-clock limit in seconds
    #[arg(long)]
    time: bool,

    /// Append one line per improvement to this file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Evaluate neighborhoods on a thread pool (needs the `parallel` feature)
    #[arg(long)]
    parallel: bool,

    /// Fold asymmetric synergy matrices instead of rejecting them
    #[arg(long)]
    symmetrize: bool,

    /// Also solve exactly (small instances only) and report the gap
    #[arg(long)]
    verify: bool,
}

/// Search bound selected on the command line.
#[derive(Debug, Clone, Copy)]
enum Budget {
    Iterations(usize),
    Seconds(u64),
}

impl Budget {
    fn apply(self, config: TabuConfig) -> TabuConfig {
        match self {
            Budget::Iterations(n) => config.with_max_iterations(n),
            Budget::Seconds(s) => config
                .without_iteration_limit()
                .with_time_limit(Duration::from_secs(s)),
        }
    }
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    enable_tracing();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let instance = InstanceParser::new()
        .with_symmetrize(cli.symmetrize)
        .parse_file(&cli.instance)
        .with_context(|| format!("failed to load {}", cli.instance.display()))?;

    tracing::info!(
        file = %cli.instance.display(),
        n = instance.n(),
        budget = instance.budget(),
        "instance loaded"
    );

    let budget = if cli.time {
        Budget::Seconds(cli.limit)
    } else {
        Budget::Iterations(usize::try_from(cli.limit).context("iteration limit too large")?)
    };
    let config = budget
        .apply(TabuConfig::default())
        .with_tabu_tenure(cli.tabu_tenure)
        .with_parallel(cli.parallel);
    if cli.parallel && cfg!(not(feature = "parallel")) {
        tracing::warn!("built without the `parallel` feature; evaluating sequentially");
    }

    let result = match &cli.log {
        Some(path) => {
            let (tx, rx) = mpsc::channel();
            let writer = spawn_log_writer(path, rx)?;
            let mut sink = Tee(TracingSink, ChannelSink::new(tx));
            let result = TabuRunner::run_with_sink(&instance, &config, &mut sink);
            // closing the channel lets the writer drain and exit
            drop(sink);
            if writer.join().is_err() {
                tracing::warn!("improvement log writer panicked");
            }
            result?
        }
        None => TabuRunner::run_with_sink(&instance, &config, &mut TracingSink)?,
    };

    print_result(&result, instance.budget());

    if cli.verify {
        if instance.n() > MAX_EXHAUSTIVE_ITEMS {
            tracing::warn!(
                n = instance.n(),
                max = MAX_EXHAUSTIVE_ITEMS,
                "instance too large to verify exhaustively"
            );
        } else {
            let exact = solve_exhaustive(&instance)?;
            println!(
                "optimum:     {} (gap {}) in {:.2}s",
                exact.best_value,
                exact.best_value - result.best_value,
                exact.elapsed.as_secs_f64()
            );
        }
    }

    Ok(())
}

fn print_result(result: &TabuResult, budget: i64) {
    println!("selected:    {}", result.best);
    println!("value:       {}", result.best_value);
    println!("cost:        {} / {}", result.best.total_cost(), budget);
    println!(
        "iterations:  {} (best at {})",
        result.iterations, result.best_iteration
    );
    println!("termination: {}", result.termination);
    println!("elapsed:     {:.2}s", result.elapsed.as_secs_f64());
}

/// Appends improvements to `path` on a background thread. Write failures are
/// logged and the remaining events are discarded.
fn spawn_log_writer(
    path: &Path,
    rx: mpsc::Receiver<ImprovementEvent>,
) -> anyhow::Result<JoinHandle<()>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    Ok(thread::spawn(move || {
        let mut out = BufWriter::new(file);
        for event in rx {
            let line = writeln!(
                out,
                "iteration={} value={} elapsed={:.3}s selected={}",
                event.iteration,
                event.value,
                event.elapsed.as_secs_f64(),
                event.solution
            );
            if let Err(e) = line {
                tracing::warn!(error = %e, "improvement log write failed");
                return;
            }
        }
        if let Err(e) = out.flush() {
            tracing::warn!(error = %e, "improvement log flush failed");
        }
    }))
}
