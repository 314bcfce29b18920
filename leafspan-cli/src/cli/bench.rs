//! Repeated timed runs and the statistics reported by `bench`.
//!
//! Each series runs one solver up to `runs` times under a per-run deadline
//! and stops at the first timeout. Times are whole microseconds; spread is
//! the population standard deviation.
//!
//! A comparison row puts both solvers side by side. A scalability row, used
//! when the baseline is not run at all, reports the branch-and-bound series
//! with the internal-vertex budget `N-k` instead.

use std::time::Duration;

use leafspan_core::{Graph, SolverKind, TimedSolve, solve_with_timeout};
use tracing::{info, instrument};

/// Header of a comparison row.
pub(super) const COMPARISON_HEADER: &str = "\
| Graph | N | E | k | Baseline (µs) | Branch and bound (µs) | Speed-up |
|-------|---|---|---|---------------|-----------------------|----------|";

/// Header of a scalability row.
pub(super) const SCALABILITY_HEADER: &str = "\
| Graph | N | E | k | N-k | Branch and bound (µs) (mean ± std / % found) |
|-------|---|---|---|-----|-----------------------------------------------|";

/// Summary statistics over completed runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunStats {
    /// Number of completed runs.
    pub runs: usize,
    /// Mean elapsed time in microseconds.
    pub mean_us: f64,
    /// Population standard deviation of elapsed time in microseconds.
    pub std_dev_us: f64,
    /// Share of runs that found a tree, as a percentage.
    pub found_percent: f64,
}

impl RunStats {
    /// Computes statistics over `runs`; an empty slice yields all zeros.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    ///
    /// use leafspan_cli::cli::RunStats;
    /// use leafspan_core::{SolveOutcome, TimedSolve};
    ///
    /// let run = |us, outcome| TimedSolve { outcome, elapsed: Duration::from_micros(us) };
    /// let stats = RunStats::from_runs(&[
    ///     run(100, SolveOutcome::Found),
    ///     run(300, SolveOutcome::NotFound),
    /// ]);
    /// assert_eq!(stats.mean_us, 200.0);
    /// assert_eq!(stats.std_dev_us, 100.0);
    /// assert_eq!(stats.found_percent, 50.0);
    /// ```
    #[must_use]
    pub fn from_runs(runs: &[TimedSolve]) -> Self {
        if runs.is_empty() {
            return Self {
                runs: 0,
                mean_us: 0.0,
                std_dev_us: 0.0,
                found_percent: 0.0,
            };
        }

        let count = runs.len() as f64;
        let micros: Vec<f64> = runs
            .iter()
            .map(|run| run.elapsed.as_micros() as f64)
            .collect();
        let mean_us = micros.iter().sum::<f64>() / count;
        let variance = micros
            .iter()
            .map(|value| (value - mean_us).powi(2))
            .sum::<f64>()
            / count;
        let found = runs.iter().filter(|run| run.outcome.is_found()).count();

        Self {
            runs: runs.len(),
            mean_us,
            std_dev_us: variance.sqrt(),
            found_percent: found as f64 / count * 100.0,
        }
    }
}

/// How a series of runs ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SeriesOutcome {
    /// Every run finished inside its deadline.
    Completed(RunStats),
    /// A run hit the deadline; the series stopped there.
    TimedOut {
        /// Per-run deadline that was exceeded.
        timeout: Duration,
    },
    /// The graph was too large to attempt.
    Skipped {
        /// Series only run on graphs with fewer vertices than this.
        vertex_limit: usize,
    },
}

impl SeriesOutcome {
    /// Renders the table cell: `mean ± std / found%` or the reason there
    /// are no statistics.
    #[must_use]
    pub fn cell(&self) -> String {
        match self {
            Self::Completed(stats) => format!(
                "{:.0} ± {:.0} / {:.0}%",
                stats.mean_us, stats.std_dev_us, stats.found_percent,
            ),
            Self::TimedOut { timeout } => format!("Timeout (>{timeout:?})"),
            Self::Skipped { vertex_limit } => format!("Skipped (N >= {vertex_limit})"),
        }
    }
}

/// Results of one `bench` invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchSummary {
    /// Name of the graph source.
    pub data_source: String,
    /// Vertex count of the benchmarked graph.
    pub vertices: usize,
    /// Edge count of the benchmarked graph.
    pub edges: usize,
    /// Requested leaf count.
    pub k: usize,
    /// Exhaustive baseline series; `None` when only branch and bound ran.
    pub baseline: Option<SeriesOutcome>,
    /// Branch-and-bound series.
    pub branch_and_bound: SeriesOutcome,
}

impl BenchSummary {
    /// Baseline mean over branch-and-bound mean, or `>> 1000x` when the
    /// baseline never completed.
    #[must_use]
    pub fn speed_up(&self) -> String {
        match (&self.baseline, &self.branch_and_bound) {
            (Some(SeriesOutcome::TimedOut { .. } | SeriesOutcome::Skipped { .. }), _) => {
                ">> 1000x".to_owned()
            }
            (Some(SeriesOutcome::Completed(baseline)), SeriesOutcome::Completed(fast))
                if fast.mean_us > 0.0 =>
            {
                format!("{:.1}x", baseline.mean_us / fast.mean_us)
            }
            _ => "N/A".to_owned(),
        }
    }

    /// Header matching [`BenchSummary::markdown_row`].
    #[must_use]
    pub const fn markdown_header(&self) -> &'static str {
        if self.baseline.is_some() {
            COMPARISON_HEADER
        } else {
            SCALABILITY_HEADER
        }
    }

    /// Renders the summary as one markdown table row: a comparison row when
    /// the baseline ran, a scalability row otherwise.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    ///
    /// use leafspan_cli::cli::{BenchSummary, SeriesOutcome};
    ///
    /// let summary = BenchSummary {
    ///     data_source: "dolphins".into(),
    ///     vertices: 62,
    ///     edges: 159,
    ///     k: 55,
    ///     baseline: None,
    ///     branch_and_bound: SeriesOutcome::TimedOut { timeout: Duration::from_secs(30) },
    /// };
    /// assert_eq!(summary.markdown_row(), "| dolphins | 62 | 159 | 55 | 7 | Timeout (>30s) |");
    /// ```
    #[must_use]
    pub fn markdown_row(&self) -> String {
        match &self.baseline {
            Some(baseline) => format!(
                "| {} | {} | {} | {} | {} | {} | {} |",
                self.data_source,
                self.vertices,
                self.edges,
                self.k,
                baseline.cell(),
                self.branch_and_bound.cell(),
                self.speed_up(),
            ),
            None => format!(
                "| {} | {} | {} | {} | {} | {} |",
                self.data_source,
                self.vertices,
                self.edges,
                self.k,
                self.vertices.saturating_sub(self.k),
                self.branch_and_bound.cell(),
            ),
        }
    }
}

/// Runs `kind` up to `runs` times, stopping at the first timeout.
#[instrument(
    name = "cli.bench.series",
    skip(graph),
    fields(solver = kind.as_str(), timeout_ms = timeout.as_millis()),
)]
pub(super) fn run_series(
    kind: SolverKind,
    graph: &Graph,
    k: usize,
    runs: usize,
    timeout: Duration,
) -> SeriesOutcome {
    let mut completed = Vec::with_capacity(runs);
    for run in 0..runs {
        let timed = solve_with_timeout(kind, graph, k, timeout);
        if timed.outcome.is_timed_out() {
            info!(run, "series stopped at the first timeout");
            return SeriesOutcome::TimedOut { timeout };
        }
        completed.push(timed);
    }
    SeriesOutcome::Completed(RunStats::from_runs(&completed))
}
