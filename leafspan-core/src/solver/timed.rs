//! Deadline-bounded solver runs.

use std::{
    fmt, panic,
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use tracing::{info, instrument};

use crate::{cancel::CancellationToken, graph::Graph, solver::SolverKind};

/// Result of a solver run raced against a deadline.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SolveOutcome {
    /// A spanning tree with exactly `k` leaves exists.
    Found,
    /// The search completed without finding such a tree.
    NotFound,
    /// The deadline passed first; the answer is unknown.
    TimedOut,
}

impl SolveOutcome {
    /// Returns whether a matching tree was confirmed.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_found(self) -> bool { matches!(self, Self::Found) }

    /// Returns whether the deadline passed before an answer arrived.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_timed_out(self) -> bool { matches!(self, Self::TimedOut) }

    /// Returns the label printed by reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Found => "found",
            Self::NotFound => "not found",
            Self::TimedOut => "timeout",
        }
    }
}

impl fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`solve_with_timeout`] with the wall-clock time until the
/// answer (or the deadline) was observed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimedSolve {
    /// What the solver reported, or [`SolveOutcome::TimedOut`].
    pub outcome: SolveOutcome,
    /// Time from spawning the worker to observing the outcome.
    pub elapsed: Duration,
}

/// Runs `kind` on a worker thread and waits at most `timeout` for it.
///
/// When the deadline passes the worker's token is cancelled and the worker
/// is joined before returning, so no search outlives the call. A result the
/// worker sends after the deadline is discarded: a timed-out run is never
/// reported as [`SolveOutcome::NotFound`].
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use leafspan_core::{Graph, SolveOutcome, SolverKind, solve_with_timeout};
///
/// let grid = Graph::grid(3, 3)?;
/// let run = solve_with_timeout(SolverKind::BranchAndBound, &grid, 5, Duration::from_secs(30));
/// assert_eq!(run.outcome, SolveOutcome::Found);
/// # Ok::<(), leafspan_core::GraphError>(())
/// ```
#[must_use]
#[instrument(
    name = "solver.timed",
    skip(graph),
    fields(solver = kind.as_str(), timeout_ms = timeout.as_millis()),
)]
pub fn solve_with_timeout(
    kind: SolverKind,
    graph: &Graph,
    k: usize,
    timeout: Duration,
) -> TimedSolve {
    let token = CancellationToken::new();
    let started = Instant::now();

    thread::scope(|scope| {
        let (sender, receiver) = mpsc::channel();
        let worker_token = token.clone();
        let worker = scope.spawn(move || {
            let found = kind.solve(graph, k, worker_token);
            // The receiver is gone once the deadline has passed.
            sender.send(found).ok();
        });

        let outcome = match receiver.recv_timeout(timeout) {
            Ok(true) => SolveOutcome::Found,
            Ok(false) => SolveOutcome::NotFound,
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => {
                token.cancel();
                SolveOutcome::TimedOut
            }
        };
        let elapsed = started.elapsed();

        if let Err(payload) = worker.join() {
            panic::resume_unwind(payload);
        }
        if outcome.is_timed_out() {
            info!(elapsed_ms = elapsed.as_millis(), "solver timed out");
        }
        TimedSolve { outcome, elapsed }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::found(SolveOutcome::Found, "found", true)]
    #[case::not_found(SolveOutcome::NotFound, "not found", false)]
    #[case::timed_out(SolveOutcome::TimedOut, "timeout", false)]
    fn outcome_labels(#[case] outcome: SolveOutcome, #[case] label: &str, #[case] found: bool) {
        assert_eq!(outcome.as_str(), label);
        assert_eq!(outcome.to_string(), label);
        assert_eq!(outcome.is_found(), found);
    }

    #[rstest]
    fn completed_runs_report_the_solver_answer() {
        let path = Graph::from_edges(4, vec![(0, 1), (1, 2), (2, 3)]).expect("valid graph");
        for kind in SolverKind::ALL {
            let hit = solve_with_timeout(kind, &path, 2, Duration::from_secs(30));
            assert_eq!(hit.outcome, SolveOutcome::Found, "{kind}");
            let miss = solve_with_timeout(kind, &path, 3, Duration::from_secs(30));
            assert_eq!(miss.outcome, SolveOutcome::NotFound, "{kind}");
        }
    }
}
