//! Answers are properties of the graph, not of its encoding or of how the
//! solver is driven.
//!
//! Relabelling vertices and reversing edge order must not change any
//! answer, nor may re-running a solver or running it under a generous
//! deadline.

use std::time::Duration;

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{CancellationToken, Graph, SolveOutcome, SolverKind, solve_with_timeout};

use super::{strategies::permuted, types::GraphFixture};

/// Deadline that no fixture of this suite comes close to.
const GENEROUS_DEADLINE: Duration = Duration::from_secs(60);

/// Checks answers are unchanged by a vertex relabelling and edge reversal.
pub(super) fn run_relabelling_property(fixture: &GraphFixture) -> TestCaseResult {
    let graph = fixture.graph()?;
    // Rotating labels by one moves vertex 0, which anchors the final check.
    let labels: Vec<usize> = (0..fixture.vertex_count)
        .map(|vertex| (vertex + 1) % fixture.vertex_count)
        .collect();
    let relabelled = Graph::from_edges(fixture.vertex_count, permuted(&fixture.edges, &labels))
        .map_err(|err| TestCaseError::fail(format!("relabelled graph must build: {err}")))?;

    for kind in SolverKind::ALL {
        for k in fixture.k_values() {
            let original = kind.solve(&graph, k, CancellationToken::new());
            let moved = kind.solve(&relabelled, k, CancellationToken::new());
            if original != moved {
                return Err(TestCaseError::fail(format!(
                    "{kind} changed its answer for k={k} after relabelling: \
                     {original} -> {moved} ({fixture})",
                )));
            }
        }
    }
    Ok(())
}

/// Checks repeated and deadline-bounded runs agree with a direct run.
pub(super) fn run_repeatability_property(fixture: &GraphFixture) -> TestCaseResult {
    let graph = fixture.graph()?;
    for kind in SolverKind::ALL {
        for k in fixture.k_values() {
            let first = kind.solve(&graph, k, CancellationToken::new());
            let second = kind.solve(&graph, k, CancellationToken::new());
            if first != second {
                return Err(TestCaseError::fail(format!(
                    "{kind} is not repeatable for k={k}: {first} then {second} ({fixture})",
                )));
            }

            let timed = solve_with_timeout(kind, &graph, k, GENEROUS_DEADLINE);
            let expected = if first {
                SolveOutcome::Found
            } else {
                SolveOutcome::NotFound
            };
            if timed.outcome != expected {
                return Err(TestCaseError::fail(format!(
                    "{kind} reported {} under a deadline but {first} directly for k={k} \
                     ({fixture})",
                    timed.outcome,
                )));
            }
        }
    }
    Ok(())
}
