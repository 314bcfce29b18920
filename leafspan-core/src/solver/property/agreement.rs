//! Agreement between the branch-and-bound solver and the exhaustive
//! baseline.
//!
//! The baseline enumerates every acyclic edge subset, so on graphs this
//! small it serves as the oracle for every `k` from `0` to `n + 1`.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{BaselineSolver, BranchAndBoundSolver, CancellationToken};

use super::types::GraphFixture;

/// Runs the agreement property for every `k` of the fixture.
pub(super) fn run_agreement_property(fixture: &GraphFixture) -> TestCaseResult {
    let graph = fixture.graph()?;
    for k in fixture.k_values() {
        let oracle = BaselineSolver::new(&graph, k, CancellationToken::new()).solve();
        let answer = BranchAndBoundSolver::new(&graph, k, CancellationToken::new()).solve();
        if oracle != answer {
            return Err(TestCaseError::fail(format!(
                "solvers disagree for k={k}: baseline={oracle}, branch-and-bound={answer} \
                 ({fixture})",
            )));
        }
    }
    Ok(())
}
