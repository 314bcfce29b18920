//! Decision procedures for the k-leaf spanning tree problem.
//!
//! Two independent solvers answer the same question over the same
//! [`Graph`]:
//!
//! - [`BaselineSolver`] enumerates edge subsets by inclusion/exclusion and
//!   checks the leaf count of every complete spanning tree it assembles.
//! - [`BranchAndBoundSolver`] first tries to reach a `k`-leaf tree by edge
//!   exchanges between a many-leaf and a few-leaf spanning tree, then
//!   assigns leaf/internal roles to vertices while growing a rooted tree,
//!   pruning with leaf and internal budgets, child demands, reachability and
//!   domination bounds.
//!
//! Both take a [`CancellationToken`] that is polled once per recursive call.
//! A solver is consumed by `solve`, so a cancelled instance can never be
//! reused. A cancelled run returns whatever it had confirmed so far, which is
//! `false` unless a tree was already found; callers that cancel must treat
//! that answer as unknown.

mod baseline;
mod branch_and_bound;
mod distinct;
mod interpolation;
mod timed;

#[cfg(test)]
mod property;

use std::fmt;

use crate::{cancel::CancellationToken, graph::Graph};

pub use self::{
    baseline::BaselineSolver,
    branch_and_bound::BranchAndBoundSolver,
    timed::{SolveOutcome, TimedSolve, solve_with_timeout},
};

/// Selects one of the available decision procedures at run time.
///
/// # Examples
/// ```
/// use leafspan_core::{CancellationToken, Graph, SolverKind};
///
/// let path = Graph::from_edges(4, vec![(0, 1), (1, 2), (2, 3)])?;
/// for kind in SolverKind::ALL {
///     assert!(kind.solve(&path, 2, CancellationToken::new()));
///     assert!(!kind.solve(&path, 3, CancellationToken::new()));
/// }
/// # Ok::<(), leafspan_core::GraphError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SolverKind {
    /// Exhaustive edge-subset enumeration.
    Baseline,
    /// Role-assignment branch and bound.
    BranchAndBound,
}

impl SolverKind {
    /// Every solver, baseline first.
    pub const ALL: [Self; 2] = [Self::Baseline, Self::BranchAndBound];

    /// Returns the stable name used in logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::BranchAndBound => "branch-and-bound",
        }
    }

    /// Builds the selected solver and runs it to completion or cancellation.
    #[must_use]
    pub fn solve(self, graph: &Graph, k: usize, token: CancellationToken) -> bool {
        match self {
            Self::Baseline => BaselineSolver::new(graph, k, token).solve(),
            Self::BranchAndBound => BranchAndBoundSolver::new(graph, k, token).solve(),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
